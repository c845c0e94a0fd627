//! Markdowntown repository trees
//!
//! Pure, in-memory view of a scanned repository and the path arithmetic the
//! instruction resolvers share.
//!
//! # Core Concepts
//!
//! - [`RepoTree`]: ordered `(path, content)` pairs produced by a scanner
//! - [`TreeIndex`]: normalized lookup view over a tree
//! - [`RepoPath`]: segment-based repo-relative path with `..` resolution
//!
//! # Example
//!
//! ```rust
//! use mdt_tree::{ancestor_dirs, RepoTree};
//!
//! let tree = RepoTree::default().with_file("apps/AGENTS.md", "# Apps");
//! assert!(tree.index().has("./apps/AGENTS.md"));
//! assert_eq!(ancestor_dirs("apps/web"), vec!["", "apps", "apps/web"]);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod path;
mod tree;

pub use path::{
    ancestor_dirs, dir_name, is_named_file, join_dir_file, normalize_path, resolve_relative, PathError,
    RepoPath,
};
pub use tree::{RepoFile, RepoTree, TreeIndex};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn normalize_is_idempotent(raw in "[a-z./\\\\]{0,24}") {
            let once = normalize_path(&raw);
            prop_assert_eq!(normalize_path(&once), once);
        }

        #[test]
        fn ancestors_end_at_cwd(parts in proptest::collection::vec("[a-z]{1,6}", 0..5)) {
            let cwd = parts.join("/");
            let dirs = ancestor_dirs(&cwd);
            prop_assert_eq!(dirs.len(), parts.len() + 1);
            prop_assert_eq!(dirs.first().map(String::as_str), Some(""));
            prop_assert_eq!(dirs.last().cloned(), Some(cwd));
        }
    }
}
