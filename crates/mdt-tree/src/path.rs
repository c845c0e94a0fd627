//! Repo-relative paths
//!
//! Provides [`RepoPath`] plus the string helpers the resolvers use for
//! ancestor-walk arithmetic. All paths are forward-slash and repo-relative;
//! the empty string is the repository root.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Path within a repository tree
///
/// Stored as directory/file segments. The root is the empty path.
///
/// # Examples
/// - `apps/web/AGENTS.md` → `["apps", "web", "AGENTS.md"]`
/// - `./apps\web/` → `["apps", "web"]`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RepoPath(Vec<String>);

impl RepoPath {
    /// Create new path from segments
    #[inline]
    #[must_use]
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Empty path (repository root)
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from raw caller input, normalizing separators
    ///
    /// Backslashes become `/`, empty and `.` segments are dropped. `..`
    /// segments are kept verbatim; use [`RepoPath::resolve`] to fold them.
    #[must_use]
    pub fn lossy(raw: &str) -> Self {
        let replaced = raw.replace('\\', "/");
        Self(
            replaced
                .split('/')
                .filter(|seg| !seg.is_empty() && *seg != ".")
                .map(str::to_string)
                .collect(),
        )
    }

    /// Get path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Get number of segments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if path is the repository root
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Get parent directory (if not root)
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Last segment (if not root)
    #[inline]
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Append a segment, returning new path
    #[inline]
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut new = self.clone();
        new.0.push(segment.into());
        new
    }

    /// Check if this path is a prefix of another
    #[inline]
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        if self.0.len() > other.0.len() {
            return false;
        }
        self.0 == other.0[..self.0.len()]
    }

    /// Every directory from the root down to and including `self`
    ///
    /// `apps/web` yields `["", "apps", "apps/web"]`.
    #[must_use]
    pub fn ancestors_inclusive(&self) -> Vec<Self> {
        (0..=self.0.len())
            .map(|end| Self(self.0[..end].to_vec()))
            .collect()
    }

    /// Resolve a reference relative to this directory
    ///
    /// A leading `/` anchors the reference at the repository root.
    ///
    /// # Errors
    /// Returns [`PathError::OutsideRoot`] if `..` climbs above the root.
    pub fn resolve(&self, reference: &str) -> Result<Self, PathError> {
        match self.fold(reference) {
            (path, false) => Ok(path),
            (_, true) => Err(PathError::OutsideRoot {
                reference: reference.to_string(),
            }),
        }
    }

    /// Resolve like [`RepoPath::resolve`], ignoring `..` segments at the root
    ///
    /// Used to report where an escaping reference would have landed.
    #[must_use]
    pub fn resolve_clamped(&self, reference: &str) -> Self {
        self.fold(reference).0
    }

    fn fold(&self, reference: &str) -> (Self, bool) {
        let normalized = reference.replace('\\', "/");
        let mut stack = if normalized.starts_with('/') {
            Vec::new()
        } else {
            self.0.clone()
        };
        let mut escaped = false;

        for segment in normalized.split('/') {
            match segment {
                "" | "." => {}
                ".." => escaped |= stack.pop().is_none(),
                other => stack.push(other.to_string()),
            }
        }

        (Self(stack), escaped)
    }

    /// Join segments with `/`
    #[inline]
    #[must_use]
    pub fn as_string(&self) -> String {
        self.0.join("/")
    }
}

impl Display for RepoPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

impl FromStr for RepoPath {
    type Err = PathError;

    /// Strict parse: rejects absolute paths, drive letters and `..`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let replaced = s.replace('\\', "/");
        if replaced.starts_with('/') {
            return Err(PathError::Absolute(s.to_string()));
        }
        let bytes = replaced.as_bytes();
        if bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
            return Err(PathError::Absolute(s.to_string()));
        }

        let path = Self::lossy(&replaced);
        if path.0.iter().any(|seg| seg == "..") {
            return Err(PathError::ParentSegment(s.to_string()));
        }
        Ok(path)
    }
}

impl Default for RepoPath {
    fn default() -> Self {
        Self::root()
    }
}

/// Errors related to repo paths
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Reference climbs above the repository root
    #[error("reference '{reference}' resolves outside the repository root")]
    OutsideRoot {
        /// The raw reference
        reference: String,
    },

    /// Absolute or drive-qualified path
    #[error("path '{0}' is absolute")]
    Absolute(String),

    /// Path contains a `..` segment
    #[error("path '{0}' contains a parent segment")]
    ParentSegment(String),
}

/// Normalize a caller-supplied path or cwd
///
/// Collapses backslashes to `/`, strips leading `./` and trailing slashes.
/// `"."` and `""` both normalize to the root (`""`).
#[must_use]
pub fn normalize_path(value: &str) -> String {
    RepoPath::lossy(value).as_string()
}

/// Directories from the root down to `cwd`, root first
#[must_use]
pub fn ancestor_dirs(cwd: &str) -> Vec<String> {
    RepoPath::lossy(cwd)
        .ancestors_inclusive()
        .iter()
        .map(RepoPath::as_string)
        .collect()
}

/// Resolve `reference` against `base_dir`, returning a normalized path string
///
/// # Errors
/// Returns [`PathError::OutsideRoot`] if the reference climbs above the root.
pub fn resolve_relative(base_dir: &str, reference: &str) -> Result<String, PathError> {
    RepoPath::lossy(base_dir)
        .resolve(reference)
        .map(|path| path.as_string())
}

/// Join a directory and a file name (root directory is `""`)
#[must_use]
pub fn join_dir_file(dir: &str, file_name: &str) -> String {
    if dir.is_empty() {
        file_name.to_string()
    } else {
        format!("{dir}/{file_name}")
    }
}

/// Directory portion of a path (`""` for root-level files)
#[must_use]
pub fn dir_name(path: &str) -> &str {
    path.rfind('/').map_or("", |idx| &path[..idx])
}

/// True if `path` is `file_name` at the root or in any directory
#[must_use]
pub fn is_named_file(path: &str, file_name: &str) -> bool {
    path == file_name
        || path
            .strip_suffix(file_name)
            .is_some_and(|rest| rest.ends_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_dot_prefix_and_trailing_slash() {
        assert_eq!(normalize_path("./apps\\web/"), "apps/web");
        assert_eq!(normalize_path("././a//b"), "a/b");
        assert_eq!(normalize_path("."), "");
        assert_eq!(normalize_path(""), "");
    }

    #[test]
    fn ancestors_root_first() {
        assert_eq!(ancestor_dirs("apps/web"), vec!["", "apps", "apps/web"]);
        assert_eq!(ancestor_dirs(""), vec![""]);
    }

    #[test]
    fn join_and_dir_name() {
        assert_eq!(join_dir_file("", "AGENTS.md"), "AGENTS.md");
        assert_eq!(join_dir_file("apps", "AGENTS.md"), "apps/AGENTS.md");
        assert_eq!(dir_name("a/b/c.md"), "a/b");
        assert_eq!(dir_name("c.md"), "");
    }

    #[test]
    fn named_file_requires_segment_boundary() {
        assert!(is_named_file("AGENTS.md", "AGENTS.md"));
        assert!(is_named_file("apps/AGENTS.md", "AGENTS.md"));
        assert!(!is_named_file("apps/MYAGENTS.md", "AGENTS.md"));
    }

    #[test]
    fn resolve_relative_parent() {
        let base = RepoPath::lossy("docs");
        let resolved = base.resolve("../prompts/shared.md").unwrap();
        assert_eq!(resolved.to_string(), "prompts/shared.md");
    }

    #[test]
    fn resolve_relative_from_dir_string() {
        assert_eq!(resolve_relative("a/b", "./c.md").unwrap(), "a/b/c.md");
        assert_eq!(resolve_relative("", "x/../y.md").unwrap(), "y.md");
        assert!(resolve_relative("", "../y.md").is_err());
    }

    #[test]
    fn resolve_rooted_reference() {
        let base = RepoPath::lossy("a/b");
        assert_eq!(base.resolve("/x.md").unwrap().to_string(), "x.md");
    }

    #[test]
    fn resolve_outside_root_fails() {
        let base = RepoPath::lossy("docs");
        let result = base.resolve("../../x.md");
        assert!(matches!(result, Err(PathError::OutsideRoot { .. })));
        assert_eq!(base.resolve_clamped("../../x.md").to_string(), "x.md");
    }

    #[test]
    fn strict_parse_rejects_escapes() {
        assert!(matches!("../x".parse::<RepoPath>(), Err(PathError::ParentSegment(_))));
        assert!(matches!("/etc/x".parse::<RepoPath>(), Err(PathError::Absolute(_))));
        assert!(matches!("C:\\x".parse::<RepoPath>(), Err(PathError::Absolute(_))));
        assert_eq!("./a/b".parse::<RepoPath>().unwrap().to_string(), "a/b");
    }

    #[test]
    fn parent_and_prefix() {
        let path = RepoPath::lossy("a/b/c");
        assert_eq!(path.parent().unwrap().to_string(), "a/b");
        assert!(RepoPath::lossy("a/b").is_prefix_of(&path));
        assert!(!RepoPath::lossy("a/x").is_prefix_of(&path));
        assert!(RepoPath::root().parent().is_none());
        assert_eq!(path.file_name(), Some("c"));
        assert_eq!(RepoPath::root().child("x").to_string(), "x");
    }
}
