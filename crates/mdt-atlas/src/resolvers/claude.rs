//! Claude Code memory resolver

use super::ancestor::existing_ancestor_files;
use super::layout::CLAUDE;
use super::Resolution;
use crate::imports::{ImportIssueKind, ImportWalker};
use crate::types::codes;
use mdt_tree::TreeIndex;

const MEMORY_REASON: &str = "directory memory (CLAUDE.md)";

/// Ancestor walk over `CLAUDE.md`, each followed by its expanded imports
pub(super) fn resolve(index: &TreeIndex<'_>, cwd: &str) -> Resolution {
    let mut resolution = Resolution::default();
    let mut walker = ImportWalker::new(index);

    for memory in existing_ancestor_files(index, cwd, CLAUDE) {
        let imported = walker.expand(&memory);
        resolution.load(memory, MEMORY_REASON);
        for file in imported {
            let reason = format!("claude import (@{} in {})", file.raw_path, file.source_path);
            resolution.load(file.path, &reason);
        }
    }

    for issue in walker.issues() {
        if issue.kind == ImportIssueKind::Circular {
            resolution.warn(
                codes::CLAUDE_IMPORT_CIRCULAR,
                format!(
                    "Circular import dropped: {} imports {} which is already being loaded.",
                    issue.source_path, issue.resolved_path
                ),
            );
        }
    }

    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdt_tree::RepoTree;

    #[test]
    fn imports_follow_their_memory_file() {
        let tree = RepoTree::default()
            .with_file("CLAUDE.md", "@docs/overview.md\n@prompts/base.md")
            .with_file("docs/overview.md", "@../prompts/shared.md")
            .with_file("prompts/shared.md", "shared")
            .with_file("prompts/base.md", "base")
            .with_file("apps/CLAUDE.md", "app memory");
        let index = tree.index();

        let resolution = resolve(&index, "apps");
        let paths: Vec<_> = resolution.loaded.iter().map(|file| file.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "CLAUDE.md",
                "docs/overview.md",
                "prompts/shared.md",
                "prompts/base.md",
                "apps/CLAUDE.md"
            ]
        );
        assert_eq!(
            resolution.loaded[2].reason,
            "claude import (@../prompts/shared.md in docs/overview.md)"
        );
    }

    #[test]
    fn cycle_emits_warning() {
        let tree = RepoTree::default()
            .with_file("CLAUDE.md", "@a.md")
            .with_file("a.md", "@CLAUDE.md");
        let index = tree.index();

        let resolution = resolve(&index, "");
        assert_eq!(resolution.loaded.len(), 2);
        assert_eq!(resolution.warnings.len(), 1);
        assert_eq!(resolution.warnings[0].code, codes::CLAUDE_IMPORT_CIRCULAR);
    }
}
