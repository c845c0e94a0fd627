//! GitHub Copilot and Copilot CLI resolvers

use super::layout::{
    AGENT_SUFFIX, COPILOT_AGENTS_DIR, COPILOT_CLI_SCOPED_DIR, COPILOT_ROOT, COPILOT_SCOPED_DIR,
    INSTRUCTIONS_SUFFIX,
};
use super::{under, Resolution};
use mdt_tree::TreeIndex;

const REPO_REASON: &str = "repo instructions (.github/copilot-instructions.md)";
const SCOPED_REASON: &str = "scoped instructions (.github/instructions/*.instructions.md)";
const CLI_SCOPED_REASON: &str =
    "scoped instructions (.github/copilot-instructions/*.instructions.md)";
const AGENT_REASON: &str = "agent profile (.github/agents/*.agent.md)";

pub(super) fn resolve_github_copilot(index: &TreeIndex<'_>) -> Resolution {
    let mut resolution = Resolution::default();
    load_root(index, &mut resolution);
    for path in index.matching(|path| under(path, COPILOT_SCOPED_DIR, INSTRUCTIONS_SUFFIX)) {
        resolution.load(path, SCOPED_REASON);
    }
    resolution
}

/// Root file, then scoped files, then agent profiles
pub(super) fn resolve_copilot_cli(index: &TreeIndex<'_>) -> Resolution {
    let mut resolution = Resolution::default();
    load_root(index, &mut resolution);
    for path in index.matching(|path| under(path, COPILOT_CLI_SCOPED_DIR, INSTRUCTIONS_SUFFIX)) {
        resolution.load(path, CLI_SCOPED_REASON);
    }
    for path in index.matching(|path| under(path, COPILOT_AGENTS_DIR, AGENT_SUFFIX)) {
        resolution.load(path, AGENT_REASON);
    }
    resolution
}

fn load_root(index: &TreeIndex<'_>, resolution: &mut Resolution) {
    if index.has(COPILOT_ROOT) {
        resolution.load(COPILOT_ROOT, REPO_REASON);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdt_tree::RepoTree;

    fn tree() -> RepoTree {
        RepoTree::from_paths([
            ".github/agents/reviewer.agent.md",
            ".github/instructions/web.instructions.md",
            ".github/copilot-instructions/api.instructions.md",
            ".github/copilot-instructions.md",
            ".github/instructions/notes.md",
        ])
    }

    #[test]
    fn github_copilot_root_then_scoped() {
        let tree = tree();
        let index = tree.index();
        let resolution = resolve_github_copilot(&index);
        let paths: Vec<_> = resolution.loaded.iter().map(|file| file.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                ".github/copilot-instructions.md",
                ".github/instructions/web.instructions.md"
            ]
        );
    }

    #[test]
    fn copilot_cli_concatenates_three_sets() {
        let tree = tree();
        let index = tree.index();
        let resolution = resolve_copilot_cli(&index);
        let paths: Vec<_> = resolution.loaded.iter().map(|file| file.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                ".github/copilot-instructions.md",
                ".github/copilot-instructions/api.instructions.md",
                ".github/agents/reviewer.agent.md"
            ]
        );
    }
}
