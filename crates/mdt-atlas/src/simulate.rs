//! Context resolution simulator
//!
//! Selects the resolver for a tool, runs it over the tree and annotates the
//! result with scan-risk heuristics and shadowed instruction files.

use crate::config::SimulatorConfig;
use crate::resolvers::{self, instruction_owners, layout};
use crate::tool::{format_tool_list, ToolId};
use crate::types::{
    codes, LoadedFile, ShadowedFile, SimulationInput, SimulationResult, SimulationWarning,
};
use mdt_tree::{ancestor_dirs, join_dir_file, normalize_path, TreeIndex};
use std::collections::HashSet;
use tracing::debug;

/// Simulate which files `input.tool` loads, with default thresholds
#[must_use]
pub fn simulate_context_resolution(input: &SimulationInput<'_>) -> SimulationResult {
    simulate_with_config(input, &SimulatorConfig::default())
}

/// Simulate which files `input.tool` loads
#[must_use]
pub fn simulate_with_config(
    input: &SimulationInput<'_>,
    config: &SimulatorConfig,
) -> SimulationResult {
    let index = input.tree.index();
    let cwd = normalize_path(input.cwd);

    let resolution = resolvers::resolve(input.tool, &index, &cwd);
    let mut warnings = scan_warnings(&index, config);
    warnings.extend(resolution.warnings);

    let loaded = dedupe_loaded(resolution.loaded);
    let shadowed = shadowed_files(input.tool, &cwd, &index, &loaded);

    debug!(
        tool = %input.tool,
        cwd = %cwd,
        loaded = loaded.len(),
        warnings = warnings.len(),
        shadowed = shadowed.len(),
        "simulated context resolution"
    );

    SimulationResult {
        loaded,
        warnings,
        shadowed,
    }
}

fn scan_warnings(index: &TreeIndex<'_>, config: &SimulatorConfig) -> Vec<SimulationWarning> {
    let mut warnings = Vec::new();

    let total = index.len();
    if total > config.large_tree_threshold {
        warnings.push(SimulationWarning::new(
            codes::LARGE_TREE,
            format!("Tree contains {total} files; downward scans may explode context."),
        ));
    }

    let cursor_rules = index
        .paths()
        .filter(|path| path.starts_with(layout::CURSOR_RULES_DIR))
        .count();
    if cursor_rules > config.cursor_rules_threshold {
        warnings.push(SimulationWarning::new(
            codes::CURSOR_RULES,
            format!(".cursor/rules contains {cursor_rules} files."),
        ));
    }

    warnings
}

fn dedupe_loaded(items: Vec<LoadedFile>) -> Vec<LoadedFile> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.path.clone()))
        .collect()
}

fn is_ancestor_file(path: &str, cwd: &str, file_name: &str) -> bool {
    ancestor_dirs(cwd)
        .iter()
        .any(|dir| join_dir_file(dir, file_name) == path)
}

fn outside_cwd_reason(tool: ToolId) -> Option<(&'static [&'static str], String)> {
    let (files, file_label): (&'static [&'static str], &str) = match tool {
        ToolId::CodexCli => (&[layout::AGENTS, layout::AGENTS_OVERRIDE], layout::AGENTS),
        ToolId::ClaudeCode => (&[layout::CLAUDE], layout::CLAUDE),
        ToolId::GeminiCli => (&[layout::GEMINI], layout::GEMINI),
        ToolId::GithubCopilot | ToolId::CopilotCli | ToolId::Cursor => return None,
    };
    let tool_name = match tool {
        ToolId::ClaudeCode => "Claude",
        ToolId::GeminiCli => "Gemini",
        other => other.label(),
    };
    Some((
        files,
        format!(
            "Outside current directory; {tool_name} loads {file_label} files from repo root to cwd."
        ),
    ))
}

fn shadowed_files(
    tool: ToolId,
    cwd: &str,
    index: &TreeIndex<'_>,
    loaded: &[LoadedFile],
) -> Vec<ShadowedFile> {
    let loaded_paths: HashSet<&str> = loaded.iter().map(|file| file.path.as_str()).collect();
    let mut out = Vec::new();

    for path in index.sorted_paths() {
        if loaded_paths.contains(path) {
            continue;
        }
        let owners = instruction_owners(path);
        if owners.is_empty() {
            continue;
        }

        let reason = if !owners.contains(&tool) {
            format!("Used by {}.", format_tool_list(owners))
        } else if let Some((files, outside)) = outside_cwd_reason(tool) {
            if files.iter().any(|file| is_ancestor_file(path, cwd, file)) {
                // In the ancestry but not loaded: a base file replaced by its override
                format!(
                    "Replaced by {} in the same directory.",
                    layout::AGENTS_OVERRIDE
                )
            } else {
                outside
            }
        } else {
            "Ignored by current tool rules.".to_string()
        };

        out.push(ShadowedFile {
            path: path.to_string(),
            reason,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdt_tree::RepoTree;

    #[test]
    fn large_tree_threshold_is_strict() {
        let tree = RepoTree::from_paths((0..25).map(|i| format!("src/f{i}.rs")));
        let input = SimulationInput::new(ToolId::CodexCli, &tree, "");
        assert!(!simulate_context_resolution(&input).has_warning(codes::LARGE_TREE));

        let bigger = tree.clone().with_file("src/extra.rs", "");
        let input = SimulationInput::new(ToolId::CodexCli, &bigger, "");
        let result = simulate_context_resolution(&input);
        assert!(result.has_warning(codes::LARGE_TREE));
        assert_eq!(
            result.warnings[0].message,
            "Tree contains 26 files; downward scans may explode context."
        );
    }

    #[test]
    fn custom_config_thresholds() {
        let tree = RepoTree::from_paths([".cursor/rules/a.mdc", ".cursor/rules/b.mdc"]);
        let input = SimulationInput::new(ToolId::Cursor, &tree, "");
        let config = SimulatorConfig::new().with_cursor_rules_threshold(1);
        let result = simulate_with_config(&input, &config);
        assert!(result.has_warning(codes::CURSOR_RULES));
    }

    #[test]
    fn shadowed_reasons() {
        let tree = RepoTree::from_paths([
            "AGENTS.md",
            "apps/api/AGENTS.md",
            "apps/web/AGENTS.md",
            "apps/web/AGENTS.override.md",
            "CLAUDE.md",
            "README.md",
        ]);
        let input = SimulationInput::new(ToolId::CodexCli, &tree, "apps/web");
        let result = simulate_context_resolution(&input);

        let shadowed: Vec<(&str, &str)> = result
            .shadowed
            .iter()
            .map(|file| (file.path.as_str(), file.reason.as_str()))
            .collect();
        assert_eq!(
            shadowed,
            vec![
                ("CLAUDE.md", "Used by Claude Code."),
                (
                    "apps/api/AGENTS.md",
                    "Outside current directory; Codex CLI loads AGENTS.md files from repo root to cwd."
                ),
                (
                    "apps/web/AGENTS.md",
                    "Replaced by AGENTS.override.md in the same directory."
                ),
            ]
        );
    }

    #[test]
    fn copilot_shadows_other_scoped_dir() {
        let tree = RepoTree::from_paths([".github/copilot-instructions/a.instructions.md"]);
        let input = SimulationInput::new(ToolId::GithubCopilot, &tree, "");
        let result = simulate_context_resolution(&input);
        assert!(result.loaded.is_empty());
        assert_eq!(result.shadowed[0].reason, "Used by Copilot CLI.");
    }

    #[test]
    fn cwd_is_normalized() {
        let tree = RepoTree::from_paths(["AGENTS.md", "apps/web/AGENTS.md"]);
        let input = SimulationInput::new(ToolId::CodexCli, &tree, ".\\apps\\web\\");
        assert_eq!(
            simulate_context_resolution(&input).loaded_paths(),
            vec!["AGENTS.md", "apps/web/AGENTS.md"]
        );
    }
}
