//! End-to-end resolution scenarios

use mdt_atlas::{
    codes, compute_instruction_diagnostics, compute_next_steps, compute_simulator_insights,
    detect_tool, extra_instruction_files, simulate_context_resolution, ActionId,
    DetectionConfidence, NextStepSeverity, NextStepsInput, RepoSource, SimulationInput, ToolId,
};
use mdt_test_utils::{ancestor_tree, claude_import_tree, deep_tree, mixed_tree};
use mdt_tree::RepoTree;
use pretty_assertions::assert_eq;

#[test]
fn codex_walks_ancestors_and_prefers_override() {
    let tree = ancestor_tree();
    let result = simulate_context_resolution(&SimulationInput::new(ToolId::CodexCli, &tree, "apps/web"));
    assert_eq!(
        result.loaded_paths(),
        vec!["AGENTS.md", "apps/AGENTS.md", "apps/web/AGENTS.override.md"]
    );
    assert!(result.warnings.is_empty());
}

#[test]
fn codex_cwd_outside_tree_still_loads_root() {
    let tree = ancestor_tree();
    let result =
        simulate_context_resolution(&SimulationInput::new(ToolId::CodexCli, &tree, "./libs/core/"));
    assert_eq!(result.loaded_paths(), vec!["AGENTS.md"]);
}

#[test]
fn claude_imports_expand_depth_first() {
    let tree = claude_import_tree();
    let result = simulate_context_resolution(&SimulationInput::new(ToolId::ClaudeCode, &tree, ""));
    assert_eq!(
        result.loaded_paths(),
        vec![
            "CLAUDE.md",
            "docs/overview.md",
            "prompts/shared.md",
            "prompts/base.md"
        ]
    );
    assert!(!result.has_warning(codes::CLAUDE_IMPORT_CIRCULAR));
}

#[test]
fn claude_imports_keep_underscores_and_stars() {
    let tree = RepoTree::default()
        .with_file("CLAUDE.md", "@src/__init__.md\n@notes/*draft*.md")
        .with_file("src/__init__.md", "init")
        .with_file("notes/*draft*.md", "draft");
    let input = SimulationInput::new(ToolId::ClaudeCode, &tree, "");
    let result = simulate_context_resolution(&input);
    assert_eq!(
        result.loaded_paths(),
        vec!["CLAUDE.md", "src/__init__.md", "notes/*draft*.md"]
    );
    assert!(!compute_instruction_diagnostics(&input).has("claude-import.missing"));
}

#[test]
fn cursor_legacy_file_warns_with_and_without_rules() {
    let legacy_only = RepoTree::from_paths([".cursorrules"]);
    let result = simulate_context_resolution(&SimulationInput::new(ToolId::Cursor, &legacy_only, ""));
    assert_eq!(result.loaded_paths(), vec![".cursorrules"]);
    assert!(result.has_warning(codes::DEPRECATED_CURSORRULES));

    let both = RepoTree::from_paths([".cursorrules", ".cursor/rules/style.mdc"]);
    let result = simulate_context_resolution(&SimulationInput::new(ToolId::Cursor, &both, ""));
    assert_eq!(result.loaded_paths(), vec![".cursor/rules/style.mdc", ".cursorrules"]);
    let warning = result
        .warnings
        .iter()
        .find(|warning| warning.code == codes::DEPRECATED_CURSORRULES)
        .unwrap();
    assert_eq!(warning.message, "Legacy .cursorrules found alongside .cursor/rules.");
}

#[test]
fn resolution_does_not_touch_its_input() {
    let tree = mixed_tree();
    let snapshot = tree.clone();
    for tool in ToolId::ALL {
        let input = SimulationInput::new(tool, &tree, "src");
        let first = simulate_context_resolution(&input);
        let _ = compute_simulator_insights(&input);
        let _ = compute_instruction_diagnostics(&input);
        assert_eq!(first, simulate_context_resolution(&input));
    }
    assert_eq!(tree, snapshot);
}

#[test]
fn large_tree_raises_scan_risk() {
    let tree = deep_tree(40).with_file("AGENTS.md", "");
    let result = simulate_context_resolution(&SimulationInput::new(ToolId::CodexCli, &tree, "src"));
    assert!(result.has_warning(codes::LARGE_TREE));
}

#[test]
fn other_tool_files_are_extra() {
    let tree = mixed_tree();
    let extra = extra_instruction_files(ToolId::CodexCli, &tree);
    assert!(extra.contains(&"CLAUDE.md".to_string()));
    assert!(!extra.contains(&"AGENTS.md".to_string()));
    assert!(!extra.contains(&"src/main.rs".to_string()));
}

#[test]
fn empty_scan_yields_single_no_scan_step() {
    let tree = RepoTree::default();
    let input = SimulationInput::new(ToolId::CodexCli, &tree, "");
    let diagnostics = compute_instruction_diagnostics(&input);
    let insights = compute_simulator_insights(&input);

    let steps = compute_next_steps(&NextStepsInput {
        tool: ToolId::CodexCli,
        repo_source: RepoSource::Folder,
        repo_file_count: 0,
        is_stale: false,
        diagnostics: &diagnostics,
        warnings: &[],
        insights: &insights,
        extra_files: &[],
        scan_error: None,
        truncated: false,
    });
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].id, "no-scan");
    assert_eq!(
        steps[0].primary_action.as_ref().map(|action| action.id),
        Some(ActionId::ScanFolder)
    );
}

#[test]
fn clean_layout_is_ready() {
    let tree = RepoTree::from_paths(["AGENTS.md", "src/main.rs"]);
    let input = SimulationInput::new(ToolId::CodexCli, &tree, "src");
    let result = simulate_context_resolution(&input);
    let diagnostics = compute_instruction_diagnostics(&input);
    let insights = compute_simulator_insights(&input);
    let extra = extra_instruction_files(ToolId::CodexCli, &tree);

    let steps = compute_next_steps(&NextStepsInput {
        tool: ToolId::CodexCli,
        repo_source: RepoSource::Folder,
        repo_file_count: tree.len(),
        is_stale: false,
        diagnostics: &diagnostics,
        warnings: &result.warnings,
        insights: &insights,
        extra_files: &extra,
        scan_error: None,
        truncated: false,
    });

    let ready = steps.last().unwrap();
    assert_eq!(ready.severity, NextStepSeverity::Ready);
    assert_eq!(
        ready.primary_action.as_ref().map(|action| action.id),
        Some(ActionId::OpenWorkbench)
    );
    let secondary: Vec<ActionId> = ready.secondary_actions.iter().map(|action| action.id).collect();
    assert_eq!(secondary, vec![ActionId::CopySummary, ActionId::DownloadReport]);
}

#[test]
fn copilot_root_file_alone_is_exactly_ready() {
    let tree = RepoTree::from_paths([".github/copilot-instructions.md"]);
    let input = SimulationInput::new(ToolId::GithubCopilot, &tree, "");
    let result = simulate_context_resolution(&input);
    let diagnostics = compute_instruction_diagnostics(&input);
    let insights = compute_simulator_insights(&input);
    let extra = extra_instruction_files(ToolId::GithubCopilot, &tree);

    let steps = compute_next_steps(&NextStepsInput {
        tool: ToolId::GithubCopilot,
        repo_source: RepoSource::Folder,
        repo_file_count: tree.len(),
        is_stale: false,
        diagnostics: &diagnostics,
        warnings: &result.warnings,
        insights: &insights,
        extra_files: &extra,
        scan_error: None,
        truncated: false,
    });

    let ids: Vec<&str> = steps.iter().map(|step| step.id.as_str()).collect();
    assert_eq!(ids, vec!["ready"]);
    let secondary: Vec<ActionId> = steps[0]
        .secondary_actions
        .iter()
        .map(|action| action.id)
        .collect();
    assert_eq!(secondary, vec![ActionId::CopySummary, ActionId::DownloadReport]);
}

#[test]
fn detection_picks_cursor_from_rules() {
    let detection = detect_tool(&[".cursor/rules/a.mdc", ".cursor/rules/b.mdc", "README.md"]);
    assert_eq!(detection.tool, Some(ToolId::Cursor));
    assert_ne!(detection.confidence, DetectionConfidence::None);
}
