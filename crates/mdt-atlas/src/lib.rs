//! Markdowntown instruction atlas
//!
//! Simulates which agent instruction files an assistant tool loads from a
//! repository tree, and explains the result.
//!
//! # Core Concepts
//!
//! - [`ToolId`]: closed set of supported tools
//! - [`simulate_context_resolution`]: ordered loaded files, warnings, shadowed files
//! - [`compute_simulator_insights`]: expected locations, found and missing files
//! - [`compute_instruction_diagnostics`]: layout problems for one tool
//! - [`compute_next_steps`]: ordered, actionable guidance
//! - [`detect_tool`]: best-guess tool from a path list
//!
//! # Example
//!
//! ```rust
//! use mdt_atlas::{simulate_context_resolution, SimulationInput, ToolId};
//! use mdt_tree::RepoTree;
//!
//! let tree = RepoTree::from_paths(["AGENTS.md", "apps/AGENTS.md", "apps/web/AGENTS.override.md"]);
//! let input = SimulationInput::new(ToolId::CodexCli, &tree, "apps/web");
//! let result = simulate_context_resolution(&input);
//! assert_eq!(
//!     result.loaded_paths(),
//!     vec!["AGENTS.md", "apps/AGENTS.md", "apps/web/AGENTS.override.md"]
//! );
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod config;
mod detect;
mod diagnostics;
mod error;
mod imports;
mod insights;
mod next_steps;
mod resolvers;
mod simulate;
mod tool;
mod types;

pub use config::SimulatorConfig;
pub use detect::{detect_tool, DetectionCandidate, DetectionConfidence, ToolDetection};
pub use diagnostics::{
    compute_instruction_diagnostics, DiagnosticSeverity, InstructionDiagnostic,
    InstructionDiagnostics,
};
pub use error::ToolIdError;
pub use imports::{
    extract_import_directives, resolve_claude_imports, ImportGraph, ImportIssue, ImportIssueKind,
    ImportWalker, ImportedFile,
};
pub use insights::{
    compute_simulator_insights, format_insights_summary, ExpectedPattern, InsightsSummary,
    SimulatorInsights,
};
pub use next_steps::{
    compute_next_steps, ActionId, NextStep, NextStepAction, NextStepSeverity, NextStepsInput,
    RepoSource, ScanErrorKind,
};
pub use resolvers::{instruction_owners, layout};
pub use simulate::{simulate_context_resolution, simulate_with_config};
pub use tool::{format_tool_list, ToolId};
pub use types::{
    codes, LoadedFile, ShadowedFile, SimulationInput, SimulationResult, SimulationWarning,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Instruction files in `tree` that belong to tools other than `tool`
#[must_use]
pub fn extra_instruction_files(tool: ToolId, tree: &mdt_tree::RepoTree) -> Vec<String> {
    tree.index()
        .sorted_paths()
        .into_iter()
        .filter(|path| {
            let owners = instruction_owners(path);
            !owners.is_empty() && !owners.contains(&tool)
        })
        .map(str::to_string)
        .collect()
}
