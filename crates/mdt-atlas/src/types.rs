//! Simulation inputs and results

use crate::tool::ToolId;
use mdt_tree::RepoTree;
use serde::{Deserialize, Serialize};

/// Stable warning codes
pub mod codes {
    /// Tree exceeds the large-tree threshold
    pub const LARGE_TREE: &str = "scan-risk.large-tree";
    /// `.cursor/rules` exceeds the cursor-rules threshold
    pub const CURSOR_RULES: &str = "scan-risk.cursor-rules";
    /// Legacy `.cursorrules` present
    pub const DEPRECATED_CURSORRULES: &str = "deprecated.cursorrules";
    /// Claude `@path` import cycle dropped
    pub const CLAUDE_IMPORT_CIRCULAR: &str = "claude-import.circular";

    /// Prefix shared by every scan-risk warning
    pub const SCAN_RISK_PREFIX: &str = "scan-risk.";
}

/// File the tool would load, with the rule that matched it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedFile {
    /// Repo-relative path
    pub path: String,
    /// Which rule matched
    pub reason: String,
}

impl LoadedFile {
    /// Create new loaded file entry
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Non-fatal finding from a resolution run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationWarning {
    /// Stable dotted code used for routing (see [`codes`])
    pub code: String,
    /// Display text
    pub message: String,
}

impl SimulationWarning {
    /// Create new warning
    #[inline]
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Whether this is a scan-risk heuristic
    #[inline]
    #[must_use]
    pub fn is_scan_risk(&self) -> bool {
        self.code.starts_with(codes::SCAN_RISK_PREFIX)
    }
}

/// Instruction file present in the tree that does not load for the tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShadowedFile {
    /// Repo-relative path
    pub path: String,
    /// Why it is not loaded
    pub reason: String,
}

/// Input shared by the simulator, insights and diagnostics
#[derive(Debug, Clone, Copy)]
pub struct SimulationInput<'a> {
    /// Tool to simulate
    pub tool: ToolId,
    /// Scanned repository
    pub tree: &'a RepoTree,
    /// Working directory, repo-relative (normalized on use)
    pub cwd: &'a str,
}

impl<'a> SimulationInput<'a> {
    /// Create new input
    #[inline]
    #[must_use]
    pub fn new(tool: ToolId, tree: &'a RepoTree, cwd: &'a str) -> Self {
        Self { tool, tree, cwd }
    }
}

/// Result of one resolution run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Files in the tool's real load order
    pub loaded: Vec<LoadedFile>,
    /// Resolver and heuristic warnings
    pub warnings: Vec<SimulationWarning>,
    /// Instruction files that exist but do not load
    pub shadowed: Vec<ShadowedFile>,
}

impl SimulationResult {
    /// Loaded paths in order
    #[must_use]
    pub fn loaded_paths(&self) -> Vec<&str> {
        self.loaded.iter().map(|file| file.path.as_str()).collect()
    }

    /// Check whether a warning with `code` was emitted
    #[must_use]
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|warning| warning.code == code)
    }
}
