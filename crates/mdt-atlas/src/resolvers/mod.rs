//! Per-tool resolution strategies
//!
//! Each resolver is a pure function of the tree index and the normalized cwd.
//! Dispatch is an exhaustive match on [`ToolId`].

mod ancestor;
mod claude;
mod copilot;
mod cursor;

use crate::tool::ToolId;
use crate::types::{LoadedFile, SimulationWarning};
use mdt_tree::{is_named_file, TreeIndex};

/// Loaded files and warnings from one resolver
#[derive(Debug, Clone, Default)]
pub(crate) struct Resolution {
    pub(crate) loaded: Vec<LoadedFile>,
    pub(crate) warnings: Vec<SimulationWarning>,
}

impl Resolution {
    fn load(&mut self, path: impl Into<String>, reason: &str) {
        self.loaded.push(LoadedFile::new(path, reason));
    }

    fn warn(&mut self, code: &str, message: impl Into<String>) {
        self.warnings.push(SimulationWarning::new(code, message));
    }
}

/// Run the resolver for `tool`
pub(crate) fn resolve(tool: ToolId, index: &TreeIndex<'_>, cwd: &str) -> Resolution {
    match tool {
        ToolId::CodexCli => ancestor::resolve_codex(index, cwd),
        ToolId::ClaudeCode => claude::resolve(index, cwd),
        ToolId::GeminiCli => ancestor::resolve_gemini(index, cwd),
        ToolId::GithubCopilot => copilot::resolve_github_copilot(index),
        ToolId::CopilotCli => copilot::resolve_copilot_cli(index),
        ToolId::Cursor => cursor::resolve(index),
    }
}

/// Well-known instruction file names and directories
pub mod layout {
    /// Codex base file
    pub const AGENTS: &str = "AGENTS.md";
    /// Codex per-directory override
    pub const AGENTS_OVERRIDE: &str = "AGENTS.override.md";
    /// Claude memory file
    pub const CLAUDE: &str = "CLAUDE.md";
    /// Gemini memory file
    pub const GEMINI: &str = "GEMINI.md";
    /// Copilot repo-wide instructions (shared by both Copilot tools)
    pub const COPILOT_ROOT: &str = ".github/copilot-instructions.md";
    /// GitHub Copilot scoped instructions directory
    pub const COPILOT_SCOPED_DIR: &str = ".github/instructions/";
    /// Copilot CLI scoped instructions directory
    pub const COPILOT_CLI_SCOPED_DIR: &str = ".github/copilot-instructions/";
    /// Copilot CLI agent profiles directory
    pub const COPILOT_AGENTS_DIR: &str = ".github/agents/";
    /// Scoped instruction suffix
    pub const INSTRUCTIONS_SUFFIX: &str = ".instructions.md";
    /// Agent profile suffix
    pub const AGENT_SUFFIX: &str = ".agent.md";
    /// Cursor rules directory
    pub const CURSOR_RULES_DIR: &str = ".cursor/rules/";
    /// Cursor rule suffix
    pub const CURSOR_RULE_SUFFIX: &str = ".mdc";
    /// Legacy cursor rules file
    pub const CURSORRULES: &str = ".cursorrules";
}

fn under(path: &str, dir: &str, suffix: &str) -> bool {
    path.starts_with(dir) && path.ends_with(suffix)
}

/// Tools that read `path` as an instruction file
///
/// Returns an empty slice for paths no supported tool loads.
#[must_use]
pub fn instruction_owners(path: &str) -> &'static [ToolId] {
    use self::layout::{
        AGENTS, AGENTS_OVERRIDE, AGENT_SUFFIX, CLAUDE, COPILOT_AGENTS_DIR, COPILOT_CLI_SCOPED_DIR,
        COPILOT_ROOT, COPILOT_SCOPED_DIR, CURSORRULES, CURSOR_RULES_DIR, CURSOR_RULE_SUFFIX, GEMINI,
        INSTRUCTIONS_SUFFIX,
    };

    if path == COPILOT_ROOT {
        &[ToolId::GithubCopilot, ToolId::CopilotCli]
    } else if under(path, COPILOT_SCOPED_DIR, INSTRUCTIONS_SUFFIX) {
        &[ToolId::GithubCopilot]
    } else if under(path, COPILOT_CLI_SCOPED_DIR, INSTRUCTIONS_SUFFIX)
        || under(path, COPILOT_AGENTS_DIR, AGENT_SUFFIX)
    {
        &[ToolId::CopilotCli]
    } else if is_named_file(path, AGENTS) || is_named_file(path, AGENTS_OVERRIDE) {
        &[ToolId::CodexCli]
    } else if is_named_file(path, CLAUDE) {
        &[ToolId::ClaudeCode]
    } else if is_named_file(path, GEMINI) {
        &[ToolId::GeminiCli]
    } else if under(path, CURSOR_RULES_DIR, CURSOR_RULE_SUFFIX) || path == CURSORRULES {
        &[ToolId::Cursor]
    } else {
        &[]
    }
}
