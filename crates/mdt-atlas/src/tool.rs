//! Supported assistant tools

use crate::error::ToolIdError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Closed set of assistant tools the simulator understands
///
/// Every per-tool operation matches on this exhaustively, so adding a tool is
/// a compile error until each resolver, insight table and diagnostic handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolId {
    /// OpenAI Codex CLI (`AGENTS.md` ancestor walk with overrides)
    CodexCli,
    /// Claude Code (`CLAUDE.md` ancestor walk with `@path` imports)
    ClaudeCode,
    /// Gemini CLI (`GEMINI.md` ancestor walk)
    GeminiCli,
    /// GitHub Copilot in the editor
    GithubCopilot,
    /// GitHub Copilot CLI
    CopilotCli,
    /// Cursor (`.cursor/rules/*.mdc`)
    Cursor,
}

impl ToolId {
    /// All tools, in display order
    pub const ALL: [Self; 6] = [
        Self::GithubCopilot,
        Self::CopilotCli,
        Self::CodexCli,
        Self::ClaudeCode,
        Self::GeminiCli,
        Self::Cursor,
    ];

    /// Stable wire id
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CodexCli => "codex-cli",
            Self::ClaudeCode => "claude-code",
            Self::GeminiCli => "gemini-cli",
            Self::GithubCopilot => "github-copilot",
            Self::CopilotCli => "copilot-cli",
            Self::Cursor => "cursor",
        }
    }

    /// Human-readable label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::CodexCli => "Codex CLI",
            Self::ClaudeCode => "Claude Code",
            Self::GeminiCli => "Gemini CLI",
            Self::GithubCopilot => "GitHub Copilot",
            Self::CopilotCli => "Copilot CLI",
            Self::Cursor => "Cursor",
        }
    }

    /// Whether the tool walks ancestor directories of the cwd
    #[inline]
    #[must_use]
    pub fn uses_ancestor_walk(self) -> bool {
        matches!(self, Self::CodexCli | Self::ClaudeCode | Self::GeminiCli)
    }
}

impl Display for ToolId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolId {
    type Err = ToolIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| ToolIdError::Unknown(s.to_string()))
    }
}

/// Join tool labels as "A", "A or B", "A, B, or C"
#[must_use]
pub fn format_tool_list(tools: &[ToolId]) -> String {
    match tools {
        [] => String::new(),
        [only] => only.label().to_string(),
        [first, second] => format!("{} or {}", first.label(), second.label()),
        [rest @ .., last] => {
            let head: Vec<&str> = rest.iter().map(|tool| tool.label()).collect();
            format!("{}, or {}", head.join(", "), last.label())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_wire_ids() {
        for tool in ToolId::ALL {
            assert_eq!(tool.as_str().parse::<ToolId>().unwrap(), tool);
        }
    }

    #[test]
    fn unknown_id_is_typed_error() {
        let err = "windsurf".parse::<ToolId>().unwrap_err();
        assert_eq!(err, ToolIdError::Unknown("windsurf".to_string()));
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&ToolId::GithubCopilot).unwrap();
        assert_eq!(json, "\"github-copilot\"");
    }

    #[test]
    fn tool_list_formatting() {
        assert_eq!(format_tool_list(&[ToolId::Cursor]), "Cursor");
        assert_eq!(
            format_tool_list(&[ToolId::GithubCopilot, ToolId::CopilotCli]),
            "GitHub Copilot or Copilot CLI"
        );
        assert_eq!(
            format_tool_list(&[ToolId::CodexCli, ToolId::ClaudeCode, ToolId::Cursor]),
            "Codex CLI, Claude Code, or Cursor"
        );
    }
}
