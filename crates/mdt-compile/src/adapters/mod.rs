//! Built-in adapters
//!
//! All are pure and deterministic; each returns its files sorted by path.

mod agents_md;
mod claude_code;
mod common;
mod cursor_rules;
mod gemini_cli;
mod github_copilot;
mod windsurf_rules;

pub use agents_md::AgentsMdAdapter;
pub use claude_code::ClaudeCodeAdapter;
pub use cursor_rules::CursorRulesAdapter;
pub use gemini_cli::GeminiCliAdapter;
pub use github_copilot::GithubCopilotAdapter;
pub use windsurf_rules::WindsurfRulesAdapter;
