//! Instruction layout diagnostics
//!
//! Static checks over the tree for one tool: missing or mis-cased root files,
//! overrides without a base, files in the wrong folder, broken Claude imports
//! and instruction files that belong to other tools.

use crate::imports::{resolve_claude_imports, ImportIssueKind};
use crate::resolvers::layout;
use crate::tool::ToolId;
use crate::types::{codes, SimulationInput};
use mdt_tree::{ancestor_dirs, dir_name, is_named_file, join_dir_file, normalize_path, TreeIndex};
use serde::{Deserialize, Serialize};

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// The tool will not load what the user expects
    Error,
    /// Likely problem
    Warning,
    /// Informational
    Info,
}

/// Single finding about the instruction layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionDiagnostic {
    /// Stable dotted code (`missing.agents`, `case-mismatch.claude`, ...)
    pub code: String,
    /// Severity
    pub severity: DiagnosticSeverity,
    /// Display text
    pub message: String,
    /// Concrete fix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Offending file, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Path the tool expects instead
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_path: Option<String>,
}

impl InstructionDiagnostic {
    /// Create new diagnostic
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        severity: DiagnosticSeverity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            severity,
            message: message.into(),
            suggestion: None,
            path: None,
            expected_path: None,
        }
    }

    /// With suggestion
    #[inline]
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// With offending path
    #[inline]
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// With expected path
    #[inline]
    #[must_use]
    pub fn with_expected_path(mut self, path: impl Into<String>) -> Self {
        self.expected_path = Some(path.into());
        self
    }
}

/// Diagnostics for one tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionDiagnostics {
    /// Tool that was checked
    pub tool: ToolId,
    /// Findings in check order
    pub diagnostics: Vec<InstructionDiagnostic>,
}

impl InstructionDiagnostics {
    /// Check whether a diagnostic with `code` exists
    #[must_use]
    pub fn has(&self, code: &str) -> bool {
        self.diagnostics.iter().any(|diag| diag.code == code)
    }
}

struct Layout<'a> {
    paths: Vec<&'a str>,
}

impl<'a> Layout<'a> {
    fn named(&self, file_name: &str) -> Vec<&'a str> {
        self.paths
            .iter()
            .copied()
            .filter(|path| is_named_file(path, file_name))
            .collect()
    }

    fn any_under(&self, dir: &str, suffix: &str) -> bool {
        self.paths
            .iter()
            .any(|path| path.starts_with(dir) && path.ends_with(suffix))
    }

    /// First path whose lowercase form names `file_name`, unless the
    /// correctly cased file shows up first
    fn case_mismatch(&self, file_name: &str) -> Option<&'a str> {
        let needle = file_name.to_lowercase();
        for &path in &self.paths {
            let lower = path.to_lowercase();
            if !is_named_file(&lower, &needle) {
                continue;
            }
            if is_named_file(path, file_name) {
                return None;
            }
            return Some(path);
        }
        None
    }
}

struct CaseRule {
    code: &'static str,
    file_name: &'static str,
    tool: &'static str,
    suggestion: &'static str,
}

const CASE_RULES: [CaseRule; 4] = [
    CaseRule {
        code: "case-mismatch.agents",
        file_name: layout::AGENTS,
        tool: "Codex CLI",
        suggestion: "Rename the file to AGENTS.md (uppercase).",
    },
    CaseRule {
        code: "case-mismatch.override",
        file_name: layout::AGENTS_OVERRIDE,
        tool: "Codex CLI",
        suggestion: "Rename the file to AGENTS.override.md.",
    },
    CaseRule {
        code: "case-mismatch.claude",
        file_name: layout::CLAUDE,
        tool: "Claude Code",
        suggestion: "Rename the file to CLAUDE.md (uppercase).",
    },
    CaseRule {
        code: "case-mismatch.gemini",
        file_name: layout::GEMINI,
        tool: "Gemini CLI",
        suggestion: "Rename the file to GEMINI.md (uppercase).",
    },
];

/// Run every layout check for `input.tool`
#[must_use]
pub fn compute_instruction_diagnostics(input: &SimulationInput<'_>) -> InstructionDiagnostics {
    let index = input.tree.index();
    let cwd = normalize_path(input.cwd);
    let files = Layout {
        paths: index.sorted_paths(),
    };
    let mut out = Vec::new();

    case_mismatches(&files, &mut out);

    match input.tool {
        ToolId::CodexCli => codex(&files, &index, &cwd, &mut out),
        ToolId::ClaudeCode => claude(&files, &index, &cwd, &mut out),
        ToolId::GeminiCli => {
            missing_memory(&files, &index, &GEMINI_RULE, &mut out);
            ancestry(&index, &cwd, layout::GEMINI, "Gemini CLI", "any instructions", &mut out);
        }
        ToolId::Cursor => cursor(&files, &index, &mut out),
        ToolId::CopilotCli => copilot_cli(&files, &index, &mut out),
        ToolId::GithubCopilot => github_copilot(&files, &index, &mut out),
    }

    mixed_tools(input.tool, &files, &index, &mut out);

    InstructionDiagnostics {
        tool: input.tool,
        diagnostics: out,
    }
}

fn case_mismatches(files: &Layout<'_>, out: &mut Vec<InstructionDiagnostic>) {
    for rule in &CASE_RULES {
        if let Some(found) = files.case_mismatch(rule.file_name) {
            out.push(
                InstructionDiagnostic::new(
                    rule.code,
                    DiagnosticSeverity::Error,
                    format!("Found '{found}' but {} expects '{}'.", rule.tool, rule.file_name),
                )
                .with_suggestion(rule.suggestion)
                .with_path(found)
                .with_expected_path(rule.file_name),
            );
        }
    }

    let copilot_root = files.paths.iter().find(|path| {
        path.to_lowercase() == layout::COPILOT_ROOT && **path != layout::COPILOT_ROOT
    });
    if let Some(found) = copilot_root {
        out.push(
            InstructionDiagnostic::new(
                "case-mismatch.copilot-root",
                DiagnosticSeverity::Error,
                format!("Found '{found}' but Copilot expects '{}'.", layout::COPILOT_ROOT),
            )
            .with_suggestion("Rename the file to .github/copilot-instructions.md.")
            .with_path(*found)
            .with_expected_path(layout::COPILOT_ROOT),
        );
    }
}

struct MemoryRule {
    file_name: &'static str,
    key: &'static str,
    tool: &'static str,
    reads: &'static str,
    scoped: &'static str,
    global: &'static str,
}

const AGENTS_RULE: MemoryRule = MemoryRule {
    file_name: layout::AGENTS,
    key: "agents",
    tool: "Codex CLI",
    reads: "loads AGENTS.md from repo root and ancestor folders",
    scoped: "scoped instructions",
    global: "global instructions",
};

const CLAUDE_RULE: MemoryRule = MemoryRule {
    file_name: layout::CLAUDE,
    key: "claude",
    tool: "Claude Code",
    reads: "reads CLAUDE.md from the repo root and parent folders",
    scoped: "scoped memory files",
    global: "global memory",
};

const GEMINI_RULE: MemoryRule = MemoryRule {
    file_name: layout::GEMINI,
    key: "gemini",
    tool: "Gemini CLI",
    reads: "reads GEMINI.md from the repo root and parent folders",
    scoped: "scoped files",
    global: "global instructions",
};

/// `missing.<key>` when no file exists, `missing.<key>-root` when only nested ones do
fn missing_memory(
    files: &Layout<'_>,
    index: &TreeIndex<'_>,
    rule: &MemoryRule,
    out: &mut Vec<InstructionDiagnostic>,
) {
    let file_name = rule.file_name;
    if files.named(file_name).is_empty() {
        out.push(
            InstructionDiagnostic::new(
                format!("missing.{}", rule.key),
                DiagnosticSeverity::Error,
                format!("No {file_name} files found. {} {}.", rule.tool, rule.reads),
            )
            .with_suggestion(format!("Add {file_name} at the repo root."))
            .with_expected_path(file_name),
        );
    } else if !index.has(file_name) {
        out.push(
            InstructionDiagnostic::new(
                format!("missing.{}-root", rule.key),
                DiagnosticSeverity::Warning,
                format!("No {file_name} at the repo root. Only {} were found.", rule.scoped),
            )
            .with_suggestion(format!("Add {file_name} at the repo root for {}.", rule.global))
            .with_expected_path(file_name),
        );
    }
}

/// `missing-cwd` or `no-ancestor-instructions` for ancestor-walk tools
fn ancestry(
    index: &TreeIndex<'_>,
    cwd: &str,
    file_name: &str,
    tool: &str,
    loads: &str,
    out: &mut Vec<InstructionDiagnostic>,
) {
    if cwd.is_empty() {
        out.push(
            InstructionDiagnostic::new(
                "missing-cwd",
                DiagnosticSeverity::Warning,
                format!("Current directory (cwd) is required for {tool} ancestor lookups."),
            )
            .with_suggestion(format!(
                "Set cwd to the directory where {tool} runs (e.g., src/app)."
            )),
        );
        return;
    }

    let found = ancestor_dirs(cwd)
        .iter()
        .any(|dir| index.has(&join_dir_file(dir, file_name)));
    if !found {
        out.push(
            InstructionDiagnostic::new(
                "no-ancestor-instructions",
                DiagnosticSeverity::Warning,
                format!(
                    "No {file_name} files are in the cwd ancestry. {tool} may not load {loads}."
                ),
            )
            .with_suggestion(format!(
                "Confirm cwd and place {file_name} in the repo root or a parent directory."
            )),
        );
    }
}

fn codex(
    files: &Layout<'_>,
    index: &TreeIndex<'_>,
    cwd: &str,
    out: &mut Vec<InstructionDiagnostic>,
) {
    missing_memory(files, index, &AGENTS_RULE, out);

    for override_path in files.named(layout::AGENTS_OVERRIDE) {
        let base = join_dir_file(dir_name(override_path), layout::AGENTS);
        if !index.has(&base) {
            out.push(
                InstructionDiagnostic::new(
                    "override-without-base",
                    DiagnosticSeverity::Warning,
                    format!(
                        "Found {override_path} without a matching AGENTS.md in the same folder."
                    ),
                )
                .with_suggestion(format!(
                    "Add {base} so the override has a base file to replace."
                ))
                .with_path(override_path)
                .with_expected_path(base),
            );
        }
    }

    ancestry(index, cwd, layout::AGENTS, "Codex CLI", "any instructions", out);
}

fn claude(
    files: &Layout<'_>,
    index: &TreeIndex<'_>,
    cwd: &str,
    out: &mut Vec<InstructionDiagnostic>,
) {
    missing_memory(files, index, &CLAUDE_RULE, out);
    ancestry(index, cwd, layout::CLAUDE, "Claude Code", "any memory files", out);

    let memories = files.named(layout::CLAUDE);
    let graph = resolve_claude_imports(index, &memories);
    for issue in graph.issues {
        let (severity, message, suggestion) = match issue.kind {
            ImportIssueKind::Missing => (
                DiagnosticSeverity::Warning,
                format!("Claude import not found: {}.", issue.raw_path),
                "Add the missing file or update the @path reference.",
            ),
            ImportIssueKind::OutsideRoot => (
                DiagnosticSeverity::Error,
                format!("Claude import points outside the repo: {}.", issue.raw_path),
                "Use a repo-relative path in @path imports.",
            ),
            ImportIssueKind::Circular => (
                DiagnosticSeverity::Error,
                format!("Circular Claude import detected via {}.", issue.raw_path),
                "Remove the cycle by flattening or removing one @path reference.",
            ),
        };
        out.push(
            InstructionDiagnostic::new(
                format!("claude-import.{}", issue.kind.as_str()),
                severity,
                message,
            )
            .with_suggestion(suggestion)
            .with_path(issue.source_path)
            .with_expected_path(issue.resolved_path),
        );
    }
}

fn cursor(files: &Layout<'_>, index: &TreeIndex<'_>, out: &mut Vec<InstructionDiagnostic>) {
    if !index.has(layout::CURSORRULES) {
        return;
    }
    let has_rules = files
        .paths
        .iter()
        .any(|path| path.starts_with(layout::CURSOR_RULES_DIR));
    let message = if has_rules {
        "Legacy .cursorrules found alongside .cursor/rules."
    } else {
        "Legacy .cursorrules is deprecated."
    };
    out.push(
        InstructionDiagnostic::new(codes::DEPRECATED_CURSORRULES, DiagnosticSeverity::Warning, message)
            .with_suggestion("Move legacy rules into .cursor/rules and remove .cursorrules.")
            .with_path(layout::CURSORRULES)
            .with_expected_path(layout::CURSOR_RULES_DIR),
    );
}

fn copilot_cli(files: &Layout<'_>, index: &TreeIndex<'_>, out: &mut Vec<InstructionDiagnostic>) {
    let root = index.has(layout::COPILOT_ROOT);
    let scoped = files.any_under(layout::COPILOT_CLI_SCOPED_DIR, layout::INSTRUCTIONS_SUFFIX);
    let agents = files.any_under(layout::COPILOT_AGENTS_DIR, "");
    let editor_scoped = files.any_under(layout::COPILOT_SCOPED_DIR, layout::INSTRUCTIONS_SUFFIX);

    if !root && !scoped && !agents {
        out.push(
            InstructionDiagnostic::new(
                "missing.copilot-cli",
                DiagnosticSeverity::Error,
                "No Copilot CLI instruction files found.",
            )
            .with_suggestion(
                "Add .github/copilot-instructions.md or scoped files under .github/copilot-instructions/.",
            )
            .with_expected_path(layout::COPILOT_ROOT),
        );
    }

    if editor_scoped && !scoped {
        out.push(
            InstructionDiagnostic::new(
                "wrong-folder.copilot-cli",
                DiagnosticSeverity::Warning,
                "Found .github/instructions/*.instructions.md, which Copilot CLI does not read.",
            )
            .with_suggestion("Move scoped instructions to .github/copilot-instructions/."),
        );
    }

    for path in &files.paths {
        if path.starts_with(layout::COPILOT_CLI_SCOPED_DIR)
            && !path.ends_with(layout::INSTRUCTIONS_SUFFIX)
        {
            out.push(
                InstructionDiagnostic::new(
                    "wrong-extension.copilot-cli",
                    DiagnosticSeverity::Warning,
                    format!(
                        "Scoped Copilot CLI instructions should end with .instructions.md (found {path})."
                    ),
                )
                .with_suggestion("Rename the file to use the .instructions.md suffix.")
                .with_path(*path),
            );
        }
    }
}

fn github_copilot(
    files: &Layout<'_>,
    index: &TreeIndex<'_>,
    out: &mut Vec<InstructionDiagnostic>,
) {
    let root = index.has(layout::COPILOT_ROOT);
    let scoped = files.any_under(layout::COPILOT_SCOPED_DIR, layout::INSTRUCTIONS_SUFFIX);
    let cli_scoped = files.any_under(layout::COPILOT_CLI_SCOPED_DIR, layout::INSTRUCTIONS_SUFFIX);

    if !root && !scoped {
        out.push(
            InstructionDiagnostic::new(
                "missing.github-copilot",
                DiagnosticSeverity::Error,
                "No GitHub Copilot instruction files found.",
            )
            .with_suggestion(
                "Add .github/copilot-instructions.md or .github/instructions/*.instructions.md.",
            )
            .with_expected_path(layout::COPILOT_ROOT),
        );
    }

    if cli_scoped && !scoped {
        out.push(
            InstructionDiagnostic::new(
                "wrong-folder.github-copilot",
                DiagnosticSeverity::Warning,
                "Scoped files are under .github/copilot-instructions/, but GitHub Copilot expects .github/instructions/.",
            )
            .with_suggestion("Move scoped instructions to .github/instructions/."),
        );
    }
}

fn mixed_tools(
    tool: ToolId,
    files: &Layout<'_>,
    index: &TreeIndex<'_>,
    out: &mut Vec<InstructionDiagnostic>,
) {
    let present = |candidate: ToolId| match candidate {
        ToolId::CodexCli => {
            !files.named(layout::AGENTS).is_empty()
                || !files.named(layout::AGENTS_OVERRIDE).is_empty()
        }
        ToolId::ClaudeCode => !files.named(layout::CLAUDE).is_empty(),
        ToolId::GeminiCli => !files.named(layout::GEMINI).is_empty(),
        ToolId::CopilotCli => {
            files.any_under(layout::COPILOT_CLI_SCOPED_DIR, layout::INSTRUCTIONS_SUFFIX)
                || files.any_under(layout::COPILOT_AGENTS_DIR, "")
        }
        ToolId::GithubCopilot => {
            files.any_under(layout::COPILOT_SCOPED_DIR, layout::INSTRUCTIONS_SUFFIX)
        }
        ToolId::Cursor => {
            files.any_under(layout::CURSOR_RULES_DIR, layout::CURSOR_RULE_SUFFIX)
                || index.has(layout::CURSORRULES)
        }
    };

    let others: Vec<&str> = [
        ToolId::CodexCli,
        ToolId::ClaudeCode,
        ToolId::GeminiCli,
        ToolId::CopilotCli,
        ToolId::GithubCopilot,
        ToolId::Cursor,
    ]
    .into_iter()
    .filter(|candidate| *candidate != tool && present(*candidate))
    .map(ToolId::label)
    .collect();

    if !others.is_empty() {
        out.push(
            InstructionDiagnostic::new(
                "mixed-tools",
                DiagnosticSeverity::Warning,
                format!(
                    "Instruction files for other tools were detected: {}.",
                    others.join(", ")
                ),
            )
            .with_suggestion("Confirm you are validating the correct tool and file layout."),
        );
    }
}
