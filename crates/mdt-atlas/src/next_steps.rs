//! Actionable next steps
//!
//! Turns diagnostics, resolver warnings, insights and scan metadata into an
//! ordered guidance list. Never fails: with nothing to report the result is a
//! single `ready` step.

use crate::diagnostics::{DiagnosticSeverity, InstructionDiagnostic, InstructionDiagnostics};
use crate::insights::SimulatorInsights;
use crate::tool::ToolId;
use crate::types::{SimulationWarning, codes};
use serde::{Deserialize, Serialize};

/// UI action identifiers, opaque to this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionId {
    /// Open the folder picker
    ScanFolder,
    /// Paste a path list
    PastePaths,
    /// Rescan a narrower folder
    ScanSmallerFolder,
    /// Recompute results
    RefreshResults,
    /// Copy the summary to the clipboard
    CopySummary,
    /// Download the full report
    DownloadReport,
    /// Open the workbench editor
    OpenWorkbench,
    /// Copy an instruction file template
    CopyTemplate,
    /// Copy a base file template for an override
    CopyBaseTemplate,
    /// Open tool documentation
    OpenDocs,
    /// Set the working directory
    SetCwd,
    /// Pick a different tool
    SwitchTool,
    /// Review files for other tools
    ReviewExtraFiles,
}

/// Button attached to a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextStepAction {
    /// Dispatch id
    pub id: ActionId,
    /// Button label
    pub label: String,
}

fn action(id: ActionId, label: &str) -> NextStepAction {
    NextStepAction {
        id,
        label: label.to_string(),
    }
}

/// Step severity; `Ready` marks the all-clear step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NextStepSeverity {
    /// Blocking problem
    Error,
    /// Likely problem
    Warning,
    /// Informational
    Info,
    /// Nothing left to fix
    Ready,
}

impl From<DiagnosticSeverity> for NextStepSeverity {
    fn from(severity: DiagnosticSeverity) -> Self {
        match severity {
            DiagnosticSeverity::Error => Self::Error,
            DiagnosticSeverity::Warning => Self::Warning,
            DiagnosticSeverity::Info => Self::Info,
        }
    }
}

/// One guidance entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextStep {
    /// Stable id (`ready`, `missing-root:missing.agents`, `warning:<code>`, ...)
    pub id: String,
    /// Severity
    pub severity: NextStepSeverity,
    /// Headline
    pub title: String,
    /// Explanation
    pub body: String,
    /// Main action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_action: Option<NextStepAction>,
    /// Additional actions, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary_actions: Vec<NextStepAction>,
}

impl NextStep {
    fn new(
        id: impl Into<String>,
        severity: NextStepSeverity,
        title: &str,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            severity,
            title: title.to_string(),
            body: body.into(),
            primary_action: None,
            secondary_actions: Vec::new(),
        }
    }

    fn primary(mut self, action: NextStepAction) -> Self {
        self.primary_action = Some(action);
        self
    }

    fn secondary(mut self, action: NextStepAction) -> Self {
        self.secondary_actions.push(action);
        self
    }
}

/// Where the scanned tree came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoSource {
    /// Paths typed or pasted by the user
    Manual,
    /// Folder picker / directory scan
    #[default]
    Folder,
}

/// Why a directory scan failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanErrorKind {
    /// Access was refused
    PermissionDenied,
    /// Folder vanished
    NotFound,
    /// Anything else
    Generic,
}

impl ScanErrorKind {
    /// Stable id suffix
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PermissionDenied => "permission-denied",
            Self::NotFound => "not-found",
            Self::Generic => "generic",
        }
    }
}

/// Everything the next-steps computer looks at
#[derive(Debug, Clone, Copy)]
pub struct NextStepsInput<'a> {
    /// Selected tool
    pub tool: ToolId,
    /// Where the tree came from
    pub repo_source: RepoSource,
    /// Number of scanned files
    pub repo_file_count: usize,
    /// Inputs changed since the last run
    pub is_stale: bool,
    /// Layout diagnostics for `tool`
    pub diagnostics: &'a InstructionDiagnostics,
    /// Simulator warnings
    pub warnings: &'a [SimulationWarning],
    /// Insights for `tool`
    pub insights: &'a SimulatorInsights,
    /// Instruction files for other tools
    pub extra_files: &'a [String],
    /// Scan failure, if any
    pub scan_error: Option<ScanErrorKind>,
    /// Scan hit its file limit
    pub truncated: bool,
}

const MISSING_ROOT_CODES: [&str; 8] = [
    "missing.agents",
    "missing.agents-root",
    "missing.claude",
    "missing.claude-root",
    "missing.gemini",
    "missing.gemini-root",
    "missing.copilot-cli",
    "missing.github-copilot",
];

/// Folder sources lead with `folder`, manual sources with `manual`
fn by_source(
    source: RepoSource,
    folder: NextStepAction,
    manual: NextStepAction,
) -> (NextStepAction, NextStepAction) {
    match source {
        RepoSource::Folder => (folder, manual),
        RepoSource::Manual => (manual, folder),
    }
}

fn no_scan_step(source: RepoSource) -> NextStep {
    let (primary, secondary) = by_source(
        source,
        action(ActionId::ScanFolder, "Upload a folder"),
        action(ActionId::PastePaths, "Paste paths"),
    );
    NextStep::new(
        "no-scan",
        NextStepSeverity::Info,
        "Upload a folder to get next steps",
        "Upload a folder (or paste paths) so we can detect your tool and show what to fix.",
    )
    .primary(primary)
    .secondary(secondary)
}

fn scan_error_step(kind: ScanErrorKind, source: RepoSource) -> NextStep {
    let (primary, secondary) = by_source(
        source,
        action(ActionId::ScanFolder, "Upload a folder"),
        action(ActionId::PastePaths, "Paste paths"),
    );
    let body = match kind {
        ScanErrorKind::PermissionDenied => {
            "Permission denied. Choose a different folder and try again. Your files stay local."
        }
        ScanErrorKind::NotFound => {
            "Folder not found. Pick a different folder and try again. Your files stay local."
        }
        ScanErrorKind::Generic => {
            "Unable to scan folder. Check permissions and try again. Your files stay local."
        }
    };
    NextStep::new(
        format!("scan-error:{}", kind.as_str()),
        NextStepSeverity::Error,
        "Scan failed",
        body,
    )
    .primary(primary)
    .secondary(secondary)
}

fn narrow_scope_actions(source: RepoSource) -> (NextStepAction, NextStepAction) {
    by_source(
        source,
        action(ActionId::ScanSmallerFolder, "Scan a smaller folder"),
        action(ActionId::PastePaths, "Paste repo paths"),
    )
}

fn truncated_step(source: RepoSource) -> NextStep {
    let (primary, secondary) = narrow_scope_actions(source);
    NextStep::new(
        "scan-truncated",
        NextStepSeverity::Warning,
        "Scan limit reached",
        "Results are truncated. Scan a smaller folder or paste paths to narrow the scope.",
    )
    .primary(primary)
    .secondary(secondary)
}

fn stale_step() -> NextStep {
    NextStep::new(
        "stale-results",
        NextStepSeverity::Warning,
        "Results are out of date",
        "Your inputs changed. Re-run to refresh guidance.",
    )
    .primary(action(ActionId::RefreshResults, "Refresh results"))
    .secondary(action(ActionId::CopySummary, "Copy summary"))
}

fn ready_step() -> NextStep {
    NextStep::new(
        "ready",
        NextStepSeverity::Ready,
        "You're ready to go",
        "These files should load for the selected tool. Open Workbench to continue or share the summary.",
    )
    .primary(action(ActionId::OpenWorkbench, "Open Workbench"))
    .secondary(action(ActionId::CopySummary, "Copy summary"))
    .secondary(action(ActionId::DownloadReport, "Download report"))
}

fn diagnostic_body(diag: &InstructionDiagnostic) -> String {
    match (&diag.suggestion, &diag.expected_path) {
        (Some(suggestion), _) => format!("{} {suggestion}", diag.message),
        (None, Some(expected)) => format!("{} Expected: {expected}.", diag.message),
        (None, None) => diag.message.clone(),
    }
}

fn diagnostic_step(diag: &InstructionDiagnostic, has_extra_files: bool) -> NextStep {
    let severity = NextStepSeverity::from(diag.severity);
    let code = diag.code.as_str();

    if code == "missing-cwd" {
        return NextStep::new(
            "missing-cwd",
            NextStepSeverity::Warning,
            "Set the current directory (cwd)",
            "Ancestor scans depend on where the tool runs. Set cwd so we load the right instructions.",
        )
        .primary(action(ActionId::SetCwd, "Set cwd"));
    }

    if code == "override-without-base" {
        let detail = diag
            .expected_path
            .as_ref()
            .map(|expected| format!(" Expected: {expected}."))
            .unwrap_or_default();
        return NextStep::new(
            format!("override-without-base:{}", diag.path.as_deref().unwrap_or("unknown")),
            severity,
            "Add a base file for overrides",
            format!(
                "Overrides replace a base file in the same folder. Add the base file so the override is valid.{detail}"
            ),
        )
        .primary(action(ActionId::CopyBaseTemplate, "Copy base template"));
    }

    if code == "mixed-tools" {
        let step = NextStep::new(
            "mixed-tools",
            NextStepSeverity::Warning,
            "Multiple tool formats detected",
            "You may be scanning the wrong tool or have extra files for other CLIs.",
        )
        .primary(action(ActionId::SwitchTool, "Switch tool"));
        return if has_extra_files {
            step.secondary(action(ActionId::ReviewExtraFiles, "Review extra files"))
        } else {
            step
        };
    }

    if MISSING_ROOT_CODES.contains(&code) {
        let guidance = diag.suggestion.clone().unwrap_or_else(|| {
            diag.expected_path
                .as_ref()
                .map_or_else(|| diag.message.clone(), |expected| format!("Add {expected}."))
        });
        let prefix = if diag.severity == DiagnosticSeverity::Warning {
            "A root file helps ensure global instructions are loaded."
        } else {
            "This tool won't load any instructions without a root file."
        };
        return NextStep::new(
            format!("missing-root:{code}"),
            severity,
            "Add the root instruction file",
            format!("{prefix} {guidance}").trim().to_string(),
        )
        .primary(action(ActionId::CopyTemplate, "Copy template"))
        .secondary(action(ActionId::OpenDocs, "Open docs"));
    }

    if code.starts_with("case-mismatch.") {
        return NextStep::new(
            format!("case-mismatch:{}", diag.path.as_deref().unwrap_or(code)),
            severity,
            "Fix file casing",
            diagnostic_body(diag),
        );
    }
    if code.starts_with("wrong-folder.") {
        return NextStep::new(
            format!("wrong-folder:{code}"),
            severity,
            "Move instructions to the expected folder",
            diagnostic_body(diag),
        )
        .primary(action(ActionId::OpenDocs, "Open docs"));
    }
    if code.starts_with("wrong-extension.") {
        return NextStep::new(
            format!("wrong-extension:{code}"),
            severity,
            "Rename instruction files",
            diagnostic_body(diag),
        )
        .primary(action(ActionId::OpenDocs, "Open docs"));
    }

    NextStep::new(
        format!("diagnostic:{code}"),
        severity,
        "Resolve instruction issue",
        diagnostic_body(diag),
    )
}

fn warning_step(warning: &SimulationWarning, source: RepoSource) -> NextStep {
    let id = format!("warning:{}", warning.code);
    if !warning.is_scan_risk() {
        return NextStep::new(
            id,
            NextStepSeverity::Warning,
            "Review scan warning",
            warning.message.clone(),
        );
    }

    let (title, body) = if warning.code == codes::LARGE_TREE {
        (
            "Limit the scan scope",
            format!(
                "{} Large repos can bloat context. Consider scanning a narrower folder.",
                warning.message
            ),
        )
    } else if warning.code == codes::CURSOR_RULES {
        ("Review cursor rules", warning.message.clone())
    } else {
        ("Review scan warning", warning.message.clone())
    };
    let (primary, secondary) = narrow_scope_actions(source);
    NextStep::new(id, NextStepSeverity::Warning, title, body)
        .primary(primary)
        .secondary(secondary)
}

fn missing_patterns_step(insights: &SimulatorInsights) -> NextStep {
    let patterns: Vec<&str> = insights
        .missing_files
        .iter()
        .map(|pattern| pattern.pattern.as_str())
        .collect();
    let shown = patterns.len().min(3);
    let remaining = patterns.len() - shown;
    let suffix = if remaining > 0 {
        format!(" and {remaining} more")
    } else {
        String::new()
    };

    NextStep::new(
        "missing-patterns",
        NextStepSeverity::Info,
        "Review expected instruction locations",
        format!(
            "This tool looks for instruction files in: {}{suffix}. Add them if needed.",
            patterns[..shown].join(", ")
        ),
    )
    .primary(action(ActionId::OpenDocs, "Open docs"))
}

/// Compute the ordered next steps
///
/// Order: stale notice, errors, warnings, info, then `ready` when nothing
/// blocking remains.
#[must_use]
pub fn compute_next_steps(input: &NextStepsInput<'_>) -> Vec<NextStep> {
    if input.repo_file_count == 0 && input.scan_error.is_none() {
        return vec![no_scan_step(input.repo_source)];
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    if let Some(kind) = input.scan_error {
        errors.push(scan_error_step(kind, input.repo_source));
    }
    if input.truncated {
        warnings.push(truncated_step(input.repo_source));
    }

    let has_extra_files = !input.extra_files.is_empty();
    for diag in &input.diagnostics.diagnostics {
        let step = diagnostic_step(diag, has_extra_files);
        match diag.severity {
            DiagnosticSeverity::Error => errors.push(step),
            DiagnosticSeverity::Warning => warnings.push(step),
            DiagnosticSeverity::Info => infos.push(step),
        }
    }

    for warning in input.warnings {
        if input.diagnostics.has(&warning.code) {
            continue;
        }
        warnings.push(warning_step(warning, input.repo_source));
    }

    let covered = input
        .diagnostics
        .diagnostics
        .iter()
        .any(|diag| diag.code.starts_with("missing."));
    if !covered && !input.insights.missing_files.is_empty() {
        infos.push(missing_patterns_step(input.insights));
    }

    let ready = !input.is_stale && errors.is_empty() && warnings.is_empty();

    let mut steps = Vec::with_capacity(errors.len() + warnings.len() + infos.len() + 1);
    if input.is_stale {
        steps.push(stale_step());
    }
    steps.extend(errors);
    steps.extend(warnings);
    steps.extend(infos);
    if ready {
        steps.push(ready_step());
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::ExpectedPattern;

    fn insights(missing: &[&str]) -> SimulatorInsights {
        let patterns: Vec<ExpectedPattern> = missing
            .iter()
            .map(|pattern| ExpectedPattern {
                id: (*pattern).to_string(),
                label: (*pattern).to_string(),
                pattern: (*pattern).to_string(),
            })
            .collect();
        SimulatorInsights {
            tool: ToolId::CodexCli,
            expected_patterns: patterns.clone(),
            found_files: Vec::new(),
            missing_files: patterns,
            precedence_notes: Vec::new(),
        }
    }

    fn diagnostics(items: Vec<InstructionDiagnostic>) -> InstructionDiagnostics {
        InstructionDiagnostics {
            tool: ToolId::CodexCli,
            diagnostics: items,
        }
    }

    fn input<'a>(
        diagnostics: &'a InstructionDiagnostics,
        warnings: &'a [SimulationWarning],
        insights: &'a SimulatorInsights,
    ) -> NextStepsInput<'a> {
        NextStepsInput {
            tool: ToolId::CodexCli,
            repo_source: RepoSource::Folder,
            repo_file_count: 3,
            is_stale: false,
            diagnostics,
            warnings,
            insights,
            extra_files: &[],
            scan_error: None,
            truncated: false,
        }
    }

    fn ids(steps: &[NextStep]) -> Vec<&str> {
        steps.iter().map(|step| step.id.as_str()).collect()
    }

    #[test]
    fn manual_no_scan_leads_with_paste() {
        let diags = diagnostics(Vec::new());
        let insights = insights(&[]);
        let mut input = input(&diags, &[], &insights);
        input.repo_file_count = 0;
        input.repo_source = RepoSource::Manual;

        let steps = compute_next_steps(&input);
        assert_eq!(ids(&steps), vec!["no-scan"]);
        assert_eq!(steps[0].primary_action.as_ref().unwrap().id, ActionId::PastePaths);
        assert_eq!(steps[0].secondary_actions[0].id, ActionId::ScanFolder);
    }

    #[test]
    fn scan_error_replaces_no_scan() {
        let diags = diagnostics(Vec::new());
        let insights = insights(&[]);
        let mut input = input(&diags, &[], &insights);
        input.repo_file_count = 0;
        input.scan_error = Some(ScanErrorKind::PermissionDenied);

        let steps = compute_next_steps(&input);
        assert_eq!(ids(&steps), vec!["scan-error:permission-denied"]);
        assert_eq!(steps[0].severity, NextStepSeverity::Error);
    }

    #[test]
    fn severity_order_and_routing() {
        let diags = diagnostics(vec![
            InstructionDiagnostic::new("mixed-tools", DiagnosticSeverity::Warning, "m"),
            InstructionDiagnostic::new("missing.agents", DiagnosticSeverity::Error, "x")
                .with_suggestion("Add AGENTS.md at the repo root.")
                .with_expected_path("AGENTS.md"),
        ]);
        let insights = insights(&["AGENTS.md"]);
        let extra = vec!["CLAUDE.md".to_string()];
        let mut input = input(&diags, &[], &insights);
        input.extra_files = &extra;
        input.is_stale = true;

        let steps = compute_next_steps(&input);
        assert_eq!(
            ids(&steps),
            vec!["stale-results", "missing-root:missing.agents", "mixed-tools"]
        );
        assert_eq!(
            steps[1].body,
            "This tool won't load any instructions without a root file. Add AGENTS.md at the repo root."
        );
        assert_eq!(steps[1].primary_action.as_ref().unwrap().id, ActionId::CopyTemplate);
        assert_eq!(steps[2].secondary_actions[0].id, ActionId::ReviewExtraFiles);
    }

    #[test]
    fn scan_risk_warning_blocks_ready() {
        let diags = diagnostics(Vec::new());
        let insights = insights(&[]);
        let warnings = vec![SimulationWarning::new(codes::LARGE_TREE, "Tree contains 40 files;")];
        let input = input(&diags, &warnings, &insights);

        let steps = compute_next_steps(&input);
        assert_eq!(ids(&steps), vec!["warning:scan-risk.large-tree"]);
        assert_eq!(
            steps[0].primary_action.as_ref().unwrap().id,
            ActionId::ScanSmallerFolder
        );
        assert_eq!(steps[0].secondary_actions[0].id, ActionId::PastePaths);
    }

    #[test]
    fn warning_already_diagnosed_is_not_repeated() {
        let diags = diagnostics(vec![InstructionDiagnostic::new(
            codes::DEPRECATED_CURSORRULES,
            DiagnosticSeverity::Warning,
            "legacy",
        )]);
        let insights = insights(&[]);
        let warnings = vec![SimulationWarning::new(codes::DEPRECATED_CURSORRULES, "legacy")];
        let input = input(&diags, &warnings, &insights);

        let steps = compute_next_steps(&input);
        assert_eq!(ids(&steps), vec!["diagnostic:deprecated.cursorrules"]);
    }

    #[test]
    fn missing_patterns_preview_does_not_block_ready() {
        let diags = diagnostics(Vec::new());
        let insights = insights(&["a", "b", "c", "d", "e"]);
        let input = input(&diags, &[], &insights);

        let steps = compute_next_steps(&input);
        assert_eq!(ids(&steps), vec!["missing-patterns", "ready"]);
        assert_eq!(
            steps[0].body,
            "This tool looks for instruction files in: a, b, c and 2 more. Add them if needed."
        );
    }
}
