//! Expected-vs-found instruction file insights
//!
//! Independent of load order: for each tool a fixed list of expected
//! patterns is matched against the tree. Ancestor-walk tools get one pattern
//! per ancestor directory of the cwd.

use crate::resolvers::layout;
use crate::tool::ToolId;
use crate::types::SimulationInput;
use mdt_tree::{ancestor_dirs, join_dir_file, normalize_path, TreeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Static description of where a tool looks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedPattern {
    /// Stable id (`codex-cli.agents.root`, `cursor.rules`, ...)
    pub id: String,
    /// Display label
    pub label: String,
    /// Glob-like display pattern
    pub pattern: String,
}

/// Insights for one tool over one tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorInsights {
    /// Tool the insights describe
    pub tool: ToolId,
    /// Every pattern the tool looks for
    pub expected_patterns: Vec<ExpectedPattern>,
    /// Matching tree paths, in tree order
    pub found_files: Vec<String>,
    /// Expected patterns with no match
    pub missing_files: Vec<ExpectedPattern>,
    /// Human notes on precedence between matches
    pub precedence_notes: Vec<String>,
}

#[derive(Debug, Clone)]
enum Matcher {
    Exact(String),
    Under {
        prefix: &'static str,
        suffix: Option<&'static str>,
    },
}

impl Matcher {
    fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(expected) => path == expected.as_str(),
            Self::Under { prefix, suffix } => {
                path.starts_with(prefix) && suffix.map_or(true, |suffix| path.ends_with(suffix))
            }
        }
    }
}

#[derive(Debug, Clone)]
struct PatternDef {
    pattern: ExpectedPattern,
    matcher: Matcher,
}

impl PatternDef {
    fn exact(id: impl Into<String>, label: impl Into<String>, path: String) -> Self {
        Self {
            pattern: ExpectedPattern {
                id: id.into(),
                label: label.into(),
                pattern: path.clone(),
            },
            matcher: Matcher::Exact(path),
        }
    }

    fn under(
        id: &str,
        label: &str,
        pattern: &str,
        prefix: &'static str,
        suffix: Option<&'static str>,
    ) -> Self {
        Self {
            pattern: ExpectedPattern {
                id: id.to_string(),
                label: label.to_string(),
                pattern: pattern.to_string(),
            },
            matcher: Matcher::Under { prefix, suffix },
        }
    }
}

/// Compute expected, found and missing instruction files for a tool
#[must_use]
pub fn compute_simulator_insights(input: &SimulationInput<'_>) -> SimulatorInsights {
    let index = input.tree.index();
    let cwd = normalize_path(input.cwd);

    let (patterns, notes): (Vec<PatternDef>, Vec<&str>) = match input.tool {
        ToolId::GithubCopilot => (
            vec![
                PatternDef::exact(
                    "github-copilot.repo",
                    "Repo instructions",
                    layout::COPILOT_ROOT.to_string(),
                ),
                PatternDef::under(
                    "github-copilot.scoped",
                    "Scoped instructions",
                    ".github/instructions/*.instructions.md",
                    layout::COPILOT_SCOPED_DIR,
                    Some(layout::INSTRUCTIONS_SUFFIX),
                ),
            ],
            vec!["More specific scoped instructions take precedence over repo-wide instructions."],
        ),
        ToolId::CopilotCli => (
            vec![
                PatternDef::exact(
                    "copilot-cli.repo",
                    "Repo instructions",
                    layout::COPILOT_ROOT.to_string(),
                ),
                PatternDef::under(
                    "copilot-cli.scoped",
                    "Scoped instructions",
                    ".github/copilot-instructions/**/*.instructions.md",
                    layout::COPILOT_CLI_SCOPED_DIR,
                    Some(layout::INSTRUCTIONS_SUFFIX),
                ),
                PatternDef::under(
                    "copilot-cli.agents",
                    "Agent profiles",
                    ".github/agents/*.agent.md",
                    layout::COPILOT_AGENTS_DIR,
                    Some(layout::AGENT_SUFFIX),
                ),
            ],
            vec![
                "Scoped instruction files take precedence over repo-wide instructions.",
                "When agent profile names conflict, higher-precedence scopes win.",
            ],
        ),
        ToolId::CodexCli => (
            ancestor_dirs(&cwd)
                .iter()
                .flat_map(|dir| {
                    let (key, suffix) = dir_key(dir);
                    [
                        PatternDef::exact(
                            format!("codex-cli.agents.{key}"),
                            format!("Directory instructions {suffix}"),
                            join_dir_file(dir, layout::AGENTS),
                        ),
                        PatternDef::exact(
                            format!("codex-cli.override.{key}"),
                            format!("Directory override {suffix}"),
                            join_dir_file(dir, layout::AGENTS_OVERRIDE),
                        ),
                    ]
                })
                .collect(),
            vec![
                "AGENTS.override.md overrides AGENTS.md in the same directory.",
                "Instructions accumulate from the repo root to the cwd; deeper directories take precedence.",
            ],
        ),
        ToolId::ClaudeCode => (
            memory_patterns("claude-code", layout::CLAUDE, &cwd),
            vec!["More specific CLAUDE.md files (closer to the cwd) take precedence."],
        ),
        ToolId::GeminiCli => (
            memory_patterns("gemini-cli", layout::GEMINI, &cwd),
            vec!["More specific GEMINI.md files (closer to the cwd) take precedence."],
        ),
        ToolId::Cursor => (
            vec![
                PatternDef::under(
                    "cursor.rules",
                    "Cursor rule files",
                    ".cursor/rules/*.mdc",
                    layout::CURSOR_RULES_DIR,
                    Some(layout::CURSOR_RULE_SUFFIX),
                ),
                PatternDef::exact(
                    "cursor.legacy",
                    "Legacy .cursorrules",
                    layout::CURSORRULES.to_string(),
                ),
            ],
            vec!["Rules in .cursor/rules take precedence over .cursorrules."],
        ),
    };

    build(input.tool, patterns, &notes, &index)
}

fn dir_key(dir: &str) -> (&str, String) {
    if dir.is_empty() {
        ("root", "(root)".to_string())
    } else {
        (dir, format!("({dir})"))
    }
}

fn memory_patterns(tool_id: &str, file_name: &str, cwd: &str) -> Vec<PatternDef> {
    ancestor_dirs(cwd)
        .iter()
        .map(|dir| {
            let (key, suffix) = dir_key(dir);
            PatternDef::exact(
                format!("{tool_id}.memory.{key}"),
                format!("Directory memory {suffix}"),
                join_dir_file(dir, file_name),
            )
        })
        .collect()
}

fn build(
    tool: ToolId,
    patterns: Vec<PatternDef>,
    notes: &[&str],
    index: &TreeIndex<'_>,
) -> SimulatorInsights {
    let mut matched: HashSet<&str> = HashSet::new();
    let mut missing = Vec::new();

    for def in &patterns {
        let mut any = false;
        for path in index.paths() {
            if def.matcher.matches(path) {
                any = true;
                matched.insert(path);
            }
        }
        if !any {
            missing.push(def.pattern.clone());
        }
    }

    SimulatorInsights {
        tool,
        expected_patterns: patterns.into_iter().map(|def| def.pattern).collect(),
        found_files: index
            .paths()
            .filter(|path| matched.contains(path))
            .map(str::to_string)
            .collect(),
        missing_files: missing,
        precedence_notes: notes.iter().map(|note| (*note).to_string()).collect(),
    }
}

/// Short human summary of an insights run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsSummary {
    /// Headline
    pub title: String,
    /// Found/missing/shadowed counts as prose
    pub body: String,
    /// Suggested next step
    pub next_step: String,
    /// Extra hint, when the scan found nothing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// Summarize insights plus the number of shadowed files
#[must_use]
pub fn format_insights_summary(
    insights: &SimulatorInsights,
    shadowed_count: usize,
) -> InsightsSummary {
    let found = insights.found_files.len();
    let missing = insights.missing_files.len();
    let expected = insights.expected_patterns.len();

    let mut body = Vec::new();
    if found == 0 {
        body.push("No instruction files found.".to_string());
    } else {
        body.push(format!("Found {}.", count(found, "instruction file")));
    }
    if expected > 0 {
        if missing == 0 {
            body.push("All expected files are present.".to_string());
        } else {
            body.push(format!("{} missing.", count(missing, "expected file")));
        }
    }
    if shadowed_count > 0 {
        body.push(format!(
            "{} won't load for this tool.",
            count(shadowed_count, "shadowed instruction file")
        ));
    }

    let next_step = if missing > 0 {
        let plural = if missing == 1 { "" } else { "s" };
        format!("Next step: add the missing instruction file{plural} or copy a template, then rescan.")
    } else if shadowed_count > 0 {
        "Next step: switch tools or remove shadowed files to avoid conflicts.".to_string()
    } else if found == 0 {
        "Next step: add a tool instruction file to get guidance, then rescan.".to_string()
    } else {
        "Next step: open Workbench to build and export agents.md.".to_string()
    };

    let note = (found == 0 && expected > 0).then(|| {
        "If your scan was truncated due to file limits, try scanning a smaller folder.".to_string()
    });

    InsightsSummary {
        title: format!("Detected tool: {}", insights.tool.label()),
        body: body.join(" "),
        next_step,
        note,
    }
}
