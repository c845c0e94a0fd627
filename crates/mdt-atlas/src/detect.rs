//! Tool detection from a path list

use crate::resolvers::layout;
use crate::tool::ToolId;
use indexmap::IndexMap;
use mdt_tree::{is_named_file, normalize_path};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How sure the detector is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionConfidence {
    /// Single clear winner
    High,
    /// Winner with competition, or a weak signal
    Medium,
    /// Tie or a very weak signal
    Low,
    /// No instruction files at all
    None,
}

/// Scored tool match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionCandidate {
    /// Tool
    pub tool: ToolId,
    /// Weighted match score
    pub score: usize,
    /// Matched paths, sorted and unique
    pub paths: Vec<String>,
    /// Which layouts matched
    pub reason: String,
}

/// Result of [`detect_tool`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDetection {
    /// Best tool, `None` when nothing matched or the top score is tied
    pub tool: Option<ToolId>,
    /// Confidence in `tool`
    pub confidence: DetectionConfidence,
    /// All candidates, best first
    pub candidates: Vec<DetectionCandidate>,
    /// Candidate tools, best first
    pub matched_tools: Vec<ToolId>,
    /// More than one tool matched
    pub is_mixed: bool,
}

#[derive(Debug, Default)]
struct Bucket {
    paths: Vec<String>,
    reasons: Vec<&'static str>,
    score: usize,
}

impl Bucket {
    fn add(&mut self, paths: &[String], weight: usize, reason: &'static str) {
        if paths.is_empty() {
            return;
        }
        self.paths.extend_from_slice(paths);
        self.score += weight * paths.len();
        if !self.reasons.contains(&reason) {
            self.reasons.push(reason);
        }
    }
}

fn select_paths(paths: &[String], predicate: fn(&str) -> bool) -> Vec<String> {
    paths.iter().filter(|path| predicate(path)).cloned().collect()
}

/// Guess which tool a repository is set up for
#[must_use]
pub fn detect_tool<S: AsRef<str>>(paths: &[S]) -> ToolDetection {
    let normalized: Vec<String> = paths
        .iter()
        .map(|path| normalize_path(path.as_ref()))
        .filter(|path| !path.is_empty())
        .collect();
    let select = |predicate: fn(&str) -> bool| select_paths(&normalized, predicate);

    let mut buckets: IndexMap<ToolId, Bucket> = [
        ToolId::CodexCli,
        ToolId::ClaudeCode,
        ToolId::GeminiCli,
        ToolId::CopilotCli,
        ToolId::GithubCopilot,
        ToolId::Cursor,
    ]
    .into_iter()
    .map(|tool| (tool, Bucket::default()))
    .collect();

    buckets[&ToolId::CodexCli].add(
        &select(|path| is_named_file(path, layout::AGENTS)),
        3,
        "AGENTS.md",
    );
    buckets[&ToolId::CodexCli].add(
        &select(|path| is_named_file(path, layout::AGENTS_OVERRIDE)),
        2,
        "AGENTS.override.md",
    );
    buckets[&ToolId::ClaudeCode].add(
        &select(|path| is_named_file(path, layout::CLAUDE)),
        3,
        "CLAUDE.md",
    );
    buckets[&ToolId::GeminiCli].add(
        &select(|path| is_named_file(path, layout::GEMINI)),
        3,
        "GEMINI.md",
    );

    if normalized.iter().any(|path| path == layout::COPILOT_ROOT) {
        let root = [layout::COPILOT_ROOT.to_string()];
        buckets[&ToolId::CopilotCli].add(&root, 2, layout::COPILOT_ROOT);
        buckets[&ToolId::GithubCopilot].add(&root, 2, layout::COPILOT_ROOT);
    }
    buckets[&ToolId::CopilotCli].add(
        &select(|path| {
            path.starts_with(layout::COPILOT_CLI_SCOPED_DIR)
                && path.ends_with(layout::INSTRUCTIONS_SUFFIX)
        }),
        2,
        ".github/copilot-instructions/*.instructions.md",
    );
    buckets[&ToolId::CopilotCli].add(
        &select(|path| path.starts_with(layout::COPILOT_AGENTS_DIR)),
        3,
        ".github/agents/*",
    );
    buckets[&ToolId::GithubCopilot].add(
        &select(|path| {
            path.starts_with(layout::COPILOT_SCOPED_DIR)
                && path.ends_with(layout::INSTRUCTIONS_SUFFIX)
        }),
        3,
        ".github/instructions/*.instructions.md",
    );
    buckets[&ToolId::Cursor].add(
        &select(|path| path.starts_with(layout::CURSOR_RULES_DIR)),
        3,
        ".cursor/rules/*",
    );
    buckets[&ToolId::Cursor].add(
        &select(|path| is_named_file(path, layout::CURSORRULES)),
        3,
        ".cursorrules",
    );

    let mut candidates: Vec<DetectionCandidate> = buckets
        .into_iter()
        .filter(|(_, bucket)| bucket.score > 0)
        .map(|(tool, bucket)| DetectionCandidate {
            tool,
            score: bucket.score,
            paths: bucket
                .paths
                .into_iter()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
            reason: format!("Matched {}", bucket.reasons.join(", ")),
        })
        .collect();
    // Stable: equal scores keep bucket order
    candidates.sort_by(|a, b| b.score.cmp(&a.score));

    let Some(top_score) = candidates.first().map(|candidate| candidate.score) else {
        return ToolDetection {
            tool: None,
            confidence: DetectionConfidence::None,
            candidates,
            matched_tools: Vec::new(),
            is_mixed: false,
        };
    };

    let matched_tools: Vec<ToolId> = candidates.iter().map(|candidate| candidate.tool).collect();
    let tied = candidates
        .iter()
        .filter(|candidate| candidate.score == top_score)
        .count();
    let is_mixed = candidates.len() > 1;

    if tied > 1 {
        return ToolDetection {
            tool: None,
            confidence: DetectionConfidence::Low,
            candidates,
            matched_tools,
            is_mixed: true,
        };
    }

    let confidence = if top_score >= 3 && !is_mixed {
        DetectionConfidence::High
    } else if top_score >= 2 {
        DetectionConfidence::Medium
    } else {
        DetectionConfidence::Low
    };

    ToolDetection {
        tool: Some(candidates[0].tool),
        confidence,
        candidates,
        matched_tools,
        is_mixed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_detects_nothing() {
        let detection = detect_tool::<&str>(&[]);
        assert_eq!(detection.tool, None);
        assert_eq!(detection.confidence, DetectionConfidence::None);
        assert!(!detection.is_mixed);
    }

    #[test]
    fn single_tool_is_high_confidence() {
        let detection = detect_tool(&["AGENTS.md", "apps/AGENTS.md", "src/main.rs"]);
        assert_eq!(detection.tool, Some(ToolId::CodexCli));
        assert_eq!(detection.confidence, DetectionConfidence::High);
        assert_eq!(detection.candidates[0].score, 6);
        assert_eq!(detection.candidates[0].reason, "Matched AGENTS.md");
    }

    #[test]
    fn shared_copilot_root_is_a_tie() {
        let detection = detect_tool(&[".github/copilot-instructions.md"]);
        assert_eq!(detection.tool, None);
        assert_eq!(detection.confidence, DetectionConfidence::Low);
        assert!(detection.is_mixed);
        assert_eq!(
            detection.matched_tools,
            vec![ToolId::CopilotCli, ToolId::GithubCopilot]
        );
    }

    #[test]
    fn mixed_tree_caps_confidence() {
        let detection = detect_tool(&["CLAUDE.md", "docs/CLAUDE.md", "GEMINI.md"]);
        assert_eq!(detection.tool, Some(ToolId::ClaudeCode));
        assert_eq!(detection.confidence, DetectionConfidence::Medium);
        assert!(detection.is_mixed);
    }
}
