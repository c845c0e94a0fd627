//! Simulator configuration

use serde::{Deserialize, Serialize};

/// Thresholds for the scan-risk heuristics
///
/// A warning fires when the count strictly exceeds the threshold. The defaults
/// are tuned for pasted or uploaded instruction trees, not full checkouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulatorConfig {
    /// Files in the tree before `scan-risk.large-tree`
    pub large_tree_threshold: usize,
    /// Files under `.cursor/rules/` before `scan-risk.cursor-rules`
    pub cursor_rules_threshold: usize,
}

impl SimulatorConfig {
    /// Default large-tree threshold
    pub const DEFAULT_LARGE_TREE_THRESHOLD: usize = 25;
    /// Default cursor-rules threshold
    pub const DEFAULT_CURSOR_RULES_THRESHOLD: usize = 10;

    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With large-tree threshold
    #[inline]
    #[must_use]
    pub fn with_large_tree_threshold(mut self, threshold: usize) -> Self {
        self.large_tree_threshold = threshold;
        self
    }

    /// With cursor-rules threshold
    #[inline]
    #[must_use]
    pub fn with_cursor_rules_threshold(mut self, threshold: usize) -> Self {
        self.cursor_rules_threshold = threshold;
        self
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            large_tree_threshold: Self::DEFAULT_LARGE_TREE_THRESHOLD,
            cursor_rules_threshold: Self::DEFAULT_CURSOR_RULES_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = SimulatorConfig::new()
            .with_large_tree_threshold(100)
            .with_cursor_rules_threshold(3);
        assert_eq!(config.large_tree_threshold, 100);
        assert_eq!(config.cursor_rules_threshold, 3);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: SimulatorConfig =
            serde_json::from_str(r#"{"largeTreeThreshold": 500}"#).unwrap();
        assert_eq!(config.large_tree_threshold, 500);
        assert_eq!(
            config.cursor_rules_threshold,
            SimulatorConfig::DEFAULT_CURSOR_RULES_THRESHOLD
        );
    }
}
