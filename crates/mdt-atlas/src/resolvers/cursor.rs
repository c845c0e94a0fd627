//! Cursor rules resolver

use super::layout::{CURSORRULES, CURSOR_RULES_DIR, CURSOR_RULE_SUFFIX};
use super::{under, Resolution};
use crate::types::codes;
use mdt_tree::TreeIndex;

const RULE_REASON: &str = "cursor rule (.cursor/rules/*.mdc)";
const LEGACY_REASON: &str = "legacy cursor rules (.cursorrules, deprecated)";

pub(super) fn resolve(index: &TreeIndex<'_>) -> Resolution {
    let mut resolution = Resolution::default();
    let rules = index.matching(|path| under(path, CURSOR_RULES_DIR, CURSOR_RULE_SUFFIX));
    let has_rules = !rules.is_empty();
    for path in rules {
        resolution.load(path, RULE_REASON);
    }

    if index.has(CURSORRULES) {
        resolution.load(CURSORRULES, LEGACY_REASON);
        let message = if has_rules {
            "Legacy .cursorrules found alongside .cursor/rules."
        } else {
            "Legacy .cursorrules is deprecated; move rules into .cursor/rules/*.mdc."
        };
        resolution.warn(codes::DEPRECATED_CURSORRULES, message);
    }

    resolution
}
