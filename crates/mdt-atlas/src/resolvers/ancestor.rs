//! Ancestor-walk resolvers (Codex CLI, Gemini CLI)

use super::layout::{AGENTS, AGENTS_OVERRIDE, GEMINI};
use super::Resolution;
use mdt_tree::{ancestor_dirs, join_dir_file, TreeIndex};

const AGENTS_REASON: &str = "directory instructions (AGENTS.md)";
const OVERRIDE_REASON: &str = "directory override (AGENTS.override.md replaces AGENTS.md)";
const GEMINI_REASON: &str = "directory memory (GEMINI.md)";

/// Root-first walk; an override replaces the base file in its directory
pub(super) fn resolve_codex(index: &TreeIndex<'_>, cwd: &str) -> Resolution {
    let mut resolution = Resolution::default();
    for dir in ancestor_dirs(cwd) {
        let override_path = join_dir_file(&dir, AGENTS_OVERRIDE);
        let base_path = join_dir_file(&dir, AGENTS);
        if index.has(&override_path) {
            resolution.load(override_path, OVERRIDE_REASON);
        } else if index.has(&base_path) {
            resolution.load(base_path, AGENTS_REASON);
        }
    }
    resolution
}

pub(super) fn resolve_gemini(index: &TreeIndex<'_>, cwd: &str) -> Resolution {
    let mut resolution = Resolution::default();
    for path in existing_ancestor_files(index, cwd, GEMINI) {
        resolution.load(path, GEMINI_REASON);
    }
    resolution
}

/// `file_name` in every ancestor directory of `cwd` that has one, root first
pub(super) fn existing_ancestor_files(
    index: &TreeIndex<'_>,
    cwd: &str,
    file_name: &str,
) -> Vec<String> {
    ancestor_dirs(cwd)
        .iter()
        .map(|dir| join_dir_file(dir, file_name))
        .filter(|path| index.has(path))
        .collect()
}
