//! Reading trees, manifests, config and target specs from disk

use anyhow::{Context, Result};
use mdt_atlas::SimulatorConfig;
use mdt_tree::RepoTree;
use mdt_uam::{parse_uam_v1, UamTarget, UamV1};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Malformed command-line value
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// `--target` without an id, or with an empty version
    #[error("invalid target '{0}': expected <id> or <id>@<version>")]
    InvalidTarget(String),
}

/// Tree file: a full `{ "files": [...] }` tree or a bare path list
#[derive(Deserialize)]
#[serde(untagged)]
enum TreeFile {
    Tree(RepoTree),
    Paths(Vec<String>),
}

pub(crate) fn read_tree(path: &Path) -> Result<RepoTree> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read tree {}", path.display()))?;
    let parsed: TreeFile = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse tree {}", path.display()))?;
    Ok(match parsed {
        TreeFile::Tree(tree) => tree,
        TreeFile::Paths(paths) => RepoTree::from_paths(paths),
    })
}

pub(crate) fn read_config(path: Option<&Path>) -> Result<SimulatorConfig> {
    let Some(path) = path else {
        return Ok(SimulatorConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("invalid config {}", path.display()))
}

pub(crate) fn read_manifest(path: &Path) -> Result<UamV1> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    parse_uam_v1(&raw).with_context(|| format!("invalid manifest {}", path.display()))
}

/// Parse `id` or `id@version`
pub(crate) fn parse_target(spec: &str) -> Result<UamTarget, InputError> {
    let (id, version) = match spec.split_once('@') {
        Some((id, version)) => (id.trim(), Some(version.trim())),
        None => (spec.trim(), None),
    };
    if id.is_empty() || version.is_some_and(str::is_empty) {
        return Err(InputError::InvalidTarget(spec.to_string()));
    }
    let target = UamTarget::new(id);
    Ok(match version {
        Some(version) => target.with_version(version),
        None => target,
    })
}
