//! Adapter contract

use crate::error::AdapterError;
use mdt_uam::{UamTarget, UamV1};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// One generated file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledFile {
    /// Repo-relative output path
    pub path: String,
    /// File content
    pub content: String,
}

impl CompiledFile {
    /// Create new compiled file
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// What one adapter produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterOutput {
    /// Generated files
    pub files: Vec<CompiledFile>,
    /// Lossy or skipped content
    pub warnings: Vec<String>,
    /// Informational notes
    pub info: Vec<String>,
}

impl AdapterOutput {
    /// Create empty output
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file
    pub fn push_file(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.push(CompiledFile::new(path, content));
    }

    /// Add a warning
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Sort files by path
    #[must_use]
    pub fn sorted(mut self) -> Self {
        self.files.sort_by(|a, b| a.path.cmp(&b.path));
        self
    }
}

/// Per-target compiler from a manifest to concrete files
///
/// Implementations must be pure: no shared mutable state and identical output
/// for identical input, whatever the call order. The orchestrator relies on
/// this to run adapters in parallel.
pub trait Adapter: Send + Sync + Debug {
    /// Target id, e.g. `agents-md`
    fn id(&self) -> &str;

    /// Adapter version, e.g. `1`
    fn version(&self) -> &str;

    /// Display label
    fn label(&self) -> &str;

    /// One-line description
    fn description(&self) -> &str {
        ""
    }

    /// Compile `manifest` for `target` (which carries the adapter options)
    ///
    /// # Errors
    /// Returns [`AdapterError`] when the target options are unusable or the
    /// adapter cannot produce output at all. Lossy output is a warning, not
    /// an error.
    fn compile(&self, manifest: &UamV1, target: &UamTarget) -> Result<AdapterOutput, AdapterError>;
}
