//! Error types for compilation

use mdt_uam::UamError;

/// Failure inside one adapter
///
/// The orchestrator turns these into a warning for the failing target; other
/// targets still compile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    /// Target option has the wrong type or value
    #[error("invalid option '{option}': {message}")]
    InvalidOption {
        /// Option key
        option: String,
        /// What is wrong with it
        message: String,
    },

    /// Adapter could not produce output
    #[error("{0}")]
    Failed(String),
}

impl AdapterError {
    /// Create invalid option error
    pub fn invalid_option(option: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            message: message.into(),
        }
    }
}

/// Whole-compile failure; only raised for caller contract violations
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// Manifest failed structural validation
    #[error("invalid manifest: {0}")]
    InvalidManifest(#[from] UamError),
}
