//! Error types for the simulator
//!
//! Only caller contract violations are errors here. Missing files, unknown
//! imports and similar outcomes of scanning real repositories are reported as
//! warnings or diagnostics alongside a result.

/// Tool id parsing failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolIdError {
    /// Id is not one of the supported tools
    #[error("unknown tool id: '{0}'")]
    Unknown(String),
}
