//! Error types for UAM manifests

use std::fmt::{self, Display, Formatter};

/// One structural problem in a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted location, e.g. `scopes.2.patterns.0`
    pub path: String,
    /// What is wrong
    pub message: String,
}

impl ValidationIssue {
    /// Create new issue
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl Display for ValidationIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Manifest rejected
///
/// Always a caller contract violation: the manifest did not come from a
/// conforming editor or was edited by hand.
#[derive(Debug, thiserror::Error)]
pub enum UamError {
    /// JSON did not deserialize into the manifest shape
    #[error("malformed manifest: {0}")]
    Malformed(#[from] serde_json::Error),

    /// `schemaVersion` is not 1
    #[error("unsupported schema version: {0}")]
    UnsupportedSchemaVersion(u32),

    /// Shape deserialized but breaks structural rules
    #[error("invalid manifest ({} issue(s)): {}", .0.len(), first_issue(.0))]
    Invalid(Vec<ValidationIssue>),
}

fn first_issue(issues: &[ValidationIssue]) -> String {
    issues.first().map(ToString::to_string).unwrap_or_default()
}

impl UamError {
    /// Validation issues, empty for other variants
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Self::Invalid(issues) => issues,
            Self::Malformed(_) | Self::UnsupportedSchemaVersion(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_display_names_first_issue() {
        let err = UamError::Invalid(vec![
            ValidationIssue::new("meta.title", "must not be empty"),
            ValidationIssue::new("scopes", "Duplicate scope id: a"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid manifest (2 issue(s)): meta.title: must not be empty"
        );
        assert_eq!(err.issues().len(), 2);
    }

    #[test]
    fn version_display() {
        assert_eq!(
            UamError::UnsupportedSchemaVersion(2).to_string(),
            "unsupported schema version: 2"
        );
    }
}
