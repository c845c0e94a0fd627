//! Structural validation and parsing
//!
//! Checks the shape rules a conforming editor always satisfies. Dangling
//! `block.scopeId` references are not checked here; adapters skip those
//! blocks with a warning.

use crate::error::{UamError, ValidationIssue};
use crate::glob::is_valid_glob;
use crate::types::{UamCapability, UamScope, UamV1, UAM_V1_SCHEMA_VERSION};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

/// Limits applied to capabilities
pub mod limits {
    /// Capabilities per manifest
    pub const MAX_CAPABILITIES: usize = 64;
    /// Characters in a capability id
    pub const MAX_CAPABILITY_ID: usize = 80;
    /// Characters in a capability title
    pub const MAX_CAPABILITY_TITLE: usize = 120;
    /// Characters in a capability description
    pub const MAX_CAPABILITY_DESCRIPTION: usize = 4000;
    /// Keys in capability params
    pub const MAX_CAPABILITY_PARAM_KEYS: usize = 32;
    /// Characters in one params key
    pub const MAX_CAPABILITY_PARAM_KEY_LENGTH: usize = 64;
    /// Serialized params size
    pub const MAX_CAPABILITY_PARAMS_BYTES: usize = 32_768;
}

static CAPABILITY_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[a-z0-9][a-z0-9._-]*$").expect("valid capability id regex"));

#[derive(Default)]
struct Issues(Vec<ValidationIssue>);

impl Issues {
    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.push(ValidationIssue::new(path, message));
    }

    fn non_empty(&mut self, path: impl Into<String>, value: &str) {
        if value.is_empty() {
            self.push(path, "must not be empty");
        }
    }

    fn non_empty_opt(&mut self, path: impl Into<String>, value: Option<&str>) {
        if let Some(value) = value {
            self.non_empty(path, value);
        }
    }
}

impl UamV1 {
    /// Check structural rules
    ///
    /// # Errors
    /// [`UamError::UnsupportedSchemaVersion`] for any version other than 1,
    /// [`UamError::Invalid`] listing every broken rule otherwise.
    pub fn validate(&self) -> Result<(), UamError> {
        if self.schema_version != UAM_V1_SCHEMA_VERSION {
            return Err(UamError::UnsupportedSchemaVersion(self.schema_version));
        }

        let mut issues = Issues::default();
        issues.non_empty("meta.title", &self.meta.title);

        for (index, scope) in self.scopes.iter().enumerate() {
            validate_scope(&mut issues, index, scope);
        }
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for scope in &self.scopes {
            if !seen.insert(scope.id()) && reported.insert(scope.id()) {
                issues.push("scopes", format!("Duplicate scope id: {}", scope.id()));
            }
        }

        for (index, block) in self.blocks.iter().enumerate() {
            issues.non_empty(format!("blocks.{index}.id"), &block.id);
            issues.non_empty(format!("blocks.{index}.scopeId"), &block.scope_id);
            issues.non_empty_opt(format!("blocks.{index}.title"), block.title.as_deref());
        }

        if self.capabilities.len() > limits::MAX_CAPABILITIES {
            issues.push(
                "capabilities",
                format!("Capabilities exceed {} entries", limits::MAX_CAPABILITIES),
            );
        }
        let mut capability_ids = HashSet::new();
        for (index, capability) in self.capabilities.iter().enumerate() {
            validate_capability(&mut issues, index, capability);
            if !capability_ids.insert(capability.id.as_str()) {
                issues.push(
                    format!("capabilities.{index}.id"),
                    format!("Duplicate capability id: {}", capability.id),
                );
            }
        }

        for (index, target) in self.targets.iter().enumerate() {
            issues.non_empty(format!("targets.{index}.targetId"), &target.target_id);
            issues.non_empty(
                format!("targets.{index}.adapterVersion"),
                &target.adapter_version,
            );
        }

        if issues.0.is_empty() {
            Ok(())
        } else {
            debug!(issues = issues.0.len(), "manifest failed validation");
            Err(UamError::Invalid(issues.0))
        }
    }
}

fn validate_scope(issues: &mut Issues, index: usize, scope: &UamScope) {
    let at = |field: &str| format!("scopes.{index}.{field}");
    issues.non_empty(at("id"), scope.id());
    issues.non_empty_opt(at("name"), scope.name());

    match scope {
        UamScope::Global { .. } => {}
        UamScope::Dir { dir, .. } => issues.non_empty(at("dir"), dir),
        UamScope::Glob { patterns, .. } => {
            if patterns.is_empty() {
                issues.push(at("patterns"), "must contain at least one pattern");
            }
            for (i, pattern) in patterns.iter().enumerate() {
                if !is_valid_glob(pattern) {
                    issues.push(at(&format!("patterns.{i}")), "Invalid glob pattern syntax");
                }
            }
        }
    }
}

fn validate_capability(issues: &mut Issues, index: usize, capability: &UamCapability) {
    let at = |field: &str| format!("capabilities.{index}.{field}");

    let id_len = capability.id.chars().count();
    if id_len == 0 {
        issues.push(at("id"), "must not be empty");
    } else if id_len > limits::MAX_CAPABILITY_ID {
        issues.push(
            at("id"),
            format!("must be at most {} characters", limits::MAX_CAPABILITY_ID),
        );
    } else if !CAPABILITY_ID.is_match(&capability.id) {
        issues.push(
            at("id"),
            "Capability id must be slug-like (letters, numbers, ., _, -)",
        );
    }

    if let Some(title) = &capability.title {
        let len = title.chars().count();
        if len == 0 || len > limits::MAX_CAPABILITY_TITLE {
            issues.push(
                at("title"),
                format!("must be 1 to {} characters", limits::MAX_CAPABILITY_TITLE),
            );
        }
    }

    if let Some(description) = &capability.description {
        if description.chars().count() > limits::MAX_CAPABILITY_DESCRIPTION {
            issues.push(
                at("description"),
                format!(
                    "must be at most {} characters",
                    limits::MAX_CAPABILITY_DESCRIPTION
                ),
            );
        }
    }

    if let Some(params) = &capability.params {
        if params.len() > limits::MAX_CAPABILITY_PARAM_KEYS {
            issues.push(
                at("params"),
                format!(
                    "Capability params exceed {} keys",
                    limits::MAX_CAPABILITY_PARAM_KEYS
                ),
            );
        }
        for key in params.keys() {
            let len = key.chars().count();
            if len == 0 || len > limits::MAX_CAPABILITY_PARAM_KEY_LENGTH {
                issues.push(
                    at("params"),
                    format!("Invalid params key '{key}'"),
                );
            }
        }
        let size = serde_json::to_string(params).map_or(usize::MAX, |json| json.len());
        if size > limits::MAX_CAPABILITY_PARAMS_BYTES {
            issues.push(
                at("params"),
                format!(
                    "Capability params exceed {} bytes",
                    limits::MAX_CAPABILITY_PARAMS_BYTES
                ),
            );
        }
    }
}

/// Deserialize and validate a manifest from JSON text
///
/// # Errors
/// [`UamError::Malformed`] when the JSON does not match the manifest shape,
/// otherwise whatever [`UamV1::validate`] reports.
pub fn parse_uam_v1(json: &str) -> Result<UamV1, UamError> {
    let uam: UamV1 = serde_json::from_str(json)?;
    uam.validate()?;
    Ok(uam)
}

/// Validate an already-deserialized JSON value
///
/// # Errors
/// Same as [`parse_uam_v1`].
pub fn parse_uam_v1_value(value: serde_json::Value) -> Result<UamV1, UamError> {
    let uam: UamV1 = serde_json::from_value(value)?;
    uam.validate()?;
    Ok(uam)
}
