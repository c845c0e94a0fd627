//! Markdowntown universal agent manifest
//!
//! UAM v1 is the canonical, tool-agnostic description of agent instructions:
//! scopes say where instructions apply, blocks carry the content and targets
//! name the adapters to compile it with.
//!
//! # Example
//!
//! ```rust
//! use mdt_uam::{parse_uam_v1, UamScope};
//!
//! let uam = parse_uam_v1(r#"{
//!     "schemaVersion": 1,
//!     "meta": { "title": "Repo rules" },
//!     "scopes": [{ "id": "web", "kind": "dir", "dir": "apps/web" }],
//!     "targets": [{ "targetId": "agents-md" }]
//! }"#)?;
//! assert_eq!(uam.scopes[0], UamScope::dir("web", "apps/web"));
//! assert_eq!(uam.targets[0].adapter_version, "1");
//! # Ok::<(), mdt_uam::UamError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod glob;
mod schema;
mod types;
mod validate;

pub use error::{UamError, ValidationIssue};
pub use glob::is_valid_glob;
pub use schema::{uam_v1_json_schema, uam_v1_schema};
pub use types::{
    UamBlock, UamBlockKind, UamCapability, UamMeta, UamOptions, UamScope, UamTarget, UamV1,
    DEFAULT_ADAPTER_VERSION, GLOBAL_SCOPE_ID, UAM_V1_SCHEMA_VERSION,
};
pub use validate::{limits, parse_uam_v1, parse_uam_v1_value};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
