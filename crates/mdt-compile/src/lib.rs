//! Markdowntown compiler
//!
//! Turns one UAM v1 manifest into the file layouts each assistant tool
//! expects. Per-target [`Adapter`]s do the translation; [`compile_uam_v1`]
//! aggregates their output with deterministic ordering and explicit collision
//! resolution.
//!
//! # Example
//!
//! ```rust
//! use mdt_compile::{compile_uam_v1, AdapterRegistry};
//! use mdt_uam::{UamTarget, UamV1};
//!
//! let manifest = UamV1::wrap_markdown_as_global("Run `cargo test` before committing.", "Repo");
//! let targets = [UamTarget::new("agents-md"), UamTarget::new("claude-code")];
//! let result = compile_uam_v1(&manifest, &targets, &AdapterRegistry::with_defaults())?;
//! assert_eq!(result.paths(), vec!["AGENTS.md", "CLAUDE.md"]);
//! # Ok::<(), mdt_compile::CompileError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod adapter;
pub mod adapters;
mod compile;
mod error;
mod registry;
pub mod skills;

pub use adapter::{Adapter, AdapterOutput, CompiledFile};
pub use compile::{compile_uam_v1, CompileResult};
pub use error::{AdapterError, CompileError};
pub use registry::AdapterRegistry;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
