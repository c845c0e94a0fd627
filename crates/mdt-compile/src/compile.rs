//! Compile orchestrator
//!
//! Resolves each requested target, runs the adapters (in parallel) and merges
//! their output. Ordering and collision resolution depend only on adapter
//! identities and output paths, never on request order or scheduling.

use crate::adapter::{Adapter, AdapterOutput, CompiledFile};
use crate::error::{AdapterError, CompileError};
use crate::registry::AdapterRegistry;
use indexmap::IndexMap;
use mdt_tree::RepoPath;
use mdt_uam::{UamTarget, UamV1};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Aggregated output of a compile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileResult {
    /// Files sorted by path, one per path
    pub files: Vec<CompiledFile>,
    /// Unknown targets, failed adapters, adapter warnings, collisions
    pub warnings: Vec<String>,
    /// Adapter info notes
    pub info: Vec<String>,
}

impl CompileResult {
    /// Look up a file by path
    #[must_use]
    pub fn file(&self, path: &str) -> Option<&CompiledFile> {
        self.files.iter().find(|file| file.path == path)
    }

    /// Output paths in order
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        self.files.iter().map(|file| file.path.as_str()).collect()
    }
}

/// `(id, version)` of a requested target
type TargetKey = (String, String);

fn display_key((id, version): &TargetKey) -> String {
    format!("{id}@{version}")
}

struct Request<'t> {
    key: TargetKey,
    target: &'t UamTarget,
    adapter: Option<Arc<dyn Adapter>>,
}

/// Normalized output path, `None` when empty, absolute or escaping the root
fn sanitize_path(path: &str) -> Option<String> {
    let parsed: RepoPath = path.parse().ok()?;
    (!parsed.is_root()).then(|| parsed.as_string())
}

/// Compile `manifest` for `targets` using `registry`
///
/// Unknown targets and failing adapters degrade to warnings. Requests for the
/// same `(id, version)` compile once, with the first request's options.
///
/// # Errors
/// [`CompileError::InvalidManifest`] if the manifest fails validation.
pub fn compile_uam_v1(
    manifest: &UamV1,
    targets: &[UamTarget],
    registry: &AdapterRegistry,
) -> Result<CompileResult, CompileError> {
    manifest.validate()?;

    let mut unique: IndexMap<TargetKey, &UamTarget> = IndexMap::new();
    for target in targets {
        unique
            .entry((target.target_id.clone(), target.adapter_version.clone()))
            .or_insert(target);
    }
    let requests: Vec<Request<'_>> = unique
        .into_iter()
        .map(|(key, target)| Request {
            adapter: registry.resolve(&key.0, &key.1),
            key,
            target,
        })
        .collect();

    // Indexed parallel collect keeps request order
    let outputs: Vec<Option<Result<AdapterOutput, AdapterError>>> = requests
        .par_iter()
        .map(|request| {
            request
                .adapter
                .as_ref()
                .map(|adapter| adapter.compile(manifest, request.target))
        })
        .collect();

    let mut result = CompileResult::default();
    let mut by_path: BTreeMap<String, Vec<(&TargetKey, String)>> = BTreeMap::new();

    for (request, output) in requests.iter().zip(outputs) {
        let label = display_key(&request.key);
        let output = match output {
            None => {
                warn!(target_id = %request.key.0, version = %request.key.1, "unknown compile target");
                result.warnings.push(format!("Unknown target: {label}"));
                continue;
            }
            Some(Err(err)) => {
                warn!(adapter = %label, error = %err, "adapter failed");
                result.warnings.push(format!("Target {label} failed: {err}"));
                continue;
            }
            Some(Ok(output)) => output,
        };

        result.warnings.extend(output.warnings);
        result.info.extend(output.info);
        for file in output.files {
            let Some(path) = sanitize_path(&file.path) else {
                warn!(adapter = %label, path = %file.path, "dropping malformed output path");
                result.warnings.push(format!(
                    "Target {label} emitted invalid path '{}'; file dropped.",
                    file.path
                ));
                continue;
            };
            by_path.entry(path).or_default().push((&request.key, file.content));
        }
    }

    let mut collisions = Vec::new();
    for (path, mut emitters) in by_path {
        // Stable: one target emitting a path twice keeps its first content
        emitters.sort_by(|(a, _), (b, _)| a.cmp(b));
        let mut unique: Vec<(&TargetKey, String)> = Vec::with_capacity(emitters.len());
        for (key, content) in emitters {
            if unique.last().is_some_and(|(last, _)| *last == key) {
                let label = display_key(key);
                warn!(adapter = %label, path = %path, "duplicate output path from one target");
                collisions.push(format!(
                    "Target {label} emitted {path} more than once; keeping the first"
                ));
                continue;
            }
            unique.push((key, content));
        }

        let mut emitters = unique.into_iter();
        let Some((winner, content)) = emitters.next() else {
            continue;
        };
        for (loser, _) in emitters {
            let (winner, loser) = (display_key(winner), display_key(loser));
            warn!(path = %path, winner = %winner, loser = %loser, "output path collision");
            collisions.push(format!(
                "File path collision: {path} emitted by {winner} and {loser}; keeping {winner}"
            ));
        }
        result.files.push(CompiledFile { path, content });
    }
    result.warnings.extend(collisions);

    debug!(
        targets = requests.len(),
        files = result.files.len(),
        warnings = result.warnings.len(),
        "compiled manifest"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug)]
    struct Emit {
        id: &'static str,
        files: Vec<(&'static str, &'static str)>,
    }

    impl Adapter for Emit {
        fn id(&self) -> &str {
            self.id
        }

        fn version(&self) -> &str {
            "1"
        }

        fn label(&self) -> &str {
            self.id
        }

        fn compile(&self, _: &UamV1, _: &UamTarget) -> Result<AdapterOutput, AdapterError> {
            let mut out = AdapterOutput::new();
            for (path, content) in &self.files {
                out.push_file(*path, *content);
            }
            Ok(out)
        }
    }

    #[derive(Debug)]
    struct Broken;

    impl Adapter for Broken {
        fn id(&self) -> &str {
            "broken"
        }

        fn version(&self) -> &str {
            "1"
        }

        fn label(&self) -> &str {
            "Broken"
        }

        fn compile(&self, _: &UamV1, _: &UamTarget) -> Result<AdapterOutput, AdapterError> {
            Err(AdapterError::Failed("boom".to_string()))
        }
    }

    fn registry(adapters: Vec<Emit>) -> AdapterRegistry {
        let mut registry = AdapterRegistry::new();
        for adapter in adapters {
            registry.register(adapter);
        }
        registry
    }

    #[test]
    fn failed_adapter_degrades_to_warning() {
        let mut registry = registry(vec![Emit {
            id: "ok",
            files: vec![("ok.md", "ok")],
        }]);
        registry.register(Broken);

        let result = compile_uam_v1(
            &UamV1::empty("x"),
            &[UamTarget::new("broken"), UamTarget::new("ok")],
            &registry,
        )
        .unwrap();
        assert_eq!(result.paths(), vec!["ok.md"]);
        assert_eq!(result.warnings, vec!["Target broken@1 failed: boom"]);
    }

    #[test]
    fn malformed_paths_are_dropped() {
        let registry = registry(vec![Emit {
            id: "bad",
            files: vec![("/etc/passwd", "x"), ("../up.md", "x"), ("", "x"), ("./fine.md", "y")],
        }]);
        let result =
            compile_uam_v1(&UamV1::empty("x"), &[UamTarget::new("bad")], &registry).unwrap();
        assert_eq!(result.paths(), vec!["fine.md"]);
        assert_eq!(
            result.warnings,
            vec![
                "Target bad@1 emitted invalid path '/etc/passwd'; file dropped.",
                "Target bad@1 emitted invalid path '../up.md'; file dropped.",
                "Target bad@1 emitted invalid path ''; file dropped.",
            ]
        );
    }

    #[test]
    fn duplicate_requests_compile_once() {
        let registry = registry(vec![Emit {
            id: "a",
            files: vec![("a.md", "A")],
        }]);
        let result = compile_uam_v1(
            &UamV1::empty("x"),
            &[UamTarget::new("a"), UamTarget::new("a")],
            &registry,
        )
        .unwrap();
        assert_eq!(result.files.len(), 1);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn repeated_path_from_one_target_warns() {
        let registry = registry(vec![Emit {
            id: "twice",
            files: vec![("dup.md", "first"), ("dup.md", "second")],
        }]);
        let result =
            compile_uam_v1(&UamV1::empty("x"), &[UamTarget::new("twice")], &registry).unwrap();
        assert_eq!(result.file("dup.md").map(|f| f.content.as_str()), Some("first"));
        assert_eq!(
            result.warnings,
            vec!["Target twice@1 emitted dup.md more than once; keeping the first"]
        );
    }

    #[test]
    fn invalid_manifest_is_an_error() {
        let mut manifest = UamV1::empty("x");
        manifest.meta.title.clear();
        let err = compile_uam_v1(&manifest, &[], &AdapterRegistry::new()).unwrap_err();
        assert!(matches!(err, CompileError::InvalidManifest(_)));
    }

    #[test]
    fn unknown_version_is_unknown_target() {
        let mut registry = AdapterRegistry::new();
        registry.register(Emit {
            id: "a",
            files: vec![("same.md", "v1")],
        });
        let result = compile_uam_v1(
            &UamV1::empty("x"),
            &[UamTarget::new("a").with_version("2"), UamTarget::new("a")],
            &registry,
        )
        .unwrap();
        assert_eq!(result.file("same.md").map(|f| f.content.as_str()), Some("v1"));
        assert_eq!(result.warnings, vec!["Unknown target: a@2"]);
    }
}
