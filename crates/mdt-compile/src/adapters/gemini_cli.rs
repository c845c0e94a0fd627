//! Gemini CLI exporter
//!
//! Gemini has no scoped instruction files, so scoped content is flattened into
//! `GEMINI.md` (with a lossy warning). With the `modular` option each scope is
//! written to its own file and pulled in with an `@path` include.

use super::common::{
    group_blocks, join_parts, name_groups, normalize_dir, scope_label, RULE_SEPARATOR,
};
use crate::adapter::{Adapter, AdapterOutput};
use crate::error::AdapterError;
use mdt_uam::{UamOptions, UamScope, UamTarget, UamV1};
use serde_json::Value;

const DEFAULT_SCOPE_DIR: &str = ".gemini/scopes";

/// `GEMINI.md`, optionally with per-scope include files
#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiCliAdapter;

#[derive(Debug, PartialEq, Eq)]
struct GeminiOptions {
    modular: bool,
    scope_dir: String,
}

impl GeminiOptions {
    fn parse(options: &UamOptions) -> Result<Self, AdapterError> {
        let flag = |key: &str| options.get(key) == Some(&Value::Bool(true));
        let mode_modular = options
            .get("mode")
            .and_then(Value::as_str)
            .is_some_and(|mode| mode.eq_ignore_ascii_case("modular"));

        let scope_dir = match options.get("scopeDir") {
            None | Some(Value::Null) => DEFAULT_SCOPE_DIR.to_string(),
            Some(Value::String(raw)) => {
                let dir = normalize_dir(raw);
                if dir.is_empty() {
                    DEFAULT_SCOPE_DIR.to_string()
                } else {
                    dir
                }
            }
            Some(_) => {
                return Err(AdapterError::invalid_option("scopeDir", "expected a string"));
            }
        };

        Ok(Self {
            modular: flag("modular") || flag("splitScopes") || mode_modular,
            scope_dir,
        })
    }
}

fn with_trailing_newline(sections: &[String]) -> String {
    if sections.is_empty() {
        String::new()
    } else {
        format!("{}\n", sections.join(RULE_SEPARATOR).trim_end())
    }
}

impl Adapter for GeminiCliAdapter {
    fn id(&self) -> &str {
        "gemini-cli"
    }

    fn version(&self) -> &str {
        "1"
    }

    fn label(&self) -> &str {
        "Gemini CLI"
    }

    fn description(&self) -> &str {
        "Exports UAM v1 to GEMINI.md with optional @path includes."
    }

    fn compile(&self, manifest: &UamV1, target: &UamTarget) -> Result<AdapterOutput, AdapterError> {
        let options = GeminiOptions::parse(&target.options)?;
        let mut out = AdapterOutput::new();
        let groups = group_blocks(manifest, &mut out);

        let (global, scoped): (Vec<_>, Vec<_>) = groups
            .into_values()
            .partition(|group| matches!(group.scope, UamScope::Global { .. }));
        let global_parts: Vec<String> = global.into_iter().flat_map(|group| group.parts).collect();
        let scoped = name_groups(scoped, "scope");

        for group in &scoped {
            out.warn(format!(
                "Scope '{}' cannot be enforced in GEMINI.md. Exported content will apply globally (lossy).",
                scope_label(group.scope)
            ));
        }

        let mut sections = Vec::new();
        let global = join_parts(&global_parts);
        if !global.is_empty() {
            sections.push(global);
        }

        if options.modular {
            let mut includes = Vec::with_capacity(scoped.len());
            for group in &scoped {
                let path = format!("{}/{}.md", options.scope_dir, group.file_name);
                let label = scope_label(group.scope);
                let body = join_parts(&group.parts);
                let content = if body.is_empty() {
                    format!("# Scope: {label}\n")
                } else {
                    format!("# Scope: {label}\n\n{body}\n")
                };
                includes.push(format!("@{path}"));
                out.push_file(path, content);
            }
            if !includes.is_empty() {
                sections.push(includes.join("\n"));
            }
        } else {
            for group in &scoped {
                let body = join_parts(&group.parts);
                if !body.is_empty() {
                    sections.push(format!("## Scope: {}\n\n{body}", scope_label(group.scope)));
                }
            }
        }

        out.push_file("GEMINI.md", with_trailing_newline(&sections));
        Ok(out.sorted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdt_uam::{UamBlock, UamBlockKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn manifest() -> UamV1 {
        UamV1::empty("x")
            .with_scope(UamScope::dir("web", "apps/web"))
            .with_block(UamBlock::new("b1", "global", UamBlockKind::Markdown, "Global"))
            .with_block(UamBlock::new("b2", "web", UamBlockKind::Markdown, "Web"))
    }

    #[test]
    fn flattens_scopes_with_lossy_warning() {
        let out = GeminiCliAdapter
            .compile(&manifest(), &UamTarget::new("gemini-cli"))
            .unwrap();
        assert_eq!(out.files.len(), 1);
        assert_eq!(
            out.files[0].content,
            "Global\n\n---\n\n## Scope: apps/web\n\nWeb\n"
        );
        assert_eq!(
            out.warnings,
            vec!["Scope 'apps/web' cannot be enforced in GEMINI.md. Exported content will apply globally (lossy)."]
        );
    }

    #[test]
    fn modular_mode_writes_includes() {
        let target = UamTarget::new("gemini-cli")
            .with_option("mode", json!("Modular"))
            .with_option("scopeDir", json!("./docs/gemini/"));
        let out = GeminiCliAdapter.compile(&manifest(), &target).unwrap();
        let files: Vec<(&str, &str)> = out
            .files
            .iter()
            .map(|f| (f.path.as_str(), f.content.as_str()))
            .collect();
        assert_eq!(
            files,
            vec![
                ("GEMINI.md", "Global\n\n---\n\n@docs/gemini/apps-web.md\n"),
                ("docs/gemini/apps-web.md", "# Scope: apps/web\n\nWeb\n"),
            ]
        );
    }

    #[test]
    fn empty_manifest_still_emits_root() {
        let out = GeminiCliAdapter
            .compile(&UamV1::empty("x"), &UamTarget::new("gemini-cli"))
            .unwrap();
        assert_eq!(out.files[0].path, "GEMINI.md");
        assert_eq!(out.files[0].content, "");
    }

    #[test]
    fn rejects_non_string_scope_dir() {
        let target = UamTarget::new("gemini-cli").with_option("scopeDir", json!(3));
        assert_eq!(
            GeminiCliAdapter.compile(&manifest(), &target),
            Err(AdapterError::invalid_option("scopeDir", "expected a string"))
        );
    }
}
