//! Cursor exporter: one `.cursor/rules/<slug>.mdc` per scope

use super::common::{group_blocks, join_parts, name_groups, normalize_dir, yaml_quote};
use crate::adapter::{Adapter, AdapterOutput};
use crate::error::AdapterError;
use mdt_uam::{UamScope, UamTarget, UamV1};
use std::collections::BTreeSet;

/// Every scope becomes a rule file with `description`/`globs`/`alwaysApply`
/// frontmatter
#[derive(Debug, Clone, Copy, Default)]
pub struct CursorRulesAdapter;

fn description(scope: &UamScope) -> String {
    if let Some(name) = scope.name().map(str::trim).filter(|name| !name.is_empty()) {
        return name.to_string();
    }
    match scope {
        UamScope::Global { .. } => "Global rules".to_string(),
        UamScope::Dir { dir, .. } => {
            let dir = normalize_dir(dir);
            format!("Rules for {}", if dir.is_empty() { "root" } else { &dir })
        }
        UamScope::Glob { patterns, .. } => {
            let patterns: Vec<&str> = patterns
                .iter()
                .map(|p| p.trim())
                .filter(|p| !p.is_empty())
                .collect();
            if patterns.is_empty() {
                "Rules for glob".to_string()
            } else {
                format!("Rules for {}", patterns.join(", "))
            }
        }
    }
}

fn globs(scope: &UamScope) -> Vec<String> {
    match scope {
        UamScope::Global { .. } => vec!["**/*".to_string()],
        UamScope::Dir { dir, .. } => {
            let dir = normalize_dir(dir);
            vec![if dir.is_empty() {
                "**/*".to_string()
            } else {
                format!("{dir}/**")
            }]
        }
        UamScope::Glob { patterns, .. } => patterns.clone(),
    }
}

fn render_globs(globs: &[String]) -> String {
    let unique: BTreeSet<&str> = globs
        .iter()
        .map(|glob| glob.trim())
        .filter(|glob| !glob.is_empty())
        .collect();
    if unique.is_empty() {
        return "globs: []\n".to_string();
    }
    let items: Vec<String> = unique
        .into_iter()
        .map(|glob| format!("  - {}", yaml_quote(glob)))
        .collect();
    format!("globs:\n{}\n", items.join("\n"))
}

fn render_rule(scope: &UamScope, parts: &[String]) -> String {
    let frontmatter = format!(
        "---\ndescription: {}\n{}alwaysApply: {}\n---\n",
        yaml_quote(&description(scope)),
        render_globs(&globs(scope)),
        matches!(scope, UamScope::Global { .. }),
    );
    let body = join_parts(parts);
    if body.is_empty() {
        frontmatter
    } else {
        format!("{frontmatter}\n{body}\n")
    }
}

impl Adapter for CursorRulesAdapter {
    fn id(&self) -> &str {
        "cursor-rules"
    }

    fn version(&self) -> &str {
        "1"
    }

    fn label(&self) -> &str {
        "Cursor Rules"
    }

    fn description(&self) -> &str {
        "Exports UAM v1 scopes to .cursor/rules/*.mdc files."
    }

    fn compile(&self, manifest: &UamV1, _target: &UamTarget) -> Result<AdapterOutput, AdapterError> {
        let mut out = AdapterOutput::new();
        let groups = group_blocks(manifest, &mut out);

        for group in name_groups(groups.into_values(), "rules") {
            out.push_file(
                format!(".cursor/rules/{}.mdc", group.file_name),
                render_rule(group.scope, &group.parts),
            );
        }
        Ok(out.sorted())
    }
}
