//! GitHub Copilot exporter

use super::common::{block_scope, name_groups, yaml_quote, ScopeGroup};
use crate::adapter::{Adapter, AdapterOutput};
use crate::error::AdapterError;
use crate::skills::{render_skills_inline_section, resolve_skill_export, SkillExport};
use indexmap::IndexMap;
use mdt_uam::{UamScope, UamTarget, UamV1};
use std::collections::BTreeSet;

const ROOT_FILE: &str = ".github/copilot-instructions.md";

/// Global blocks to `.github/copilot-instructions.md`, glob scopes to
/// `.github/instructions/<slug>.instructions.md` with `applyTo`
#[derive(Debug, Clone, Copy, Default)]
pub struct GithubCopilotAdapter;

fn apply_to_frontmatter(patterns: &[String]) -> String {
    let unique: BTreeSet<&str> = patterns.iter().map(String::as_str).collect();
    if unique.len() == 1 {
        let only = unique.first().copied().unwrap_or_default();
        return format!("---\napplyTo: {}\n---\n", yaml_quote(only));
    }
    let items: Vec<String> = unique
        .into_iter()
        .map(|pattern| format!("  - {}", yaml_quote(pattern)))
        .collect();
    format!("---\napplyTo:\n{}\n---\n", items.join("\n"))
}

impl Adapter for GithubCopilotAdapter {
    fn id(&self) -> &str {
        "github-copilot"
    }

    fn version(&self) -> &str {
        "1"
    }

    fn label(&self) -> &str {
        "GitHub Copilot"
    }

    fn description(&self) -> &str {
        "Exports UAM v1 to GitHub Copilot instruction files."
    }

    fn compile(&self, manifest: &UamV1, target: &UamTarget) -> Result<AdapterOutput, AdapterError> {
        let mut out = AdapterOutput::new();
        let mut global_parts = Vec::new();
        let mut glob_groups: IndexMap<&str, ScopeGroup<'_>> = IndexMap::new();

        for block in &manifest.blocks {
            let Some(scope) = block_scope(manifest, block, &mut out) else {
                continue;
            };
            let body = block.body.trim_end().to_string();
            match scope {
                UamScope::Global { .. } => global_parts.push(body),
                UamScope::Glob { .. } => glob_groups
                    .entry(scope.id())
                    .or_insert_with(|| ScopeGroup {
                        scope,
                        parts: Vec::new(),
                    })
                    .parts
                    .push(body),
                UamScope::Dir { dir, .. } => out.warn(format!(
                    "Block '{}' targets directory scope '{dir}', which cannot be expressed as Copilot applyTo globs. Skipped.",
                    block.id
                )),
            }
        }

        let export = SkillExport::from_options(&target.options);
        if export.is_enabled() {
            let selection = resolve_skill_export(manifest, &export);
            out.warnings.extend(selection.warnings);
            let section = render_skills_inline_section(&selection.capabilities, "Skills");
            if !section.is_empty() {
                global_parts.push(section);
            }
        }

        if !global_parts.is_empty() {
            out.push_file(ROOT_FILE, global_parts.join("\n\n"));
        }

        for group in name_groups(glob_groups.into_values(), "scope") {
            let UamScope::Glob { patterns, .. } = group.scope else {
                continue;
            };
            out.push_file(
                format!(".github/instructions/{}.instructions.md", group.file_name),
                format!(
                    "{}{}\n",
                    apply_to_frontmatter(patterns),
                    group.parts.join("\n\n")
                ),
            );
        }

        Ok(out.sorted())
    }
}
