//! `AGENTS.md` exporter (Codex CLI and compatible tools)

use super::common::{block_scope, normalize_dir};
use crate::adapter::{Adapter, AdapterOutput};
use crate::error::AdapterError;
use crate::skills::{render_skills_inline_section, resolve_skill_export, SkillExport};
use indexmap::{IndexMap, IndexSet};
use mdt_tree::join_dir_file;
use mdt_uam::{UamScope, UamTarget, UamV1};

const ROOT_FILE: &str = "AGENTS.md";

/// One `AGENTS.md` per global or directory scope
#[derive(Debug, Clone, Copy, Default)]
pub struct AgentsMdAdapter;

fn output_path(scope: &UamScope) -> Result<String, String> {
    match scope {
        UamScope::Global { .. } => Ok(ROOT_FILE.to_string()),
        UamScope::Dir { dir, .. } => Ok(join_dir_file(&normalize_dir(dir), ROOT_FILE)),
        UamScope::Glob { patterns, .. } => Err(format!("glob scope ({})", patterns.join(", "))),
    }
}

impl Adapter for AgentsMdAdapter {
    fn id(&self) -> &str {
        "agents-md"
    }

    fn version(&self) -> &str {
        "1"
    }

    fn label(&self) -> &str {
        "AGENTS.md"
    }

    fn description(&self) -> &str {
        "Exports UAM v1 scopes into AGENTS.md files."
    }

    fn compile(&self, manifest: &UamV1, target: &UamTarget) -> Result<AdapterOutput, AdapterError> {
        let mut out = AdapterOutput::new();
        let mut contents: IndexMap<String, Vec<String>> = IndexMap::new();
        let mut scopes_by_path: IndexMap<String, IndexSet<&str>> = IndexMap::new();

        for block in &manifest.blocks {
            let Some(scope) = block_scope(manifest, block, &mut out) else {
                continue;
            };
            let path = match output_path(scope) {
                Ok(path) => path,
                Err(reason) => {
                    out.warn(format!(
                        "Block '{}' targets {reason}, which is not supported by AGENTS.md exporter. Skipped.",
                        block.id
                    ));
                    continue;
                }
            };

            let owners = scopes_by_path.entry(path.clone()).or_default();
            if owners.insert(scope.id()) && owners.len() == 2 {
                out.warn(format!(
                    "Multiple scopes map to '{path}'. Merging their blocks."
                ));
            }
            contents
                .entry(path)
                .or_default()
                .push(block.body.trim_end().to_string());
        }

        let export = SkillExport::from_options(&target.options);
        if export.is_enabled() {
            let selection = resolve_skill_export(manifest, &export);
            out.warnings.extend(selection.warnings);
            let section = render_skills_inline_section(&selection.capabilities, "Skills");
            if !section.is_empty() {
                contents.entry(ROOT_FILE.to_string()).or_default().push(section);
            }
        }

        for (path, parts) in contents {
            out.push_file(path, parts.join("\n\n"));
        }
        Ok(out.sorted())
    }
}
