//! Claude Code exporter: `CLAUDE.md`, `.claude/rules` and `.claude/skills`

use super::common::{
    group_blocks, name_groups, rules_header, slugify, UniqueNames, RULE_SEPARATOR,
};
use crate::adapter::{Adapter, AdapterOutput};
use crate::error::AdapterError;
use crate::skills::{render_skill_markdown, resolve_skill_export, SkillExport};
use mdt_uam::{UamScope, UamTarget, UamV1};

/// Global blocks to `CLAUDE.md`, scoped blocks to `.claude/rules/<slug>.md`
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaudeCodeAdapter;

impl Adapter for ClaudeCodeAdapter {
    fn id(&self) -> &str {
        "claude-code"
    }

    fn version(&self) -> &str {
        "1"
    }

    fn label(&self) -> &str {
        "Claude Code"
    }

    fn description(&self) -> &str {
        "Exports UAM v1 to CLAUDE.md and .claude rule/skill files."
    }

    fn compile(&self, manifest: &UamV1, target: &UamTarget) -> Result<AdapterOutput, AdapterError> {
        let mut out = AdapterOutput::new();
        let groups = group_blocks(manifest, &mut out);

        let (global, scoped): (Vec<_>, Vec<_>) = groups
            .into_values()
            .partition(|group| matches!(group.scope, UamScope::Global { .. }));

        let global_parts: Vec<String> = global.into_iter().flat_map(|group| group.parts).collect();
        if !global_parts.is_empty() {
            out.push_file(
                "CLAUDE.md",
                format!("{}\n", global_parts.join(RULE_SEPARATOR).trim_end()),
            );
        }

        for group in name_groups(scoped, "rules") {
            out.push_file(
                format!(".claude/rules/{}.md", group.file_name),
                format!(
                    "{}\n\n{}\n",
                    rules_header(group.scope),
                    group.parts.join(RULE_SEPARATOR).trim_end()
                ),
            );
        }

        let export = SkillExport::from_options(&target.options);
        if export.is_enabled() {
            let selection = resolve_skill_export(manifest, &export);
            out.warnings.extend(selection.warnings);
            let mut names = UniqueNames::default();
            for capability in selection.capabilities {
                let name = names.claim(slugify(&capability.id, "skill"));
                out.push_file(
                    format!(".claude/skills/{name}/SKILL.md"),
                    render_skill_markdown(capability),
                );
            }
        }

        Ok(out.sorted())
    }
}
