//! Windsurf exporter: `global_rules.md` and `.windsurf/rules/<slug>.md`

use super::common::{group_blocks, join_parts, name_groups, rules_header};
use crate::adapter::{Adapter, AdapterOutput};
use crate::error::AdapterError;
use mdt_uam::{UamScope, UamTarget, UamV1};

/// Global rules file plus one rule file per scope
#[derive(Debug, Clone, Copy, Default)]
pub struct WindsurfRulesAdapter;

impl Adapter for WindsurfRulesAdapter {
    fn id(&self) -> &str {
        "windsurf-rules"
    }

    fn version(&self) -> &str {
        "1"
    }

    fn label(&self) -> &str {
        "Windsurf Rules"
    }

    fn description(&self) -> &str {
        "Exports UAM v1 to global_rules.md and .windsurf/rules/*.md."
    }

    fn compile(&self, manifest: &UamV1, _target: &UamTarget) -> Result<AdapterOutput, AdapterError> {
        let mut out = AdapterOutput::new();
        let groups = group_blocks(manifest, &mut out);

        let (global, scoped): (Vec<_>, Vec<_>) = groups
            .into_values()
            .partition(|group| matches!(group.scope, UamScope::Global { .. }));

        let global_parts: Vec<String> = global.into_iter().flat_map(|group| group.parts).collect();
        if !global_parts.is_empty() {
            out.push_file("global_rules.md", format!("{}\n", join_parts(&global_parts)));
        }

        for group in name_groups(scoped, "rules") {
            let body = join_parts(&group.parts);
            if body.is_empty() {
                continue;
            }
            out.push_file(
                format!(".windsurf/rules/{}.md", group.file_name),
                format!("{}\n\n{body}\n", rules_header(group.scope)),
            );
        }

        Ok(out.sorted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdt_uam::{UamBlock, UamBlockKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn writes_global_and_scoped_rules() {
        let uam = UamV1::empty("x")
            .with_scope(UamScope::dir("a", "pkg"))
            .with_scope(UamScope::dir("b", "pkg/"))
            .with_scope(UamScope::dir("blank", "empty"))
            .with_block(UamBlock::new("b1", "global", UamBlockKind::Markdown, "G"))
            .with_block(UamBlock::new("b2", "b", UamBlockKind::Markdown, "Second"))
            .with_block(UamBlock::new("b3", "a", UamBlockKind::Markdown, "First"))
            .with_block(UamBlock::new("b4", "blank", UamBlockKind::Markdown, "   "));

        let out = WindsurfRulesAdapter
            .compile(&uam, &UamTarget::new("windsurf-rules"))
            .unwrap();
        let files: Vec<(&str, &str)> = out
            .files
            .iter()
            .map(|f| (f.path.as_str(), f.content.as_str()))
            .collect();
        assert_eq!(
            files,
            vec![
                (".windsurf/rules/pkg-2.md", "# Rules for pkg\n\nSecond\n"),
                (".windsurf/rules/pkg.md", "# Rules for pkg\n\nFirst\n"),
                ("global_rules.md", "G\n"),
            ]
        );
    }
}
