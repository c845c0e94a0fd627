//! Helpers shared by the built-in adapters

use crate::adapter::AdapterOutput;
use indexmap::IndexMap;
use mdt_tree::normalize_path;
use mdt_uam::{UamBlock, UamScope, UamV1};
use std::collections::HashSet;

/// Separator between merged block bodies
pub(crate) const RULE_SEPARATOR: &str = "\n\n---\n\n";

/// Lowercase ASCII slug; `fallback` when nothing survives
pub(crate) fn slugify(value: &str, fallback: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    for ch in value.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            slug.push(ch);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        fallback.to_string()
    } else {
        slug.to_string()
    }
}

/// Repo-relative directory; `""` for the root
pub(crate) fn normalize_dir(dir: &str) -> String {
    normalize_path(dir.trim())
}

/// Double-quoted YAML scalar
pub(crate) fn yaml_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\\\""))
}

/// Join non-empty bodies with [`RULE_SEPARATOR`]
pub(crate) fn join_parts(parts: &[String]) -> String {
    parts
        .iter()
        .map(|part| part.trim_end())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(RULE_SEPARATOR)
        .trim_end()
        .to_string()
}

/// Scope owning `block`; warns and returns `None` for dangling references
pub(crate) fn block_scope<'a>(
    uam: &'a UamV1,
    block: &UamBlock,
    out: &mut AdapterOutput,
) -> Option<&'a UamScope> {
    let scope = uam.scope(&block.scope_id);
    if scope.is_none() {
        out.warn(format!(
            "Block '{}' references unknown scopeId '{}'. Skipped.",
            block.id, block.scope_id
        ));
    }
    scope
}

/// Blocks of one scope, in manifest order
#[derive(Debug)]
pub(crate) struct ScopeGroup<'a> {
    pub(crate) scope: &'a UamScope,
    pub(crate) parts: Vec<String>,
}

/// Group block bodies by scope, first-seen scope order
pub(crate) fn group_blocks<'a>(
    uam: &'a UamV1,
    out: &mut AdapterOutput,
) -> IndexMap<&'a str, ScopeGroup<'a>> {
    let mut groups: IndexMap<&'a str, ScopeGroup<'a>> = IndexMap::new();
    for block in &uam.blocks {
        let Some(scope) = block_scope(uam, block, out) else {
            continue;
        };
        groups
            .entry(scope.id())
            .or_insert_with(|| ScopeGroup {
                scope,
                parts: Vec::new(),
            })
            .parts
            .push(block.body.trim_end().to_string());
    }
    groups
}

/// Human label: directory, pattern list or `Global`
pub(crate) fn scope_label(scope: &UamScope) -> String {
    match scope {
        UamScope::Global { .. } => "Global".to_string(),
        UamScope::Dir { dir, .. } => {
            let dir = normalize_dir(dir);
            if dir.is_empty() {
                "root".to_string()
            } else {
                dir
            }
        }
        UamScope::Glob { patterns, .. } => {
            let joined = patterns.join(", ");
            let joined = joined.trim();
            if joined.is_empty() {
                "glob".to_string()
            } else {
                joined.to_string()
            }
        }
    }
}

/// `# Rules for <label>` heading for scoped rule files
pub(crate) fn rules_header(scope: &UamScope) -> String {
    format!("# Rules for {}", scope_label(scope))
}

/// File stem derived from the scope name, directory or patterns
pub(crate) fn scope_base_name(scope: &UamScope, fallback: &str) -> String {
    if let Some(name) = scope.name().map(str::trim).filter(|name| !name.is_empty()) {
        return slugify(name, fallback);
    }
    match scope {
        UamScope::Global { .. } => "global".to_string(),
        UamScope::Dir { dir, .. } => {
            let dir = normalize_dir(dir);
            slugify(if dir.is_empty() { "root" } else { &dir }, fallback)
        }
        UamScope::Glob { patterns, .. } => slugify(&patterns.join(" "), fallback),
    }
}

/// Scope group with a unique file stem
#[derive(Debug)]
pub(crate) struct NamedGroup<'a> {
    pub(crate) file_name: String,
    pub(crate) scope: &'a UamScope,
    pub(crate) parts: Vec<String>,
}

/// Assign unique file stems: sorted by base name then scope id, repeats get
/// `-2`, `-3`, ...
pub(crate) fn name_groups<'a>(
    groups: impl IntoIterator<Item = ScopeGroup<'a>>,
    fallback: &str,
) -> Vec<NamedGroup<'a>> {
    let mut entries: Vec<(String, ScopeGroup<'a>)> = groups
        .into_iter()
        .map(|group| (scope_base_name(group.scope, fallback), group))
        .collect();
    entries.sort_by(|(a_name, a), (b_name, b)| {
        a_name
            .cmp(b_name)
            .then_with(|| a.scope.id().cmp(b.scope.id()))
    });

    let mut names = UniqueNames::default();
    entries
        .into_iter()
        .map(|(base, group)| NamedGroup {
            file_name: names.claim(base),
            scope: group.scope,
            parts: group.parts,
        })
        .collect()
}

/// Hands out names not seen before, suffixing repeats with `-2`, `-3`, ...
#[derive(Debug, Default)]
pub(crate) struct UniqueNames {
    taken: HashSet<String>,
}

impl UniqueNames {
    pub(crate) fn claim(&mut self, base: String) -> String {
        if self.taken.insert(base.clone()) {
            return base;
        }
        let mut n = 2usize;
        loop {
            let candidate = format!("{base}-{n}");
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdt_uam::UamBlockKind;

    #[test]
    fn slugify_collapses_and_falls_back() {
        assert_eq!(slugify("  Web App / API  ", "rules"), "web-app-api");
        assert_eq!(slugify("**/*.ts", "rules"), "ts");
        assert_eq!(slugify("é", "scope"), "scope");
        assert_eq!(slugify("--a--b--", "rules"), "a-b");
    }

    #[test]
    fn normalize_dir_handles_root_spellings() {
        for raw in ["", ".", "./", "/", " ./ "] {
            assert_eq!(normalize_dir(raw), "", "{raw:?}");
        }
        assert_eq!(normalize_dir(".\\apps\\web\\"), "apps/web");
    }

    #[test]
    fn join_parts_skips_blank_bodies() {
        let parts = vec!["a\n".to_string(), "  ".to_string(), "b".to_string()];
        assert_eq!(join_parts(&parts), "a\n\n---\n\nb");
    }

    #[test]
    fn groups_warn_on_dangling_scope() {
        let uam = UamV1::empty("x")
            .with_block(UamBlock::new("b1", "global", UamBlockKind::Markdown, "one  \n"))
            .with_block(UamBlock::new("b2", "gone", UamBlockKind::Markdown, "two"))
            .with_block(UamBlock::new("b3", "global", UamBlockKind::Markdown, "three"));
        let mut out = AdapterOutput::new();
        let groups = group_blocks(&uam, &mut out);
        assert_eq!(groups["global"].parts, vec!["one", "three"]);
        assert_eq!(
            out.warnings,
            vec!["Block 'b2' references unknown scopeId 'gone'. Skipped."]
        );
    }

    #[test]
    fn unique_names_skip_taken_suffixes() {
        let mut names = UniqueNames::default();
        let claimed: Vec<String> = ["a", "a-2", "a", "a"]
            .into_iter()
            .map(|base| names.claim(base.to_string()))
            .collect();
        assert_eq!(claimed, vec!["a", "a-2", "a-3", "a-4"]);
    }

    #[test]
    fn repeated_base_names_get_suffixes() {
        let a = UamScope::dir("a", "apps/web");
        let b = UamScope::dir("b", "apps/web/");
        let c = UamScope::glob("c", ["*.md"]).with_name("Apps Web");
        let groups = [&b, &c, &a].into_iter().map(|scope| ScopeGroup {
            scope,
            parts: Vec::new(),
        });
        let names: Vec<(String, &str)> = name_groups(groups, "rules")
            .into_iter()
            .map(|group| (group.file_name, group.scope.id()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("apps-web".to_string(), "a"),
                ("apps-web-2".to_string(), "b"),
                ("apps-web-3".to_string(), "c"),
            ]
        );
    }
}
