//! Claude `@path` import graph
//!
//! Memory files may pull in other files with `@relative/path` directives.
//! Directives are read from prose only: code spans, code blocks and raw HTML
//! are skipped. Expansion is a depth-first, pre-order walk where each import
//! is fully expanded before its next sibling.

use indexmap::IndexSet;
use mdt_tree::{dir_name, normalize_path, RepoPath, TreeIndex};
use once_cell::sync::Lazy;
use pulldown_cmark::{Event, Parser as MdParser, Tag};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::Range;

static DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:^|\s)@([^\s"'`<>]+)"#).expect("directive pattern is valid"));

/// Why an import directive was not followed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportIssueKind {
    /// Target is not in the tree
    Missing,
    /// Target resolves above the repository root
    OutsideRoot,
    /// Target is already on the current import chain
    Circular,
}

impl ImportIssueKind {
    /// Stable code suffix (`missing`, `outside-root`, `circular`)
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::OutsideRoot => "outside-root",
            Self::Circular => "circular",
        }
    }
}

/// Unfollowed import directive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportIssue {
    /// Issue kind
    pub kind: ImportIssueKind,
    /// File containing the directive
    pub source_path: String,
    /// Directive text after `@`
    pub raw_path: String,
    /// Where the directive points (clamped at the root for `OutsideRoot`)
    pub resolved_path: String,
}

/// File reached through an import directive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedFile {
    /// Resolved repo-relative path
    pub path: String,
    /// File containing the directive
    pub source_path: String,
    /// Directive text after `@`
    pub raw_path: String,
}

/// Every import reachable from a set of entry files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportGraph {
    /// Imported files in walk order, each path once
    pub imported: Vec<ImportedFile>,
    /// Directives that were not followed
    pub issues: Vec<ImportIssue>,
}

/// Extract `@path` directives from markdown prose, in order, deduplicated
#[must_use]
pub fn extract_import_directives(content: &str) -> Vec<String> {
    let prose = prose_text(content);
    let mut directives = IndexSet::new();
    for captures in DIRECTIVE.captures_iter(&prose) {
        let cleaned = sanitize_token(&captures[1]);
        if !cleaned.is_empty() {
            directives.insert(cleaned.to_string());
        }
    }
    directives.into_iter().collect()
}

fn sanitize_token(token: &str) -> &str {
    token
        .trim()
        .trim_start_matches(['(', '"', '\'', '`'])
        .trim_end_matches([')', '"', '\'', '`', ',', '.', ';', ':'])
}

/// Source text with code and HTML blanked out, line breaks kept
fn prose_text(content: &str) -> String {
    let skipped: Vec<Range<usize>> = MdParser::new(content)
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(Tag::CodeBlock(_) | Tag::HtmlBlock)
            | Event::Code(_)
            | Event::Html(_)
            | Event::InlineHtml(_) => Some(range),
            _ => None,
        })
        .collect();

    content
        .char_indices()
        .map(|(offset, ch)| {
            if ch != '\n' && skipped.iter().any(|range| range.contains(&offset)) {
                ' '
            } else {
                ch
            }
        })
        .collect()
}

/// Incremental import walker shared across several entry files
///
/// A file expanded once is never expanded again, and each imported path is
/// reported once, no matter how many entries reach it.
#[derive(Debug)]
pub struct ImportWalker<'i, 'a> {
    index: &'i TreeIndex<'a>,
    expanded: HashSet<String>,
    imported: IndexSet<String>,
    issues: Vec<ImportIssue>,
}

impl<'i, 'a> ImportWalker<'i, 'a> {
    /// Create new walker over an index
    #[must_use]
    pub fn new(index: &'i TreeIndex<'a>) -> Self {
        Self {
            index,
            expanded: HashSet::new(),
            imported: IndexSet::new(),
            issues: Vec::new(),
        }
    }

    /// Expand one entry file, returning the imports it newly reached
    pub fn expand(&mut self, entry: &str) -> Vec<ImportedFile> {
        let entry = normalize_path(entry);
        let mut out = Vec::new();
        if entry.is_empty() || !self.index.has(&entry) || !self.expanded.insert(entry.clone()) {
            return out;
        }
        let chain = [entry.clone()];
        self.visit(&entry, &chain, &mut out);
        out
    }

    /// Issues found so far
    #[inline]
    #[must_use]
    pub fn issues(&self) -> &[ImportIssue] {
        &self.issues
    }

    /// Consume the walker, returning its issues
    #[inline]
    #[must_use]
    pub fn into_issues(self) -> Vec<ImportIssue> {
        self.issues
    }

    fn visit(&mut self, source: &str, chain: &[String], out: &mut Vec<ImportedFile>) {
        let Some(content) = self.index.content(source) else {
            return;
        };
        let base = RepoPath::lossy(dir_name(source));

        for raw in extract_import_directives(content) {
            let resolved = match base.resolve(&raw) {
                Ok(path) => path.as_string(),
                Err(_) => {
                    let clamped = base.resolve_clamped(&raw).as_string();
                    self.issue(ImportIssueKind::OutsideRoot, source, &raw, clamped);
                    continue;
                }
            };
            if resolved.is_empty() {
                continue;
            }
            if chain.contains(&resolved) {
                self.issue(ImportIssueKind::Circular, source, &raw, resolved);
                continue;
            }
            if !self.index.has(&resolved) {
                self.issue(ImportIssueKind::Missing, source, &raw, resolved);
                continue;
            }

            if self.imported.insert(resolved.clone()) {
                out.push(ImportedFile {
                    path: resolved.clone(),
                    source_path: source.to_string(),
                    raw_path: raw.clone(),
                });
            }
            if self.expanded.insert(resolved.clone()) {
                let mut next = chain.to_vec();
                next.push(resolved.clone());
                self.visit(&resolved, &next, out);
            }
        }
    }

    fn issue(&mut self, kind: ImportIssueKind, source: &str, raw: &str, resolved: String) {
        self.issues.push(ImportIssue {
            kind,
            source_path: source.to_string(),
            raw_path: raw.to_string(),
            resolved_path: resolved,
        });
    }
}

/// Resolve every import reachable from `entries`, in entry order
#[must_use]
pub fn resolve_claude_imports<S: AsRef<str>>(index: &TreeIndex<'_>, entries: &[S]) -> ImportGraph {
    let mut walker = ImportWalker::new(index);
    let mut imported = Vec::new();
    for entry in entries {
        imported.extend(walker.expand(entry.as_ref()));
    }
    ImportGraph {
        imported,
        issues: walker.into_issues(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdt_tree::RepoTree;

    fn paths(graph: &ImportGraph) -> Vec<&str> {
        graph.imported.iter().map(|file| file.path.as_str()).collect()
    }

    #[test]
    fn directives_skip_code() {
        let content = "See @docs/a.md and `@not/this.md`.\n\n```\n@nor/this.md\n```\n\n- @docs/b.md, then more\n";
        assert_eq!(extract_import_directives(content), vec!["docs/a.md", "docs/b.md"]);
    }

    #[test]
    fn directives_keep_markdown_punctuation() {
        let content = "@src/__init__.md\n@a/*b*.md\n@c/b_c_d.md and @docs/\\_raw.md";
        assert_eq!(
            extract_import_directives(content),
            vec!["src/__init__.md", "a/*b*.md", "c/b_c_d.md", "docs/\\_raw.md"]
        );
    }

    #[test]
    fn directives_ignore_emails_and_dedupe() {
        let content = "mail me at dev@example.com\n@x.md\n@x.md";
        assert_eq!(extract_import_directives(content), vec!["x.md"]);
    }

    #[test]
    fn walk_is_depth_first_pre_order() {
        let tree = RepoTree::default()
            .with_file("CLAUDE.md", "@docs/overview.md\n@prompts/base.md")
            .with_file("docs/overview.md", "@../prompts/shared.md")
            .with_file("prompts/shared.md", "shared")
            .with_file("prompts/base.md", "base");
        let index = tree.index();

        let graph = resolve_claude_imports(&index, &["CLAUDE.md"]);
        assert_eq!(
            paths(&graph),
            vec!["docs/overview.md", "prompts/shared.md", "prompts/base.md"]
        );
        assert!(graph.issues.is_empty());
    }

    #[test]
    fn cycle_is_reported_and_dropped() {
        let tree = RepoTree::default()
            .with_file("CLAUDE.md", "@a.md")
            .with_file("a.md", "@b.md")
            .with_file("b.md", "@a.md");
        let index = tree.index();

        let graph = resolve_claude_imports(&index, &["CLAUDE.md"]);
        assert_eq!(paths(&graph), vec!["a.md", "b.md"]);
        assert_eq!(graph.issues.len(), 1);
        let issue = &graph.issues[0];
        assert_eq!(issue.kind, ImportIssueKind::Circular);
        assert_eq!(issue.source_path, "b.md");
        assert_eq!(issue.resolved_path, "a.md");
    }

    #[test]
    fn missing_and_outside_root_issues() {
        let tree = RepoTree::default().with_file("CLAUDE.md", "@gone.md @../../etc/passwd");
        let index = tree.index();

        let graph = resolve_claude_imports(&index, &["CLAUDE.md"]);
        assert!(graph.imported.is_empty());
        let kinds: Vec<_> = graph.issues.iter().map(|issue| issue.kind).collect();
        assert_eq!(kinds, vec![ImportIssueKind::Missing, ImportIssueKind::OutsideRoot]);
        assert_eq!(graph.issues[1].resolved_path, "etc/passwd");
    }

    #[test]
    fn diamond_imports_report_each_file_once() {
        let tree = RepoTree::default()
            .with_file("CLAUDE.md", "@a.md @b.md")
            .with_file("a.md", "@shared.md")
            .with_file("b.md", "@shared.md")
            .with_file("shared.md", "x");
        let index = tree.index();

        let graph = resolve_claude_imports(&index, &["CLAUDE.md"]);
        assert_eq!(paths(&graph), vec!["a.md", "shared.md", "b.md"]);
    }

    #[test]
    fn walker_is_incremental_across_entries() {
        let tree = RepoTree::default()
            .with_file("CLAUDE.md", "@shared.md")
            .with_file("apps/CLAUDE.md", "@../shared.md @local.md")
            .with_file("apps/local.md", "x")
            .with_file("shared.md", "x");
        let index = tree.index();

        let mut walker = ImportWalker::new(&index);
        let first = walker.expand("CLAUDE.md");
        let second = walker.expand("apps/CLAUDE.md");
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].path, "apps/local.md");
        assert!(walker.issues().is_empty());
    }
}
