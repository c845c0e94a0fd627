//! Testing utilities for the Markdowntown workspace
//!
//! Shared trees, manifests and adapters.

#![allow(missing_docs)]

use mdt_compile::{Adapter, AdapterError, AdapterOutput};
use mdt_tree::RepoTree;
use mdt_uam::{
    UamBlock, UamBlockKind, UamCapability, UamScope, UamTarget, UamV1, GLOBAL_SCOPE_ID,
};

/// Codex ancestor walk: root, intermediate and an override at the cwd
pub fn ancestor_tree() -> RepoTree {
    RepoTree::from_paths(["AGENTS.md", "apps/AGENTS.md", "apps/web/AGENTS.override.md"])
}

/// Claude memory with nested `@path` imports
pub fn claude_import_tree() -> RepoTree {
    RepoTree::default()
        .with_file("CLAUDE.md", "@docs/overview.md\n@prompts/base.md")
        .with_file("docs/overview.md", "@../prompts/shared.md")
        .with_file("prompts/shared.md", "Shared prompt")
        .with_file("prompts/base.md", "Base prompt")
}

/// Instruction files for several tools side by side
pub fn mixed_tree() -> RepoTree {
    RepoTree::from_paths([
        "AGENTS.md",
        "CLAUDE.md",
        "GEMINI.md",
        ".github/copilot-instructions.md",
        ".github/instructions/ts.instructions.md",
        ".cursor/rules/style.mdc",
        ".cursorrules",
        "src/main.rs",
    ])
}

/// `files` plain source files under `src/`
pub fn deep_tree(files: usize) -> RepoTree {
    RepoTree::from_paths((0..files).map(|i| format!("src/mod_{}/file_{i}.rs", i % 7)))
}

/// Manifest touching every scope kind, with one capability
pub fn sample_manifest() -> UamV1 {
    UamV1::empty("Sample")
        .with_scope(UamScope::dir("web", "apps/web"))
        .with_scope(UamScope::glob("ts", ["**/*.ts"]).with_name("TypeScript"))
        .with_block(UamBlock::new(
            "intro",
            GLOBAL_SCOPE_ID,
            UamBlockKind::Markdown,
            "Keep changes small.",
        ))
        .with_block(UamBlock::new(
            "web-cmds",
            "web",
            UamBlockKind::Commands,
            "```bash\npnpm dev\n```",
        ))
        .with_block(UamBlock::new(
            "ts-rules",
            "ts",
            UamBlockKind::DosDonts,
            "## Do\n- Prefer `unknown` over `any`",
        ))
        .with_capability(
            UamCapability::new("review")
                .with_title("Code review")
                .with_description("Review diffs for correctness."),
        )
}

/// Target list for [`sample_manifest`] covering every built-in adapter
pub fn all_builtin_targets() -> Vec<UamTarget> {
    [
        "agents-md",
        "claude-code",
        "cursor-rules",
        "gemini-cli",
        "github-copilot",
        "windsurf-rules",
    ]
    .into_iter()
    .map(UamTarget::new)
    .collect()
}

/// Adapter that ignores the manifest and emits fixed files
#[derive(Debug, Clone)]
pub struct FixedAdapter {
    id: String,
    version: String,
    files: Vec<(String, String)>,
    warnings: Vec<String>,
}

impl FixedAdapter {
    pub fn new<I, P, C>(id: &str, files: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<String>,
        C: Into<String>,
    {
        Self {
            id: id.to_string(),
            version: "1".to_string(),
            files: files
                .into_iter()
                .map(|(path, content)| (path.into(), content.into()))
                .collect(),
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    #[must_use]
    pub fn with_warning(mut self, warning: &str) -> Self {
        self.warnings.push(warning.to_string());
        self
    }
}

impl Adapter for FixedAdapter {
    fn id(&self) -> &str {
        &self.id
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn label(&self) -> &str {
        &self.id
    }

    fn compile(&self, _manifest: &UamV1, _target: &UamTarget) -> Result<AdapterOutput, AdapterError> {
        let mut out = AdapterOutput::new();
        for (path, content) in &self.files {
            out.push_file(path.clone(), content.clone());
        }
        out.warnings.extend(self.warnings.iter().cloned());
        Ok(out)
    }
}
