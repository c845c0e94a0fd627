//! UAM v1 manifest model

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Only supported schema version
pub const UAM_V1_SCHEMA_VERSION: u32 = 1;

/// Adapter version used when a target omits one
pub const DEFAULT_ADAPTER_VERSION: &str = "1";

/// Id of the scope created by [`UamV1::empty`]
pub const GLOBAL_SCOPE_ID: &str = "global";

/// Free-form adapter options
pub type UamOptions = Map<String, Value>;

/// Canonical, tool-agnostic instruction manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UamV1 {
    /// Must be [`UAM_V1_SCHEMA_VERSION`]
    pub schema_version: u32,
    /// Title and description
    pub meta: UamMeta,
    /// Where instructions apply
    #[serde(default)]
    pub scopes: Vec<UamScope>,
    /// Instruction content, each attached to one scope
    #[serde(default)]
    pub blocks: Vec<UamBlock>,
    /// Skills that adapters may export
    #[serde(default)]
    pub capabilities: Vec<UamCapability>,
    /// Requested compile targets
    #[serde(default)]
    pub targets: Vec<UamTarget>,
}

impl UamV1 {
    /// Create a manifest with a single global scope and no blocks
    #[must_use]
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            schema_version: UAM_V1_SCHEMA_VERSION,
            meta: UamMeta::new(title),
            scopes: vec![UamScope::Global {
                id: GLOBAL_SCOPE_ID.to_string(),
                name: Some("Global".to_string()),
            }],
            blocks: Vec::new(),
            capabilities: Vec::new(),
            targets: Vec::new(),
        }
    }

    /// Wrap raw markdown as one global block
    #[must_use]
    pub fn wrap_markdown_as_global(markdown: impl Into<String>, title: impl Into<String>) -> Self {
        let mut uam = Self::empty(title);
        uam.blocks.push(UamBlock::new(
            "block-1",
            GLOBAL_SCOPE_ID,
            UamBlockKind::Markdown,
            markdown,
        ));
        uam
    }

    /// Look up a scope by id
    #[must_use]
    pub fn scope(&self, id: &str) -> Option<&UamScope> {
        self.scopes.iter().find(|scope| scope.id() == id)
    }

    /// Add a scope
    #[must_use]
    pub fn with_scope(mut self, scope: UamScope) -> Self {
        self.scopes.push(scope);
        self
    }

    /// Add a block
    #[must_use]
    pub fn with_block(mut self, block: UamBlock) -> Self {
        self.blocks.push(block);
        self
    }

    /// Add a capability
    #[must_use]
    pub fn with_capability(mut self, capability: UamCapability) -> Self {
        self.capabilities.push(capability);
        self
    }

    /// Add a target
    #[must_use]
    pub fn with_target(mut self, target: UamTarget) -> Self {
        self.targets.push(target);
        self
    }
}

/// Manifest metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UamMeta {
    /// Display title, non-empty
    pub title: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UamMeta {
    /// Create new metadata without a description
    #[inline]
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }
}

/// Where a block applies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum UamScope {
    /// Whole repository
    Global {
        /// Scope id
        id: String,
        /// Display name
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    /// One directory and below
    Dir {
        /// Scope id
        id: String,
        /// Repo-relative directory
        dir: String,
        /// Display name
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    /// Files matching glob patterns
    Glob {
        /// Scope id
        id: String,
        /// Glob patterns, at least one
        patterns: Vec<String>,
        /// Display name
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

impl UamScope {
    /// Create a directory scope
    #[must_use]
    pub fn dir(id: impl Into<String>, dir: impl Into<String>) -> Self {
        Self::Dir {
            id: id.into(),
            dir: dir.into(),
            name: None,
        }
    }

    /// Create a glob scope
    #[must_use]
    pub fn glob<I, S>(id: impl Into<String>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Glob {
            id: id.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
            name: None,
        }
    }

    /// Scope id
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Global { id, .. } | Self::Dir { id, .. } | Self::Glob { id, .. } => id,
        }
    }

    /// Display name, if set
    #[inline]
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Global { name, .. } | Self::Dir { name, .. } | Self::Glob { name, .. } => {
                name.as_deref()
            }
        }
    }

    /// Set the display name
    #[must_use]
    pub fn with_name(mut self, value: impl Into<String>) -> Self {
        match &mut self {
            Self::Global { name, .. } | Self::Dir { name, .. } | Self::Glob { name, .. } => {
                *name = Some(value.into());
            }
        }
        self
    }

    /// Wire name of the variant
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Global { .. } => "global",
            Self::Dir { .. } => "dir",
            Self::Glob { .. } => "glob",
        }
    }
}

/// Block content flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum UamBlockKind {
    /// Free markdown
    Markdown,
    /// Task list
    Checklist,
    /// Shell commands
    Commands,
    /// Do / don't lists
    DosDonts,
    /// Notable file paths
    Files,
}

impl UamBlockKind {
    /// Placeholder body for a freshly created block
    #[must_use]
    pub fn starter_body(self) -> &'static str {
        match self {
            Self::Markdown => "",
            Self::Checklist => "- [ ] Add item\n- [ ] Add item\n",
            Self::Commands => "```bash\n# Add command\n```\n",
            Self::DosDonts => "## Do\n- \n\n## Don't\n- \n",
            Self::Files => "- `src/...`\n- `__tests__/...`\n",
        }
    }
}

/// One piece of instruction content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UamBlock {
    /// Block id
    pub id: String,
    /// Owning scope; dangling ids are skipped by adapters with a warning
    pub scope_id: String,
    /// Content flavor
    pub kind: UamBlockKind,
    /// Optional heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Markdown body
    pub body: String,
}

impl UamBlock {
    /// Create new block without a title
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        scope_id: impl Into<String>,
        kind: UamBlockKind,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            scope_id: scope_id.into(),
            kind,
            title: None,
            body: body.into(),
        }
    }
}

/// Exportable skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UamCapability {
    /// Slug-like id
    pub id: String,
    /// Display title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Long description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Arbitrary JSON parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<UamOptions>,
}

impl UamCapability {
    /// Create new capability with only an id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            params: None,
        }
    }

    /// Set the title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the params
    #[must_use]
    pub fn with_params(mut self, params: UamOptions) -> Self {
        self.params = Some(params);
        self
    }

    /// Title when set and non-blank, otherwise the id
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .unwrap_or(&self.id)
    }
}

fn default_adapter_version() -> String {
    DEFAULT_ADAPTER_VERSION.to_string()
}

/// Requested compile target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UamTarget {
    /// Adapter id
    pub target_id: String,
    /// Adapter version
    #[serde(default = "default_adapter_version")]
    pub adapter_version: String,
    /// Adapter-specific options
    #[serde(default)]
    pub options: UamOptions,
}

impl UamTarget {
    /// Create new target at the default adapter version with no options
    #[inline]
    #[must_use]
    pub fn new(target_id: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            adapter_version: default_adapter_version(),
            options: UamOptions::new(),
        }
    }

    /// Set the adapter version
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.adapter_version = version.into();
        self
    }

    /// Set one option
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    /// `(target_id, adapter_version)` key used by the adapter registry
    #[inline]
    #[must_use]
    pub fn key(&self) -> (&str, &str) {
        (self.target_id.as_str(), self.adapter_version.as_str())
    }
}
