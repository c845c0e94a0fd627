//! Skill export
//!
//! Capabilities are exported only when a target opts in: `exportSkills: true`
//! exports all of them, `skills: [ids]` (or `exportSkills: [ids]`) an
//! allow-list.

use indexmap::IndexSet;
use mdt_uam::{UamCapability, UamOptions, UamV1};
use serde_json::Value;

/// Which capabilities a target exports
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SkillExport {
    /// Nothing
    #[default]
    Off,
    /// Every capability
    All,
    /// Listed ids, in list order
    AllowList(Vec<String>),
}

fn allow_list(raw: Option<&Value>) -> Option<Vec<String>> {
    let items = raw?.as_array()?;
    Some(
        items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.trim().to_string(),
                other => other.to_string(),
            })
            .filter(|id| !id.is_empty())
            .collect(),
    )
}

impl SkillExport {
    /// Read the selection from target options
    #[must_use]
    pub fn from_options(options: &UamOptions) -> Self {
        if let Some(ids) =
            allow_list(options.get("skills")).or_else(|| allow_list(options.get("exportSkills")))
        {
            return Self::AllowList(ids);
        }
        if options.get("exportSkills") == Some(&Value::Bool(true)) {
            Self::All
        } else {
            Self::Off
        }
    }

    /// Whether anything is exported
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Off)
    }
}

/// Capabilities picked by a [`SkillExport`]
#[derive(Debug, Clone, Default)]
pub struct SkillSelection<'a> {
    /// Selected capabilities
    pub capabilities: Vec<&'a UamCapability>,
    /// Unknown allow-list ids
    pub warnings: Vec<String>,
}

/// Resolve the selection against a manifest
#[must_use]
pub fn resolve_skill_export<'a>(uam: &'a UamV1, export: &SkillExport) -> SkillSelection<'a> {
    match export {
        SkillExport::Off => SkillSelection::default(),
        SkillExport::All => SkillSelection {
            capabilities: uam.capabilities.iter().collect(),
            warnings: Vec::new(),
        },
        SkillExport::AllowList(ids) => {
            let mut selection = SkillSelection::default();
            let requested: IndexSet<&str> = ids.iter().map(String::as_str).collect();
            for id in requested {
                match uam.capabilities.iter().find(|cap| cap.id == id) {
                    Some(capability) => selection.capabilities.push(capability),
                    None => selection
                        .warnings
                        .push(format!("Unknown skill capability id '{id}'. Skipped.")),
                }
            }
            selection
        }
    }
}

fn params_block(capability: &UamCapability) -> Option<String> {
    let params = capability.params.as_ref().filter(|params| !params.is_empty())?;
    let json = serde_json::to_string_pretty(params).ok()?;
    Some(format!("```json\n{json}\n```"))
}

fn description(capability: &UamCapability) -> Option<&str> {
    capability
        .description
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// Standalone `SKILL.md` body for one capability
#[must_use]
pub fn render_skill_markdown(capability: &UamCapability) -> String {
    let mut parts = vec![format!("# {}", capability.display_title())];
    parts.extend(description(capability).map(str::to_string));
    parts.extend(params_block(capability));
    format!("{}\n", parts.join("\n\n").trim_end())
}

/// Inline `## <heading>` section listing capabilities, empty when none
#[must_use]
pub fn render_skills_inline_section(capabilities: &[&UamCapability], heading: &str) -> String {
    if capabilities.is_empty() {
        return String::new();
    }
    let mut parts = vec![format!("## {heading}")];
    for capability in capabilities {
        parts.push(format!("### {}", capability.display_title()));
        parts.push(format!("Id: {}", capability.id));
        parts.extend(description(capability).map(str::to_string));
        parts.extend(params_block(capability));
    }
    parts.join("\n\n").trim_end().to_string()
}
