//! Adapter registry
//!
//! Provides [`AdapterRegistry`], a lookup table keyed by `(id, version)`.

use crate::adapter::Adapter;
use crate::adapters;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registered adapters by id, then version
#[derive(Debug, Default, Clone)]
pub struct AdapterRegistry {
    adapters: BTreeMap<String, BTreeMap<String, Arc<dyn Adapter>>>,
}

impl AdapterRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create registry with the built-in adapters
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(adapters::AgentsMdAdapter);
        registry.register(adapters::ClaudeCodeAdapter);
        registry.register(adapters::CursorRulesAdapter);
        registry.register(adapters::GeminiCliAdapter);
        registry.register(adapters::GithubCopilotAdapter);
        registry.register(adapters::WindsurfRulesAdapter);
        registry
    }

    /// Register an adapter, returning the one it replaced
    pub fn register(&mut self, adapter: impl Adapter + 'static) -> Option<Arc<dyn Adapter>> {
        self.register_arc(Arc::new(adapter))
    }

    /// Register a shared adapter, returning the one it replaced
    pub fn register_arc(&mut self, adapter: Arc<dyn Adapter>) -> Option<Arc<dyn Adapter>> {
        self.adapters
            .entry(adapter.id().to_string())
            .or_default()
            .insert(adapter.version().to_string(), adapter)
    }

    /// Look up an adapter; unknown keys are `None`
    #[must_use]
    pub fn resolve(&self, id: &str, version: &str) -> Option<Arc<dyn Adapter>> {
        self.adapters.get(id)?.get(version).cloned()
    }

    /// Check if `(id, version)` is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str, version: &str) -> bool {
        self.adapters
            .get(id)
            .is_some_and(|versions| versions.contains_key(version))
    }

    /// Registered `(id, version)` pairs in sorted order
    #[must_use]
    pub fn keys(&self) -> Vec<(&str, &str)> {
        self.adapters
            .iter()
            .flat_map(|(id, versions)| {
                versions
                    .keys()
                    .map(move |version| (id.as_str(), version.as_str()))
            })
            .collect()
    }

    /// Number of registered adapters
    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.values().map(BTreeMap::len).sum()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}
