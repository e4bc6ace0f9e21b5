//! Registry collaborator contract: the external catalog of reusable
//! trigger/action definitions.
//!
//! Transport lives outside this crate; the UI implements
//! [`RegistryProvider`] over its HTTP client and everything here stays
//! synchronous. [`RegistryCache`] memoizes items per id — an id is fetched
//! once and re-fetched only when the id itself changes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::category::ConfigMap;
use crate::schema::types::SchemaDefinition;

/// `GET /triggers/registry/{id}`.
///
/// `config` may be absent, null, or an object without `schemas`; every
/// reader must tolerate all three.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerRegistryItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub description: Option<String>,
    pub config: Option<TriggerRegistryConfig>,
    pub metadata: Option<RegistryMetadata>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerRegistryConfig {
    pub schemas: Option<Vec<SchemaDefinition>>,
    /// Arbitrary default values at the config root.
    #[serde(flatten)]
    pub defaults: ConfigMap,
}

impl TriggerRegistryItem {
    pub fn schemas(&self) -> &[SchemaDefinition] {
        self.config
            .as_ref()
            .and_then(|c| c.schemas.as_deref())
            .unwrap_or(&[])
    }
}

/// `GET /actions/registry/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRegistryItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub description: Option<String>,
    #[serde(default)]
    pub config_template: ActionConfigTemplate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionConfigTemplate {
    pub input_schema: Option<Vec<SchemaDefinition>>,
    pub output_schema: Option<Vec<SchemaDefinition>>,
    pub output_mapping: Option<HashMap<String, String>>,
    /// Default config values at the template root.
    #[serde(flatten)]
    pub defaults: ConfigMap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryMetadata {
    pub icon: Option<String>,
    pub color: Option<String>,
    pub version: Option<String>,
}

/// Read-only seam the editor's transport layer implements. `None` means
/// the id is unknown to the registry (or the fetch failed); the editor
/// degrades rather than crashing either way.
pub trait RegistryProvider {
    fn trigger_item(&self, id: &str) -> Option<TriggerRegistryItem>;
    fn action_item(&self, id: &str) -> Option<ActionRegistryItem>;
}

/// Per-id memo over a [`RegistryProvider`]. A failed lookup is cached too,
/// so a missing id is not hammered on every render.
#[derive(Default)]
pub struct RegistryCache {
    triggers: HashMap<String, Option<TriggerRegistryItem>>,
    actions: HashMap<String, Option<ActionRegistryItem>>,
}

impl RegistryCache {
    pub fn new() -> Self {
        RegistryCache::default()
    }

    pub fn trigger(
        &mut self,
        provider: &dyn RegistryProvider,
        id: &str,
    ) -> Option<&TriggerRegistryItem> {
        self.triggers
            .entry(id.to_string())
            .or_insert_with(|| provider.trigger_item(id))
            .as_ref()
    }

    pub fn action(
        &mut self,
        provider: &dyn RegistryProvider,
        id: &str,
    ) -> Option<&ActionRegistryItem> {
        self.actions
            .entry(id.to_string())
            .or_insert_with(|| provider.action_item(id))
            .as_ref()
    }

    /// Drop a cached entry so the next lookup re-fetches.
    pub fn invalidate(&mut self, id: &str) {
        self.triggers.remove(id);
        self.actions.remove(id);
    }
}
