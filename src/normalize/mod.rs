//! Node-configuration normalization: the one place a node's in-memory
//! config is flattened and canonicalized before persisting.
//!
//! Two responsibilities run together on every save but stay separate:
//! flattening (legacy nested-config merge + metadata strip) and
//! category-specific canonicalization (exact persisted key set per
//! category). The form session and write scheduler carry the in-flight
//! edit semantics around them.

pub mod canonical;
pub mod debounce;
pub mod flatten;
pub mod session;

pub use canonical::{ActionConfig, CanonicalConfig, FieldMapping, NormalizeError, TriggerConfig};
pub use debounce::{DEBOUNCE_WINDOW_MS, PendingWrite, WriteScheduler};
pub use flatten::{EXCLUDED_KEYS, flatten_config};
pub use session::FormSession;

use crate::category::{ConfigMap, resolve_category};
use crate::parse::types::WorkflowNode;

/// Flatten + canonicalize a raw config in one step. Category is resolved
/// from the flattened map so identity ids buried in a nested `config`
/// still count.
pub fn normalize_config(
    node_type: &str,
    raw: &ConfigMap,
    node_id: &str,
) -> Result<CanonicalConfig, NormalizeError> {
    let flat = flatten_config(raw);
    let category = resolve_category(node_type, &flat);
    canonical::canonicalize(category, flat, node_id)
}

/// Normalize a node in place: canonical config written back, type string
/// rewritten to the canonical enum value. This is the single mutation
/// entry point for node configs.
pub fn normalize_node(node: &mut WorkflowNode) -> Result<(), NormalizeError> {
    let canonical = normalize_config(&node.node_type, &node.data.config, &node.id)?;
    node.data.config = canonical.to_map();
    node.normalize_type();
    Ok(())
}
