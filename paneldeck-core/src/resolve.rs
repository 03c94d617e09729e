//! Short-identifier resolution.
//!
//! Agents refer to widgets by an 8-character prefix of the canonical id.
//! A prefix must match exactly one live widget in the tab; zero matches
//! and multiple matches collapse into the same error class so callers
//! cannot tell (and need not handle) which case occurred. Resolution must
//! run under the same per-tab lock as the mutation that follows it, so it
//! never races a concurrent delete.

use crate::collab::EntityStore;
use crate::entity::{TabId, WidgetId};
use crate::error::ToolError;

/// Resolve a short identifier to the single live widget it prefixes.
pub fn resolve_widget(
    store: &dyn EntityStore,
    tab: &TabId,
    prefix: &str,
) -> Result<WidgetId, ToolError> {
    let ids = store
        .widget_ids(tab)
        .map_err(|e| ToolError::store("list widgets", e))?;
    resolve_prefix(&ids, prefix)
}

/// Case-sensitive exact-prefix match against a snapshot of live ids.
pub fn resolve_prefix(ids: &[WidgetId], prefix: &str) -> Result<WidgetId, ToolError> {
    let mut matches = ids.iter().filter(|id| id.as_str().starts_with(prefix));
    match (matches.next(), matches.next()) {
        (Some(id), None) => Ok(id.clone()),
        _ => Err(ToolError::UnresolvedIdentifier(prefix.to_string())),
    }
}
