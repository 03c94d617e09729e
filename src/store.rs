//! In-memory widget entity store.
//!
//! Canonical ids are freshly generated UUIDv4 strings, which makes the
//! 8-character short-id prefixes unique in practice within a tab. The
//! store is plain data; callers serialize access through the per-tab
//! lock in [`crate::workspace`].

use std::collections::HashMap;

use anyhow::{anyhow, bail};
use paneldeck_core::collab::EntityStore;
use paneldeck_core::{TabId, Widget, WidgetId, WidgetMeta};
use uuid::Uuid;

/// HashMap-backed entity store with a per-tab index.
#[derive(Debug, Default)]
pub struct MemoryStore {
    widgets: HashMap<WidgetId, Widget>,
    by_tab: HashMap<TabId, Vec<WidgetId>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &WidgetId) -> Option<&Widget> {
        self.widgets.get(id)
    }

    pub fn widget_count(&self, tab: &TabId) -> usize {
        self.by_tab.get(tab).map_or(0, Vec::len)
    }
}

impl EntityStore for MemoryStore {
    fn create_widget(&mut self, tab: &TabId, meta: WidgetMeta) -> anyhow::Result<Widget> {
        let id = WidgetId::new(Uuid::new_v4().to_string());
        let widget = Widget {
            id: id.clone(),
            tab: tab.clone(),
            meta,
        };
        self.widgets.insert(id.clone(), widget.clone());
        self.by_tab.entry(tab.clone()).or_default().push(id);
        Ok(widget)
    }

    fn delete_widget(&mut self, id: &WidgetId) -> anyhow::Result<()> {
        let widget = self
            .widgets
            .remove(id)
            .ok_or_else(|| anyhow!("widget {id} not found"))?;
        if let Some(ids) = self.by_tab.get_mut(&widget.tab) {
            ids.retain(|w| w != id);
        }
        Ok(())
    }

    fn update_widget_meta(
        &mut self,
        id: &WidgetId,
        key: &str,
        value: Option<String>,
    ) -> anyhow::Result<()> {
        let Some(widget) = self.widgets.get_mut(id) else {
            bail!("widget {id} not found");
        };
        match value {
            Some(v) => {
                widget.meta.insert(key.to_string(), v);
            }
            None => {
                widget.meta.remove(key);
            }
        }
        Ok(())
    }

    fn widget_ids(&self, tab: &TabId) -> anyhow::Result<Vec<WidgetId>> {
        Ok(self.by_tab.get(tab).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paneldeck_core::entity::META_DISPLAY_NAME;

    fn tab() -> TabId {
        TabId::new("tab-1")
    }

    #[test]
    fn test_create_assigns_fresh_uuid() {
        let mut store = MemoryStore::new();
        let a = store.create_widget(&tab(), WidgetMeta::new()).unwrap();
        let b = store.create_widget(&tab(), WidgetMeta::new()).unwrap();
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(a.id.as_str()).is_ok());
        assert_eq!(store.widget_count(&tab()), 2);
    }

    #[test]
    fn test_delete_removes_from_tab_index() {
        let mut store = MemoryStore::new();
        let w = store.create_widget(&tab(), WidgetMeta::new()).unwrap();
        store.delete_widget(&w.id).unwrap();
        assert_eq!(store.widget_count(&tab()), 0);
        assert!(store.get(&w.id).is_none());
        assert!(store.delete_widget(&w.id).is_err());
    }

    #[test]
    fn test_meta_update_sets_and_clears() {
        let mut store = MemoryStore::new();
        let w = store.create_widget(&tab(), WidgetMeta::new()).unwrap();

        store
            .update_widget_meta(&w.id, META_DISPLAY_NAME, Some("logs".into()))
            .unwrap();
        assert_eq!(store.get(&w.id).unwrap().display_name(), Some("logs"));

        store
            .update_widget_meta(&w.id, META_DISPLAY_NAME, None)
            .unwrap();
        assert_eq!(store.get(&w.id).unwrap().display_name(), None);
    }

    #[test]
    fn test_widget_ids_scoped_to_tab() {
        let mut store = MemoryStore::new();
        let other = TabId::new("tab-2");
        store.create_widget(&tab(), WidgetMeta::new()).unwrap();
        store.create_widget(&other, WidgetMeta::new()).unwrap();

        assert_eq!(store.widget_ids(&tab()).unwrap().len(), 1);
        assert_eq!(store.widget_ids(&other).unwrap().len(), 1);
        assert!(store.widget_ids(&TabId::new("tab-3")).unwrap().is_empty());
    }
}
