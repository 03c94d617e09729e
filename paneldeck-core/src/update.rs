//! Update batches: the entity mutations collected during one command.
//!
//! The executor threads an explicit batch through every command; on the
//! success path exactly one batch is handed to the broker, after all the
//! command's mutations are durable. On failure the batch is dropped
//! unpublished, so observers never see a widget half-created or a layout
//! referencing a deleted entity.

use serde::{Deserialize, Serialize};

use crate::entity::{Widget, WidgetId};

/// One entity mutation observed by subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WidgetUpdate {
    Created { widget: Widget },
    Deleted { widget_id: WidgetId },
    MetaChanged { widget_id: WidgetId, key: String },
}

/// Mutations accumulated during one command execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBatch {
    updates: Vec<WidgetUpdate>,
}

impl UpdateBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_created(&mut self, widget: Widget) {
        self.updates.push(WidgetUpdate::Created { widget });
    }

    pub fn record_deleted(&mut self, widget_id: WidgetId) {
        self.updates.push(WidgetUpdate::Deleted { widget_id });
    }

    pub fn record_meta_changed(&mut self, widget_id: WidgetId, key: &str) {
        self.updates.push(WidgetUpdate::MetaChanged {
            widget_id,
            key: key.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn updates(&self) -> &[WidgetUpdate] {
        &self.updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::TabId;

    #[test]
    fn test_batch_preserves_recording_order() {
        let mut batch = UpdateBatch::new();
        let widget = Widget {
            id: WidgetId::new("w1"),
            tab: TabId::new("t1"),
            meta: Default::default(),
        };
        batch.record_created(widget);
        batch.record_meta_changed(WidgetId::new("w1"), "display:name");
        batch.record_deleted(WidgetId::new("w1"));

        assert_eq!(batch.len(), 3);
        assert!(matches!(batch.updates()[0], WidgetUpdate::Created { .. }));
        assert!(matches!(batch.updates()[1], WidgetUpdate::MetaChanged { .. }));
        assert!(matches!(batch.updates()[2], WidgetUpdate::Deleted { .. }));
    }

    #[test]
    fn test_update_event_tagging() {
        let update = WidgetUpdate::Deleted {
            widget_id: WidgetId::new("w1"),
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["event"], "deleted");
        assert_eq!(json["widget_id"], "w1");
    }
}
