//! Collaborator traits: the four external systems a command touches.
//!
//! The pipeline treats all four as opaque dependencies and relies only on
//! the contracts below. Production implementations live in the
//! application crate; tests substitute recording doubles.

use crate::entity::{TabId, Widget, WidgetId, WidgetMeta};
use crate::layout::LayoutAction;
use crate::update::UpdateBatch;

/// Entity store: creates, deletes, and updates widget entities by
/// canonical id. Persistence and transaction mechanics are the store's
/// own concern.
pub trait EntityStore {
    /// Create a widget in the tab and return it with its canonical id
    /// assigned.
    fn create_widget(&mut self, tab: &TabId, meta: WidgetMeta) -> anyhow::Result<Widget>;

    /// Destroy a widget entity.
    fn delete_widget(&mut self, id: &WidgetId) -> anyhow::Result<()>;

    /// Set (`Some`) or clear (`None`) a single metadata field.
    fn update_widget_meta(
        &mut self,
        id: &WidgetId,
        key: &str,
        value: Option<String>,
    ) -> anyhow::Result<()>;

    /// Canonical ids of all widgets currently live in the tab.
    fn widget_ids(&self, tab: &TabId) -> anyhow::Result<Vec<WidgetId>>;
}

/// Ordered, per-tab layout mutation queue. The external tree executor
/// drains it FIFO; submission order is effect order.
pub trait LayoutQueue {
    fn queue_action(&mut self, tab: &TabId, action: LayoutAction) -> anyhow::Result<()>;
}

/// Starts the interactive controller behind a terminal widget. Called
/// only after the widget exists and its layout action is queued.
pub trait ControllerStarter {
    fn start_controller(&mut self, tab: &TabId, widget_id: &WidgetId) -> anyhow::Result<()>;
}

/// Change-notification broker: fans one coalesced batch of entity
/// mutations out to subscribers. The delivery transport is outside this
/// crate.
pub trait UpdateBroker {
    fn publish(&mut self, tab: &TabId, batch: UpdateBatch);
}
