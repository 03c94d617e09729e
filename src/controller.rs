//! Terminal controller registry.
//!
//! Tracks which widgets have a live interactive controller behind them.
//! The actual PTY plumbing is owned by the embedding application; this
//! registry records intent so the pipeline's ordering guarantee (start
//! only after create and placement) is observable and testable.

use std::collections::HashSet;

use paneldeck_core::collab::ControllerStarter;
use paneldeck_core::{TabId, WidgetId};

#[derive(Debug, Default)]
pub struct ControllerRegistry {
    running: HashSet<WidgetId>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self, widget_id: &WidgetId) -> bool {
        self.running.contains(widget_id)
    }

    /// Drop registry entries for widgets that no longer exist.
    pub fn retain_known(&mut self, live: &[WidgetId]) {
        self.running.retain(|id| live.contains(id));
    }
}

impl ControllerStarter for ControllerRegistry {
    fn start_controller(&mut self, tab: &TabId, widget_id: &WidgetId) -> anyhow::Result<()> {
        // Starting twice is a no-op, not an error.
        if self.running.insert(widget_id.clone()) {
            log::debug!("controller started for widget {} in tab {tab}", widget_id.short());
        }
        Ok(())
    }
}
