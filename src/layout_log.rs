//! Ordered per-tab layout action log.
//!
//! The pipeline appends actions here; the presentation layer drains
//! them FIFO and applies each one to its split tree. Append order is
//! effect order, so the log never reorders or coalesces entries.

use std::collections::{HashMap, VecDeque};

use paneldeck_core::collab::LayoutQueue;
use paneldeck_core::{LayoutAction, TabId};

#[derive(Debug, Default)]
pub struct LayoutLog {
    queues: HashMap<TabId, VecDeque<LayoutAction>>,
}

impl LayoutLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every pending action for the tab, oldest first.
    pub fn drain_tab(&mut self, tab: &TabId) -> Vec<LayoutAction> {
        self.queues
            .get_mut(tab)
            .map(|q| q.drain(..).collect())
            .unwrap_or_default()
    }

    /// Number of pending actions for the tab.
    pub fn pending(&self, tab: &TabId) -> usize {
        self.queues.get(tab).map_or(0, VecDeque::len)
    }
}

impl LayoutQueue for LayoutLog {
    fn queue_action(&mut self, tab: &TabId, action: LayoutAction) -> anyhow::Result<()> {
        self.queues.entry(tab.clone()).or_default().push_back(action);
        Ok(())
    }
}
