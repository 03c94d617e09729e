//! Update bus: fans entity-mutation batches out to subscribers.
//!
//! Subscribers receive `(tab, batch)` pairs over std mpsc channels.
//! Publishing never blocks and never fails; a subscriber whose receiver
//! has been dropped is silently pruned on the next publish.

use std::sync::mpsc::{Receiver, Sender, channel};

use paneldeck_core::collab::UpdateBroker;
use paneldeck_core::{TabId, UpdateBatch};

#[derive(Debug, Default)]
pub struct UpdateBus {
    subscribers: Vec<Sender<(TabId, UpdateBatch)>>,
}

impl UpdateBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<(TabId, UpdateBatch)> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl UpdateBroker for UpdateBus {
    fn publish(&mut self, tab: &TabId, batch: UpdateBatch) {
        self.subscribers
            .retain(|tx| tx.send((tab.clone(), batch.clone())).is_ok());
    }
}
