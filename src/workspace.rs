//! Tab registry, locking, and the tool-call entry point.
//!
//! Commands against the same tab are serialized by a per-tab mutex, so
//! resolve-then-mutate sequences never interleave; commands against
//! different tabs run independently. Payload parsing happens before any
//! lock is taken, and the update bus is locked only for the publish at
//! the end of a successful command.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use anyhow::anyhow;
use parking_lot::Mutex;
use serde_json::Value;

use paneldeck_core::collab::{EntityStore, UpdateBroker};
use paneldeck_core::{
    Command, CommandExecutor, Deadline, LayoutAction, TabId, ToolError, ToolKind, ToolReply,
    UpdateBatch, Widget, WidgetId,
};
use paneldeck_mcp::ToolHost;

use crate::broker::UpdateBus;
use crate::controller::ControllerRegistry;
use crate::layout_log::LayoutLog;
use crate::store::MemoryStore;

/// Default per-command wall-clock budget.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(5);

/// Everything a single tab owns, guarded by one mutex.
#[derive(Debug, Default)]
struct TabState {
    title: Option<String>,
    store: MemoryStore,
    layout: LayoutLog,
    controllers: ControllerRegistry,
}

/// Adapts the shared bus mutex to the executor's broker seam. The bus
/// lock is held only for the duration of one publish.
struct BusHandle<'a>(&'a Mutex<UpdateBus>);

impl UpdateBroker for BusHandle<'_> {
    fn publish(&mut self, tab: &TabId, batch: UpdateBatch) {
        self.0.lock().publish(tab, batch);
    }
}

/// The workspace: all tabs plus the shared update bus.
pub struct Workspace {
    tabs: Mutex<HashMap<TabId, Arc<Mutex<TabState>>>>,
    bus: Mutex<UpdateBus>,
    deadline: Duration,
}

impl Workspace {
    pub fn new(deadline: Duration) -> Self {
        Workspace {
            tabs: Mutex::new(HashMap::new()),
            bus: Mutex::new(UpdateBus::new()),
            deadline,
        }
    }

    /// Create a new empty tab and return its id.
    pub fn create_tab(&self) -> TabId {
        self.insert_tab(None)
    }

    /// Create a new empty tab carrying a human-readable title.
    pub fn create_tab_titled(&self, title: impl Into<String>) -> TabId {
        self.insert_tab(Some(title.into()))
    }

    fn insert_tab(&self, title: Option<String>) -> TabId {
        let tab = TabId::new(uuid::Uuid::new_v4().to_string());
        match &title {
            Some(t) => log::info!("created tab {tab} ({t:?})"),
            None => log::info!("created tab {tab}"),
        }
        let state = TabState {
            title,
            ..TabState::default()
        };
        self.tabs
            .lock()
            .insert(tab.clone(), Arc::new(Mutex::new(state)));
        tab
    }

    /// Drop a tab and everything it owns. Pending layout actions and
    /// controller registrations go with it.
    pub fn remove_tab(&self, tab: &TabId) -> bool {
        let removed = self.tabs.lock().remove(tab).is_some();
        if removed {
            log::info!("removed tab {tab}");
        }
        removed
    }

    pub fn tab_ids(&self) -> Vec<TabId> {
        self.tabs.lock().keys().cloned().collect()
    }

    /// Subscribe to update batches for all tabs.
    pub fn subscribe(&self) -> Receiver<(TabId, UpdateBatch)> {
        self.bus.lock().subscribe()
    }

    fn tab_state(&self, tab: &TabId) -> Result<Arc<Mutex<TabState>>, ToolError> {
        self.tabs
            .lock()
            .get(tab)
            .cloned()
            .ok_or_else(|| ToolError::store("find tab", anyhow!("tab {tab} not found")))
    }

    /// Parse and execute one tool call against a tab.
    pub fn invoke(
        &self,
        tab: &TabId,
        kind: ToolKind,
        arguments: Option<&Value>,
    ) -> Result<ToolReply, ToolError> {
        // Parsing needs no lock; reject bad payloads before queueing
        // behind the tab mutex.
        let command = Command::parse(kind, arguments)?;
        let deadline = Deadline::after(self.deadline);

        let state = self.tab_state(tab)?;
        let mut guard = state.lock();
        let state = &mut *guard;

        let mut bus = BusHandle(&self.bus);
        let mut executor = CommandExecutor {
            store: &mut state.store,
            layout: &mut state.layout,
            controllers: &mut state.controllers,
            broker: &mut bus,
        };
        let reply = executor.run(tab, &command, deadline)?;

        // A close may have deleted a widget with a live controller.
        let live = state.store.widget_ids(tab).unwrap_or_default();
        state.controllers.retain_known(&live);
        Ok(reply)
    }

    // ---- inspection helpers (presentation layer and tests) ----

    pub fn tab_title(&self, tab: &TabId) -> Option<String> {
        let state = self.tab_state(tab).ok()?;
        let guard = state.lock();
        guard.title.clone()
    }

    pub fn find_widget(&self, tab: &TabId, id: &WidgetId) -> Option<Widget> {
        let state = self.tab_state(tab).ok()?;
        let guard = state.lock();
        guard.store.get(id).cloned()
    }

    pub fn widget_count(&self, tab: &TabId) -> usize {
        self.tab_state(tab)
            .map_or(0, |state| state.lock().store.widget_count(tab))
    }

    /// Drain the tab's pending layout actions, oldest first.
    pub fn drain_layout(&self, tab: &TabId) -> Vec<LayoutAction> {
        self.tab_state(tab)
            .map_or_else(|_| Vec::new(), |state| state.lock().layout.drain_tab(tab))
    }

    pub fn pending_actions(&self, tab: &TabId) -> usize {
        self.tab_state(tab)
            .map_or(0, |state| state.lock().layout.pending(tab))
    }

    pub fn controller_running(&self, tab: &TabId, id: &WidgetId) -> bool {
        self.tab_state(tab)
            .map_or(false, |state| state.lock().controllers.is_running(id))
    }
}

/// Binds a workspace and a tab to the MCP server's host seam. The MCP
/// transport serves one tab per session; tab management stays with the
/// embedding application.
pub struct WorkspaceHost {
    workspace: Arc<Workspace>,
    tab: TabId,
}

impl WorkspaceHost {
    pub fn new(workspace: Arc<Workspace>, tab: TabId) -> Self {
        WorkspaceHost { workspace, tab }
    }

    pub fn tab(&self) -> &TabId {
        &self.tab
    }
}

impl ToolHost for WorkspaceHost {
    fn invoke(
        &mut self,
        kind: ToolKind,
        arguments: Option<&Value>,
    ) -> Result<ToolReply, ToolError> {
        self.workspace.invoke(&self.tab, kind, arguments)
    }
}
