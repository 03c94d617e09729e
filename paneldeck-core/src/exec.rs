//! Widget lifecycle execution: the ordered command pipeline.
//!
//! A command runs as a short pipeline — validated, resolved, compiled,
//! executed, broadcast — where each step's failure aborts the remaining
//! steps. Two orderings are load-bearing:
//!
//! - close queues the `Remove` layout action *before* deleting the
//!   entity, so the presentation layer still holds a valid reference when
//!   the removal instruction arrives;
//! - open starts a terminal controller only *after* the entity exists and
//!   its layout action is queued — a controller must never run for a
//!   widget without a tree position.
//!
//! Open additionally rolls its create back if the layout action cannot be
//! queued, so an entity without a placement is unreachable.

use std::time::{Duration, Instant};

use serde_json::{Value, json};

use crate::collab::{ControllerStarter, EntityStore, LayoutQueue, UpdateBroker};
use crate::command::{
    CloseCommand, Command, MoveCommand, OpenCommand, Position, RenameCommand, WidgetType,
};
use crate::entity::{META_DISPLAY_NAME, TabId, WidgetId, build_open_meta};
use crate::error::ToolError;
use crate::layout::{ResolvedSplit, compile_close, compile_move, compile_open};
use crate::resolve::resolve_widget;
use crate::update::UpdateBatch;

/// Wall-clock budget for one command execution.
///
/// Checked at pipeline stage boundaries; a stage is never interrupted
/// mid-flight. An expired deadline fails the command with
/// [`ToolError::Timeout`] and suppresses the broadcast.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    pub fn after(budget: Duration) -> Self {
        Deadline {
            at: Instant::now() + budget,
        }
    }

    pub fn check(&self) -> Result<(), ToolError> {
        if Instant::now() >= self.at {
            Err(ToolError::Timeout)
        } else {
            Ok(())
        }
    }
}

/// Successful result of one command, shaped per the tool contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolReply {
    /// `widget_open` result: the short display id plus the full canonical
    /// id, so agents can use either form afterwards.
    Opened {
        widget_id: String,
        full_id: WidgetId,
    },
    /// Close/rename/move result: a human-readable confirmation.
    Message(String),
}

impl ToolReply {
    /// The JSON object returned to the tool caller.
    pub fn to_value(&self) -> Value {
        match self {
            ToolReply::Opened { widget_id, full_id } => json!({
                "success": true,
                "widget_id": widget_id,
                "full_id": full_id,
            }),
            ToolReply::Message(message) => json!({
                "success": true,
                "message": message,
            }),
        }
    }
}

/// Executes validated commands against the four collaborators.
///
/// The caller is responsible for the per-tab single-writer discipline:
/// the executor assumes the tab's widget set and layout queue are stable
/// for the duration of one `run`.
pub struct CommandExecutor<'a> {
    pub store: &'a mut dyn EntityStore,
    pub layout: &'a mut dyn LayoutQueue,
    pub controllers: &'a mut dyn ControllerStarter,
    pub broker: &'a mut dyn UpdateBroker,
}

impl CommandExecutor<'_> {
    /// Run one validated command to completion.
    ///
    /// On success, publishes exactly one update batch with everything the
    /// command mutated. On failure nothing is published; mutations
    /// committed before the failing step remain (see the controller-start
    /// case) and the error tells the caller what follow-up is needed.
    pub fn run(
        &mut self,
        tab: &TabId,
        command: &Command,
        deadline: Deadline,
    ) -> Result<ToolReply, ToolError> {
        deadline.check()?;
        let mut batch = UpdateBatch::new();
        let reply = match command {
            Command::Open(cmd) => self.run_open(tab, cmd, deadline, &mut batch)?,
            Command::Close(cmd) => self.run_close(tab, cmd, deadline, &mut batch)?,
            Command::Rename(cmd) => self.run_rename(tab, cmd, deadline, &mut batch)?,
            Command::Move(cmd) => self.run_move(tab, cmd, deadline)?,
        };
        deadline.check()?;
        self.broker.publish(tab, batch);
        Ok(reply)
    }

    fn run_open(
        &mut self,
        tab: &TabId,
        cmd: &OpenCommand,
        deadline: Deadline,
        batch: &mut UpdateBatch,
    ) -> Result<ToolReply, ToolError> {
        // Resolve the split target before any side effect, so a bad
        // target cannot leave an orphaned entity behind.
        let split = match &cmd.split {
            Some(req) => Some(ResolvedSplit {
                direction: req.direction,
                target_widget_id: resolve_widget(self.store, tab, &req.target_widget)?,
                position: req.position,
            }),
            None => None,
        };
        deadline.check()?;

        let meta = build_open_meta(cmd);
        let widget = self
            .store
            .create_widget(tab, meta)
            .map_err(|e| ToolError::store("create widget", e))?;
        let widget_id = widget.id.clone();
        batch.record_created(widget);

        let action = compile_open(&widget_id, split.as_ref());
        if let Err(e) = self.layout.queue_action(tab, action) {
            // Placement failed: roll the create back so an unplaced
            // entity is never observable.
            if let Err(rollback) = self.store.delete_widget(&widget_id) {
                log::warn!("rollback delete of widget {widget_id} failed: {rollback}");
            }
            return Err(ToolError::store("add widget to layout", e));
        }
        deadline.check()?;

        if cmd.widget_type == WidgetType::Term {
            // The terminal must be interactive by the time the tool
            // returns; the widget is created and placed at this point.
            self.controllers
                .start_controller(tab, &widget_id)
                .map_err(|e| ToolError::store("start terminal controller", e))?;
        }

        log::info!(
            "opened {} widget {} in tab {tab}",
            cmd.widget_type.as_str(),
            widget_id.short()
        );
        Ok(ToolReply::Opened {
            widget_id: widget_id.short().to_string(),
            full_id: widget_id,
        })
    }

    fn run_close(
        &mut self,
        tab: &TabId,
        cmd: &CloseCommand,
        deadline: Deadline,
        batch: &mut UpdateBatch,
    ) -> Result<ToolReply, ToolError> {
        let widget_id = resolve_widget(self.store, tab, &cmd.widget_id)?;
        deadline.check()?;

        // The tree must release the slot before the backing entity
        // disappears.
        self.layout
            .queue_action(tab, compile_close(&widget_id))
            .map_err(|e| ToolError::store("queue layout action", e))?;
        self.store
            .delete_widget(&widget_id)
            .map_err(|e| ToolError::store("close widget", e))?;
        batch.record_deleted(widget_id.clone());

        log::info!("closed widget {} in tab {tab}", widget_id.short());
        Ok(ToolReply::Message(format!("widget {} closed", cmd.widget_id)))
    }

    fn run_rename(
        &mut self,
        tab: &TabId,
        cmd: &RenameCommand,
        deadline: Deadline,
        batch: &mut UpdateBatch,
    ) -> Result<ToolReply, ToolError> {
        let widget_id = resolve_widget(self.store, tab, &cmd.widget_id)?;
        deadline.check()?;

        self.store
            .update_widget_meta(&widget_id, META_DISPLAY_NAME, Some(cmd.name.clone()))
            .map_err(|e| ToolError::store("rename widget", e))?;
        batch.record_meta_changed(widget_id, META_DISPLAY_NAME);

        Ok(ToolReply::Message(format!(
            "widget {} renamed to {:?}",
            cmd.widget_id, cmd.name
        )))
    }

    fn run_move(
        &mut self,
        tab: &TabId,
        cmd: &MoveCommand,
        deadline: Deadline,
    ) -> Result<ToolReply, ToolError> {
        let widget_id = resolve_widget(self.store, tab, &cmd.widget_id)?;
        let target_widget_id = resolve_widget(self.store, tab, &cmd.target_widget_id)?;
        deadline.check()?;

        let action = compile_move(&widget_id, &target_widget_id, cmd.direction, cmd.position);
        self.layout
            .queue_action(tab, action)
            .map_err(|e| ToolError::store("move widget", e))?;

        Ok(ToolReply::Message(format!(
            "widget {} moved {} {} of widget {}",
            cmd.widget_id,
            cmd.position.unwrap_or(Position::After).as_str(),
            cmd.direction.as_str(),
            cmd.target_widget_id
        )))
    }
}
