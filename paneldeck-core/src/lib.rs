//! Tool-invocation and layout-mutation pipeline for paneldeck.
//!
//! An agent manipulates the widgets in a workspace tab through four named,
//! schema-validated operations: `widget_open`, `widget_close`,
//! `widget_rename`, and `widget_move`. This crate owns everything between
//! the untyped tool payload and the collaborator boundary: strict
//! validation into typed commands, short-identifier resolution, compiling
//! commands into ordered layout-tree actions, the side-effecting lifecycle
//! pipeline, and the coalesced update batch published when a command
//! completes.
//!
//! # Module layout
//!
//! - [`command`] — command schema, two-phase validation, audit descriptions
//! - [`resolve`] — short-identifier resolution within a tab's scope
//! - [`layout`] — layout actions and the pure command → action compiler
//! - [`exec`] — the ordered lifecycle pipeline and per-command deadline
//! - [`update`] — update batches collected per command execution
//! - [`collab`] — the four collaborator traits (store, queue, controller, broker)
//! - [`entity`] — widget entities, identifiers, and metadata
//! - [`error`] — the [`ToolError`] taxonomy

pub mod collab;
pub mod command;
pub mod entity;
pub mod error;
pub mod exec;
pub mod layout;
pub mod resolve;
pub mod update;

pub use command::{Command, Direction, Position, ToolKind, WidgetType, describe_tool_call};
pub use entity::{TabId, Widget, WidgetId, WidgetMeta};
pub use error::ToolError;
pub use exec::{CommandExecutor, Deadline, ToolReply};
pub use layout::{LayoutAction, LayoutActionKind};
pub use update::{UpdateBatch, WidgetUpdate};
