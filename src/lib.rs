//! paneldeck: an agent-driven widget workspace.
//!
//! Widgets (terminals, web views, file previews, CPU graphs) live in
//! tabs and are manipulated through schema-validated MCP tools. This
//! crate wires the core pipeline to its production collaborators: the
//! in-memory entity store, the per-tab layout action log, the terminal
//! controller registry, and the update bus.
//!
//! # Module layout
//!
//! - [`store`] — in-memory widget entity store
//! - [`layout_log`] — ordered per-tab layout action log
//! - [`controller`] — terminal controller registry
//! - [`broker`] — update bus fanning batches out to subscribers
//! - [`workspace`] — tab registry, locking, and tool-call entry point
//! - [`logging`] — file-backed logger (stdout is the protocol channel)
//! - [`cli`] — command-line argument parsing

pub mod broker;
pub mod cli;
pub mod controller;
pub mod layout_log;
pub mod logging;
pub mod store;
pub mod workspace;

/// Application version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
