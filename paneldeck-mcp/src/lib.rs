//! Minimal MCP (Model Context Protocol) server over stdio.
//!
//! Reads line-delimited JSON-RPC 2.0 from stdin and writes responses to
//! stdout. Exposes the widget lifecycle tools for AI-agent integrations:
//! `widget_open`, `widget_close`, `widget_rename`, and `widget_move`.
//!
//! Stdout is the protocol channel; all tracing goes to stderr or the log
//! facade. Tool execution itself lives behind the [`ToolHost`] trait so
//! the transport stays independent of the workspace implementation.
//!
//! # Module layout
//!
//! - [`jsonrpc`] — JSON-RPC 2.0 wire types, response helpers, and stdout framing
//! - [`tools`] — tool registration, descriptors, and dispatch
//! - [`tools::schema`] — per-tool input schemas

pub mod jsonrpc;
pub mod tools;

use std::io::BufRead;

use serde_json::Value;

use jsonrpc::{IncomingMessage, Response, send_response};
use paneldeck_core::{ToolError, ToolKind, ToolReply};
use tools::{handle_tools_call, handle_tools_list};

// ---------------------------------------------------------------------------
// Protocol constants
// ---------------------------------------------------------------------------

/// MCP protocol version.
pub(crate) const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server name reported during initialization.
pub(crate) const SERVER_NAME: &str = "paneldeck";

/// Server version reported during initialization.
pub(crate) const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The execution side of a tool call.
///
/// The server loop validates transport framing and routes by tool name;
/// everything from payload decoding onward happens behind this trait.
pub trait ToolHost {
    fn invoke(&mut self, kind: ToolKind, arguments: Option<&Value>)
    -> Result<ToolReply, ToolError>;
}

/// Handle the `initialize` JSON-RPC request.
fn handle_initialize() -> Value {
    serde_json::json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION
        }
    })
}

/// Run the MCP server loop. Reads JSON-RPC messages from stdin until the
/// stream is closed or an I/O error occurs, then returns normally so that
/// callers can run destructors and exit cleanly.
pub fn run_mcp_server(host: &mut dyn ToolHost) {
    eprintln!("[mcp-server] Starting paneldeck MCP server v{SERVER_VERSION}");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let reader = stdin.lock();

    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("[mcp-server] Error reading stdin: {e}");
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let msg: IncomingMessage = match serde_json::from_str(trimmed) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("[mcp-server] Parse error: {e}");
                send_response(&mut stdout, &Response::parse_error());
                continue;
            }
        };

        let method = match &msg.method {
            Some(m) => m.as_str(),
            None => {
                eprintln!("[mcp-server] Ignoring message without method");
                continue;
            }
        };

        // Notifications (no id) never get responses.
        let id = match msg.id {
            Some(id) => id,
            None => {
                eprintln!("[mcp-server] Notification: {method}");
                continue;
            }
        };

        let response = match method {
            "initialize" => Response::success(id, handle_initialize()),
            "tools/list" => Response::success(id, handle_tools_list()),
            "tools/call" => Response::success(id, handle_tools_call(host, msg.params)),
            _ => Response::method_not_found(id, method),
        };

        send_response(&mut stdout, &response);
    }

    eprintln!("[mcp-server] stdin closed, exiting");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
