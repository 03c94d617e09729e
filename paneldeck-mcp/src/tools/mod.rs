//! Tool registration, descriptors, and dispatch for the MCP server.
//!
//! This module owns the tool registry: it builds the `tools/list`
//! response and dispatches `tools/call` requests to the host. Pipeline
//! failures are reported as tool-level errors (`isError: true`), never
//! as JSON-RPC protocol errors; the protocol layer only fails on
//! malformed JSON-RPC itself.

pub mod schema;

use paneldeck_core::{ToolKind, ToolReply, describe_tool_call};
use serde_json::Value;

use crate::ToolHost;
use schema::tool_descriptor;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Handle the `tools/list` request.
pub fn handle_tools_list() -> Value {
    let tools: Vec<Value> = ToolKind::ALL.iter().map(|k| tool_descriptor(*k)).collect();
    serde_json::json!({ "tools": tools })
}

/// Handle the `tools/call` request.
pub fn handle_tools_call(host: &mut dyn ToolHost, params: Option<Value>) -> Value {
    let params = match params {
        Some(p) => p,
        None => {
            return tool_error("Missing params for tools/call");
        }
    };

    let name = params.get("name").and_then(|v| v.as_str()).unwrap_or("");
    let kind = match ToolKind::from_name(name) {
        Some(k) => k,
        None => return tool_error(&format!("Unknown tool: {name}")),
    };

    let arguments = params.get("arguments");
    eprintln!(
        "[mcp-server] {}: {}",
        kind.log_name(),
        describe_tool_call(kind, arguments)
    );

    match host.invoke(kind, arguments) {
        Ok(reply) => tool_result(&reply),
        Err(e) => {
            log::warn!("{} failed: {e}", kind.log_name());
            tool_error(&e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Result helpers
// ---------------------------------------------------------------------------

/// Wrap a successful reply as an MCP tool result. The structured payload
/// is duplicated as text for clients that only render text content.
pub fn tool_result(reply: &ToolReply) -> Value {
    let structured = reply.to_value();
    let text = serde_json::to_string(&structured).unwrap_or_else(|_| "{}".to_string());
    serde_json::json!({
        "content": [{
            "type": "text",
            "text": text
        }],
        "structuredContent": structured
    })
}

/// Build a tool error result.
pub fn tool_error(message: &str) -> Value {
    serde_json::json!({
        "isError": true,
        "content": [{
            "type": "text",
            "text": message
        }]
    })
}
