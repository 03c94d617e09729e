//! Tool descriptors advertised through `tools/list`.
//!
//! Every input schema is closed (`additionalProperties: false`); the
//! command layer enforces the same closure again during decoding, so a
//! client bypassing schema validation still cannot smuggle unknown
//! fields through.

use paneldeck_core::ToolKind;
use serde_json::{Value, json};

/// Build the descriptor for one tool.
pub fn tool_descriptor(kind: ToolKind) -> Value {
    match kind {
        ToolKind::Open => widget_open_tool(),
        ToolKind::Close => widget_close_tool(),
        ToolKind::Rename => widget_rename_tool(),
        ToolKind::Move => widget_move_tool(),
    }
}

fn widget_open_tool() -> Value {
    json!({
        "name": ToolKind::Open.name(),
        "description": "Open a new widget in the current tab. Supported widget types: term (terminal), web (web browser), preview (file preview), cpuplot (CPU graph)",
        "inputSchema": {
            "type": "object",
            "properties": {
                "widget_type": {
                    "type": "string",
                    "enum": ["term", "web", "preview", "cpuplot"],
                    "description": "Type of widget to open: term (terminal), web (web browser), preview (file preview), cpuplot (CPU graph)"
                },
                "url": {
                    "type": "string",
                    "description": "URL to open (required for web widget)"
                },
                "file": {
                    "type": "string",
                    "description": "File path to preview (optional for preview widget)"
                },
                "connection": {
                    "type": "string",
                    "description": "Connection name for remote widgets (optional)"
                },
                "split_direction": {
                    "type": "string",
                    "enum": ["horizontal", "vertical"],
                    "description": "How to split when positioning: 'horizontal' creates side-by-side layout (left/right), 'vertical' creates stacked layout (top/bottom). Requires target_widget."
                },
                "target_widget": {
                    "type": "string",
                    "description": "Widget ID to split against when using split_direction. The new widget will be placed relative to this widget."
                },
                "position": {
                    "type": "string",
                    "enum": ["before", "after"],
                    "description": "Where to place the new widget relative to target_widget: 'before' (left/above) or 'after' (right/below). Defaults to 'after'."
                }
            },
            "required": ["widget_type"],
            "additionalProperties": false
        }
    })
}

fn widget_close_tool() -> Value {
    json!({
        "name": ToolKind::Close.name(),
        "description": "Close a widget by its ID. Use the 8-character widget ID shown in the current tab state.",
        "inputSchema": {
            "type": "object",
            "properties": {
                "widget_id": {
                    "type": "string",
                    "description": "8-character widget ID of the widget to close"
                }
            },
            "required": ["widget_id"],
            "additionalProperties": false
        }
    })
}

fn widget_rename_tool() -> Value {
    json!({
        "name": ToolKind::Rename.name(),
        "description": "Set a custom display name for a widget. This makes it easier to identify widgets when multiple are open. The name will appear in brackets in the widget list.",
        "inputSchema": {
            "type": "object",
            "properties": {
                "widget_id": {
                    "type": "string",
                    "description": "8-character widget ID of the widget to rename"
                },
                "name": {
                    "type": "string",
                    "description": "The new display name for the widget"
                }
            },
            "required": ["widget_id", "name"],
            "additionalProperties": false
        }
    })
}

fn widget_move_tool() -> Value {
    json!({
        "name": ToolKind::Move.name(),
        "description": "Move an existing widget to a new position relative to another widget. Use this to rearrange the layout without closing widgets.",
        "inputSchema": {
            "type": "object",
            "properties": {
                "widget_id": {
                    "type": "string",
                    "description": "8-character widget ID of the widget to move"
                },
                "target_widget_id": {
                    "type": "string",
                    "description": "8-character widget ID of the widget to position relative to"
                },
                "direction": {
                    "type": "string",
                    "enum": ["horizontal", "vertical"],
                    "description": "Direction to move: 'horizontal' places widgets side-by-side (left/right), 'vertical' stacks them (top/bottom)"
                },
                "position": {
                    "type": "string",
                    "enum": ["before", "after"],
                    "description": "Where to place the widget relative to target: 'before' (left/above) or 'after' (right/below). Defaults to 'after'."
                }
            },
            "required": ["widget_id", "target_widget_id", "direction"],
            "additionalProperties": false
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tool_has_closed_schema() {
        for kind in ToolKind::ALL {
            let tool = tool_descriptor(kind);
            assert_eq!(tool["name"], kind.name());
            assert!(tool["inputSchema"].is_object());
            assert_eq!(tool["inputSchema"]["additionalProperties"], false);
            assert!(tool["inputSchema"]["required"].is_array());
        }
    }

    #[test]
    fn test_open_schema_requires_only_widget_type() {
        let tool = tool_descriptor(ToolKind::Open);
        let required = tool["inputSchema"]["required"].as_array().unwrap();
        assert_eq!(required, &[json!("widget_type")]);
        assert_eq!(
            tool["inputSchema"]["properties"]["widget_type"]["enum"],
            json!(["term", "web", "preview", "cpuplot"])
        );
    }

    #[test]
    fn test_move_schema_requires_direction() {
        let tool = tool_descriptor(ToolKind::Move);
        let required = tool["inputSchema"]["required"].as_array().unwrap();
        assert!(required.contains(&json!("direction")));
        assert!(!required.contains(&json!("position")));
    }
}
