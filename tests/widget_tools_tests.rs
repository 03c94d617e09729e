//! End-to-end tests for the widget tools, driven through the MCP
//! dispatch layer against a real workspace.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};

use paneldeck::workspace::{DEFAULT_DEADLINE, Workspace, WorkspaceHost};
use paneldeck_core::entity::{META_DISPLAY_NAME, META_URL, META_VIEW};
use paneldeck_core::{LayoutActionKind, TabId, WidgetId};
use paneldeck_mcp::tools::{handle_tools_call, handle_tools_list};

fn new_session() -> (Arc<Workspace>, TabId, WorkspaceHost) {
    let workspace = Arc::new(Workspace::new(DEFAULT_DEADLINE));
    let tab = workspace.create_tab();
    let host = WorkspaceHost::new(Arc::clone(&workspace), tab.clone());
    (workspace, tab, host)
}

fn call(host: &mut WorkspaceHost, name: &str, arguments: Value) -> Value {
    handle_tools_call(host, Some(json!({"name": name, "arguments": arguments})))
}

fn opened_full_id(result: &Value) -> WidgetId {
    WidgetId::new(
        result["structuredContent"]["full_id"]
            .as_str()
            .expect("full_id in open result"),
    )
}

#[test]
fn test_tools_list_advertises_the_widget_tools() {
    let result = handle_tools_list();
    let tools = result["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 4);
    for tool in tools {
        assert_eq!(tool["inputSchema"]["additionalProperties"], false);
    }
}

#[test]
fn test_open_web_widget_end_to_end() {
    let (workspace, tab, mut host) = new_session();
    let rx = workspace.subscribe();

    let result = call(
        &mut host,
        "widget_open",
        json!({"widget_type": "web", "url": "https://example.com"}),
    );
    assert!(result.get("isError").is_none(), "unexpected error: {result}");
    assert_eq!(result["structuredContent"]["success"], true);

    let short = result["structuredContent"]["widget_id"].as_str().unwrap();
    assert_eq!(short.len(), 8);
    let full_id = opened_full_id(&result);
    assert!(full_id.as_str().starts_with(short));

    let widget = workspace.find_widget(&tab, &full_id).expect("widget exists");
    assert_eq!(widget.meta.get(META_VIEW).map(String::as_str), Some("web"));
    assert_eq!(
        widget.meta.get(META_URL).map(String::as_str),
        Some("https://example.com")
    );

    let actions = workspace.drain_layout(&tab);
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].kind, LayoutActionKind::Insert);
    assert!(actions[0].focused);

    // Exactly one broadcast for the command.
    let (got_tab, batch) = rx.try_recv().unwrap();
    assert_eq!(got_tab, tab);
    assert_eq!(batch.len(), 1);
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_open_web_without_url_is_rejected() {
    let (workspace, tab, mut host) = new_session();
    let result = call(&mut host, "widget_open", json!({"widget_type": "web"}));
    assert_eq!(result["isError"], true);
    assert_eq!(
        result["content"][0]["text"].as_str().unwrap(),
        "url is required for web widget"
    );
    assert_eq!(workspace.widget_count(&tab), 0);
}

#[test]
fn test_open_split_against_existing_widget() {
    let (workspace, tab, mut host) = new_session();

    let first = call(&mut host, "widget_open", json!({"widget_type": "term"}));
    let target = opened_full_id(&first);
    workspace.drain_layout(&tab);

    let result = call(
        &mut host,
        "widget_open",
        json!({
            "widget_type": "preview",
            "file": "/tmp/notes.md",
            "split_direction": "vertical",
            "target_widget": target.short(),
            "position": "before"
        }),
    );
    assert!(result.get("isError").is_none(), "unexpected error: {result}");

    let actions = workspace.drain_layout(&tab);
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].kind, LayoutActionKind::SplitVertical);
    assert_eq!(actions[0].target_widget_id, Some(target));
    assert_eq!(
        serde_json::to_value(&actions[0]).unwrap()["position"],
        "before"
    );
    assert_eq!(workspace.widget_count(&tab), 2);
}

#[test]
fn test_open_term_starts_controller() {
    let (workspace, tab, mut host) = new_session();
    let result = call(&mut host, "widget_open", json!({"widget_type": "term"}));
    let id = opened_full_id(&result);
    assert!(workspace.controller_running(&tab, &id));
}

#[test]
fn test_close_queues_remove_and_deletes_entity() {
    let (workspace, tab, mut host) = new_session();
    let opened = call(&mut host, "widget_open", json!({"widget_type": "cpuplot"}));
    let id = opened_full_id(&opened);
    workspace.drain_layout(&tab);
    let rx = workspace.subscribe();

    let result = call(&mut host, "widget_close", json!({"widget_id": id.short()}));
    assert!(result.get("isError").is_none(), "unexpected error: {result}");
    assert!(
        result["structuredContent"]["message"]
            .as_str()
            .unwrap()
            .contains("closed")
    );

    assert!(workspace.find_widget(&tab, &id).is_none());
    let actions = workspace.drain_layout(&tab);
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].kind, LayoutActionKind::Remove);
    assert_eq!(actions[0].widget_id, id);

    let (_, batch) = rx.try_recv().unwrap();
    assert_eq!(batch.len(), 1);
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_close_unresolved_prefix_is_tool_error_with_no_effects() {
    let (workspace, tab, mut host) = new_session();
    let rx = workspace.subscribe();

    let result = call(&mut host, "widget_close", json!({"widget_id": "zz"}));
    assert_eq!(result["isError"], true);
    assert!(
        result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("no unique widget")
    );
    assert_eq!(workspace.pending_actions(&tab), 0);
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_rename_updates_display_name_only() {
    let (workspace, tab, mut host) = new_session();
    let opened = call(&mut host, "widget_open", json!({"widget_type": "term"}));
    let id = opened_full_id(&opened);
    workspace.drain_layout(&tab);

    let result = call(
        &mut host,
        "widget_rename",
        json!({"widget_id": id.short(), "name": "build logs"}),
    );
    assert!(result.get("isError").is_none(), "unexpected error: {result}");

    let widget = workspace.find_widget(&tab, &id).unwrap();
    assert_eq!(
        widget.meta.get(META_DISPLAY_NAME).map(String::as_str),
        Some("build logs")
    );
    // Rename never touches the layout.
    assert_eq!(workspace.pending_actions(&tab), 0);
}

#[test]
fn test_move_queues_single_action_without_entity_mutation() {
    let (workspace, tab, mut host) = new_session();
    let a = opened_full_id(&call(&mut host, "widget_open", json!({"widget_type": "term"})));
    let b = opened_full_id(&call(&mut host, "widget_open", json!({"widget_type": "term"})));
    workspace.drain_layout(&tab);

    let result = call(
        &mut host,
        "widget_move",
        json!({
            "widget_id": a.short(),
            "target_widget_id": b.short(),
            "direction": "vertical"
        }),
    );
    assert!(result.get("isError").is_none(), "unexpected error: {result}");

    let actions = workspace.drain_layout(&tab);
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].kind, LayoutActionKind::MoveVertical);
    assert_eq!(actions[0].widget_id, a);
    assert_eq!(actions[0].target_widget_id, Some(b));
    assert_eq!(serde_json::to_value(&actions[0]).unwrap()["position"], "after");
    assert_eq!(workspace.widget_count(&tab), 2);
}

#[test]
fn test_unknown_field_is_rejected_by_closed_schema() {
    let (workspace, tab, mut host) = new_session();
    let result = call(
        &mut host,
        "widget_open",
        json!({"widget_type": "term", "colour": "mauve"}),
    );
    assert_eq!(result["isError"], true);
    assert!(
        result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("failed to decode input")
    );
    assert_eq!(workspace.widget_count(&tab), 0);
}

#[test]
fn test_invalid_enum_value_reports_allowed_set() {
    let (_workspace, _tab, mut host) = new_session();
    let result = call(&mut host, "widget_open", json!({"widget_type": "video"}));
    assert_eq!(result["isError"], true);
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("invalid widget_type: video"));
    assert!(text.contains("term, web, preview, cpuplot"));
}

#[test]
fn test_every_successful_command_publishes_exactly_one_batch() {
    let (workspace, _tab, mut host) = new_session();
    let rx = workspace.subscribe();

    let a = opened_full_id(&call(&mut host, "widget_open", json!({"widget_type": "term"})));
    let b = opened_full_id(&call(&mut host, "widget_open", json!({"widget_type": "term"})));
    call(
        &mut host,
        "widget_rename",
        json!({"widget_id": a.short(), "name": "one"}),
    );
    call(
        &mut host,
        "widget_move",
        json!({
            "widget_id": a.short(),
            "target_widget_id": b.short(),
            "direction": "horizontal"
        }),
    );
    call(&mut host, "widget_close", json!({"widget_id": b.short()}));

    let batches: Vec<_> = rx.try_iter().collect();
    assert_eq!(batches.len(), 5);
    // The move batch is empty but still published.
    assert!(batches[3].1.is_empty());
    assert_eq!(batches[4].1.len(), 1);
}

#[test]
fn test_expired_deadline_times_out() {
    let workspace = Arc::new(Workspace::new(Duration::ZERO));
    let tab = workspace.create_tab();
    let mut host = WorkspaceHost::new(Arc::clone(&workspace), tab.clone());

    let result = call(&mut host, "widget_open", json!({"widget_type": "term"}));
    assert_eq!(result["isError"], true);
    assert_eq!(
        result["content"][0]["text"].as_str().unwrap(),
        "command deadline exceeded"
    );
    assert_eq!(workspace.widget_count(&tab), 0);
}
