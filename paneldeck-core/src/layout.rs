//! Layout actions and the command → action compiler.
//!
//! The layout tree itself is external to this crate: the pipeline never
//! reads tree topology, it only emits an ordered stream of actions that
//! the tree executor applies. Because split and move actions are defined
//! relative to the current tree shape, the queue order of these actions
//! is an invariant: they must reach the tree in exactly the order they
//! were compiled.
//!
//! The `compile_*` functions are pure and deterministic; all defaulting
//! (a missing `position` becomes `after`) happens here.

use serde::{Deserialize, Serialize};

use crate::command::{Direction, Position};
use crate::entity::WidgetId;

/// The kinds of mutation the external layout tree executor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutActionKind {
    Insert,
    Remove,
    MoveHorizontal,
    MoveVertical,
    SplitHorizontal,
    SplitVertical,
}

/// One ordered instruction for the external layout tree executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutAction {
    pub kind: LayoutActionKind,
    pub widget_id: WidgetId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_widget_id: Option<WidgetId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    pub focused: bool,
}

/// Split placement with its target already resolved to a canonical id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSplit {
    pub direction: Direction,
    pub target_widget_id: WidgetId,
    pub position: Option<Position>,
}

/// Compile the layout action for an open command.
///
/// Without a split this is a plain insert; with one, the new widget is
/// split against the resolved target, defaulting to the `after` side.
/// Newly opened widgets always take focus.
pub fn compile_open(widget_id: &WidgetId, split: Option<&ResolvedSplit>) -> LayoutAction {
    match split {
        None => LayoutAction {
            kind: LayoutActionKind::Insert,
            widget_id: widget_id.clone(),
            target_widget_id: None,
            position: None,
            focused: true,
        },
        Some(split) => LayoutAction {
            kind: match split.direction {
                Direction::Horizontal => LayoutActionKind::SplitHorizontal,
                Direction::Vertical => LayoutActionKind::SplitVertical,
            },
            widget_id: widget_id.clone(),
            target_widget_id: Some(split.target_widget_id.clone()),
            position: Some(split.position.unwrap_or(Position::After)),
            focused: true,
        },
    }
}

/// Compile the removal action for a close command.
///
/// The caller must queue this before destroying the entity: the tree has
/// to release the slot while the backing widget still exists, so the
/// presentation layer can compute its resize transition.
pub fn compile_close(widget_id: &WidgetId) -> LayoutAction {
    LayoutAction {
        kind: LayoutActionKind::Remove,
        widget_id: widget_id.clone(),
        target_widget_id: None,
        position: None,
        focused: false,
    }
}

/// Compile the reposition action for a move command. Both ids must
/// already be resolved; position defaults to `after`.
pub fn compile_move(
    widget_id: &WidgetId,
    target_widget_id: &WidgetId,
    direction: Direction,
    position: Option<Position>,
) -> LayoutAction {
    LayoutAction {
        kind: match direction {
            Direction::Horizontal => LayoutActionKind::MoveHorizontal,
            Direction::Vertical => LayoutActionKind::MoveVertical,
        },
        widget_id: widget_id.clone(),
        target_widget_id: Some(target_widget_id.clone()),
        position: Some(position.unwrap_or(Position::After)),
        focused: true,
    }
}

// Rename compiles to no layout action: it mutates metadata only and
// never changes tree shape.

#[cfg(test)]
mod tests {
    use super::*;

    fn wid(s: &str) -> WidgetId {
        WidgetId::new(s)
    }

    #[test]
    fn test_compile_open_plain_insert() {
        let action = compile_open(&wid("w1"), None);
        assert_eq!(action.kind, LayoutActionKind::Insert);
        assert_eq!(action.widget_id, wid("w1"));
        assert_eq!(action.target_widget_id, None);
        assert_eq!(action.position, None);
        assert!(action.focused);
    }

    #[test]
    fn test_compile_open_split_defaults_position_after() {
        let split = ResolvedSplit {
            direction: Direction::Horizontal,
            target_widget_id: wid("w2"),
            position: None,
        };
        let action = compile_open(&wid("w1"), Some(&split));
        assert_eq!(action.kind, LayoutActionKind::SplitHorizontal);
        assert_eq!(action.target_widget_id, Some(wid("w2")));
        assert_eq!(action.position, Some(Position::After));
        assert!(action.focused);
    }

    #[test]
    fn test_compile_open_split_vertical_keeps_explicit_position() {
        let split = ResolvedSplit {
            direction: Direction::Vertical,
            target_widget_id: wid("w2"),
            position: Some(Position::Before),
        };
        let action = compile_open(&wid("w1"), Some(&split));
        assert_eq!(action.kind, LayoutActionKind::SplitVertical);
        assert_eq!(action.position, Some(Position::Before));
    }

    #[test]
    fn test_compile_close_is_unfocused_remove() {
        let action = compile_close(&wid("w1"));
        assert_eq!(action.kind, LayoutActionKind::Remove);
        assert_eq!(action.target_widget_id, None);
        assert!(!action.focused);
    }

    #[test]
    fn test_compile_move_axis_and_default() {
        let action = compile_move(&wid("w1"), &wid("w2"), Direction::Vertical, None);
        assert_eq!(action.kind, LayoutActionKind::MoveVertical);
        assert_eq!(action.position, Some(Position::After));
        assert!(action.focused);

        let action = compile_move(
            &wid("w1"),
            &wid("w2"),
            Direction::Horizontal,
            Some(Position::Before),
        );
        assert_eq!(action.kind, LayoutActionKind::MoveHorizontal);
        assert_eq!(action.position, Some(Position::Before));
    }

    #[test]
    fn test_compile_is_deterministic() {
        let a = compile_move(&wid("w1"), &wid("w2"), Direction::Vertical, None);
        let b = compile_move(&wid("w1"), &wid("w2"), Direction::Vertical, None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_action_serializes_without_empty_fields() {
        let action = compile_close(&wid("w1"));
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["kind"], "remove");
        assert!(json.get("target_widget_id").is_none());
        assert!(json.get("position").is_none());
    }
}
