//! Tool command schema and validation.
//!
//! Untyped tool-call payloads are decoded in two phases: first a
//! structural decode into a closed raw field set (unknown fields are
//! rejected), then field-by-field validation into a typed [`Command`].
//! No field is coerced across types. Defaulting (e.g. `position` falling
//! back to `after`) happens in the layout compiler, not here, so the
//! validated command still records what the caller actually said.
//!
//! Validation order per command kind:
//! 1. payload presence
//! 2. structural decode
//! 3. required fields (an empty string counts as absent)
//! 4. enumerated fields
//! 5. cross-field rules

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ToolError;

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// The fixed set of widget types a tool call can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetType {
    /// Interactive terminal backed by a shell controller.
    Term,
    /// Web browser view; requires a URL.
    Web,
    /// File preview.
    Preview,
    /// CPU usage graph.
    CpuPlot,
}

impl WidgetType {
    /// All accepted wire values, in schema order.
    pub const ALLOWED: &'static [&'static str] = &["term", "web", "preview", "cpuplot"];

    /// Wire name of the widget type.
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetType::Term => "term",
            WidgetType::Web => "web",
            WidgetType::Preview => "preview",
            WidgetType::CpuPlot => "cpuplot",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "term" => Some(WidgetType::Term),
            "web" => Some(WidgetType::Web),
            "preview" => Some(WidgetType::Preview),
            "cpuplot" => Some(WidgetType::CpuPlot),
            _ => None,
        }
    }

    fn require(field: &'static str, raw: &str) -> Result<Self, ToolError> {
        Self::parse(raw).ok_or_else(|| ToolError::InvalidEnumValue {
            field,
            got: raw.to_string(),
            allowed: Self::ALLOWED,
        })
    }
}

/// Axis of a split or move: `horizontal` places widgets side by side
/// (left/right), `vertical` stacks them (top/bottom).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    /// All accepted wire values.
    pub const ALLOWED: &'static [&'static str] = &["horizontal", "vertical"];

    /// Wire name of the direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Horizontal => "horizontal",
            Direction::Vertical => "vertical",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "horizontal" => Some(Direction::Horizontal),
            "vertical" => Some(Direction::Vertical),
            _ => None,
        }
    }

    fn require(field: &'static str, raw: &str) -> Result<Self, ToolError> {
        Self::parse(raw).ok_or_else(|| ToolError::InvalidEnumValue {
            field,
            got: raw.to_string(),
            allowed: Self::ALLOWED,
        })
    }
}

/// Placement relative to the target widget: `before` is left/above,
/// `after` is right/below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Before,
    After,
}

impl Position {
    /// All accepted wire values.
    pub const ALLOWED: &'static [&'static str] = &["before", "after"];

    /// Wire name of the position.
    pub fn as_str(self) -> &'static str {
        match self {
            Position::Before => "before",
            Position::After => "after",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "before" => Some(Position::Before),
            "after" => Some(Position::After),
            _ => None,
        }
    }

    fn require(field: &'static str, raw: &str) -> Result<Self, ToolError> {
        Self::parse(raw).ok_or_else(|| ToolError::InvalidEnumValue {
            field,
            got: raw.to_string(),
            allowed: Self::ALLOWED,
        })
    }
}

// ---------------------------------------------------------------------------
// Raw payload structs (structural decode, closed schema)
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOpen {
    widget_type: Option<String>,
    url: Option<String>,
    file: Option<String>,
    connection: Option<String>,
    split_direction: Option<String>,
    target_widget: Option<String>,
    position: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawClose {
    widget_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRename {
    widget_id: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMove {
    widget_id: Option<String>,
    target_widget_id: Option<String>,
    direction: Option<String>,
    position: Option<String>,
}

// ---------------------------------------------------------------------------
// Typed commands
// ---------------------------------------------------------------------------

/// Split placement requested by an open command. The target is still a
/// short identifier here; resolution happens in the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitRequest {
    pub direction: Direction,
    pub target_widget: String,
    pub position: Option<Position>,
}

/// A validated `widget_open` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenCommand {
    pub widget_type: WidgetType,
    pub url: Option<String>,
    pub file: Option<String>,
    pub connection: Option<String>,
    pub split: Option<SplitRequest>,
}

/// A validated `widget_close` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseCommand {
    pub widget_id: String,
}

/// A validated `widget_rename` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameCommand {
    pub widget_id: String,
    pub name: String,
}

/// A validated `widget_move` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCommand {
    pub widget_id: String,
    pub target_widget_id: String,
    pub direction: Direction,
    pub position: Option<Position>,
}

/// A fully validated tool command, ready for the lifecycle executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(OpenCommand),
    Close(CloseCommand),
    Rename(RenameCommand),
    Move(MoveCommand),
}

/// The four tool operations exposed to agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Open,
    Close,
    Rename,
    Move,
}

impl ToolKind {
    /// All tools, in the order they are listed to clients.
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Open,
        ToolKind::Close,
        ToolKind::Rename,
        ToolKind::Move,
    ];

    /// Wire name of the tool.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Open => "widget_open",
            ToolKind::Close => "widget_close",
            ToolKind::Rename => "widget_rename",
            ToolKind::Move => "widget_move",
        }
    }

    /// Short name used in audit logs.
    pub fn log_name(self) -> &'static str {
        match self {
            ToolKind::Open => "widget:open",
            ToolKind::Close => "widget:close",
            ToolKind::Rename => "widget:rename",
            ToolKind::Move => "widget:move",
        }
    }

    /// Look a tool up by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        ToolKind::ALL.iter().copied().find(|k| k.name() == name)
    }
}

impl Command {
    /// Validate an untyped payload into a typed command.
    ///
    /// Missing and JSON-null payloads are rejected up front; everything
    /// else goes through the kind's structural decode and field checks.
    pub fn parse(kind: ToolKind, payload: Option<&Value>) -> Result<Command, ToolError> {
        let payload = match payload {
            Some(v) if !v.is_null() => v,
            _ => return Err(ToolError::MissingInput),
        };
        match kind {
            ToolKind::Open => parse_open(payload).map(Command::Open),
            ToolKind::Close => parse_close(payload).map(Command::Close),
            ToolKind::Rename => parse_rename(payload).map(Command::Rename),
            ToolKind::Move => parse_move(payload).map(Command::Move),
        }
    }

    /// The tool this command came from.
    pub fn kind(&self) -> ToolKind {
        match self {
            Command::Open(_) => ToolKind::Open,
            Command::Close(_) => ToolKind::Close,
            Command::Rename(_) => ToolKind::Rename,
            Command::Move(_) => ToolKind::Move,
        }
    }

    /// One-line human description of the command for audit logging.
    pub fn describe(&self) -> String {
        match self {
            Command::Open(cmd) => match cmd.widget_type {
                WidgetType::Web => format!(
                    "opening web widget with URL {:?}",
                    cmd.url.as_deref().unwrap_or_default()
                ),
                WidgetType::Preview => match cmd.file.as_deref() {
                    Some(file) if !file.is_empty() => {
                        format!("opening preview widget for {file:?}")
                    }
                    _ => "opening preview widget".to_string(),
                },
                WidgetType::Term => match cmd.connection.as_deref() {
                    Some(conn) if !conn.is_empty() => {
                        format!("opening terminal connected to {conn:?}")
                    }
                    _ => "opening terminal widget".to_string(),
                },
                WidgetType::CpuPlot => "opening CPU graph widget".to_string(),
            },
            Command::Close(cmd) => format!("closing widget {}", cmd.widget_id),
            Command::Rename(cmd) => {
                format!("renaming widget {} to {:?}", cmd.widget_id, cmd.name)
            }
            Command::Move(cmd) => format!(
                "moving widget {} {} of widget {} ({})",
                cmd.widget_id,
                cmd.position.unwrap_or(Position::After).as_str(),
                cmd.target_widget_id,
                cmd.direction.as_str()
            ),
        }
    }
}

/// Render the one-line audit description for a tool call.
///
/// Never fails: parse errors are folded into the returned string so the
/// description can be produced for display before execution.
pub fn describe_tool_call(kind: ToolKind, payload: Option<&Value>) -> String {
    match Command::parse(kind, payload) {
        Ok(cmd) => cmd.describe(),
        Err(e) => format!("error parsing input: {e}"),
    }
}

// ---------------------------------------------------------------------------
// Per-kind validation
// ---------------------------------------------------------------------------

fn decode<T: DeserializeOwned>(payload: &Value) -> Result<T, ToolError> {
    serde_json::from_value(payload.clone()).map_err(|e| ToolError::MalformedInput(e.to_string()))
}

/// Required-field check; an empty string counts as absent.
fn required(field: &'static str, value: Option<String>) -> Result<String, ToolError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ToolError::MissingField(field)),
    }
}

/// Treat an empty optional string as unset.
fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_open(payload: &Value) -> Result<OpenCommand, ToolError> {
    let raw: RawOpen = decode(payload)?;

    let widget_type = required("widget_type", raw.widget_type)?;
    let widget_type = WidgetType::require("widget_type", &widget_type)?;

    let url = optional(raw.url);
    if widget_type == WidgetType::Web && url.is_none() {
        return Err(ToolError::MissingFieldForType {
            field: "url",
            widget_type: WidgetType::Web.as_str(),
        });
    }

    // Position is validated whenever present, even for a plain insert.
    let position = match optional(raw.position) {
        Some(p) => Some(Position::require("position", &p)?),
        None => None,
    };

    let split = match optional(raw.split_direction) {
        Some(dir) => {
            let direction = Direction::require("split_direction", &dir)?;
            // A split needs a reference point in the existing layout.
            let target_widget = required("target_widget", raw.target_widget)?;
            Some(SplitRequest {
                direction,
                target_widget,
                position,
            })
        }
        None => None,
    };

    Ok(OpenCommand {
        widget_type,
        url,
        file: optional(raw.file),
        connection: optional(raw.connection),
        split,
    })
}

fn parse_close(payload: &Value) -> Result<CloseCommand, ToolError> {
    let raw: RawClose = decode(payload)?;
    Ok(CloseCommand {
        widget_id: required("widget_id", raw.widget_id)?,
    })
}

fn parse_rename(payload: &Value) -> Result<RenameCommand, ToolError> {
    let raw: RawRename = decode(payload)?;
    Ok(RenameCommand {
        widget_id: required("widget_id", raw.widget_id)?,
        name: required("name", raw.name)?,
    })
}

fn parse_move(payload: &Value) -> Result<MoveCommand, ToolError> {
    let raw: RawMove = decode(payload)?;
    let widget_id = required("widget_id", raw.widget_id)?;
    let target_widget_id = required("target_widget_id", raw.target_widget_id)?;
    // No default here: the caller must say which axis it means.
    let direction = required("direction", raw.direction)?;
    let direction = Direction::require("direction", &direction)?;
    let position = match optional(raw.position) {
        Some(p) => Some(Position::require("position", &p)?),
        None => None,
    };
    Ok(MoveCommand {
        widget_id,
        target_widget_id,
        direction,
        position,
    })
}
