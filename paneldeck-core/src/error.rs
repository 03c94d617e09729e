//! Typed error taxonomy for widget tool commands.
//!
//! Every failure a tool invocation can produce maps onto one of these
//! variants so callers at the crate boundary can match on the class
//! instead of string-parsing opaque messages. Validation and resolution
//! variants are produced before any side effect; [`ToolError::Store`]
//! wraps failures of the collaborating systems.

use thiserror::Error;

/// Top-level error type for the widget tool pipeline.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No payload was supplied with the tool call.
    #[error("input is required")]
    MissingInput,

    /// The payload did not structurally decode into the command's field
    /// set. The schema is closed: unknown extra fields are rejected here.
    #[error("failed to decode input: {0}")]
    MalformedInput(String),

    /// A required field was absent or empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A field required by a specific widget type was absent or empty.
    #[error("{field} is required for {widget_type} widget")]
    MissingFieldForType {
        /// Field that was absent.
        field: &'static str,
        /// Widget type that demands it.
        widget_type: &'static str,
    },

    /// An enumerated field held a value outside its fixed allowed set.
    #[error("invalid {field}: {got}. Valid values are: {}", .allowed.join(", "))]
    InvalidEnumValue {
        /// Field that failed validation.
        field: &'static str,
        /// Value the caller supplied.
        got: String,
        /// The fixed set of accepted values.
        allowed: &'static [&'static str],
    },

    /// An identifier prefix matched zero or more than one live widget.
    ///
    /// Not-found and ambiguous are deliberately collapsed into one class;
    /// callers cannot tell which case occurred.
    #[error("no unique widget matches id {0:?}")]
    UnresolvedIdentifier(String),

    /// A collaborating store/queue/controller operation failed.
    #[error("failed to {op}: {source}")]
    Store {
        /// The operation that was being attempted.
        op: &'static str,
        /// The collaborator's underlying error.
        #[source]
        source: anyhow::Error,
    },

    /// The command exceeded its execution deadline.
    #[error("command deadline exceeded")]
    Timeout,
}

impl ToolError {
    /// Wrap a collaborator failure, naming the operation that failed.
    pub fn store(op: &'static str, source: anyhow::Error) -> Self {
        ToolError::Store { op, source }
    }
}
