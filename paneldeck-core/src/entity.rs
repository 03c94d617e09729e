//! Widget entities, identifiers, and metadata.
//!
//! A widget is an entity with a canonical identifier, a type tag, and a
//! flat string-keyed metadata map. The canonical id is opaque and
//! globally unique; agents refer to widgets by the short prefix form.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::command::{OpenCommand, WidgetType};

/// Length of the short display form of a canonical widget id.
pub const SHORT_ID_LEN: usize = 8;

/// Identifier of a workspace tab. Tabs are created and destroyed by
/// external workspace management; the pipeline only works within one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabId(String);

impl TabId {
    pub fn new(id: impl Into<String>) -> Self {
        TabId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical identifier of a widget entity. Opaque and globally unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetId(String);

impl WidgetId {
    pub fn new(id: impl Into<String>) -> Self {
        WidgetId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short display form: the first [`SHORT_ID_LEN`] characters, or the
    /// whole id if it is shorter.
    pub fn short(&self) -> &str {
        self.0.get(..SHORT_ID_LEN).unwrap_or(&self.0)
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Flat, string-keyed widget metadata.
pub type WidgetMeta = BTreeMap<String, String>;

// Metadata keys.
pub const META_VIEW: &str = "view";
pub const META_URL: &str = "url";
pub const META_FILE: &str = "file";
pub const META_CONNECTION: &str = "connection";
pub const META_CONTROLLER: &str = "controller";
pub const META_DISPLAY_NAME: &str = "display:name";

/// Controller kind recorded for terminal widgets.
pub const CONTROLLER_SHELL: &str = "shell";

/// Connection value meaning "this machine"; never stored in metadata.
pub const LOCAL_CONNECTION: &str = "local";

/// A widget entity placed in a tab's layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    pub id: WidgetId,
    pub tab: TabId,
    pub meta: WidgetMeta,
}

impl Widget {
    /// The widget's type tag, as recorded in metadata.
    pub fn widget_type(&self) -> Option<&str> {
        self.meta.get(META_VIEW).map(String::as_str)
    }

    /// The custom display name, if one has been set.
    pub fn display_name(&self) -> Option<&str> {
        self.meta.get(META_DISPLAY_NAME).map(String::as_str)
    }
}

/// Build the type-specific metadata map for an open command.
pub fn build_open_meta(cmd: &OpenCommand) -> WidgetMeta {
    let mut meta = WidgetMeta::new();
    meta.insert(META_VIEW.to_string(), cmd.widget_type.as_str().to_string());
    match cmd.widget_type {
        WidgetType::Web => {
            if let Some(url) = &cmd.url {
                meta.insert(META_URL.to_string(), url.clone());
            }
        }
        WidgetType::Preview => {
            if let Some(file) = &cmd.file {
                meta.insert(META_FILE.to_string(), file.clone());
            }
        }
        WidgetType::Term => {
            meta.insert(META_CONTROLLER.to_string(), CONTROLLER_SHELL.to_string());
            // "local" is the default connection; only remote ones are recorded.
            if let Some(conn) = &cmd.connection {
                if conn != LOCAL_CONNECTION {
                    meta.insert(META_CONNECTION.to_string(), conn.clone());
                }
            }
        }
        WidgetType::CpuPlot => {
            if let Some(conn) = &cmd.connection {
                meta.insert(META_CONNECTION.to_string(), conn.clone());
            }
        }
    }
    meta
}
