//! Declarative window layouts
//!
//! A layout is a JSON document naming the controls a window is built from.
//! Layouts are referenced by an opaque URI-like string and resolved through a
//! [`LayoutRegistry`]; the registry can be seeded with the layouts this crate
//! ships ([`LayoutRegistry::builtin`]), fed documents directly, or pointed at
//! a directory of `*.json` files.
//!
//! Example document:
//!
//! ```json
//! {
//!   "title": "Message",
//!   "width": 44,
//!   "height": 10,
//!   "controls": [
//!     { "type": "text_area", "name": "txt_message",
//!       "rect": { "x": 1, "y": 1, "width": 40, "height": 4 } },
//!     { "type": "button", "name": "btn_okay", "label": "Okay",
//!       "rect": { "x": 16, "y": 6, "width": 10, "height": 1 } }
//!   ]
//! }
//! ```

use crate::controls::{Button, Control, TextArea};
use ratatui::layout::Rect;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Layout reference for the message box window shipped with this crate
pub const MESSAGE_BOX_LAYOUT: &str = "local:///ui/windows/message_box.json";

const MESSAGE_BOX_LAYOUT_JSON: &str = r#"{
    "title": "Message",
    "width": 44,
    "height": 10,
    "controls": [
        { "type": "text_area", "name": "txt_message",
          "rect": { "x": 1, "y": 1, "width": 40, "height": 4 } },
        { "type": "button", "name": "btn_okay", "label": "Okay",
          "rect": { "x": 16, "y": 6, "width": 10, "height": 1 } }
    ]
}"#;

/// Errors raised while resolving or parsing layout documents
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("unknown layout '{0}'")]
    Unknown(String),

    #[error("failed to parse layout '{uri}'")]
    Parse {
        uri: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("layout '{uri}' declares duplicate control name '{name}'")]
    DuplicateControl { uri: String, name: String },

    #[error("failed to read layout file '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Rectangle in layout coordinates, relative to the window content area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LayoutRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl From<LayoutRect> for Rect {
    fn from(rect: LayoutRect) -> Self {
        Rect::new(rect.x, rect.y, rect.width, rect.height)
    }
}

/// One control declaration inside a layout document
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlDecl {
    Button {
        name: String,
        label: String,
        rect: LayoutRect,
    },
    TextArea {
        name: String,
        #[serde(default)]
        text: String,
        rect: LayoutRect,
    },
}

impl ControlDecl {
    pub fn name(&self) -> &str {
        match self {
            Self::Button { name, .. } => name,
            Self::TextArea { name, .. } => name,
        }
    }

    /// Build the control this declaration describes
    pub fn instantiate(&self) -> Control {
        match self {
            Self::Button { name, label, rect } => {
                Control::Button(Button::new(name.clone(), label.clone(), Rect::from(*rect)))
            }
            Self::TextArea { name, text, rect } => {
                let mut text_area = TextArea::new(name.clone(), Rect::from(*rect));
                text_area.set_text(text.clone());
                Control::TextArea(text_area)
            }
        }
    }
}

/// Parsed declarative description of a window
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutDoc {
    #[serde(default)]
    pub title: Option<String>,
    pub width: u16,
    pub height: u16,
    #[serde(default)]
    pub controls: Vec<ControlDecl>,
}

/// Maps layout references to parsed documents
#[derive(Debug, Clone, Default)]
pub struct LayoutRegistry {
    layouts: HashMap<String, LayoutDoc>,
}

impl LayoutRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-seeded with the layouts this crate ships
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry
            .register_json(MESSAGE_BOX_LAYOUT, MESSAGE_BOX_LAYOUT_JSON)
            .expect("builtin layout must parse");
        registry
    }

    /// Register a parsed document under a layout reference
    ///
    /// An existing document under the same reference is replaced.
    pub fn register(&mut self, layout_ref: impl Into<String>, doc: LayoutDoc) {
        let layout_ref = layout_ref.into();
        debug!(layout = %layout_ref, "registering layout");
        self.layouts.insert(layout_ref, doc);
    }

    /// Parse a JSON document and register it
    pub fn register_json(
        &mut self,
        layout_ref: impl Into<String>,
        json: &str,
    ) -> Result<(), LayoutError> {
        let layout_ref = layout_ref.into();
        let doc = serde_json::from_str(json).map_err(|source| LayoutError::Parse {
            uri: layout_ref.clone(),
            source,
        })?;
        self.register(layout_ref, doc);
        Ok(())
    }

    /// Load every `*.json` file under `dir` into the registry
    ///
    /// Files register under `local:///<path relative to dir>`. Returns the
    /// number of layouts loaded.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize, LayoutError> {
        let dir = dir.as_ref();
        let mut loaded = 0;

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|err| {
                let path = err.path().unwrap_or(dir).to_path_buf();
                match err.into_io_error() {
                    Some(source) => LayoutError::Io { path, source },
                    None => LayoutError::Io {
                        path,
                        source: std::io::Error::other("filesystem loop"),
                    },
                }
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let relative = path.strip_prefix(dir).unwrap_or(path);
            let layout_ref = format!(
                "local:///{}",
                relative.to_string_lossy().replace(std::path::MAIN_SEPARATOR, "/")
            );
            let json = std::fs::read_to_string(path).map_err(|source| LayoutError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            self.register_json(layout_ref, &json)?;
            loaded += 1;
        }

        debug!(dir = %dir.display(), loaded, "loaded layout directory");
        Ok(loaded)
    }

    /// Resolve a layout reference to its document
    pub fn resolve(&self, layout_ref: &str) -> Result<&LayoutDoc, LayoutError> {
        self.layouts
            .get(layout_ref)
            .ok_or_else(|| LayoutError::Unknown(layout_ref.to_string()))
    }

    pub fn contains(&self, layout_ref: &str) -> bool {
        self.layouts.contains_key(layout_ref)
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}
