//! Root configuration document (`config.json`).

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

/// A menu file reference: either a bare filename string or an object
/// carrying a `file` field. Both forms denote the same entry.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum FileRef {
    Name(String),
    Object { file: String },
}

impl FileRef {
    pub fn file_name(&self) -> &str {
        match self {
            FileRef::Name(name) => name,
            FileRef::Object { file } => file,
        }
    }
}

/// Decoded root configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RootConfig {
    /// Verbose-diagnostics flag for the host plugin.
    #[serde(default)]
    pub debug: bool,

    /// Menu id → menu file reference, relative to the `menus/` directory.
    /// Kept as a raw JSON map so declaration order survives decoding.
    #[serde(default)]
    pub gui_menus: Map<String, Value>,
}

impl RootConfig {
    /// Normalized `menu id → filename` index, in declaration order.
    ///
    /// Entries that are neither a filename string nor a `file` object are
    /// logged and skipped.
    pub fn menu_files(&self) -> Vec<(String, String)> {
        self.gui_menus
            .iter()
            .filter_map(|(id, value)| {
                match serde_json::from_value::<FileRef>(value.clone()) {
                    Ok(fref) => Some((id.clone(), fref.file_name().to_string())),
                    Err(_) => {
                        warn!(
                            target: "menu::content",
                            menu = %id,
                            "gui_menus entry is neither a filename nor a file object, skipping"
                        );
                        None
                    }
                }
            })
            .collect()
    }
}
