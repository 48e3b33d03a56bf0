//! Bundled default resources seeded on first run.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// Default root configuration, referencing the example menu.
pub const DEFAULT_CONFIG: &str = include_str!("../assets/config.json");

/// Example menu exercising most of the document schema.
pub const DEFAULT_EXAMPLE_MENU: &str = include_str!("../assets/menus/example.json");

/// Filename the example menu is seeded under, inside `menus/`.
pub const EXAMPLE_MENU_FILE: &str = "example.json";

/// Writes `contents` to `path` only when the target does not already
/// exist. Returns whether the file was written. Never overwrites.
pub fn seed(path: &Path, contents: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    fs::write(path, contents)?;
    debug!(target: "menu::content", path = %path.display(), "seeded default resource");
    Ok(true)
}
