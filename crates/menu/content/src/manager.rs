//! Config manager: disk layout, bootstrap, and registry (re)population.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use menu_core::{ActionDecoder, MenuRegistry};

use crate::config::RootConfig;
use crate::defaults::{DEFAULT_CONFIG, DEFAULT_EXAMPLE_MENU, EXAMPLE_MENU_FILE, seed};
use crate::error::Result;
use crate::schema::{SlotConflict, parse_menu_str};

/// Root configuration filename inside the plugin directory.
const CONFIG_FILE: &str = "config.json";

/// Subdirectory holding one document per menu.
const MENUS_DIR: &str = "menus";

/// Orchestrates file discovery, bootstrap, and registry population.
///
/// Loading is synchronous and single-threaded; callers invoke it from the
/// host's control thread. Nothing here is fatal: malformed documents are
/// logged and skipped, and the next explicit reload is the only recovery
/// path.
pub struct ConfigManager {
    root_dir: PathBuf,
    decoder: Arc<dyn ActionDecoder>,
    slot_conflict: SlotConflict,
    debug: bool,
    /// Menu id → filename, in root-config declaration order.
    menu_files: Vec<(String, String)>,
    registry: MenuRegistry,
}

impl ConfigManager {
    pub fn new(root_dir: impl Into<PathBuf>, decoder: Arc<dyn ActionDecoder>) -> Self {
        Self {
            root_dir: root_dir.into(),
            decoder,
            slot_conflict: SlotConflict::default(),
            debug: false,
            menu_files: Vec::new(),
            registry: MenuRegistry::new(),
        }
    }

    /// Selects the slot-conflict resolution policy for parsed menus.
    pub fn with_slot_conflict(mut self, policy: SlotConflict) -> Self {
        self.slot_conflict = policy;
        self
    }

    /// Ensures the on-disk layout exists, seeds bundled defaults for any
    /// missing files, then loads the root config and every referenced menu.
    ///
    /// Seeding never overwrites: an existing `config.json` or menu file is
    /// left exactly as found. Only directory-creation and seeding I/O
    /// failures return an error; malformed documents are logged and
    /// skipped.
    pub fn load_all(&mut self) -> Result<()> {
        fs::create_dir_all(&self.root_dir)?;
        fs::create_dir_all(self.menu_dir())?;

        seed(&self.root_dir.join(CONFIG_FILE), DEFAULT_CONFIG)?;
        seed(&self.menu_dir().join(EXAMPLE_MENU_FILE), DEFAULT_EXAMPLE_MENU)?;

        self.load_root_config();
        self.load_menus();
        Ok(())
    }

    /// Clears the registry and the menu-file index, then re-reads the root
    /// config and reloads every menu.
    ///
    /// **Not transactional**: the clear happens before any parsing, so a
    /// reload that fails partway leaves the registry partially populated.
    /// See [`MenuRegistry`] for the full contract.
    pub fn reload_all(&mut self) -> Result<()> {
        self.registry.clear();
        self.menu_files.clear();

        self.load_root_config();
        self.load_menus();
        Ok(())
    }

    /// Reads and decodes `config.json`. A malformed or unreadable root
    /// config is logged and leaves the current debug flag and menu-file
    /// index untouched for this call.
    fn load_root_config(&mut self) {
        let path = self.root_dir.join(CONFIG_FILE);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    target: "menu::content",
                    path = %path.display(),
                    error = %err,
                    "cannot read root config, keeping previous settings"
                );
                return;
            }
        };
        let config: RootConfig = match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(err) => {
                warn!(
                    target: "menu::content",
                    path = %path.display(),
                    error = %err,
                    "malformed root config, keeping previous settings"
                );
                return;
            }
        };

        self.debug = config.debug;
        self.menu_files = config.menu_files();
    }

    /// Loads every menu referenced by the file index. Each file is isolated:
    /// a missing or malformed document is logged and skipped without
    /// interrupting its siblings.
    fn load_menus(&mut self) {
        let menu_dir = self.menu_dir();
        let entries = self.menu_files.clone();

        for (menu_id, file_name) in entries {
            let path = menu_dir.join(&file_name);
            let raw = match fs::read_to_string(&path) {
                Ok(raw) => raw,
                Err(err) => {
                    warn!(
                        target: "menu::content",
                        menu = %menu_id,
                        path = %path.display(),
                        error = %err,
                        "cannot read menu file, skipping"
                    );
                    continue;
                }
            };
            match parse_menu_str(
                &menu_id,
                &raw,
                &file_name,
                self.decoder.as_ref(),
                self.slot_conflict,
            ) {
                Ok(menu) => {
                    debug!(
                        target: "menu::content",
                        menu = %menu_id,
                        file = %file_name,
                        rows = menu.rows,
                        items = menu.slots.len(),
                        "loaded menu"
                    );
                    self.registry.register(menu);
                }
                Err(err) => {
                    warn!(
                        target: "menu::content",
                        menu = %menu_id,
                        file = %file_name,
                        error = %err,
                        "invalid menu document, skipping"
                    );
                }
            }
        }
    }

    pub fn registry(&self) -> &MenuRegistry {
        &self.registry
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Directory holding the per-menu documents.
    pub fn menu_dir(&self) -> PathBuf {
        self.root_dir.join(MENUS_DIR)
    }
}
