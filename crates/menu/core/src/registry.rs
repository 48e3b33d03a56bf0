//! In-memory store of loaded menu definitions.

use std::collections::HashMap;
use std::sync::Arc;

use crate::model::MenuDefinition;

/// Registry of all loaded menus, keyed by menu id.
///
/// This is the only mutable container in the menu core; every model object
/// it holds is immutable and freely shareable once registered.
///
/// # Reload semantics
///
/// Reload is **not transactional**: the config manager clears the registry
/// and then repopulates it file by file. A reload that fails partway leaves
/// the registry partially populated (old menus gone, only the menus parsed
/// so far present). Callers must not read the registry while a reload is in
/// progress and must not assume the previous contents survive a failed
/// reload.
#[derive(Debug, Default)]
pub struct MenuRegistry {
    menus: HashMap<String, Arc<MenuDefinition>>,
}

impl MenuRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every registered menu. First half of a (non-atomic) reload.
    pub fn clear(&mut self) {
        self.menus.clear();
    }

    /// Registers a menu under its id, replacing any previous definition.
    pub fn register(&mut self, menu: MenuDefinition) -> Arc<MenuDefinition> {
        let menu = Arc::new(menu);
        self.menus.insert(menu.id.clone(), Arc::clone(&menu));
        menu
    }

    /// Looks up a menu by id.
    pub fn get(&self, id: &str) -> Option<&Arc<MenuDefinition>> {
        self.menus.get(id)
    }

    /// Resolves a typed command alias to the menu it opens.
    pub fn find_by_open_command(&self, alias: &str) -> Option<&Arc<MenuDefinition>> {
        self.menus.values().find(|m| m.open_command_matches(alias))
    }

    /// Iterator over registered menu ids.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.menus.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }
}
