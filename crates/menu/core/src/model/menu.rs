//! The full parsed description of one inventory menu.

use std::collections::HashMap;
use std::sync::Arc;

use crate::action::Action;
use crate::condition::Condition;
use crate::model::MenuItem;

/// Playable rows per menu page, bounded by the host inventory.
pub const MIN_ROWS: usize = 1;
pub const MAX_ROWS: usize = 6;

/// Slots per inventory row.
pub const SLOTS_PER_ROW: usize = 9;

/// Derives the row count from a declared slot count: `clamp(size / 9, 1, 6)`.
pub fn clamp_rows(size: usize) -> usize {
    (size / SLOTS_PER_ROW).clamp(MIN_ROWS, MAX_ROWS)
}

/// One fully-parsed menu, ready to render and dispatch.
///
/// Immutable after construction; the registry shares instances via `Arc`.
#[derive(Clone, Debug)]
pub struct MenuDefinition {
    /// Unique menu id (the `gui_menus` key in the root config).
    pub id: String,

    /// Display title, legacy color codes allowed.
    pub title: String,

    /// Row count in `[1, 6]`, derived from the declared size.
    pub rows: usize,

    /// Command aliases that open this menu.
    pub open_commands: Vec<String>,

    /// Gate on whether the viewer may open the menu.
    pub open_requirement: Condition,

    /// Actions run when the menu opens.
    pub open_actions: Vec<Action>,

    /// Actions run when the menu closes.
    pub close_actions: Vec<Action>,

    /// Auto-refresh interval in ticks; 0 means never.
    pub update_interval: u32,

    /// Slot index → item occupying it.
    pub slots: HashMap<usize, Arc<MenuItem>>,

    /// File the menu was parsed from. Diagnostic only.
    pub source_file: String,
}

impl MenuDefinition {
    /// Rendered inventory capacity in slots.
    pub fn size(&self) -> usize {
        self.rows * SLOTS_PER_ROW
    }

    /// Item occupying `slot`, if any.
    pub fn item_at(&self, slot: usize) -> Option<&Arc<MenuItem>> {
        self.slots.get(&slot)
    }

    /// True when `alias` is one of this menu's open commands
    /// (case-insensitive, the way chat commands are matched).
    pub fn open_command_matches(&self, alias: &str) -> bool {
        self.open_commands
            .iter()
            .any(|cmd| cmd.eq_ignore_ascii_case(alias))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_derive_from_size_with_clamping() {
        assert_eq!(clamp_rows(9), 1);
        assert_eq!(clamp_rows(27), 3);
        assert_eq!(clamp_rows(53), 5);
        assert_eq!(clamp_rows(54), 6);
        // Out-of-band sizes clamp instead of failing.
        assert_eq!(clamp_rows(0), 1);
        assert_eq!(clamp_rows(4), 1);
        assert_eq!(clamp_rows(90), 6);
    }
}
