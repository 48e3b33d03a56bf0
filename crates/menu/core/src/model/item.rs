//! One placeable, clickable entry within a menu.

use std::collections::HashMap;

use crate::action::Action;
use crate::click::ClickType;
use crate::condition::Condition;

/// One item entry of a menu, possibly occupying several slots.
///
/// Built by the schema parser; immutable afterwards. The same item instance
/// backs every slot it occupies.
#[derive(Clone, Debug)]
pub struct MenuItem {
    /// Item id from the source document (the `items` object key).
    pub id: String,

    /// Slot indices this item occupies. Never empty: an item that declares
    /// no slot is assigned slot 0 during parsing.
    pub slots: Vec<usize>,

    /// Namespaced, lower-cased material identifier.
    pub material: String,

    /// Stack amount shown in the slot.
    pub amount: u32,

    /// Display name, legacy color codes allowed.
    pub display_name: Option<String>,

    /// Lore lines in display order.
    pub lore: Vec<String>,

    /// Custom model data for resource-pack models.
    pub custom_model_data: Option<i32>,

    /// Render with the enchanted glow effect.
    pub enchanted: bool,

    /// Skull texture owner for player-head materials.
    pub skull_owner: Option<String>,

    /// Item must be re-rendered when placeholders change.
    pub dynamic: bool,

    /// Gate on whether the viewer sees this item at all.
    pub view_requirement: Condition,

    /// Tie-break hint for slot conflicts under the priority policy.
    pub priority: i32,

    /// Ordered action lists, one per click type that the document declared.
    /// A click type absent from the document has no entry here.
    pub click_actions: HashMap<ClickType, Vec<Action>>,
}

impl MenuItem {
    /// Actions registered for one click type, empty when none declared.
    pub fn actions_for(&self, click: ClickType) -> &[Action] {
        self.click_actions.get(&click).map_or(&[], Vec::as_slice)
    }
}
