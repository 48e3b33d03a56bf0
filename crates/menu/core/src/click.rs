//! Click type enumeration - the interaction kinds that key an item's actions.

/// Kinds of inventory clicks an item can react to.
///
/// `Any` matches every click and is looked up in addition to the specific
/// kind when the host dispatches an interaction.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ClickType {
    /// Matches any click kind.
    Any,
    /// Plain left click.
    Left,
    /// Plain right click.
    Right,
    /// Shift + left click.
    ShiftLeft,
    /// Shift + right click.
    ShiftRight,
    /// Middle (wheel) click.
    Middle,
}

/// Lookup table from menu-document key to click type.
///
/// The schema parser performs exactly one lookup per entry; a key that is
/// absent from the document yields no map entry for that click type.
pub const CLICK_COMMAND_KEYS: [(&str, ClickType); 6] = [
    ("click_commands", ClickType::Any),
    ("left_click_commands", ClickType::Left),
    ("right_click_commands", ClickType::Right),
    ("shift_left_click_commands", ClickType::ShiftLeft),
    ("shift_right_click_commands", ClickType::ShiftRight),
    ("middle_click_commands", ClickType::Middle),
];
