//! Menu model and evaluation contracts shared across the menu system.
//!
//! `menu-core` defines the canonical types (menus, items, click kinds,
//! conditions) and the contracts toward the host game (context, action
//! decoding). It performs no I/O and no JSON parsing; the `menu-content`
//! crate builds these types from documents on disk.

pub mod action;
pub mod click;
pub mod condition;
pub mod context;
pub mod model;
pub mod registry;

pub use action::{
    Action, ActionDecoder, DEFAULT_TARGET_TAG, MenuAction, decode_action, run_actions,
};
pub use click::{CLICK_COMMAND_KEYS, ClickType};
pub use condition::{CompareOp, Condition};
pub use context::MenuContext;
pub use model::{MenuDefinition, MenuItem, clamp_rows, normalize_material};
pub use registry::MenuRegistry;
