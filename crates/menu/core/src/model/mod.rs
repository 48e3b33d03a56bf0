//! Normalized menu model types.
//!
//! These are the validated, strongly-typed products of the schema parser.
//! They are immutable value objects: every (re)load builds fresh instances
//! and swaps them into the registry wholesale.

mod item;
mod menu;

pub use item::MenuItem;
pub use menu::{MenuDefinition, clamp_rows};

/// Default namespace applied to bare material names.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Normalizes a material identifier to namespaced form.
///
/// A name that already carries a namespace separator is kept verbatim; a
/// bare name is lower-cased and placed in the default namespace, so
/// `"DIAMOND"` and `"minecraft:diamond"` denote the same material.
pub fn normalize_material(raw: &str) -> String {
    if raw.contains(':') {
        raw.to_string()
    } else {
        format!("{DEFAULT_NAMESPACE}:{}", raw.to_ascii_lowercase())
    }
}
