//! Schema parser: raw menu documents → normalized menu model.
//!
//! Menu documents are loosely typed: list-valued fields accept bare scalars,
//! several fields have two accepted keys, and item ids are arbitrary. The
//! parser therefore walks `serde_json::Value` directly and applies one
//! normalization rule per field, with the defaults below forming part of
//! the contract rather than being incidental.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use menu_core::{
    Action, ActionDecoder, CLICK_COMMAND_KEYS, CompareOp, Condition, MenuDefinition, MenuItem,
    clamp_rows, decode_action, normalize_material,
};

use crate::error::{ContentError, Result};

/// Default menu title when the document declares none.
pub const DEFAULT_TITLE: &str = "&8Menu";

/// Default declared slot count (three rows).
pub const DEFAULT_SIZE: usize = 27;

/// Default material for items that declare none.
pub const DEFAULT_MATERIAL: &str = "STONE";

/// Host scheduler ticks per second; `update_interval` is declared in
/// seconds and stored in ticks.
pub const TICKS_PER_SECOND: u32 = 20;

/// How to resolve two items claiming the same slot.
///
/// The original system resolves conflicts purely by declaration order in
/// the source document; the priority field exists on items but never
/// participates. Both behaviors are available here, explicitly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SlotConflict {
    /// Later declaration overwrites the slot (original behavior).
    #[default]
    DeclarationOrder,
    /// Higher `priority` wins; ties keep the earlier declaration.
    Priority,
}

/// Parses a raw menu document from its JSON text.
///
/// Callers treat an `Err` as "skip this menu": the error is logged and the
/// remaining menu files keep loading.
pub fn parse_menu_str(
    menu_id: &str,
    raw: &str,
    source_file: &str,
    decoder: &dyn ActionDecoder,
    slot_conflict: SlotConflict,
) -> Result<MenuDefinition> {
    let doc: Value = serde_json::from_str(raw).map_err(|source| ContentError::Json {
        file: source_file.to_string(),
        source,
    })?;
    parse_menu(menu_id, &doc, source_file, decoder, slot_conflict)
}

/// Parses an already-decoded menu document into a [`MenuDefinition`].
pub fn parse_menu(
    menu_id: &str,
    doc: &Value,
    source_file: &str,
    decoder: &dyn ActionDecoder,
    slot_conflict: SlotConflict,
) -> Result<MenuDefinition> {
    let doc = doc.as_object().ok_or_else(|| ContentError::NotAnObject {
        file: source_file.to_string(),
    })?;

    let title = doc
        .get("menu_title")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_TITLE)
        .to_string();

    let size = doc
        .get("size")
        .and_then(Value::as_u64)
        .and_then(|s| usize::try_from(s).ok())
        .unwrap_or(DEFAULT_SIZE);
    let rows = clamp_rows(size);

    // Declared in seconds, stored in ticks; absurd values saturate
    // instead of overflowing so an extreme document stays loadable.
    let update_interval = doc
        .get("update_interval")
        .and_then(Value::as_u64)
        .map_or(0, |seconds| {
            u32::try_from(seconds.saturating_mul(u64::from(TICKS_PER_SECOND)))
                .unwrap_or(u32::MAX)
        });

    // `open_command` and `open_commands` both contribute aliases; each
    // accepts a scalar or a list.
    let mut open_commands = Vec::new();
    if let Some(value) = doc.get("open_command") {
        open_commands.extend(string_list(value));
    }
    if let Some(value) = doc.get("open_commands") {
        open_commands.extend(string_list(value));
    }

    let open_requirement =
        parse_requirement(doc.get("open_requirement"), menu_id, source_file)?;

    // The `open_commands` key serves double duty: alias source above and
    // open-action source here. `close_commands` is action-only.
    let open_actions = doc
        .get("open_commands")
        .map_or_else(Vec::new, |v| parse_actions(v, decoder));
    let close_actions = doc
        .get("close_commands")
        .map_or_else(Vec::new, |v| parse_actions(v, decoder));

    let mut slots: HashMap<usize, Arc<MenuItem>> = HashMap::new();
    if let Some(items) = doc.get("items") {
        let items = items.as_object().ok_or_else(|| ContentError::NotAnObject {
            file: source_file.to_string(),
        })?;

        // Declaration order in the source document drives conflict
        // resolution, hence serde_json's preserve_order feature.
        for (item_id, value) in items {
            let item = Arc::new(parse_item(item_id, value, source_file, decoder)?);
            for &slot in &item.slots {
                if slot >= size {
                    // Out-of-range slots are dropped, not an error.
                    continue;
                }
                match slot_conflict {
                    SlotConflict::DeclarationOrder => {
                        slots.insert(slot, Arc::clone(&item));
                    }
                    SlotConflict::Priority => {
                        let replace = slots
                            .get(&slot)
                            .is_none_or(|held| item.priority > held.priority);
                        if replace {
                            slots.insert(slot, Arc::clone(&item));
                        }
                    }
                }
            }
        }
    }

    Ok(MenuDefinition {
        id: menu_id.to_string(),
        title,
        rows,
        open_commands,
        open_requirement,
        open_actions,
        close_actions,
        update_interval,
        slots,
        source_file: source_file.to_string(),
    })
}

/// Parses one entry of the `items` object.
fn parse_item(
    item_id: &str,
    value: &Value,
    source_file: &str,
    decoder: &dyn ActionDecoder,
) -> Result<MenuItem> {
    let obj = value.as_object().ok_or_else(|| ContentError::InvalidItem {
        item: item_id.to_string(),
        file: source_file.to_string(),
    })?;

    let material = normalize_material(
        obj.get("material")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_MATERIAL),
    );

    // `slot` (scalar) and `slots` (list) are unioned; an item that declares
    // neither occupies slot 0.
    let mut slot_indices = Vec::new();
    if let Some(slot) = obj.get("slot").and_then(Value::as_u64)
        && let Ok(slot) = usize::try_from(slot)
    {
        slot_indices.push(slot);
    }
    if let Some(list) = obj.get("slots").and_then(Value::as_array) {
        slot_indices.extend(
            list.iter()
                .filter_map(Value::as_u64)
                .filter_map(|s| usize::try_from(s).ok()),
        );
    }
    if slot_indices.is_empty() {
        slot_indices.push(0);
    }

    // Numeric fields keep their defaults when the declared value does not
    // fit the target type.
    let amount = obj
        .get("amount")
        .and_then(Value::as_u64)
        .and_then(|a| u32::try_from(a).ok())
        .unwrap_or(1);
    let priority = obj
        .get("priority")
        .and_then(Value::as_i64)
        .and_then(|p| i32::try_from(p).ok())
        .unwrap_or(0);

    let display_name = obj
        .get("display_name")
        .and_then(Value::as_str)
        .map(str::to_string);
    let lore = obj.get("lore").map_or_else(Vec::new, string_list);

    // `data` and `custom_model_data` assign the same field in that order,
    // so the latter overwrites the former when both are present.
    let mut custom_model_data = obj
        .get("data")
        .and_then(Value::as_i64)
        .and_then(|d| i32::try_from(d).ok());
    if let Some(data) = obj
        .get("custom_model_data")
        .and_then(Value::as_i64)
        .and_then(|d| i32::try_from(d).ok())
    {
        custom_model_data = Some(data);
    }

    let enchanted = obj
        .get("enchanted")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let skull_owner = obj
        .get("skull_owner")
        .and_then(Value::as_str)
        .map(str::to_string);
    let dynamic = obj.get("update").and_then(Value::as_bool).unwrap_or(false);

    let view_requirement =
        parse_requirement(obj.get("view_requirement"), item_id, source_file)?;

    let mut click_actions = HashMap::new();
    for (key, click) in CLICK_COMMAND_KEYS {
        if let Some(value) = obj.get(key) {
            click_actions.insert(click, parse_actions(value, decoder));
        }
    }

    Ok(MenuItem {
        id: item_id.to_string(),
        slots: slot_indices,
        material,
        amount,
        display_name,
        lore,
        custom_model_data,
        enchanted,
        skull_owner,
        dynamic,
        view_requirement,
        priority,
        click_actions,
    })
}

/// Decodes a requirement document into a [`Condition`].
///
/// Shared by open- and view-requirements. An absent document means no
/// requirement, i.e. [`Condition::Always`].
fn parse_requirement(
    value: Option<&Value>,
    owner: &str,
    source_file: &str,
) -> Result<Condition> {
    let Some(value) = value else {
        return Ok(Condition::Always);
    };
    let obj = value
        .as_object()
        .ok_or_else(|| ContentError::InvalidRequirement {
            owner: owner.to_string(),
            file: source_file.to_string(),
        })?;

    if let Some(node) = obj
        .get("permission")
        .or_else(|| obj.get("has_permission"))
        .and_then(Value::as_str)
    {
        return Ok(Condition::Permission(node.to_string()));
    }
    if let Some(expr) = obj.get("expression").and_then(Value::as_str) {
        return Ok(Condition::Expression(expr.to_string()));
    }

    let Some(entries) = obj.get("requirements").and_then(Value::as_object) else {
        return Ok(Condition::Always);
    };

    let mut conditions = Vec::new();
    for (name, entry) in entries {
        let Some(entry) = entry.as_object() else {
            warn!(
                target: "menu::content",
                requirement = %name,
                owner,
                file = source_file,
                "requirement entry is not an object, skipping"
            );
            continue;
        };
        let kind = entry
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_ascii_lowercase();

        let field = |key: &str| {
            entry
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string()
        };

        let condition = match kind.as_str() {
            "has permission" => Some(Condition::Permission(field("permission"))),
            "!has permission" => Some(Condition::NegatedPermission(field("permission"))),
            "string equals" => Some(Condition::StringEquals {
                left: field("input"),
                right: field("output"),
            }),
            "string contains" => Some(Condition::StringContains {
                left: field("input"),
                right: field("output"),
            }),
            "javascript" | "expression" => Some(Condition::Expression(
                entry
                    .get("expression")
                    .and_then(Value::as_str)
                    .unwrap_or("true")
                    .to_string(),
            )),
            other => match CompareOp::from_str(other) {
                Ok(op) => Some(Condition::Comparison {
                    left: field("input"),
                    op,
                    right: field("output"),
                }),
                // Unknown types weaken the condition instead of failing
                // the menu; surfaced so operators can spot the typo.
                Err(_) => {
                    warn!(
                        target: "menu::content",
                        requirement = %name,
                        kind = other,
                        owner,
                        file = source_file,
                        "unknown requirement type, skipping"
                    );
                    None
                }
            },
        };
        conditions.extend(condition);
    }

    Ok(Condition::all(conditions))
}

/// Decodes an action list; strings the decoder rejects (even after the
/// implicit player-target retry) are dropped silently.
fn parse_actions(value: &Value, decoder: &dyn ActionDecoder) -> Vec<Action> {
    string_list(value)
        .iter()
        .filter_map(|raw| decode_action(decoder, raw))
        .collect()
}

/// List-or-scalar normalization: every field documented as a list accepts a
/// bare scalar and treats it as a single-element list.
fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(scalar_string).collect(),
        other => scalar_string(other).into_iter().collect(),
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_core::{ClickType, MenuContext};
    use serde_json::json;

    /// Decoder that accepts `[player]`/`[console]` prefixed strings and
    /// remembers nothing; enough to observe decode outcomes.
    struct TagDecoder;

    #[derive(Debug)]
    struct Recorded;

    impl menu_core::MenuAction for Recorded {
        fn execute(&self, _ctx: &dyn MenuContext) {}
    }

    impl ActionDecoder for TagDecoder {
        fn decode(&self, raw: &str) -> Option<Action> {
            if raw.starts_with("[player]") || raw.starts_with("[console]") {
                Some(Arc::new(Recorded))
            } else {
                None
            }
        }
    }

    fn parse(doc: Value) -> MenuDefinition {
        parse_menu("test", &doc, "test.json", &TagDecoder, SlotConflict::default()).unwrap()
    }

    #[test]
    fn defaults_apply_to_an_empty_document() {
        let menu = parse(json!({}));
        assert_eq!(menu.title, "&8Menu");
        assert_eq!(menu.rows, 3);
        assert_eq!(menu.update_interval, 0);
        assert_eq!(menu.open_requirement, Condition::Always);
        assert!(menu.open_commands.is_empty());
        assert!(menu.slots.is_empty());
    }

    #[test]
    fn rows_clamp_across_declared_sizes() {
        for (size, rows) in [(1, 1), (9, 1), (26, 2), (27, 3), (45, 5), (53, 5), (54, 6)] {
            let menu = parse(json!({ "size": size }));
            assert_eq!(menu.rows, rows, "size {size}");
        }
    }

    #[test]
    fn update_interval_converts_seconds_to_ticks() {
        let menu = parse(json!({ "update_interval": 3 }));
        assert_eq!(menu.update_interval, 60);
    }

    #[test]
    fn extreme_update_interval_saturates_instead_of_failing() {
        // 300_000_000 * 20 exceeds u32::MAX; the menu must still load.
        let menu = parse(json!({ "update_interval": 300_000_000u64 }));
        assert_eq!(menu.update_interval, u32::MAX);

        let menu = parse(json!({ "update_interval": u64::MAX }));
        assert_eq!(menu.update_interval, u32::MAX);
    }

    #[test]
    fn out_of_range_numeric_fields_keep_their_defaults() {
        let menu = parse(json!({
            "items": {
                "a": {
                    "amount": 10_000_000_000u64,
                    "priority": 10_000_000_000i64,
                    "data": 5,
                    "custom_model_data": 99_999_999_999i64,
                },
            },
        }));
        let item = menu.item_at(0).unwrap();
        assert_eq!(item.amount, 1);
        assert_eq!(item.priority, 0);
        // The oversized overwrite is ignored, the in-range `data` stays.
        assert_eq!(item.custom_model_data, Some(5));
    }

    #[test]
    fn open_command_scalar_and_list_forms_merge() {
        let menu = parse(json!({
            "open_command": "warp",
            "open_commands": ["warps", "menu"],
        }));
        assert_eq!(menu.open_commands, vec!["warp", "warps", "menu"]);

        let scalar = parse(json!({ "open_command": "warp" }));
        let list = parse(json!({ "open_command": ["warp"] }));
        assert_eq!(scalar.open_commands, list.open_commands);
    }

    #[test]
    fn open_commands_key_also_yields_open_actions() {
        let menu = parse(json!({
            "open_commands": ["[console] broadcast opened", "heal"],
            "close_commands": "[player] spawn",
        }));
        // Both strings decode: one directly, one via the implicit prefix.
        assert_eq!(menu.open_actions.len(), 2);
        assert_eq!(menu.close_actions.len(), 1);
        // The alias reading of the same key is untouched.
        assert_eq!(menu.open_commands.len(), 2);
    }

    #[test]
    fn undecodable_action_strings_are_dropped() {
        let menu = parse(json!({
            "close_commands": ["[bogus] nope", "[player] ok"],
        }));
        assert_eq!(menu.close_actions.len(), 1);
    }

    #[test]
    fn lore_scalar_equals_singleton_list() {
        let scalar = parse(json!({ "items": { "a": { "lore": "x" } } }));
        let list = parse(json!({ "items": { "a": { "lore": ["x"] } } }));
        assert_eq!(
            scalar.item_at(0).unwrap().lore,
            list.item_at(0).unwrap().lore
        );
        assert_eq!(scalar.item_at(0).unwrap().lore, vec!["x"]);
    }

    #[test]
    fn item_defaults() {
        let menu = parse(json!({ "items": { "filler": {} } }));
        let item = menu.item_at(0).expect("defaults to slot 0");
        assert_eq!(item.material, "minecraft:stone");
        assert_eq!(item.amount, 1);
        assert_eq!(item.priority, 0);
        assert!(!item.enchanted);
        assert!(!item.dynamic);
        assert_eq!(item.view_requirement, Condition::Always);
        assert!(item.click_actions.is_empty());
    }

    #[test]
    fn multi_slot_item_occupies_every_declared_slot() {
        let menu = parse(json!({
            "size": 27,
            "items": { "banner": { "slots": [1, 2] } },
        }));
        assert!(menu.item_at(1).is_some());
        assert!(menu.item_at(2).is_some());
        assert_eq!(menu.slots.len(), 2);
    }

    #[test]
    fn slot_and_slots_union() {
        let menu = parse(json!({
            "items": { "a": { "slot": 4, "slots": [5, 6] } },
        }));
        assert_eq!(menu.slots.len(), 3);
    }

    #[test]
    fn out_of_range_slots_are_dropped() {
        let menu = parse(json!({
            "size": 9,
            "items": { "a": { "slots": [8, 9, 40] } },
        }));
        assert!(menu.item_at(8).is_some());
        assert_eq!(menu.slots.len(), 1);
    }

    #[test]
    fn custom_model_data_overwrites_data() {
        let menu = parse(json!({
            "items": { "a": { "data": 1, "custom_model_data": 7 } },
        }));
        assert_eq!(menu.item_at(0).unwrap().custom_model_data, Some(7));

        let menu = parse(json!({ "items": { "a": { "data": 1 } } }));
        assert_eq!(menu.item_at(0).unwrap().custom_model_data, Some(1));
    }

    #[test]
    fn click_keys_map_to_their_click_types() {
        let menu = parse(json!({
            "items": {
                "a": {
                    "click_commands": "[player] any",
                    "shift_right_click_commands": ["[player] sr"],
                },
            },
        }));
        let item = menu.item_at(0).unwrap();
        assert_eq!(item.actions_for(ClickType::Any).len(), 1);
        assert_eq!(item.actions_for(ClickType::ShiftRight).len(), 1);
        // Absent keys yield no entry, not an empty list.
        assert!(!item.click_actions.contains_key(&ClickType::Left));
    }

    #[test]
    fn declaration_order_resolves_slot_conflicts_by_default() {
        let doc = json!({
            "items": {
                "first": { "slot": 13, "material": "dirt", "priority": 10 },
                "second": { "slot": 13, "material": "gold_ingot" },
            },
        });
        let menu = parse(doc);
        assert_eq!(menu.item_at(13).unwrap().material, "minecraft:gold_ingot");
    }

    #[test]
    fn priority_policy_prefers_higher_priority() {
        let doc = json!({
            "items": {
                "first": { "slot": 13, "material": "dirt", "priority": 10 },
                "second": { "slot": 13, "material": "gold_ingot" },
            },
        });
        let menu =
            parse_menu("test", &doc, "test.json", &TagDecoder, SlotConflict::Priority).unwrap();
        assert_eq!(menu.item_at(13).unwrap().material, "minecraft:dirt");

        // Ties keep the earlier declaration.
        let tied = json!({
            "items": {
                "first": { "slot": 0, "material": "dirt" },
                "second": { "slot": 0, "material": "stone" },
            },
        });
        let menu =
            parse_menu("test", &tied, "test.json", &TagDecoder, SlotConflict::Priority).unwrap();
        assert_eq!(menu.item_at(0).unwrap().material, "minecraft:dirt");
    }

    #[test]
    fn shorthand_permission_requirement() {
        let menu = parse(json!({
            "open_requirement": { "permission": "menu.open" },
        }));
        assert_eq!(
            menu.open_requirement,
            Condition::Permission("menu.open".to_string())
        );

        let menu = parse(json!({
            "open_requirement": { "has_permission": "menu.open" },
        }));
        assert_eq!(
            menu.open_requirement,
            Condition::Permission("menu.open".to_string())
        );
    }

    #[test]
    fn requirements_block_dispatches_on_type() {
        let menu = parse(json!({
            "open_requirement": {
                "requirements": {
                    "perm": { "type": "HAS PERMISSION", "permission": "menu.vip" },
                    "not": { "type": "!has permission", "permission": "menu.banned" },
                    "eq": { "type": "string equals", "input": "%rank%", "output": "vip" },
                    "has": { "type": "string contains", "input": "%tags%", "output": "og" },
                    "cmp": { "type": ">=", "input": "%level%", "output": "10" },
                    "js": { "type": "javascript" },
                },
            },
        }));
        let Condition::And(parts) = &menu.open_requirement else {
            panic!("expected And, got {:?}", menu.open_requirement);
        };
        assert_eq!(parts.len(), 6);
        assert!(parts.contains(&Condition::Permission("menu.vip".to_string())));
        assert!(parts.contains(&Condition::NegatedPermission("menu.banned".to_string())));
        assert!(parts.contains(&Condition::Comparison {
            left: "%level%".to_string(),
            op: CompareOp::GreaterOrEqual,
            right: "10".to_string(),
        }));
        // `javascript` without an expression field defaults to "true".
        assert!(parts.contains(&Condition::Expression("true".to_string())));
    }

    #[test]
    fn empty_or_unknown_requirements_collapse_to_always() {
        let menu = parse(json!({
            "open_requirement": { "requirements": {} },
        }));
        assert_eq!(menu.open_requirement, Condition::Always);

        // Unknown types are skipped; the recognized entry still applies,
        // unwrapped rather than wrapped in And.
        let menu = parse(json!({
            "open_requirement": {
                "requirements": {
                    "mystery": { "type": "near location" },
                    "perm": { "type": "has permission", "permission": "menu.open" },
                },
            },
        }));
        assert_eq!(
            menu.open_requirement,
            Condition::Permission("menu.open".to_string())
        );
    }

    #[test]
    fn view_requirement_decodes_like_open_requirement() {
        let menu = parse(json!({
            "items": {
                "secret": {
                    "slot": 4,
                    "view_requirement": { "permission": "menu.secret" },
                },
            },
        }));
        assert_eq!(
            menu.item_at(4).unwrap().view_requirement,
            Condition::Permission("menu.secret".to_string())
        );
    }

    #[test]
    fn non_object_document_is_rejected() {
        let err = parse_menu(
            "test",
            &json!([1, 2, 3]),
            "test.json",
            &TagDecoder,
            SlotConflict::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ContentError::NotAnObject { .. }));
    }

    #[test]
    fn non_object_item_is_rejected() {
        let err = parse_menu(
            "test",
            &json!({ "items": { "a": 5 } }),
            "test.json",
            &TagDecoder,
            SlotConflict::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ContentError::InvalidItem { .. }));
    }
}
