//! Boundary normalization between the wire shape and the typed model.
//!
//! [`normalize`] runs at every external boundary (load, import merge, and
//! after each edit) and never fails: a malformed subtree is logged and
//! treated as empty or default, so one bad entry cannot take down the whole
//! document. [`export`] re-emits the wire shape, sibling `_quantity` keys
//! included, so persisted documents stay readable by the backend's other
//! consumers.

use im::OrdMap;
use log::warn;

use crate::model::document::{
    ContractorItem, ContractorPool, CostDocument, CostItem, CustomCategory, PersonnelCategory,
    RoleItem, StandardCategory,
};
use crate::model::resolve::{resolve_item_quantity, resolve_quantity, ItemKind};
use crate::model::value::DocValue;

/// Convert a stored document into the fully-populated typed model.
pub fn normalize(value: &DocValue) -> CostDocument {
    let empty = OrdMap::new();
    let root = match value {
        DocValue::Map(m) => m,
        DocValue::Null => &empty,
        other => {
            warn!("cost document root is not an object ({other:?}); treating as empty");
            &empty
        }
    };

    CostDocument {
        personnel: normalize_personnel(root.get("personnel")),
        operations: normalize_standard("operations", root.get("operations")),
        marketing: normalize_standard("marketing", root.get("marketing")),
        technology: normalize_standard("technology", root.get("technology")),
        custom_categories: normalize_custom(root.get("customCategories")),
    }
}

fn normalize_personnel(value: Option<&DocValue>) -> PersonnelCategory {
    let Some(personnel) = check_map("personnel", value) else {
        return PersonnelCategory::default();
    };

    let mut roles = OrdMap::new();
    if let Some(raw_roles) = personnel.get_path("employees.roles").and_then(DocValue::as_map) {
        for (key, raw) in raw_roles {
            if !raw.is_map() {
                warn!("personnel role '{key}' is not an object; skipping");
                continue;
            }
            roles.insert(
                key.clone(),
                RoleItem {
                    unit_value: unit_value(raw, key),
                    count: resolve_quantity(raw, ItemKind::Role),
                    enabled: is_enabled(raw),
                },
            );
        }
    }

    let mut pool = ContractorPool::default();
    if let Some(contractors) = personnel.get("contractors") {
        pool.enabled = contractors.get("enabled").map_or(false, |v| v.as_bool_or(false));
        if let Some(types) = contractors.get("types").and_then(DocValue::as_map) {
            for (key, raw) in types {
                if !raw.is_map() {
                    warn!("contractor type '{key}' is not an object; skipping");
                    continue;
                }
                pool.types.insert(
                    key.clone(),
                    ContractorItem {
                        unit_value: unit_value(raw, key),
                        hours: resolve_quantity(raw, ItemKind::Contractor),
                        enabled: is_enabled(raw),
                    },
                );
            }
        }
    }

    PersonnelCategory { roles, contractors: pool }
}

fn normalize_standard(name: &str, value: Option<&DocValue>) -> StandardCategory {
    let Some(category) = check_map(name, value) else {
        return StandardCategory::default();
    };
    StandardCategory {
        items: normalize_items(name, category.get("items")),
    }
}

fn normalize_custom(value: Option<&DocValue>) -> OrdMap<String, CustomCategory> {
    let Some(categories) = check_map("customCategories", value).and_then(DocValue::as_map) else {
        return OrdMap::new();
    };

    let mut out = OrdMap::new();
    for (key, raw) in categories {
        if !raw.is_map() {
            warn!("custom category '{key}' is not an object; skipping");
            continue;
        }
        out.insert(
            key.clone(),
            CustomCategory {
                name: raw
                    .get("name")
                    .and_then(DocValue::as_str)
                    .unwrap_or(key)
                    .to_string(),
                kind: raw
                    .get("type")
                    .and_then(DocValue::as_str)
                    .unwrap_or("custom")
                    .to_string(),
                enabled: is_enabled(raw),
                items: normalize_items(key, raw.get("items")),
            },
        );
    }
    out
}

fn normalize_items(scope: &str, value: Option<&DocValue>) -> OrdMap<String, CostItem> {
    let Some(items) = value.and_then(DocValue::as_map) else {
        if value.is_some_and(|v| !matches!(v, DocValue::Null)) {
            warn!("items of '{scope}' is not an object; treating as empty");
        }
        return OrdMap::new();
    };

    let mut out = OrdMap::new();
    for (key, raw) in items {
        // quantity entries live beside the item they multiply
        if key.ends_with("_quantity") {
            continue;
        }
        if !raw.is_map() {
            warn!("item '{scope}.{key}' is not an object; skipping");
            continue;
        }
        out.insert(
            key.clone(),
            CostItem {
                unit_value: unit_value(raw, key),
                quantity: resolve_item_quantity(items, key, raw),
                enabled: is_enabled(raw),
                label: raw.get("label").and_then(DocValue::as_str).map(str::to_string),
                count_hint: raw.get("count").map(DocValue::as_number).filter(|c| *c > 0.0),
            },
        );
    }
    out
}

// Only an explicit `enabled: false` disables an entry.
fn is_enabled(raw: &DocValue) -> bool {
    raw.get("enabled").map_or(true, |v| v.as_bool_or(true))
}

fn unit_value(raw: &DocValue, key: &str) -> f64 {
    let value = raw.get("value").map_or(0.0, DocValue::as_number);
    if value < 0.0 {
        warn!("negative value for '{key}' clamped to 0");
        return 0.0;
    }
    value
}

fn check_map<'a>(name: &str, value: Option<&'a DocValue>) -> Option<&'a DocValue> {
    match value {
        Some(v) if v.is_map() => Some(v),
        Some(DocValue::Null) | None => None,
        Some(other) => {
            warn!("category '{name}' is not an object ({other:?}); treating as empty");
            None
        }
    }
}

/// Re-emit the external wire shape from a typed document.
///
/// Round-trip law: `normalize(&export(&doc)) == doc` for any normalized
/// document.
pub fn export(doc: &CostDocument) -> DocValue {
    let mut root = DocValue::map();

    root = root.with("personnel", export_personnel(&doc.personnel));
    for (name, category) in doc.standard_categories() {
        root = root.with(name, DocValue::map().with("items", export_items(&category.items)));
    }

    let mut custom = DocValue::map();
    for (key, category) in &doc.custom_categories {
        custom = custom.with(
            key.clone(),
            DocValue::map()
                .with("name", category.name.clone())
                .with("type", category.kind.clone())
                .with("enabled", category.enabled)
                .with("items", export_items(&category.items)),
        );
    }
    root.with("customCategories", custom)
}

fn export_personnel(personnel: &PersonnelCategory) -> DocValue {
    let mut roles = DocValue::map();
    for (key, role) in &personnel.roles {
        roles = roles.with(
            key.clone(),
            DocValue::map()
                .with("value", role.unit_value)
                .with("count", role.count)
                .with("enabled", role.enabled),
        );
    }

    let mut types = DocValue::map();
    for (key, contractor) in &personnel.contractors.types {
        types = types.with(
            key.clone(),
            DocValue::map()
                .with("value", contractor.unit_value)
                .with("hours", contractor.hours)
                .with("enabled", contractor.enabled),
        );
    }

    DocValue::map()
        .with("employees", DocValue::map().with("roles", roles))
        .with(
            "contractors",
            DocValue::map()
                .with("enabled", personnel.contractors.enabled)
                .with("types", types),
        )
}

fn export_items(items: &OrdMap<String, CostItem>) -> DocValue {
    let mut out = DocValue::map();
    for (key, item) in items {
        let mut raw = DocValue::map()
            .with("value", item.unit_value)
            .with("enabled", item.enabled);
        if let Some(label) = &item.label {
            raw = raw.with("label", label.clone());
        }
        if let Some(count) = item.count_hint {
            raw = raw.with("count", count);
        }
        out = out.with(key.clone(), raw).with(format!("{key}_quantity"), item.quantity);
    }
    out
}
