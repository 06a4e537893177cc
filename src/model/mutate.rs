//! Structural edits to a cost document.
//!
//! Every operation takes the document by reference and returns a new one;
//! the input is never mutated, since callers may hold older snapshots for
//! undo or diffing. The `Result`-returning functions are the core; the UI
//! path goes through [`apply`], which logs a failed edit and hands back the
//! document unchanged rather than surfacing an error mid-keystroke.

use log::{debug, warn};

use crate::errors::{CostError, Result};
use crate::model::templates::standard_category_template;
use crate::model::value::DocValue;

/// An edit request as dispatched from the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    SetValue {
        category: String,
        path: String,
        value: DocValue,
    },
    RemoveItem {
        category: String,
        field: String,
    },
    AddCategory {
        name: String,
        kind: String,
    },
    AddStandardCategory {
        category: String,
    },
    RemoveCategory {
        path: String,
    },
}

/// Apply an edit, degrading gracefully: on failure the input document is
/// returned unchanged and the error is logged.
pub fn apply(doc: &DocValue, edit: &Edit) -> DocValue {
    let result = match edit {
        Edit::SetValue { category, path, value } => {
            set_item_value(doc, category, path, value.clone())
        }
        Edit::RemoveItem { category, field } => Ok(remove_item(doc, category, field)),
        Edit::AddCategory { name, kind } => add_category(doc, name, kind),
        Edit::AddStandardCategory { category } => add_standard_category(doc, category),
        Edit::RemoveCategory { path } => Ok(remove_category(doc, path)),
    };
    match result {
        Ok(updated) => updated,
        Err(err) => {
            warn!("edit {edit:?} failed, keeping document unchanged: {err}");
            doc.clone()
        }
    }
}

/// Set a leaf value under `category_key` (or at the root when the category
/// key is empty), creating intermediate objects as needed. Performs no
/// validation of the value itself; callers validate before editing.
pub fn set_item_value(
    doc: &DocValue,
    category_key: &str,
    field_path: &str,
    value: DocValue,
) -> Result<DocValue> {
    let full_path = if category_key.is_empty() {
        field_path.to_string()
    } else {
        format!("{category_key}.{field_path}")
    };
    doc.set_path(&full_path, value)
}

/// Delete an item, resolving the category's path convention: personnel
/// fields live under `employees.roles`, everything else under `items`.
/// Removing something that does not exist is a no-op. The item's sibling
/// quantity entry is deleted along with it.
pub fn remove_item(doc: &DocValue, category_key: &str, field: &str) -> DocValue {
    let base = item_path(doc, category_key, field);
    doc.remove_path(&base).remove_path(&format!("{base}_quantity"))
}

fn item_path(doc: &DocValue, category_key: &str, field: &str) -> String {
    if category_key == "personnel" {
        return format!("personnel.employees.roles.{field}");
    }
    if let Some(custom_key) = category_key.strip_prefix("customCategories.") {
        return format!("customCategories.{custom_key}.items.{field}");
    }
    // a bare key naming an existing custom category resolves there
    if doc.get_path(&format!("customCategories.{category_key}")).is_some() {
        return format!("customCategories.{category_key}.items.{field}");
    }
    format!("{category_key}.items.{field}")
}

/// Create a custom category from a display name. The name is sanitized to
/// a lowercase alphanumeric-and-underscore key; a name that sanitizes to
/// nothing is a silent no-op, as is a key that already exists.
pub fn add_category(doc: &DocValue, name: &str, kind: &str) -> Result<DocValue> {
    let key = sanitize_key(name);
    if key.is_empty() {
        debug!("category name '{name}' sanitized to empty key; ignoring");
        return Ok(doc.clone());
    }
    let path = format!("customCategories.{key}");
    if doc.get_path(&path).is_some() {
        return Ok(doc.clone());
    }
    let category = DocValue::map()
        .with("name", name)
        .with("type", kind)
        .with("enabled", true)
        .with("items", DocValue::map());
    doc.set_path(&path, category)
}

/// Instantiate a standard category from the template registry. Idempotent:
/// a category that already exists is left alone.
pub fn add_standard_category(doc: &DocValue, category_key: &str) -> Result<DocValue> {
    let template = standard_category_template(category_key)
        .ok_or_else(|| CostError::UnknownCategory(category_key.to_string()))?;
    if doc.get(category_key).is_some() {
        return Ok(doc.clone());
    }
    doc.set_path(category_key, template)
}

/// Delete an entire category subtree by dotted path.
pub fn remove_category(doc: &DocValue, category_path: &str) -> DocValue {
    doc.remove_path(category_path)
}

/// Reduce a display name to a stable map key: lowercase, alphanumeric and
/// underscores only, runs of separators collapsed.
pub fn sanitize_key(name: &str) -> String {
    let mut key = String::new();
    let mut pending_separator = false;
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !key.is_empty() {
                key.push('_');
            }
            pending_separator = false;
            key.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn base_doc() -> DocValue {
        DocValue::map().with(
            "operations",
            DocValue::map().with(
                "items",
                DocValue::map()
                    .with("rent", DocValue::map().with("value", 8000.0).with("enabled", true))
                    .with("rent_quantity", 1.0),
            ),
        )
    }

    #[test]
    fn set_then_remove_round_trips() {
        let doc = base_doc();
        let edited = set_item_value(&doc, "operations", "items.coffee.value", DocValue::from(120.0))
            .unwrap();
        assert_eq!(
            edited.get_path("operations.items.coffee.value").map(DocValue::as_number),
            Some(120.0)
        );

        let removed = remove_item(&edited, "operations", "coffee");
        assert_eq!(removed.get_path("operations.items.coffee"), None);
    }

    #[test]
    fn remove_item_deletes_sibling_quantity() {
        let doc = base_doc();
        let removed = remove_item(&doc, "operations", "rent");
        assert_eq!(removed.get_path("operations.items.rent"), None);
        assert_eq!(removed.get_path("operations.items.rent_quantity"), None);
    }

    #[test]
    fn personnel_fields_resolve_to_roles() {
        let doc = DocValue::map().with(
            "personnel",
            DocValue::map().with(
                "employees",
                DocValue::map().with(
                    "roles",
                    DocValue::map().with("ceo", DocValue::map().with("value", 25000.0)),
                ),
            ),
        );
        let removed = remove_item(&doc, "personnel", "ceo");
        assert_eq!(removed.get_path("personnel.employees.roles.ceo"), None);
    }

    #[test]
    fn removing_a_missing_item_is_a_noop() {
        let doc = base_doc();
        assert_eq!(remove_item(&doc, "operations", "ghost"), doc);
        assert_eq!(remove_item(&doc, "marketing", "ads"), doc);
    }

    #[test]
    fn add_category_sanitizes_the_name() {
        let doc = DocValue::map();
        let added = add_category(&doc, "Legal & Compliance", "custom").unwrap();
        let legal = added.get_path("customCategories.legal_compliance").unwrap();
        assert_eq!(legal.get("name").and_then(DocValue::as_str), Some("Legal & Compliance"));
        assert_eq!(legal.get("enabled").map(|v| v.as_bool_or(false)), Some(true));
    }

    #[test]
    fn add_category_with_unusable_name_is_a_noop() {
        let doc = DocValue::map();
        let added = add_category(&doc, "!!!", "custom").unwrap();
        assert_eq!(added, doc);
    }

    #[test]
    fn add_then_remove_category_restores_the_document() {
        let doc = base_doc();
        let added = add_category(&doc, "Events", "custom").unwrap();
        let removed = remove_category(&added, "customCategories.events");
        // customCategories remains as an empty map after the round trip
        let expected = doc.with("customCategories", DocValue::map());
        assert_eq!(removed, expected);
    }

    #[test]
    fn add_standard_category_is_idempotent() {
        let doc = base_doc();
        let once = add_standard_category(&doc, "marketing").unwrap();
        let twice = add_standard_category(&once, "marketing").unwrap();
        assert_eq!(once, twice);
        // existing categories are never overwritten
        let unchanged = add_standard_category(&doc, "operations").unwrap();
        assert_eq!(unchanged, doc);
    }

    #[test]
    fn unknown_standard_category_errors() {
        let doc = DocValue::map();
        assert!(add_standard_category(&doc, "logistics").is_err());
    }

    #[test]
    fn apply_keeps_document_unchanged_on_failure() {
        let doc = base_doc();
        // rent.value is a scalar, so writing beneath it cannot succeed
        let edit = Edit::SetValue {
            category: "operations".to_string(),
            path: "items.rent.value.nested".to_string(),
            value: DocValue::from(1.0),
        };
        assert_eq!(apply(&doc, &edit), doc);
    }

    #[test]
    fn sanitize_key_examples() {
        assert_eq!(sanitize_key("Legal & Compliance"), "legal_compliance");
        assert_eq!(sanitize_key("  R&D -- 2024  "), "r_d_2024");
        assert_eq!(sanitize_key("Ops"), "ops");
        assert_eq!(sanitize_key("???"), "");
    }
}
