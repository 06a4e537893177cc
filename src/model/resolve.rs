//! Effective-quantity resolution.
//!
//! Stored documents spell quantity several ways depending on item kind and
//! age of the data. The precedence is fixed: roles use `count` (default 1),
//! contractors use `hours` (default 160), and everything else falls through
//! `_quantity`, `quantity`, `count`, then 1. The sibling `"<key>_quantity"`
//! convention of standard categories lives in the parent map, so that
//! lookup happens in [`resolve_item_quantity`].

use im::OrdMap;

use crate::model::value::DocValue;

/// Default monthly hours for a contractor engagement.
pub const DEFAULT_CONTRACTOR_HOURS: f64 = 160.0;

/// What kind of priced entry a quantity is being resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Role,
    Contractor,
    Standard,
}

/// Resolve the effective quantity from the item's own fields.
///
/// Never returns a negative or non-finite number; invalid and missing
/// values resolve to the kind's default.
pub fn resolve_quantity(item: &DocValue, kind: ItemKind) -> f64 {
    match kind {
        ItemKind::Role => candidate(item.get("count")).unwrap_or(1.0),
        ItemKind::Contractor => candidate(item.get("hours")).unwrap_or(DEFAULT_CONTRACTOR_HOURS),
        ItemKind::Standard => candidate(item.get("_quantity"))
            .or_else(|| candidate(item.get("quantity")))
            .or_else(|| candidate(item.get("count")))
            .unwrap_or(1.0),
    }
}

/// Resolve a standard-category item's quantity, preferring the sibling
/// `"<key>_quantity"` entry in the parent map over the item's own fields.
pub fn resolve_item_quantity(items: &OrdMap<String, DocValue>, key: &str, item: &DocValue) -> f64 {
    let sibling = format!("{key}_quantity");
    candidate(items.get(sibling.as_str()))
        .unwrap_or_else(|| resolve_quantity(item, ItemKind::Standard))
}

// A usable quantity is finite and strictly positive; zero falls through to
// the default, matching the stored documents' falsy-chain semantics.
fn candidate(value: Option<&DocValue>) -> Option<f64> {
    value.map(DocValue::as_number).filter(|n| *n > 0.0)
}
