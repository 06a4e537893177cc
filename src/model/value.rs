//! Persistent, schema-light document tree.
//!
//! `DocValue` is the wire shape of a cost document: whatever JSON the
//! backend stored or an import produced, held as a persistent tree so every
//! edit returns a new document with structural sharing. The typed model in
//! [`crate::model::document`] is derived from this shape at each boundary;
//! this layer stays deliberately untyped because the stored documents are.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use crate::errors::{CostError, Result};

/// One node of the schema-light document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vector<DocValue>),
    Map(OrdMap<String, DocValue>),
}

impl DocValue {
    /// An empty object node.
    pub fn map() -> Self {
        DocValue::Map(OrdMap::new())
    }

    /// Builder-style insert, for assembling fixture and template documents.
    pub fn with(self, key: impl Into<String>, value: impl Into<DocValue>) -> Self {
        match self {
            DocValue::Map(m) => DocValue::Map(m.update(key.into(), value.into())),
            _ => DocValue::Map(OrdMap::unit(key.into(), value.into())),
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, DocValue::Map(_))
    }

    pub fn as_map(&self) -> Option<&OrdMap<String, DocValue>> {
        match self {
            DocValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DocValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Defensive numeric coercion: finite numbers pass through, numeric
    /// strings parse, everything else is 0.0. Stored documents routinely
    /// carry `"3000"` where a number was meant.
    pub fn as_number(&self) -> f64 {
        match self {
            DocValue::Number(n) if n.is_finite() => *n,
            DocValue::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()).unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Boolean with a default for absent or mis-typed values.
    pub fn as_bool_or(&self, default: bool) -> bool {
        match self {
            DocValue::Bool(b) => *b,
            _ => default,
        }
    }

    /// Direct child lookup on an object node.
    pub fn get(&self, key: &str) -> Option<&DocValue> {
        self.as_map().and_then(|m| m.get(key))
    }

    /// Dotted-path lookup. Returns `None` anywhere the path walks off the
    /// document.
    pub fn get_path(&self, path: &str) -> Option<&DocValue> {
        let mut current = self;
        for segment in path.split('.') {
            current = current.get(segment)?;
        }
        Some(current)
    }

    /// Set the value at a dotted path, creating empty objects for missing
    /// intermediate keys. Errors when an existing intermediate is not an
    /// object; the caller decides whether that failure is silent.
    pub fn set_path(&self, path: &str, value: DocValue) -> Result<DocValue> {
        let segments = split_path(path)?;
        let root = match self {
            DocValue::Map(m) => m.clone(),
            _ => return Err(CostError::type_mismatch("", "object")),
        };
        Ok(DocValue::Map(set_in(&root, &segments, value, path)?))
    }

    /// Remove the value at a dotted path. Removing a path that does not
    /// exist is a no-op, not an error.
    pub fn remove_path(&self, path: &str) -> DocValue {
        let Ok(segments) = split_path(path) else {
            return self.clone();
        };
        match self {
            DocValue::Map(m) => match remove_in(m, &segments) {
                Some(updated) => DocValue::Map(updated),
                None => self.clone(),
            },
            _ => self.clone(),
        }
    }
}

fn split_path(path: &str) -> Result<Vec<&str>> {
    if path.is_empty() {
        return Err(CostError::bad_path(path, "empty path"));
    }
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(CostError::bad_path(path, "empty path segment"));
    }
    Ok(segments)
}

fn set_in(
    map: &OrdMap<String, DocValue>,
    segments: &[&str],
    value: DocValue,
    full_path: &str,
) -> Result<OrdMap<String, DocValue>> {
    let (head, rest) = segments
        .split_first()
        .ok_or_else(|| CostError::bad_path(full_path, "empty path"))?;
    if rest.is_empty() {
        return Ok(map.update((*head).to_string(), value));
    }
    let child = match map.get(*head) {
        Some(DocValue::Map(m)) => m.clone(),
        None => OrdMap::new(),
        Some(_) => return Err(CostError::type_mismatch(full_path, "object")),
    };
    let updated = set_in(&child, rest, value, full_path)?;
    Ok(map.update((*head).to_string(), DocValue::Map(updated)))
}

/// Returns `Some(updated)` only when something was actually removed, so
/// callers can avoid rebuilding untouched spines.
fn remove_in(map: &OrdMap<String, DocValue>, segments: &[&str]) -> Option<OrdMap<String, DocValue>> {
    let (head, rest) = segments.split_first()?;
    if rest.is_empty() {
        if map.contains_key(*head) {
            return Some(map.without(*head));
        }
        return None;
    }
    match map.get(*head) {
        Some(DocValue::Map(child)) => {
            let updated = remove_in(child, rest)?;
            Some(map.update((*head).to_string(), DocValue::Map(updated)))
        }
        _ => None,
    }
}

impl From<f64> for DocValue {
    fn from(n: f64) -> Self {
        DocValue::Number(n)
    }
}

impl From<i64> for DocValue {
    fn from(n: i64) -> Self {
        DocValue::Number(n as f64)
    }
}

impl From<bool> for DocValue {
    fn from(b: bool) -> Self {
        DocValue::Bool(b)
    }
}

impl From<&str> for DocValue {
    fn from(s: &str) -> Self {
        DocValue::String(s.to_string())
    }
}

impl From<String> for DocValue {
    fn from(s: String) -> Self {
        DocValue::String(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> DocValue {
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
    fn get_path_walks_nested_maps() {
        let doc = sample();
        assert_eq!(
            doc.get_path("operations.items.rent.value").map(DocValue::as_number),
            Some(8000.0)
        );
        assert_eq!(doc.get_path("operations.items.missing"), None);
        assert_eq!(doc.get_path("operations.items.rent.value.deeper"), None);
    }

    #[test]
    fn set_path_creates_intermediates_and_shares_structure() {
        let doc = sample();
        let updated = doc.set_path("marketing.items.ads.value", DocValue::from(5000.0)).unwrap();

        assert_eq!(updated.get_path("marketing.items.ads.value").map(DocValue::as_number), Some(5000.0));
        // the original is untouched
        assert_eq!(doc.get_path("marketing"), None);
        // siblings survive
        assert_eq!(updated.get_path("operations.items.rent.value").map(DocValue::as_number), Some(8000.0));
    }

    #[test]
    fn set_path_rejects_scalar_intermediates() {
        let doc = sample();
        let err = doc.set_path("operations.items.rent.value.nested", DocValue::from(1.0));
        assert!(err.is_err());
    }

    #[test]
    fn remove_path_is_noop_for_missing_paths() {
        let doc = sample();
        let removed = doc.remove_path("operations.items.nothing.here");
        assert_eq!(removed, doc);

        let removed = doc.remove_path("operations.items.rent");
        assert_eq!(removed.get_path("operations.items.rent"), None);
        assert_eq!(removed.get_path("operations.items.rent_quantity").map(DocValue::as_number), Some(1.0));
    }

    #[test]
    fn as_number_coerces_defensively() {
        assert_eq!(DocValue::from(3.5).as_number(), 3.5);
        assert_eq!(DocValue::from("3000").as_number(), 3000.0);
        assert_eq!(DocValue::from(" 12.5 ").as_number(), 12.5);
        assert_eq!(DocValue::from("not a number").as_number(), 0.0);
        assert_eq!(DocValue::Null.as_number(), 0.0);
        assert_eq!(DocValue::from(true).as_number(), 0.0);
        assert_eq!(DocValue::Number(f64::NAN).as_number(), 0.0);
    }

    #[test]
    fn json_round_trip_preserves_shape() {
        let doc = sample();
        let json = serde_json::to_string(&doc).unwrap();
        let back: DocValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn deserializes_integers_as_numbers() {
        let doc: DocValue = serde_json::from_str(r#"{"value": 8000, "enabled": false}"#).unwrap();
        assert_eq!(doc.get("value").map(DocValue::as_number), Some(8000.0));
        assert_eq!(doc.get("enabled").map(|v| v.as_bool_or(true)), Some(false));
    }
}
