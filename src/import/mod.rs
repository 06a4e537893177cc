//! Import merge: turning parsed rows into a document fragment and folding
//! that fragment into an existing cost document.
//!
//! File parsing itself (CSV/XLSX heuristics, header detection) belongs to
//! the import collaborator; this module starts from its row output and
//! shares the wire shape with the rest of the model.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::model::mutate::sanitize_key;
use crate::model::value::DocValue;

/// One parsed row from the import collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportRow {
    pub category: String,
    pub name: String,
    pub cost: f64,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// A cost-document fragment built from import rows, plus what happened
/// along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub data: DocValue,
    pub row_count: usize,
    pub headers: Vec<String>,
    pub warnings: Vec<String>,
}

/// How a fragment is folded into the existing document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Recurse into objects; incoming leaves win
    DeepMerge,
    /// Only fill keys the existing document does not have
    AddOnly,
    /// Discard the existing document entirely
    Replace,
}

/// Build a document fragment from import rows. Rows that cannot be used
/// are skipped with a warning rather than failing the import.
pub fn rows_to_fragment(rows: &[ImportRow]) -> ImportReport {
    let mut data = DocValue::map();
    let mut warnings = Vec::new();
    let mut imported = 0usize;

    for (index, row) in rows.iter().enumerate() {
        let key = sanitize_key(&row.name);
        if key.is_empty() {
            warnings.push(format!("row {}: unusable item name '{}', skipped", index + 1, row.name));
            continue;
        }

        let mut cost = row.cost;
        if !cost.is_finite() || cost < 0.0 {
            warnings.push(format!("row {}: cost {} coerced to 0", index + 1, row.cost));
            cost = 0.0;
        }

        let quantity = match row.quantity {
            Some(q) if q.is_finite() && q > 0.0 => q,
            Some(q) => {
                warnings.push(format!("row {}: quantity {} replaced with 1", index + 1, q));
                1.0
            }
            None => 1.0,
        };
        let enabled = row.enabled.unwrap_or(true);

        let placed = place_row(&data, row, &key, cost, quantity, enabled);
        match placed {
            Some(updated) => {
                data = updated;
                imported += 1;
            }
            None => warnings.push(format!("row {}: could not place '{}'", index + 1, row.name)),
        }
    }

    if imported < rows.len() {
        warn!("import kept {imported} of {} rows", rows.len());
    }

    ImportReport {
        data,
        row_count: imported,
        headers: ["category", "name", "cost", "quantity", "enabled"]
            .map(str::to_string)
            .to_vec(),
        warnings,
    }
}

fn place_row(
    data: &DocValue,
    row: &ImportRow,
    key: &str,
    cost: f64,
    quantity: f64,
    enabled: bool,
) -> Option<DocValue> {
    match detect_category(&row.category) {
        DetectedCategory::Personnel => {
            let role = DocValue::map()
                .with("value", cost)
                .with("count", quantity)
                .with("enabled", enabled);
            data.set_path(&format!("personnel.employees.roles.{key}"), role).ok()
        }
        DetectedCategory::Standard(category) => {
            let item = DocValue::map()
                .with("value", cost)
                .with("enabled", enabled)
                .with("label", row.name.trim());
            data.set_path(&format!("{category}.items.{key}"), item)
                .and_then(|d| {
                    d.set_path(
                        &format!("{category}.items.{key}_quantity"),
                        DocValue::from(quantity),
                    )
                })
                .ok()
        }
        DetectedCategory::Custom => {
            let category_key = sanitize_key(&row.category);
            if category_key.is_empty() {
                return None;
            }
            let base = format!("customCategories.{category_key}");
            let with_header = if data.get_path(&base).is_some() {
                data.clone()
            } else {
                data.set_path(&base, custom_category_header(&row.category)).ok()?
            };
            let item = DocValue::map()
                .with("value", cost)
                .with("enabled", enabled)
                .with("label", row.name.trim());
            with_header
                .set_path(&format!("{base}.items.{key}"), item)
                .and_then(|d| {
                    d.set_path(&format!("{base}.items.{key}_quantity"), DocValue::from(quantity))
                })
                .ok()
        }
    }
}

fn custom_category_header(display_name: &str) -> DocValue {
    DocValue::map()
        .with("name", display_name.trim())
        .with("type", "imported")
        .with("enabled", true)
        .with("items", DocValue::map())
}

enum DetectedCategory {
    Personnel,
    Standard(&'static str),
    Custom,
}

fn detect_category(raw: &str) -> DetectedCategory {
    match sanitize_key(raw).as_str() {
        "personnel" | "staff" | "payroll" => DetectedCategory::Personnel,
        "operations" | "ops" => DetectedCategory::Standard("operations"),
        "marketing" => DetectedCategory::Standard("marketing"),
        "technology" | "tech" => DetectedCategory::Standard("technology"),
        _ => DetectedCategory::Custom,
    }
}

/// Fold an incoming fragment into the existing document.
pub fn merge_cost_data(existing: &DocValue, incoming: &DocValue, strategy: MergeStrategy) -> DocValue {
    match strategy {
        MergeStrategy::Replace => incoming.clone(),
        MergeStrategy::DeepMerge => deep_merge(existing, incoming),
        MergeStrategy::AddOnly => add_only(existing, incoming),
    }
}

fn deep_merge(existing: &DocValue, incoming: &DocValue) -> DocValue {
    match (existing, incoming) {
        (DocValue::Map(a), DocValue::Map(b)) => {
            let mut merged = a.clone();
            for (key, value) in b {
                let next = match a.get(key) {
                    Some(current) => deep_merge(current, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), next);
            }
            DocValue::Map(merged)
        }
        _ => incoming.clone(),
    }
}

fn add_only(existing: &DocValue, incoming: &DocValue) -> DocValue {
    match (existing, incoming) {
        (DocValue::Map(a), DocValue::Map(b)) => {
            let mut merged = a.clone();
            for (key, value) in b {
                match a.get(key) {
                    Some(current) if current.is_map() && value.is_map() => {
                        merged.insert(key.clone(), add_only(current, value));
                    }
                    Some(_) => {} // existing leaves are never overwritten
                    None => {
                        merged.insert(key.clone(), value.clone());
                    }
                }
            }
            DocValue::Map(merged)
        }
        _ => existing.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::aggregate::total_monthly_cost_raw;
    use pretty_assertions::assert_eq;

    fn row(category: &str, name: &str, cost: f64) -> ImportRow {
        ImportRow {
            category: category.to_string(),
            name: name.to_string(),
            cost,
            quantity: Some(1.0),
            enabled: Some(true),
        }
    }

    #[test]
    fn marketing_row_lands_in_marketing_items() {
        let report = rows_to_fragment(&[row("Marketing", "Digital Ads", 3000.0)]);
        assert_eq!(report.row_count, 1);
        assert!(report.warnings.is_empty());

        let merged = merge_cost_data(&DocValue::map(), &report.data, MergeStrategy::DeepMerge);
        assert_eq!(
            merged
                .get_path("marketing.items.digital_ads.value")
                .map(DocValue::as_number),
            Some(3000.0)
        );
        assert_eq!(total_monthly_cost_raw(&merged), 3000.0);
    }

    #[test]
    fn unknown_category_becomes_custom() {
        let report = rows_to_fragment(&[row("Office Snacks", "Coffee", 120.0)]);
        let data = report.data;
        assert_eq!(
            data.get_path("customCategories.office_snacks.name")
                .and_then(DocValue::as_str),
            Some("Office Snacks")
        );
        assert_eq!(
            data.get_path("customCategories.office_snacks.items.coffee.value")
                .map(DocValue::as_number),
            Some(120.0)
        );
        assert_eq!(total_monthly_cost_raw(&data), 120.0);
    }

    #[test]
    fn personnel_rows_become_roles() {
        let mut staff = row("Personnel", "Support Engineer", 6000.0);
        staff.quantity = Some(2.0);
        let report = rows_to_fragment(&[staff]);
        assert_eq!(
            report
                .data
                .get_path("personnel.employees.roles.support_engineer.count")
                .map(DocValue::as_number),
            Some(2.0)
        );
        assert_eq!(total_monthly_cost_raw(&report.data), 12000.0);
    }

    #[test]
    fn bad_rows_are_skipped_with_warnings() {
        let rows = vec![
            row("Marketing", "???", 100.0),
            row("Marketing", "Ads", f64::NAN),
        ];
        let report = rows_to_fragment(&rows);
        assert_eq!(report.row_count, 1);
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(
            report
                .data
                .get_path("marketing.items.ads.value")
                .map(DocValue::as_number),
            Some(0.0)
        );
    }

    #[test]
    fn deep_merge_lets_incoming_leaves_win() {
        let existing: DocValue = serde_json::from_str(
            r#"{"operations": {"items": {"rent": {"value": 2000, "enabled": true}, "utilities": {"value": 300}}}}"#,
        )
        .unwrap();
        let incoming: DocValue =
            serde_json::from_str(r#"{"operations": {"items": {"rent": {"value": 2500}}}}"#).unwrap();

        let merged = merge_cost_data(&existing, &incoming, MergeStrategy::DeepMerge);
        assert_eq!(
            merged.get_path("operations.items.rent.value").map(DocValue::as_number),
            Some(2500.0)
        );
        // untouched siblings survive at both levels
        assert_eq!(
            merged
                .get_path("operations.items.rent.enabled")
                .map(|v| v.as_bool_or(false)),
            Some(true)
        );
        assert_eq!(
            merged
                .get_path("operations.items.utilities.value")
                .map(DocValue::as_number),
            Some(300.0)
        );
    }

    #[test]
    fn add_only_never_touches_existing_leaves() {
        let existing: DocValue =
            serde_json::from_str(r#"{"operations": {"items": {"rent": {"value": 2000}}}}"#).unwrap();
        let incoming: DocValue = serde_json::from_str(
            r#"{"operations": {"items": {"rent": {"value": 9999}, "parking": {"value": 150}}}}"#,
        )
        .unwrap();

        let merged = merge_cost_data(&existing, &incoming, MergeStrategy::AddOnly);
        assert_eq!(
            merged.get_path("operations.items.rent.value").map(DocValue::as_number),
            Some(2000.0)
        );
        assert_eq!(
            merged
                .get_path("operations.items.parking.value")
                .map(DocValue::as_number),
            Some(150.0)
        );
    }

    #[test]
    fn replace_discards_the_existing_document() {
        let existing: DocValue =
            serde_json::from_str(r#"{"operations": {"items": {"rent": {"value": 2000}}}}"#).unwrap();
        let incoming: DocValue =
            serde_json::from_str(r#"{"marketing": {"items": {"ads": {"value": 500}}}}"#).unwrap();
        let merged = merge_cost_data(&existing, &incoming, MergeStrategy::Replace);
        assert_eq!(merged, incoming);
    }
}
