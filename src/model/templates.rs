//! Default cost-structure templates.
//!
//! A fresh scenario starts from [`default_cost_structure`]; re-adding a
//! deleted standard category instantiates it from the same registry.

use once_cell::sync::Lazy;

use crate::model::value::DocValue;

/// Standard category keys, in display order.
pub const STANDARD_CATEGORIES: [&str; 4] = ["personnel", "operations", "marketing", "technology"];

static DEFAULT_STRUCTURE: Lazy<DocValue> = Lazy::new(|| {
    DocValue::map()
        .with("personnel", personnel_template())
        .with("operations", operations_template())
        .with("marketing", marketing_template())
        .with("technology", technology_template())
        .with("customCategories", DocValue::map())
});

/// The document a brand-new scenario starts from.
pub fn default_cost_structure() -> DocValue {
    DEFAULT_STRUCTURE.clone()
}

/// Template for a single standard category, or `None` for an unknown key.
pub fn standard_category_template(category_key: &str) -> Option<DocValue> {
    match category_key {
        "personnel" => Some(personnel_template()),
        "operations" => Some(operations_template()),
        "marketing" => Some(marketing_template()),
        "technology" => Some(technology_template()),
        _ => None,
    }
}

fn personnel_template() -> DocValue {
    DocValue::map()
        .with(
            "employees",
            DocValue::map().with(
                "roles",
                DocValue::map()
                    .with("founder", role(8000.0, 1.0))
                    .with("engineer", role(10000.0, 1.0)),
            ),
        )
        .with(
            "contractors",
            DocValue::map()
                .with("enabled", false)
                .with("types", DocValue::map().with("design", contractor(75.0, 40.0))),
        )
}

fn operations_template() -> DocValue {
    items(&[("rent", 2000.0), ("utilities", 300.0), ("insurance", 150.0)])
}

fn marketing_template() -> DocValue {
    items(&[("digital_ads", 1500.0), ("content", 500.0)])
}

fn technology_template() -> DocValue {
    items(&[("hosting", 400.0), ("saas_tools", 250.0)])
}

fn role(value: f64, count: f64) -> DocValue {
    DocValue::map()
        .with("value", value)
        .with("count", count)
        .with("enabled", true)
}

fn contractor(rate: f64, hours: f64) -> DocValue {
    DocValue::map()
        .with("value", rate)
        .with("hours", hours)
        .with("enabled", true)
}

fn items(entries: &[(&str, f64)]) -> DocValue {
    let mut map = DocValue::map();
    for (key, value) in entries {
        map = map
            .with(*key, DocValue::map().with("value", *value).with("enabled", true))
            .with(format!("{key}_quantity"), 1.0);
    }
    DocValue::map().with("items", map)
}
