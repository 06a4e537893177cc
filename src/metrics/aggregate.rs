//! Total cost aggregation.
//!
//! Folds a normalized cost document into a monthly total and per-scope
//! subtotals. Normalization has already resolved quantities and clamped
//! values, so the fold here is plain arithmetic; the guarantees (total is
//! never negative, one bad entry never poisons the rest) are enforced at
//! the boundary rather than re-checked per item.

use im::OrdMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::document::{CostDocument, CustomCategory, PersonnelCategory, StandardCategory};
use crate::model::normalize::normalize;
use crate::model::value::DocValue;

/// Per-scope subtotals for the dashboard breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub personnel: f64,
    pub operations: f64,
    pub marketing: f64,
    pub technology: f64,
    pub custom: OrdMap<String, f64>,
    pub total: f64,
}

/// Monthly personnel cost: enabled roles, plus contractors when the pool
/// itself is enabled.
pub fn personnel_cost(personnel: &PersonnelCategory) -> f64 {
    let roles: f64 = personnel.roles.values().map(|r| r.monthly_total()).sum();
    let contractors: f64 = if personnel.contractors.enabled {
        personnel.contractors.types.values().map(|c| c.monthly_total()).sum()
    } else {
        0.0
    };
    roles + contractors
}

/// Monthly cost of one standard category.
pub fn category_cost(category: &StandardCategory) -> f64 {
    category.items.values().map(|i| i.monthly_total()).sum()
}

/// Monthly cost across custom categories; disabled categories contribute
/// nothing regardless of their items.
pub fn custom_categories_cost(categories: &OrdMap<String, CustomCategory>) -> f64 {
    categories
        .values()
        .filter(|c| c.enabled)
        .map(|c| c.items.values().map(|i| i.monthly_total()).sum::<f64>())
        .sum()
}

/// Total monthly cost of the whole document.
pub fn total_monthly_cost(doc: &CostDocument) -> f64 {
    personnel_cost(&doc.personnel)
        + category_cost(&doc.operations)
        + category_cost(&doc.marketing)
        + category_cost(&doc.technology)
        + custom_categories_cost(&doc.custom_categories)
}

/// Subtotals plus the grand total.
pub fn cost_breakdown(doc: &CostDocument) -> CostBreakdown {
    let personnel = personnel_cost(&doc.personnel);
    let operations = category_cost(&doc.operations);
    let marketing = category_cost(&doc.marketing);
    let technology = category_cost(&doc.technology);
    let custom: OrdMap<String, f64> = doc
        .custom_categories
        .iter()
        .filter(|(_, c)| c.enabled)
        .map(|(k, c)| {
            (
                k.clone(),
                c.items.values().map(|i| i.monthly_total()).sum::<f64>(),
            )
        })
        .collect();
    let total = personnel + operations + marketing + technology + custom.values().sum::<f64>();
    CostBreakdown {
        personnel,
        operations,
        marketing,
        technology,
        custom,
        total,
    }
}

/// Total monthly cost straight from a stored document. Normalizes first;
/// anything unusable in the input degrades to zero contribution rather
/// than an error.
pub fn total_monthly_cost_raw(raw: &DocValue) -> f64 {
    let total = total_monthly_cost(&normalize(raw));
    debug!("aggregated total monthly cost: {total}");
    total.max(0.0)
}
