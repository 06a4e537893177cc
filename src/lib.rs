// Export modules for library usage
pub mod config;
pub mod errors;
pub mod import;
pub mod insight;
pub mod metrics;
pub mod model;
pub mod scenario;
pub mod validate;

// Re-export commonly used types
pub use crate::config::{ModelAssumptions, ProjectionAssumptions};
pub use crate::errors::{CostError, Result};

pub use crate::model::{
    add_category, add_standard_category, apply, default_cost_structure, export, normalize,
    remove_category, remove_item, resolve_item_quantity, resolve_quantity, sanitize_key,
    set_item_value, standard_category_template, ContractorItem, ContractorPool, CostDocument,
    CostItem, CustomCategory, DocValue, Edit, ItemKind, PersonnelCategory, RoleItem,
    StandardCategory, DEFAULT_CONTRACTOR_HOURS, STANDARD_CATEGORIES,
};

pub use crate::metrics::{
    active_monthly_price, breakeven_curve, breakeven_members, churn_rate, cost_breakdown,
    cost_projection, marketing_spend, monthly_recurring_revenue, revenue_projection,
    runway_months, total_monthly_cost, total_monthly_cost_raw, unit_economics, BillingPeriod,
    BreakevenSummary, CostBreakdown, CostMonth, CurvePoint, PricingTier, RevenueMonth,
    TierProjection, UnitEconomics,
};

pub use crate::import::{merge_cost_data, rows_to_fragment, ImportReport, ImportRow, MergeStrategy};

pub use crate::scenario::{
    compare_scenarios, MemoryStore, MetricDelta, MetricDirection, NewScenario, PersistDebouncer,
    Scenario, ScenarioComparison, ScenarioPatch, ScenarioStore,
};

pub use crate::insight::{
    parse_insight_response, InsightProvider, InsightReport, InsightSnapshot, Recommendation,
};

pub use crate::validate::{validate_numeric_input, NumericBounds};
