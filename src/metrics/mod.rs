//! Derived metrics: aggregation, pricing, unit economics, projections.

pub mod aggregate;
pub mod economics;
pub mod pricing;
pub mod projection;

pub use aggregate::{
    category_cost, cost_breakdown, custom_categories_cost, personnel_cost, total_monthly_cost,
    total_monthly_cost_raw, CostBreakdown,
};
pub use economics::{
    breakeven_curve, breakeven_members, churn_rate, marketing_spend, monthly_recurring_revenue,
    runway_months, unit_economics, BreakevenSummary, CurvePoint, UnitEconomics,
};
pub use pricing::{active_monthly_price, BillingPeriod, PricingTier, LIFETIME_AMORTIZATION_MONTHS};
pub use projection::{cost_projection, revenue_projection, CostMonth, RevenueMonth, TierProjection};
