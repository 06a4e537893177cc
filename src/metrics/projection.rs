//! Synthetic monthly projections for the revenue and cost charts.
//!
//! These are presentation series driven entirely by configured constants,
//! not forecasts fitted to historical data. The only contract is that a
//! fixed set of inputs produces a monotonically consistent series.

use serde::{Deserialize, Serialize};

use crate::config::ProjectionAssumptions;
use crate::metrics::pricing::PricingTier;

/// One tier's slice of a projected month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierProjection {
    pub tier_id: String,
    pub members: f64,
    pub mrr: f64,
}

/// One projected month of revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueMonth {
    pub month: u32,
    pub tiers: Vec<TierProjection>,
    pub total_members: f64,
    pub mrr: f64,
    pub one_time_revenue: f64,
    pub total_revenue: f64,
    pub arpu: f64,
}

/// One projected month of cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostMonth {
    pub month: u32,
    pub cost: f64,
}

/// Project revenue over a clamped horizon: the member base compounds at
/// the configured growth rate and is split across tiers by the fixed
/// allocation table; tiers beyond the table get no members.
pub fn revenue_projection(
    tiers: &[PricingTier],
    months: u32,
    assumptions: &ProjectionAssumptions,
) -> Vec<RevenueMonth> {
    let horizon = assumptions.clamp_horizon(months);
    (1..=horizon)
        .map(|month| {
            let growth = (1.0 + assumptions.monthly_growth).powi(month as i32 - 1);
            let total_members = assumptions.base_members * growth;

            let tier_rows: Vec<TierProjection> = tiers
                .iter()
                .enumerate()
                .map(|(index, tier)| {
                    let share = assumptions.tier_allocation.get(index).copied().unwrap_or(0.0);
                    let members = total_members * share;
                    TierProjection {
                        tier_id: tier.id.clone(),
                        members,
                        mrr: tier.monthly_equivalent() * members,
                    }
                })
                .collect();

            let mrr: f64 = tier_rows.iter().map(|t| t.mrr).sum();
            let one_time_revenue = mrr * assumptions.one_time_share;
            let arpu = if total_members > 0.0 { mrr / total_members } else { 0.0 };

            RevenueMonth {
                month,
                tiers: tier_rows,
                total_members,
                mrr,
                one_time_revenue,
                total_revenue: mrr + one_time_revenue,
                arpu,
            }
        })
        .collect()
}

/// Project total cost compounding at the configured rate. Display only:
/// this series never feeds back into the other metrics.
pub fn cost_projection(
    base_monthly_cost: f64,
    months: u32,
    assumptions: &ProjectionAssumptions,
) -> Vec<CostMonth> {
    let horizon = assumptions.clamp_horizon(months);
    let base = base_monthly_cost.max(0.0);
    (1..=horizon)
        .map(|month| CostMonth {
            month,
            cost: base * (1.0 + assumptions.cost_growth).powi(month as i32 - 1),
        })
        .collect()
}
