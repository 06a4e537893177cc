//! Derived unit-economics metrics.
//!
//! Everything here is a pure function of the normalized cost document, the
//! pricing tiers, the active tier selection, and the per-tier member
//! counts. Identical inputs always produce identical output; there is no
//! hidden state, so the dashboard can recompute the full set on every edit
//! and tier switch.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::config::ModelAssumptions;
use crate::metrics::aggregate::total_monthly_cost;
use crate::metrics::pricing::{active_monthly_price, PricingTier};
use crate::model::document::CostDocument;

/// Breakeven curve domain: member counts 0..=500 in steps of 25.
pub const CURVE_MAX_MEMBERS: u64 = 500;
pub const CURVE_STEP: u64 = 25;

/// Minimum member count at which revenue covers total monthly cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakevenSummary {
    pub members: u64,
    pub revenue: f64,
}

/// One point of the revenue-vs-cost chart. Cost is constant across the
/// curve: this model does not scale costs with members.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurvePoint {
    pub members: u64,
    pub revenue: f64,
    pub costs: f64,
}

/// The dashboard's full metric set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitEconomics {
    pub total_cost: f64,
    pub monthly_price: f64,
    pub breakeven: BreakevenSummary,
    pub mrr: f64,
    pub total_members: f64,
    pub marketing_spend: f64,
    pub new_members_per_month: u64,
    pub cac: f64,
    pub arpu: f64,
    pub ltv: f64,
    pub ltv_cac_ratio: f64,
    pub churn_rate_pct: f64,
    pub retention_rate_pct: f64,
    pub runway_months: u32,
}

/// Members needed to cover `total_cost` at `monthly_price`.
pub fn breakeven_members(total_cost: f64, monthly_price: f64) -> u64 {
    if total_cost > 0.0 && monthly_price > 0.0 {
        (total_cost / monthly_price).ceil() as u64
    } else {
        0
    }
}

/// Revenue and (constant) cost at each charted member count.
pub fn breakeven_curve(total_cost: f64, monthly_price: f64) -> Vec<CurvePoint> {
    (0..=CURVE_MAX_MEMBERS)
        .step_by(CURVE_STEP as usize)
        .map(|members| CurvePoint {
            members,
            revenue: members as f64 * monthly_price,
            costs: total_cost,
        })
        .collect()
}

/// Monthly recurring revenue across tiers, weighted by member counts.
pub fn monthly_recurring_revenue(
    tiers: &[PricingTier],
    per_tier_members: Option<&OrdMap<String, f64>>,
) -> f64 {
    tiers
        .iter()
        .map(|tier| tier.monthly_equivalent() * tier_members(tier, per_tier_members))
        .sum()
}

/// Marketing spend for CAC. This intentionally multiplies by the raw
/// `count` field (default 1) rather than the general quantity chain; the
/// two paths are independently faithful to the stored documents.
pub fn marketing_spend(doc: &CostDocument) -> f64 {
    doc.marketing
        .items
        .values()
        .filter(|item| item.enabled)
        .map(|item| item.unit_value * item.count_hint.unwrap_or(1.0))
        .sum()
}

/// Compute the full metric set.
pub fn unit_economics(
    doc: &CostDocument,
    tiers: &[PricingTier],
    active_tier_id: Option<&str>,
    per_tier_members: Option<&OrdMap<String, f64>>,
    assumptions: &ModelAssumptions,
) -> UnitEconomics {
    let total_cost = total_monthly_cost(doc);
    let monthly_price = active_monthly_price(tiers, active_tier_id, assumptions);

    let members = breakeven_members(total_cost, monthly_price);
    let breakeven = BreakevenSummary {
        members,
        revenue: members as f64 * monthly_price,
    };

    let mrr = monthly_recurring_revenue(tiers, per_tier_members);
    let total_members: f64 = tiers
        .iter()
        .map(|tier| tier_members(tier, per_tier_members))
        .sum();

    let spend = marketing_spend(doc);
    let new_members_per_month = ((total_members * assumptions.acquisition_rate).ceil() as u64).max(1);
    let cac = (spend / new_members_per_month as f64).round();

    let arpu = if total_members > 0.0 {
        mrr / total_members
    } else {
        monthly_price
    };
    let ltv = (arpu * assumptions.lifetime_months).round();
    let ltv_cac_ratio = if cac > 0.0 { ltv / cac } else { 0.0 };

    let churn_rate_pct = churn_rate(ltv_cac_ratio, assumptions);
    let retention_rate_pct = 100.0 - churn_rate_pct;

    let runway_months = runway_months(total_cost, assumptions);

    UnitEconomics {
        total_cost,
        monthly_price,
        breakeven,
        mrr,
        total_members,
        marketing_spend: spend,
        new_members_per_month,
        cac,
        arpu,
        ltv,
        ltv_cac_ratio,
        churn_rate_pct,
        retention_rate_pct,
        runway_months,
    }
}

/// Baseline churn scaled by LTV:CAC health.
pub fn churn_rate(ltv_cac_ratio: f64, assumptions: &ModelAssumptions) -> f64 {
    let base = assumptions.base_churn_pct;
    if ltv_cac_ratio >= assumptions.healthy_ratio {
        base * assumptions.churn_healthy_multiplier
    } else if ltv_cac_ratio >= assumptions.viable_ratio {
        base
    } else {
        base * assumptions.churn_strained_multiplier
    }
}

/// Months of runway under the fixed assumption that cash reserves equal
/// `reserve_multiple` times current burn. With reserves defined that way
/// the burn cancels out, so any positive total yields the multiple itself;
/// zero burn yields zero.
pub fn runway_months(total_cost: f64, assumptions: &ModelAssumptions) -> u32 {
    if total_cost > 0.0 {
        ((total_cost * assumptions.reserve_multiple) / total_cost).floor() as u32
    } else {
        0
    }
}

fn tier_members(tier: &PricingTier, per_tier_members: Option<&OrdMap<String, f64>>) -> f64 {
    per_tier_members
        .and_then(|m| m.get(&tier.id).copied())
        .or(tier.members)
        .filter(|m| m.is_finite() && *m > 0.0)
        .unwrap_or(0.0)
}
