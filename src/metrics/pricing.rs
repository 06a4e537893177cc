//! Pricing tiers and monthly-equivalent price derivation.

use serde::{Deserialize, Serialize};

use crate::config::ModelAssumptions;

/// Months a lifetime purchase is amortized over (5 years).
pub const LIFETIME_AMORTIZATION_MONTHS: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    Monthly,
    Annual,
    Lifetime,
}

/// A named price point with a billing period. Member counts are supplied
/// externally per tier; a tier without one contributes nothing to MRR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingTier {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub billing_period: BillingPeriod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<f64>,
}

impl PricingTier {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64, billing_period: BillingPeriod) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            billing_period,
            members: None,
        }
    }

    /// Monthly-equivalent price of this tier.
    pub fn monthly_equivalent(&self) -> f64 {
        match self.billing_period {
            BillingPeriod::Monthly => self.price,
            BillingPeriod::Annual => self.price / 12.0,
            BillingPeriod::Lifetime => self.price / LIFETIME_AMORTIZATION_MONTHS,
        }
    }
}

/// Monthly price of the active tier, falling back to the first tier and
/// finally the configured default price when nothing resolves.
pub fn active_monthly_price(
    tiers: &[PricingTier],
    active_tier_id: Option<&str>,
    assumptions: &ModelAssumptions,
) -> f64 {
    active_tier_id
        .and_then(|id| tiers.iter().find(|t| t.id == id))
        .or_else(|| tiers.first())
        .map(PricingTier::monthly_equivalent)
        .unwrap_or(assumptions.default_monthly_price)
}
