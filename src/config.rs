use serde::{Deserialize, Serialize};

/// Unit-economics modeling assumptions.
///
/// Every knob here is a product-level modeling constant, not a tuning
/// parameter derived from data. Defaults match the dashboard's shipped
/// behavior; a hosting application may deserialize overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelAssumptions {
    /// Fallback monthly price when no pricing tier resolves
    #[serde(default = "default_monthly_price")]
    pub default_monthly_price: f64,

    /// Share of the existing member base acquired per month (0.0-1.0)
    #[serde(default = "default_acquisition_rate")]
    pub acquisition_rate: f64,

    /// Average customer lifetime in months, used for LTV
    #[serde(default = "default_lifetime_months")]
    pub lifetime_months: f64,

    /// Baseline monthly churn percentage
    #[serde(default = "default_base_churn")]
    pub base_churn_pct: f64,

    /// LTV:CAC ratio at or above which churn is scaled down
    #[serde(default = "default_healthy_ratio")]
    pub healthy_ratio: f64,

    /// LTV:CAC ratio at or above which churn stays at baseline
    #[serde(default = "default_viable_ratio")]
    pub viable_ratio: f64,

    /// Churn multiplier applied at a healthy LTV:CAC ratio
    #[serde(default = "default_churn_healthy_multiplier")]
    pub churn_healthy_multiplier: f64,

    /// Churn multiplier applied below the viable LTV:CAC ratio
    #[serde(default = "default_churn_strained_multiplier")]
    pub churn_strained_multiplier: f64,

    /// Cash reserves expressed as a multiple of current monthly burn
    #[serde(default = "default_reserve_multiple")]
    pub reserve_multiple: f64,
}

impl Default for ModelAssumptions {
    fn default() -> Self {
        Self {
            default_monthly_price: default_monthly_price(),
            acquisition_rate: default_acquisition_rate(),
            lifetime_months: default_lifetime_months(),
            base_churn_pct: default_base_churn(),
            healthy_ratio: default_healthy_ratio(),
            viable_ratio: default_viable_ratio(),
            churn_healthy_multiplier: default_churn_healthy_multiplier(),
            churn_strained_multiplier: default_churn_strained_multiplier(),
            reserve_multiple: default_reserve_multiple(),
        }
    }
}

fn default_monthly_price() -> f64 {
    49.0
}
fn default_acquisition_rate() -> f64 {
    0.10 // 10% of the base joins each month
}
fn default_lifetime_months() -> f64 {
    24.0 // 24-month average lifetime
}
fn default_base_churn() -> f64 {
    5.0
}
fn default_healthy_ratio() -> f64 {
    3.0
}
fn default_viable_ratio() -> f64 {
    2.0
}
fn default_churn_healthy_multiplier() -> f64 {
    0.8
}
fn default_churn_strained_multiplier() -> f64 {
    1.2
}
fn default_reserve_multiple() -> f64 {
    18.0
}

/// Assumptions for the synthetic chart projections.
///
/// These series are presentation-oriented, not forecasts; the constants
/// are configuration rather than logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionAssumptions {
    /// Compounding monthly member growth (0.08 = 8% per month)
    #[serde(default = "default_monthly_growth")]
    pub monthly_growth: f64,

    /// Member base the projection starts from
    #[serde(default = "default_base_members")]
    pub base_members: f64,

    /// Share of members allocated to each pricing tier, in tier order.
    /// Tiers beyond the allocation table receive zero members.
    #[serde(default = "default_tier_allocation")]
    pub tier_allocation: Vec<f64>,

    /// One-time revenue as a share of MRR
    #[serde(default = "default_one_time_share")]
    pub one_time_share: f64,

    /// Compounding monthly cost growth, display only
    #[serde(default = "default_cost_growth")]
    pub cost_growth: f64,

    /// Shortest projection horizon in months
    #[serde(default = "default_min_horizon")]
    pub min_horizon: u32,

    /// Longest projection horizon in months
    #[serde(default = "default_max_horizon")]
    pub max_horizon: u32,
}

impl Default for ProjectionAssumptions {
    fn default() -> Self {
        Self {
            monthly_growth: default_monthly_growth(),
            base_members: default_base_members(),
            tier_allocation: default_tier_allocation(),
            one_time_share: default_one_time_share(),
            cost_growth: default_cost_growth(),
            min_horizon: default_min_horizon(),
            max_horizon: default_max_horizon(),
        }
    }
}

impl ProjectionAssumptions {
    /// Clamp a requested horizon into the supported range.
    pub fn clamp_horizon(&self, months: u32) -> u32 {
        months.clamp(self.min_horizon, self.max_horizon)
    }
}

fn default_monthly_growth() -> f64 {
    0.08
}
fn default_base_members() -> f64 {
    150.0
}
fn default_tier_allocation() -> Vec<f64> {
    vec![0.40, 0.35, 0.20, 0.05]
}
fn default_one_time_share() -> f64 {
    0.10
}
fn default_cost_growth() -> f64 {
    0.02
}
fn default_min_horizon() -> u32 {
    6
}
fn default_max_horizon() -> u32 {
    24
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_behavior() {
        let model = ModelAssumptions::default();
        assert_eq!(model.default_monthly_price, 49.0);
        assert_eq!(model.acquisition_rate, 0.10);
        assert_eq!(model.lifetime_months, 24.0);
        assert_eq!(model.reserve_multiple, 18.0);

        let proj = ProjectionAssumptions::default();
        assert_eq!(proj.monthly_growth, 0.08);
        assert_eq!(proj.base_members, 150.0);
        assert_eq!(proj.tier_allocation, vec![0.40, 0.35, 0.20, 0.05]);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let model: ModelAssumptions = serde_json::from_str(r#"{"acquisition_rate": 0.2}"#).unwrap();
        assert_eq!(model.acquisition_rate, 0.2);
        assert_eq!(model.default_monthly_price, 49.0);
    }

    #[test]
    fn horizon_clamps_to_supported_range() {
        let proj = ProjectionAssumptions::default();
        assert_eq!(proj.clamp_horizon(3), 6);
        assert_eq!(proj.clamp_horizon(12), 12);
        assert_eq!(proj.clamp_horizon(48), 24);
    }
}
