//! Scenario-to-scenario comparison for the dashboard's comparison view.

use serde::{Deserialize, Serialize};

use crate::config::ModelAssumptions;
use crate::metrics::economics::{unit_economics, UnitEconomics};
use crate::model::normalize::normalize;
use crate::scenario::Scenario;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricDirection {
    Improved,
    Regressed,
    Unchanged,
}

/// One metric's movement between two scenarios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDelta {
    pub metric: String,
    pub before: f64,
    pub after: f64,
    pub change: f64,
    /// Percentage change relative to `before`; 0 when `before` is 0.
    pub change_pct: f64,
    pub direction: MetricDirection,
}

/// The comparison view's data: per-metric deltas plus a one-line summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioComparison {
    pub before_name: String,
    pub after_name: String,
    pub deltas: Vec<MetricDelta>,
    pub summary: String,
}

// Whether a metric improves when it goes down.
enum Polarity {
    LowerIsBetter,
    HigherIsBetter,
}

const EPSILON: f64 = 1e-9;

/// Compare two scenarios metric by metric. The active tier for each side
/// is its first pricing tier; member counts come from the tiers themselves.
pub fn compare_scenarios(
    before: &Scenario,
    after: &Scenario,
    assumptions: &ModelAssumptions,
) -> ScenarioComparison {
    let before_metrics = scenario_metrics(before, assumptions);
    let after_metrics = scenario_metrics(after, assumptions);

    let deltas = vec![
        delta("totalCost", before_metrics.total_cost, after_metrics.total_cost, Polarity::LowerIsBetter),
        delta(
            "breakevenMembers",
            before_metrics.breakeven.members as f64,
            after_metrics.breakeven.members as f64,
            Polarity::LowerIsBetter,
        ),
        delta("mrr", before_metrics.mrr, after_metrics.mrr, Polarity::HigherIsBetter),
        delta("cac", before_metrics.cac, after_metrics.cac, Polarity::LowerIsBetter),
        delta("ltv", before_metrics.ltv, after_metrics.ltv, Polarity::HigherIsBetter),
        delta(
            "ltvCacRatio",
            before_metrics.ltv_cac_ratio,
            after_metrics.ltv_cac_ratio,
            Polarity::HigherIsBetter,
        ),
        delta(
            "churnRatePct",
            before_metrics.churn_rate_pct,
            after_metrics.churn_rate_pct,
            Polarity::LowerIsBetter,
        ),
        delta(
            "retentionRatePct",
            before_metrics.retention_rate_pct,
            after_metrics.retention_rate_pct,
            Polarity::HigherIsBetter,
        ),
    ];

    let improved = deltas.iter().filter(|d| d.direction == MetricDirection::Improved).count();
    let regressed = deltas.iter().filter(|d| d.direction == MetricDirection::Regressed).count();
    let summary = format!(
        "{} vs {}: {improved} metrics improved, {regressed} regressed",
        after.name, before.name
    );

    ScenarioComparison {
        before_name: before.name.clone(),
        after_name: after.name.clone(),
        deltas,
        summary,
    }
}

fn scenario_metrics(scenario: &Scenario, assumptions: &ModelAssumptions) -> UnitEconomics {
    let doc = normalize(&scenario.cost_data);
    let active = scenario.pricing_data.first().map(|t| t.id.clone());
    unit_economics(&doc, &scenario.pricing_data, active.as_deref(), None, assumptions)
}

fn delta(metric: &str, before: f64, after: f64, polarity: Polarity) -> MetricDelta {
    let change = after - before;
    let change_pct = if before.abs() > EPSILON {
        change / before * 100.0
    } else {
        0.0
    };
    let direction = if change.abs() <= EPSILON {
        MetricDirection::Unchanged
    } else {
        let better = match polarity {
            Polarity::LowerIsBetter => change < 0.0,
            Polarity::HigherIsBetter => change > 0.0,
        };
        if better {
            MetricDirection::Improved
        } else {
            MetricDirection::Regressed
        }
    };
    MetricDelta {
        metric: metric.to_string(),
        before,
        after,
        change,
        change_pct,
        direction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::pricing::{BillingPeriod, PricingTier};
    use crate::model::value::DocValue;
    use chrono::Utc;

    fn scenario(name: &str, rent: f64) -> Scenario {
        let cost_data: DocValue = serde_json::from_str(&format!(
            r#"{{"operations": {{"items": {{"rent": {{"value": {rent}, "enabled": true}}}}}}}}"#
        ))
        .unwrap();
        let mut tier = PricingTier::new("basic", "Basic", 49.0, BillingPeriod::Monthly);
        tier.members = Some(100.0);
        let now = Utc::now();
        Scenario {
            id: name.to_lowercase(),
            name: name.to_string(),
            description: String::new(),
            cost_data,
            pricing_data: vec![tier],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn lower_cost_reads_as_improvement() {
        let comparison = compare_scenarios(
            &scenario("Base", 8000.0),
            &scenario("Lean", 5000.0),
            &ModelAssumptions::default(),
        );
        let total = comparison.deltas.iter().find(|d| d.metric == "totalCost").unwrap();
        assert_eq!(total.direction, MetricDirection::Improved);
        assert_eq!(total.change, -3000.0);
        assert_eq!(total.change_pct, -37.5);

        let breakeven = comparison
            .deltas
            .iter()
            .find(|d| d.metric == "breakevenMembers")
            .unwrap();
        assert_eq!(breakeven.direction, MetricDirection::Improved);
    }

    #[test]
    fn identical_scenarios_compare_unchanged() {
        let comparison = compare_scenarios(
            &scenario("Base", 8000.0),
            &scenario("Copy", 8000.0),
            &ModelAssumptions::default(),
        );
        assert!(comparison
            .deltas
            .iter()
            .all(|d| d.direction == MetricDirection::Unchanged));
        assert!(comparison.summary.contains("0 metrics improved"));
    }
}
