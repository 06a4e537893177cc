use burnmap::*;
use proptest::prelude::*;

proptest! {
    // ceiling property: breakeven revenue always covers the cost
    #[test]
    fn breakeven_revenue_covers_total_cost(
        total_cost in 0.01f64..1_000_000.0,
        monthly_price in 0.01f64..10_000.0,
    ) {
        let members = breakeven_members(total_cost, monthly_price);
        prop_assert!(members as f64 * monthly_price >= total_cost);
        // and one member fewer would not
        prop_assert!((members.saturating_sub(1)) as f64 * monthly_price < total_cost);
    }

    #[test]
    fn churn_stays_within_the_scaled_band(ratio in 0.0f64..20.0) {
        let assumptions = ModelAssumptions::default();
        let churn = churn_rate(ratio, &assumptions);
        prop_assert!(churn >= 4.0 && churn <= 6.0);
    }
}

#[test]
fn breakeven_scenario_from_the_dashboard() {
    assert_eq!(breakeven_members(49000.0, 49.0), 1000);
}

#[test]
fn zero_cost_means_no_breakeven_target() {
    assert_eq!(breakeven_members(0.0, 49.0), 0);
    let curve = breakeven_curve(0.0, 49.0);
    assert!(curve.iter().all(|p| p.costs == 0.0));
}

#[test]
fn monthly_equivalent_prices() {
    let annual = PricingTier::new("pro", "Pro", 1200.0, BillingPeriod::Annual);
    let lifetime = PricingTier::new("life", "Lifetime", 6000.0, BillingPeriod::Lifetime);
    assert_eq!(annual.monthly_equivalent(), 100.0);
    assert_eq!(lifetime.monthly_equivalent(), 100.0);
}

#[test]
fn runway_is_pinned_to_the_reserve_assumption() {
    // the formula reduces to the reserve multiple for any positive burn
    let assumptions = ModelAssumptions::default();
    for cost in [0.01, 1.0, 23_100.0, 5e8] {
        assert_eq!(runway_months(cost, &assumptions), 18);
    }
    assert_eq!(runway_months(0.0, &assumptions), 0);
}
