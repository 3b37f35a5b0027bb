//! Position parameters and the derived LP-versus-HODL outcome.

use crate::enums::{RangeRegion, Recommendation};
use crate::math::concentrated_liquidity::{
    bundle_value, compute_future_amounts, compute_initial_stables, compute_liquidity,
};
use crate::metrics::fees::compute_yield;
use crate::metrics::impermanent_loss::{ComparisonInputs, compute_comparison};
use crate::value_objects::price_range::PriceRange;
use serde::{Deserialize, Serialize};

/// Inputs describing a single-sided volatile deposit into a concentrated
/// liquidity range.
///
/// `lower_tick < initial_price < upper_tick` and
/// `days_out_of_range <= days_in_future` are expected but not enforced;
/// violating them produces meaningless but non-panicking results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionParameters {
    /// Price of the volatile asset at deposit time.
    pub initial_price: f64,
    /// Quantity of the volatile asset deposited.
    pub initial_amount: f64,
    /// Upper price bound of the range.
    pub upper_tick: f64,
    /// Lower price bound of the range.
    pub lower_tick: f64,
    /// Annualized fee yield in decimal form (5.978 = 597.8%).
    pub estimated_apr: f64,
    pub future_price: f64,
    pub days_in_future: u32,
    pub days_out_of_range: u32,
}

impl Default for PositionParameters {
    fn default() -> Self {
        Self {
            initial_price: 2223.24,
            initial_amount: 0.213342,
            upper_tick: 2331.25,
            lower_tick: 2109.22,
            estimated_apr: 5.978,
            future_price: 2223.24,
            days_in_future: 7,
            days_out_of_range: 0,
        }
    }
}

impl PositionParameters {
    pub fn range(&self) -> PriceRange {
        PriceRange::new(self.lower_tick, self.upper_tick)
    }

    /// Same position evaluated at another future price.
    #[must_use]
    pub fn with_future_price(mut self, future_price: f64) -> Self {
        self.future_price = future_price;
        self
    }

    #[must_use]
    pub fn with_days(mut self, days_in_future: u32, days_out_of_range: u32) -> Self {
        self.days_in_future = days_in_future;
        self.days_out_of_range = days_out_of_range;
        self
    }

    /// Derives the full position outcome.
    pub fn compute(&self) -> DerivedPosition {
        compute(self)
    }
}

/// Quantities derived from a [`PositionParameters`] set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedPosition {
    pub liquidity: f64,
    pub initial_stables_needed: f64,
    /// Deposit value at the initial price, both legs included.
    pub initial_value: f64,
    pub future_amount_volatile: f64,
    pub future_amount_stable: f64,
    pub future_value: f64,
    pub future_value_with_interest: f64,
    pub value_if_held: f64,
    pub value_if_lp: f64,
    pub lp_yield: f64,
    pub effective_apr: f64,
    pub estimated_interest: f64,
    pub impermanent_loss_dollars: f64,
    pub impermanent_loss_percent: f64,
    pub pnl_after_yield_dollars: f64,
    pub pnl_after_yield_percent: f64,
    pub range_region: RangeRegion,
    pub recommendation: Recommendation,
}

/// Recomputes every derived quantity from scratch.
pub fn compute(params: &PositionParameters) -> DerivedPosition {
    let liquidity = compute_liquidity(
        params.initial_amount,
        params.initial_price,
        params.upper_tick,
    );
    let initial_stables_needed =
        compute_initial_stables(liquidity, params.initial_price, params.lower_tick);
    let initial_value = bundle_value(
        params.initial_amount,
        initial_stables_needed,
        params.initial_price,
    );

    let (future_amount_volatile, future_amount_stable) = compute_future_amounts(
        liquidity,
        params.future_price,
        params.lower_tick,
        params.upper_tick,
    );

    let accrual = compute_yield(
        params.days_in_future,
        params.days_out_of_range,
        params.estimated_apr,
    );

    let comparison = compute_comparison(&ComparisonInputs {
        initial_amount: params.initial_amount,
        initial_stables_needed,
        future_price: params.future_price,
        future_amount_volatile,
        future_amount_stable,
        lp_yield: accrual.lp_yield,
    });

    let future_value = comparison.value_if_lp;

    DerivedPosition {
        liquidity,
        initial_stables_needed,
        initial_value,
        future_amount_volatile,
        future_amount_stable,
        future_value,
        future_value_with_interest: future_value + comparison.estimated_interest,
        value_if_held: comparison.value_if_held,
        value_if_lp: comparison.value_if_lp,
        lp_yield: accrual.lp_yield,
        effective_apr: accrual.effective_apr,
        estimated_interest: comparison.estimated_interest,
        impermanent_loss_dollars: comparison.impermanent_loss_dollars,
        impermanent_loss_percent: comparison.impermanent_loss_percent,
        pnl_after_yield_dollars: comparison.pnl_after_yield_dollars,
        pnl_after_yield_percent: comparison.pnl_after_yield_percent,
        range_region: params.range().region(params.future_price),
        recommendation: comparison.recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_scenario_no_price_change() {
        let params = PositionParameters::default();
        let derived = compute(&params);

        assert!((derived.future_amount_volatile - params.initial_amount).abs() < 1e-9);
        assert!(derived.impermanent_loss_dollars.abs() < 1e-6);
        assert!(derived.impermanent_loss_percent.abs() < 1e-9);
        assert!((derived.lp_yield - 0.1147).abs() < 1e-4);
        assert!((derived.effective_apr - params.estimated_apr).abs() < 1e-9);
        assert_eq!(derived.range_region, RangeRegion::InRange);
        assert_eq!(derived.recommendation, Recommendation::LP);

        // Held and LP values coincide with the deposit value when nothing moved.
        assert!((derived.value_if_held - derived.initial_value).abs() < 1e-6);
        assert!((derived.future_value - derived.value_if_lp).abs() < 1e-12);
        assert!(
            (derived.future_value_with_interest
                - derived.future_value * (1.0 + derived.lp_yield))
                .abs()
                < 1e-9
        );
    }

    #[test]
    fn test_recommendation_consistency() {
        let base = PositionParameters::default();
        let prices = [1500.0, 2000.0, 2109.22, 2200.0, 2223.24, 2300.0, 2331.25, 2600.0];

        for price in prices {
            for apr in [0.0, 0.5, 5.978] {
                let params = PositionParameters {
                    estimated_apr: apr,
                    ..base.with_future_price(price)
                };
                let derived = compute(&params);
                assert_eq!(
                    derived.recommendation == Recommendation::LP,
                    derived.pnl_after_yield_dollars > 0.0,
                    "price {price}, apr {apr}"
                );
            }
        }
    }

    #[test]
    fn test_il_sign_for_price_moves() {
        let base = PositionParameters::default();
        for price in [1800.0, 2150.0, 2200.0, 2250.0, 2320.0, 2500.0] {
            let derived = compute(&base.with_future_price(price));
            assert!(
                derived.impermanent_loss_dollars <= 0.0,
                "IL at {price} was {}",
                derived.impermanent_loss_dollars
            );
        }
    }

    #[test]
    fn test_full_range_collapse_above_upper() {
        let params = PositionParameters::default().with_future_price(2400.0);
        let derived = compute(&params);

        assert_eq!(derived.future_amount_volatile, 0.0);
        assert_eq!(derived.range_region, RangeRegion::Above);
    }

    #[test]
    fn test_below_range_all_volatile() {
        let params = PositionParameters::default().with_future_price(2000.0);
        let derived = compute(&params);

        assert_eq!(derived.future_amount_stable, 0.0);
        assert!(derived.future_amount_volatile > params.initial_amount);
        assert_eq!(derived.range_region, RangeRegion::Below);
    }

    #[test]
    fn test_zero_days_does_not_panic() {
        let params = PositionParameters::default().with_days(0, 0);
        let derived = compute(&params);

        assert_eq!(derived.effective_apr, 0.0);
        assert_eq!(derived.lp_yield, 0.0);
        assert_eq!(derived.estimated_interest, 0.0);
    }

    #[test]
    fn test_degenerate_inputs_propagate() {
        let params = PositionParameters {
            upper_tick: 2223.24,
            ..PositionParameters::default()
        };
        let derived = compute(&params);
        assert!(!derived.liquidity.is_finite());

        let params = PositionParameters {
            initial_amount: 0.0,
            ..PositionParameters::default()
        };
        let derived = compute(&params);
        assert_eq!(derived.value_if_held, 0.0);
        assert!(derived.impermanent_loss_percent.is_nan());
        assert_eq!(derived.recommendation, Recommendation::HODL);
    }

    #[test]
    fn test_params_deserialize_with_defaults() {
        let json = r#"{ "future_price": 2400.0, "days_in_future": 30 }"#;
        let params: PositionParameters = serde_json::from_str(json).unwrap();

        assert_eq!(params.future_price, 2400.0);
        assert_eq!(params.days_in_future, 30);
        assert_eq!(params.initial_price, 2223.24);
    }
}
