use crate::enums::Recommendation;
use crate::math::concentrated_liquidity::bundle_value;

/// Everything needed to compare the LP position against holding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparisonInputs {
    pub initial_amount: f64,
    pub initial_stables_needed: f64,
    pub future_price: f64,
    pub future_amount_volatile: f64,
    pub future_amount_stable: f64,
    pub lp_yield: f64,
}

/// LP versus HODL at the future price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub value_if_held: f64,
    pub value_if_lp: f64,
    pub impermanent_loss_dollars: f64,
    /// Fraction of `value_if_held`. `NaN` or infinite when nothing is held.
    pub impermanent_loss_percent: f64,
    pub estimated_interest: f64,
    pub pnl_after_yield_dollars: f64,
    pub pnl_after_yield_percent: f64,
    pub recommendation: Recommendation,
}

/// Values the initial deposit and the LP holdings at the future price and
/// nets the fee yield against the impermanent loss.
///
/// The fee yield is earned on the LP position's future value.
pub fn compute_comparison(inputs: &ComparisonInputs) -> Comparison {
    let value_if_held = bundle_value(
        inputs.initial_amount,
        inputs.initial_stables_needed,
        inputs.future_price,
    );
    let value_if_lp = bundle_value(
        inputs.future_amount_volatile,
        inputs.future_amount_stable,
        inputs.future_price,
    );

    let impermanent_loss_dollars = value_if_lp - value_if_held;
    let impermanent_loss_percent = impermanent_loss_dollars / value_if_held;

    let estimated_interest = value_if_lp * inputs.lp_yield;
    let pnl_after_yield_dollars = impermanent_loss_dollars + estimated_interest;
    let pnl_after_yield_percent = pnl_after_yield_dollars / value_if_held;

    Comparison {
        value_if_held,
        value_if_lp,
        impermanent_loss_dollars,
        impermanent_loss_percent,
        estimated_interest,
        pnl_after_yield_dollars,
        pnl_after_yield_percent,
        recommendation: Recommendation::from_pnl(pnl_after_yield_dollars),
    }
}

/// Impermanent loss of a full-range (constant product) position.
/// formula: 2 * sqrt(price_ratio) / (1 + price_ratio) - 1
///
/// Returned as a non-positive fraction, e.g. -0.0572 when the price doubles.
pub fn il_constant_product(entry_price: f64, current_price: f64) -> f64 {
    let price_ratio = current_price / entry_price;
    2.0 * price_ratio.sqrt() / (1.0 + price_ratio) - 1.0
}
