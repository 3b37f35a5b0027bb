//! Closed-form concentrated liquidity formulas.
//!
//! Prices are quoted as stable per volatile. The volatile asset plays the
//! role of token0 (x) and the stable asset the role of token1 (y).
//!
//! None of these functions reject degenerate inputs: a range whose upper
//! bound sits at or below the deposit price, a negative radicand or a zero
//! denominator simply yields `NaN` or an infinity, which the caller is
//! expected to carry through to display.

use crate::enums::RangeRegion;
use crate::value_objects::price_range::PriceRange;

/// Liquidity for a deposit of `initial_amount` volatile tokens at
/// `initial_price`, with the position's upper bound at `upper_tick`.
///
/// L = amount * (sqrt(P) * sqrt(P_b)) / (sqrt(P_b) - sqrt(P))
pub fn compute_liquidity(initial_amount: f64, initial_price: f64, upper_tick: f64) -> f64 {
    let sqrt_price = initial_price.sqrt();
    let sqrt_upper = upper_tick.sqrt();

    initial_amount * (sqrt_price * sqrt_upper) / (sqrt_upper - sqrt_price)
}

/// Stable tokens that must be paired with the volatile deposit.
///
/// y = L * (sqrt(P) - sqrt(P_a))
///
/// Negative when `lower_tick > initial_price`.
pub fn compute_initial_stables(liquidity: f64, initial_price: f64, lower_tick: f64) -> f64 {
    liquidity * (initial_price.sqrt() - lower_tick.sqrt())
}

/// Volatile and stable holdings of a position with `liquidity` once the
/// price reaches `future_price`.
///
/// The range is half-open, `[lower_tick, upper_tick)`, for both amounts:
/// at exactly `upper_tick` the position is entirely stable, at exactly
/// `lower_tick` it is still in range with a zero stable leg.
pub fn compute_future_amounts(
    liquidity: f64,
    future_price: f64,
    lower_tick: f64,
    upper_tick: f64,
) -> (f64, f64) {
    let sqrt_lower = lower_tick.sqrt();
    let sqrt_upper = upper_tick.sqrt();

    match PriceRange::new(lower_tick, upper_tick).region(future_price) {
        RangeRegion::Below => {
            let volatile = liquidity * (sqrt_upper - sqrt_lower) / (sqrt_lower * sqrt_upper);
            (volatile, 0.0)
        }
        RangeRegion::Above => (0.0, liquidity * (sqrt_upper - sqrt_lower)),
        RangeRegion::InRange => {
            let sqrt_future = future_price.sqrt();
            let volatile = liquidity * (sqrt_upper - sqrt_future) / (sqrt_future * sqrt_upper);
            let stable = liquidity * (sqrt_future - sqrt_lower);
            (volatile, stable)
        }
    }
}

/// Value, in stable units, of a `(volatile, stable)` bundle at `price`.
pub fn bundle_value(volatile: f64, stable: f64, price: f64) -> f64 {
    volatile * price + stable
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOWER: f64 = 2109.22;
    const UPPER: f64 = 2331.25;
    const ENTRY: f64 = 2223.24;
    const AMOUNT: f64 = 0.213342;

    fn liquidity() -> f64 {
        compute_liquidity(AMOUNT, ENTRY, UPPER)
    }

    #[test]
    fn test_liquidity_matches_textbook_ratio() {
        // Price 1 -> 4 (sqrt 1 -> 2). 500 of token0 over [1, 4] is L = 1000.
        let l = compute_liquidity(500.0, 1.0, 4.0);
        assert!((l - 1000.0).abs() < 1e-9);

        let stables = compute_initial_stables(l, 4.0, 1.0);
        assert!((stables - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_liquidity_degenerate_upper_bound() {
        let l = compute_liquidity(1.0, 100.0, 100.0);
        assert!(l.is_infinite());

        let l = compute_liquidity(1.0, 100.0, 81.0);
        assert!(l < 0.0);
    }

    #[test]
    fn test_initial_stables_negative_when_lower_above_entry() {
        let stables = compute_initial_stables(1000.0, 100.0, 121.0);
        assert!((stables + 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_future_amounts_at_entry_reproduce_deposit() {
        let l = liquidity();
        let (volatile, stable) = compute_future_amounts(l, ENTRY, LOWER, UPPER);

        assert!((volatile - AMOUNT).abs() < 1e-9);
        assert!((stable - compute_initial_stables(l, ENTRY, LOWER)).abs() < 1e-9);
    }

    #[test]
    fn test_future_amounts_monotonic_in_range() {
        let l = liquidity();
        let mut previous = compute_future_amounts(l, LOWER, LOWER, UPPER);

        let steps = 50;
        for i in 1..steps {
            let price = LOWER + (UPPER - LOWER) * i as f64 / steps as f64;
            let current = compute_future_amounts(l, price, LOWER, UPPER);
            assert!(current.0 < previous.0, "volatile must fall at {price}");
            assert!(current.1 > previous.1, "stable must rise at {price}");
            previous = current;
        }
    }

    #[test]
    fn test_future_amounts_continuous_at_lower_bound() {
        let l = liquidity();
        let below = compute_future_amounts(l, LOWER - 1e-9, LOWER, UPPER);
        let at = compute_future_amounts(l, LOWER, LOWER, UPPER);
        let above = compute_future_amounts(l, LOWER + 1e-9, LOWER, UPPER);

        assert_eq!(below.1, 0.0);
        assert!(at.1.abs() < 1e-12);
        assert!(above.1.abs() < 1e-6);
        assert!((below.0 - at.0).abs() < 1e-9);
        assert!((above.0 - at.0).abs() < 1e-6);
    }

    #[test]
    fn test_future_amounts_at_upper_bound() {
        let l = liquidity();
        let (volatile, stable) = compute_future_amounts(l, UPPER, LOWER, UPPER);
        assert_eq!(volatile, 0.0);

        // The in-range formula evaluated at the bound agrees with the collapsed one.
        let just_below = compute_future_amounts(l, UPPER - 1e-9, LOWER, UPPER);
        assert!(just_below.0.abs() < 1e-9);
        assert!((just_below.1 - stable).abs() < 1e-6);
    }

    #[test]
    fn test_future_amounts_collapse_above_range() {
        let l = liquidity();
        for price in [UPPER, UPPER + 0.01, 3000.0, 1.0e6] {
            let (volatile, stable) = compute_future_amounts(l, price, LOWER, UPPER);
            assert_eq!(volatile, 0.0);
            assert!((stable - l * (UPPER.sqrt() - LOWER.sqrt())).abs() < 1e-9);
        }
    }

    #[test]
    fn test_bundle_value() {
        assert_eq!(bundle_value(2.0, 50.0, 100.0), 250.0);
    }
}
