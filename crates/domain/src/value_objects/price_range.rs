use crate::enums::RangeRegion;
use serde::{Deserialize, Serialize};

/// Price bounds of a concentrated liquidity position, quoted as stable per
/// volatile.
///
/// Membership is half-open: `lower <= price < upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub lower_price: f64,
    pub upper_price: f64,
}

impl PriceRange {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self {
            lower_price: lower,
            upper_price: upper,
        }
    }

    /// Classifies `price` against the range.
    ///
    /// A `NaN` price compares false everywhere and lands in range, so the
    /// in-range formulas propagate it.
    pub fn region(&self, price: f64) -> RangeRegion {
        if price < self.lower_price {
            RangeRegion::Below
        } else if price >= self.upper_price {
            RangeRegion::Above
        } else {
            RangeRegion::InRange
        }
    }

    pub fn contains(&self, price: f64) -> bool {
        self.region(price) == RangeRegion::InRange
    }

    /// Whether the bounds are ordered and strictly positive.
    pub fn is_well_formed(&self) -> bool {
        self.lower_price > 0.0 && self.lower_price < self.upper_price
    }

    /// Width of the range relative to `reference`, as a fraction.
    pub fn width_pct(&self, reference: f64) -> f64 {
        (self.upper_price - self.lower_price) / reference
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_is_half_open() {
        let range = PriceRange::new(90.0, 110.0);

        assert_eq!(range.region(89.99), RangeRegion::Below);
        assert_eq!(range.region(90.0), RangeRegion::InRange);
        assert_eq!(range.region(109.99), RangeRegion::InRange);
        assert_eq!(range.region(110.0), RangeRegion::Above);
        assert!(range.contains(100.0));
        assert!(!range.contains(110.0));
    }

    #[test]
    fn test_well_formed() {
        assert!(PriceRange::new(90.0, 110.0).is_well_formed());
        assert!(!PriceRange::new(110.0, 90.0).is_well_formed());
        assert!(!PriceRange::new(0.0, 90.0).is_well_formed());
    }

    #[test]
    fn test_width_pct() {
        let range = PriceRange::new(90.0, 110.0);
        assert!((range.width_pct(100.0) - 0.2).abs() < 1e-12);
    }
}
