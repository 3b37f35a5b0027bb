//! Concentrated liquidity position math.
//!
//! This crate contains the pure, synchronous core of the calculator:
//! - Liquidity and token composition formulas for a price range
//! - Fee yield accrual over a time horizon
//! - Impermanent loss and yield-adjusted PnL against holding
//!
//! Mathematically invalid inputs never panic; they surface as `NaN` or
//! infinite values in the result.

/// Input errors.
pub mod error;
/// Shared enums.
pub mod enums;
/// Liquidity formulas.
pub mod math;
/// Yield and impermanent loss metrics.
pub mod metrics;
/// Position parameters and derived outcome.
pub mod position;
/// Value objects.
pub mod value_objects;

pub use enums::{RangeRegion, Recommendation};
pub use error::InputError;
pub use position::{DerivedPosition, PositionParameters, compute};
pub use value_objects::PriceRange;
