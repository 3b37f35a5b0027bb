use serde::{Deserialize, Serialize};
use std::fmt;

/// Which strategy comes out ahead once yield is accounted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    /// Providing liquidity beats holding.
    LP,
    /// Holding the initial assets beats providing liquidity.
    HODL,
}

impl Recommendation {
    /// `LP` only when the yield-adjusted PnL is strictly positive.
    /// A `NaN` PnL recommends holding.
    pub fn from_pnl(pnl_after_yield: f64) -> Self {
        if pnl_after_yield > 0.0 {
            Self::LP
        } else {
            Self::HODL
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LP => write!(f, "LP"),
            Self::HODL => write!(f, "HODL"),
        }
    }
}

/// Where a price sits relative to a position's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeRegion {
    /// Below the lower bound: the position is entirely volatile.
    Below,
    /// Between the bounds: the position holds both tokens.
    InRange,
    /// At or above the upper bound: the position is entirely stable.
    Above,
}

impl RangeRegion {
    /// Machine-readable name, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Below => "below",
            Self::InRange => "in_range",
            Self::Above => "above",
        }
    }
}

impl fmt::Display for RangeRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Below => write!(f, "below range"),
            Self::InRange => write!(f, "in range"),
            Self::Above => write!(f, "above range"),
        }
    }
}
