//! Fee yield accrual over a holding period.

/// Days used to annualize yields.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Yield earned by the position over the horizon and the annualized rate it
/// actually achieved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldAccrual {
    /// Fraction of the position value earned in fees, e.g. 0.1147 for 11.47%.
    pub lp_yield: f64,
    /// `lp_yield` annualized over the full horizon, including out-of-range days.
    pub effective_apr: f64,
}

/// Fees only accrue on days the price spends inside the range.
///
/// lp_yield = ((days_in_future - days_out_of_range) / 365) * apr
/// effective_apr = (365 / days_in_future) * lp_yield
///
/// `effective_apr` is 0 for a zero-day horizon. More out-of-range days than
/// horizon days produce a negative yield rather than an error.
pub fn compute_yield(days_in_future: u32, days_out_of_range: u32, estimated_apr: f64) -> YieldAccrual {
    let days_earning = f64::from(days_in_future) - f64::from(days_out_of_range);
    let lp_yield = (days_earning / DAYS_PER_YEAR) * estimated_apr;

    let effective_apr = if days_in_future == 0 {
        0.0
    } else {
        (DAYS_PER_YEAR / f64::from(days_in_future)) * lp_yield
    };

    YieldAccrual {
        lp_yield,
        effective_apr,
    }
}
