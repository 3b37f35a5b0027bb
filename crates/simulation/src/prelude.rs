//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use btb_calc_simulation::prelude::*;
//! ```

// Chart sampling
pub use crate::price_chart::{
    ChartConfig, ChartPoint, ChartSeries, chart_point, sample_chart, sample_path,
};

// Monte Carlo
pub use crate::monte_carlo::{OutlookConfig, OutlookSummary, PathOutcome, run_outlook};

// Price path generators
pub use crate::price_path::{
    DeterministicPricePath, GeometricBrownianMotion, LinearPriceGrid, PricePathGenerator,
};
