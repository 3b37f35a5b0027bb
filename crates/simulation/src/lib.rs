//! Price sweeps and scenario simulation for concentrated liquidity positions.
//!
//! This crate builds on the position math in `btb-calc-domain`:
//! - Price path generators (linear grids, fixed paths, GBM)
//! - Chart sampling across a price window
//! - Monte-Carlo outlook over the position's horizon

/// Prelude module for convenient imports.
pub mod prelude;

/// Monte-Carlo outlook.
pub mod monte_carlo;
/// Chart sampling.
pub mod price_chart;
/// Price path generators.
pub mod price_path;
