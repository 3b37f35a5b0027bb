pub mod concentrated_liquidity;

pub use concentrated_liquidity::{
    bundle_value, compute_future_amounts, compute_initial_stables, compute_liquidity,
};
