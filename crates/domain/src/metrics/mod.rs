pub mod fees;
pub mod impermanent_loss;

pub use fees::{YieldAccrual, compute_yield};
pub use impermanent_loss::{Comparison, ComparisonInputs, compute_comparison, il_constant_product};
