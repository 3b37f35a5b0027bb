//! Display layer for the position calculator.
//!
//! - Currency, percentage and amount formatting with safe placeholders
//! - Report, chart and outlook rendering (tables, CSV, JSON)
//! - Editable input state that recomputes on every change

/// Value formatting.
pub mod format;
/// Editable inputs.
pub mod input_state;
/// Report rendering.
pub mod report;

pub use format::{PLACEHOLDER, format_amount, format_currency, format_percent};
pub use input_state::{Field, FieldUpdate, InputState};
pub use report::Report;
