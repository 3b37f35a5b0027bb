//! Editable calculator inputs with recompute-on-change.
//!
//! Every edit goes through [`InputState::set`], which parses the text,
//! recomputes the whole [`DerivedPosition`] and notifies subscribers before
//! returning. Nothing is cached between edits.

use btb_calc_domain::error::{InputError, Result};
use btb_calc_domain::{DerivedPosition, PositionParameters, compute};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// An editable position parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    InitialPrice,
    InitialAmount,
    UpperTick,
    LowerTick,
    EstimatedApr,
    FuturePrice,
    DaysInFuture,
    DaysOutOfRange,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::InitialPrice,
        Field::InitialAmount,
        Field::UpperTick,
        Field::LowerTick,
        Field::EstimatedApr,
        Field::FuturePrice,
        Field::DaysInFuture,
        Field::DaysOutOfRange,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::InitialPrice => "initial_price",
            Field::InitialAmount => "initial_amount",
            Field::UpperTick => "upper_tick",
            Field::LowerTick => "lower_tick",
            Field::EstimatedApr => "estimated_apr",
            Field::FuturePrice => "future_price",
            Field::DaysInFuture => "days_in_future",
            Field::DaysOutOfRange => "days_out_of_range",
        }
    }

    fn is_days(&self) -> bool {
        matches!(self, Field::DaysInFuture | Field::DaysOutOfRange)
    }

    /// Current value of this field in `params`.
    pub fn get(&self, params: &PositionParameters) -> f64 {
        match self {
            Field::InitialPrice => params.initial_price,
            Field::InitialAmount => params.initial_amount,
            Field::UpperTick => params.upper_tick,
            Field::LowerTick => params.lower_tick,
            Field::EstimatedApr => params.estimated_apr,
            Field::FuturePrice => params.future_price,
            Field::DaysInFuture => f64::from(params.days_in_future),
            Field::DaysOutOfRange => f64::from(params.days_out_of_range),
        }
    }

    /// Parses `text` into a value for this field.
    ///
    /// Blank text means zero. Prices and rates must be finite numbers; day
    /// counts must be whole and non-negative.
    pub fn parse(&self, text: &str) -> Result<f64> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(0.0);
        }

        if self.is_days() {
            return text
                .parse::<u32>()
                .map(f64::from)
                .map_err(|_| InputError::InvalidDays {
                    field: self.name(),
                    input: text.to_string(),
                });
        }

        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(InputError::InvalidNumber {
                field: self.name(),
                input: text.to_string(),
            }),
        }
    }

    /// Writes an already-parsed value into `params`.
    fn apply(&self, params: &mut PositionParameters, value: f64) {
        match self {
            Field::InitialPrice => params.initial_price = value,
            Field::InitialAmount => params.initial_amount = value,
            Field::UpperTick => params.upper_tick = value,
            Field::LowerTick => params.lower_tick = value,
            Field::EstimatedApr => params.estimated_apr = value,
            Field::FuturePrice => params.future_price = value,
            // `parse` only yields whole, in-range values for day fields.
            Field::DaysInFuture => params.days_in_future = value as u32,
            Field::DaysOutOfRange => params.days_out_of_range = value as u32,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = InputError;

    /// Accepts `snake_case`, `camelCase` and `kebab-case` names, plus `apr`
    /// and `days` as shorthands.
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        let field = match key.as_str() {
            "initialprice" => Field::InitialPrice,
            "initialamount" | "amount" => Field::InitialAmount,
            "uppertick" | "upper" => Field::UpperTick,
            "lowertick" | "lower" => Field::LowerTick,
            "estimatedapr" | "apr" => Field::EstimatedApr,
            "futureprice" => Field::FuturePrice,
            "daysinfuture" | "days" => Field::DaysInFuture,
            "daysoutofrange" => Field::DaysOutOfRange,
            _ => return Err(InputError::UnknownField(s.trim().to_string())),
        };
        Ok(field)
    }
}

/// What happened to an edit.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Applied {
        field: Field,
        value: f64,
    },
    /// The text did not parse; the field kept its previous value.
    KeptPrevious {
        field: Field,
        previous: f64,
        error: InputError,
    },
}

type Observer = Box<dyn FnMut(&InputState)>;

/// The calculator's current inputs and their derived outcome.
pub struct InputState {
    params: PositionParameters,
    label: String,
    derived: DerivedPosition,
    observers: Vec<Observer>,
}

impl InputState {
    pub fn new(params: PositionParameters, label: impl Into<String>) -> Self {
        Self {
            derived: compute(&params),
            params,
            label: label.into(),
            observers: Vec::new(),
        }
    }

    pub fn params(&self) -> &PositionParameters {
        &self.params
    }

    pub fn derived(&self) -> &DerivedPosition {
        &self.derived
    }

    /// Display name of the volatile asset.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Registers a callback run after every recomputation.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&InputState) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Parses `text` into `field` and recomputes.
    ///
    /// Unparseable text keeps the previous value. The position is
    /// recomputed and observers notified either way.
    pub fn set(&mut self, field: Field, text: &str) -> FieldUpdate {
        let update = match field.parse(text) {
            Ok(value) => {
                field.apply(&mut self.params, value);
                FieldUpdate::Applied { field, value }
            }
            Err(error) => {
                let previous = field.get(&self.params);
                warn!(field = %field, error = %error, previous = previous, "Keeping previous value");
                FieldUpdate::KeptPrevious {
                    field,
                    previous,
                    error,
                }
            }
        };

        self.recompute();
        update
    }

    /// Like [`InputState::set`], resolving the field by name first.
    pub fn set_by_name(&mut self, name: &str, text: &str) -> Result<FieldUpdate> {
        let field = name.parse::<Field>()?;
        Ok(self.set(field, text))
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.notify();
    }

    /// Replaces every parameter at once.
    pub fn replace(&mut self, params: PositionParameters) {
        self.params = params;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.derived = compute(&self.params);
        debug!(
            future_price = self.params.future_price,
            pnl = self.derived.pnl_after_yield_dollars,
            recommendation = %self.derived.recommendation,
            "Recomputed position"
        );
        self.notify();
    }

    fn notify(&mut self) {
        let mut observers = std::mem::take(&mut self.observers);
        for observer in &mut observers {
            observer(self);
        }
        self.observers = observers;
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(PositionParameters::default(), "ETH")
    }
}

impl fmt::Debug for InputState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputState")
            .field("params", &self.params)
            .field("label", &self.label)
            .field("derived", &self.derived)
            .field("observers", &self.observers.len())
            .finish()
    }
}
