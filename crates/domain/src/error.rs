use thiserror::Error;

/// Problems turning user-entered text into position parameters.
///
/// None of these are fatal: the caller keeps the previous value and
/// reports the error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{field}: '{input}' is not a number")]
    InvalidNumber { field: &'static str, input: String },

    #[error("{field}: '{input}' is not a whole, non-negative number of days")]
    InvalidDays { field: &'static str, input: String },

    #[error("unknown field '{0}'")]
    UnknownField(String),
}

pub type Result<T> = std::result::Result<T, InputError>;
