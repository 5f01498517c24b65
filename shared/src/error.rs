//! Error types for the inventory core

use thiserror::Error;

/// Errors raised while parsing records or deriving dashboard figures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A record field could not be parsed or holds an invalid value
    #[error("Invalid {field}: {message}")]
    DataFormat { field: String, message: String },

    /// Trend requested over a series whose first observation is zero
    #[error("Trend is undefined for a zero baseline")]
    DivisionByZero,

    /// Trend requested over a series with no observations
    #[error("Trend is undefined for an empty series")]
    EmptySeries,
}

impl CoreError {
    pub fn data_format(field: impl Into<String>, message: impl Into<String>) -> Self {
        CoreError::DataFormat {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the offending field, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            CoreError::DataFormat { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
