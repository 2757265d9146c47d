use thiserror::Error;

use crate::data_source::ProviderError;

/// Validation and contract errors exposed by `pricesheet-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("no symbols to fetch: enter at least one symbol per line")]
    EmptySymbolList,

    #[error("date must be an ISO calendar date (yyyy-MM-dd): '{value}'")]
    InvalidDate { value: String },
    #[error("UTC offset must look like +05:30 or -04:00: '{value}'")]
    InvalidUtcOffset { value: String },
    #[error("start date {start} is after end date {end}")]
    InvertedRange { start: String, end: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("series for '{symbol}' contains date {date} more than once")]
    DuplicateDate { symbol: String, date: String },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
