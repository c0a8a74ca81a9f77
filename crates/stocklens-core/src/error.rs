use thiserror::Error;

/// Validation and contract errors exposed by `stocklens-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,

    #[error("invalid period '{value}', expected one of 1mo, 3mo, 6mo, 1y, 2y, 5y")]
    InvalidPeriod { value: String },
    #[error("invalid source '{value}', expected one of yahoo, sample")]
    InvalidSource { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("price series must be in chronological order (point {index})")]
    UnorderedSeries { index: usize },
}
