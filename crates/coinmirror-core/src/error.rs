use thiserror::Error;

/// Validation and contract errors exposed by `coinmirror-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("coin id cannot be empty")]
    EmptyCoinId,
    #[error("coin id length {len} exceeds max {max}")]
    CoinIdTooLong { len: usize, max: usize },
    #[error("coin id contains invalid character '{ch}' at index {index}")]
    CoinIdInvalidChar { ch: char, index: usize },

    #[error("record id cannot be empty")]
    EmptyRecordId,

    #[error("currency must be a lowercase alphabetic code: '{value}'")]
    InvalidCurrency { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },
    #[error("timestamp {millis}ms is outside the representable range")]
    TimestampOutOfRange { millis: i64 },

    #[error("entity count must be greater than zero")]
    ZeroEntityCount,
    #[error("batch size must be greater than zero")]
    ZeroBatchSize,
    #[error("page size must be greater than zero")]
    ZeroPageSize,
    #[error("lookback days must be greater than zero")]
    ZeroLookbackDays,
    #[error("rotation period must be between 1 and 24 hours: {value}")]
    InvalidRotationPeriod { value: u32 },
    #[error("collection id cannot be empty")]
    EmptyCollectionId,
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
