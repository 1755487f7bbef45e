//! Error taxonomy for the sync layer.
//!
//! One enum per collaborator boundary; fatality is decided by the
//! orchestrator, not here. `retryable()` classifies transient failures for
//! the bounded-retry helper; only idempotent operations consult it.

use coinmirror_core::ValidationError;
use thiserror::Error;

use crate::http::HttpError;

/// Market-data provider failures.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("market data request failed with status {status}")]
    Status { status: u16 },

    #[error("market data transport error: {0}")]
    Transport(#[from] HttpError),

    #[error("market data payload decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("request budget exhausted; suggested wait {wait_secs:.2}s")]
    RateLimited { wait_secs: f64 },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ProviderError {
    pub fn retryable(&self) -> bool {
        match self {
            Self::Status { status } => *status == 429 || *status >= 500,
            Self::Transport(error) => error.retryable(),
            Self::RateLimited { .. } => true,
            Self::Decode(_) | Self::Validation(_) => false,
        }
    }
}

/// External collection (create/update/archive/list) failures.
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("collection request failed with status {status}")]
    Status { status: u16 },

    #[error("collection transport error: {0}")]
    Transport(#[from] HttpError),

    #[error("collection payload decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CollectionError {
    pub fn retryable(&self) -> bool {
        match self {
            Self::Status { status } => *status == 429 || *status >= 500,
            Self::Transport(error) => error.retryable(),
            Self::Decode(_) | Self::Validation(_) => false,
        }
    }
}

/// Chart file store failures.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("chart file i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("chart payload serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Spreadsheet mirror failures. The whole step is best-effort.
#[derive(Debug, Error)]
pub enum SpreadsheetError {
    #[error("spreadsheet request failed with status {status}")]
    Status { status: u16 },

    #[error("spreadsheet transport error: {0}")]
    Transport(#[from] HttpError),

    #[error("spreadsheet payload serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Unrecoverable setup failures that abort a whole run. Everything else is
/// tallied and skipped per item.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("ranked snapshot fetch failed: {0}")]
    Snapshot(#[source] ProviderError),

    #[error("prior record listing failed: {0}")]
    PriorRecords(#[source] CollectionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
