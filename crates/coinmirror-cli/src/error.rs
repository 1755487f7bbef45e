use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] coinmirror_core::ValidationError),

    #[error("missing required environment variable {name}")]
    MissingEnv { name: &'static str },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Sync(#[from] coinmirror_sync::SyncError),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::MissingEnv { .. } => 2,
            Self::Serialization(_) => 4,
            Self::Sync(_) => 10,
        }
    }
}
