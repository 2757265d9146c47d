use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] pricesheet_core::ValidationError),

    #[error(transparent)]
    Provider(#[from] pricesheet_core::ProviderError),

    #[error("strict mode failed: {warning_count} warning(s)")]
    StrictModeViolation { warning_count: usize },

    #[error(transparent)]
    Core(#[from] pricesheet_core::CoreError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Provider(_) => 3,
            Self::Core(_) | Self::Serialization(_) => 4,
            Self::StrictModeViolation { .. } => 5,
            Self::Io(_) => 10,
        }
    }
}
