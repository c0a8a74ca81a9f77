use thiserror::Error;

use stocklens_core::{AnalyzeError, HttpError, ValidationError};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Analyze(#[from] AnalyzeError),

    #[error("provider setup failed: {0}")]
    Setup(#[from] HttpError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) | Self::Analyze(AnalyzeError::Validation(_)) => 2,
            Self::Analyze(_) => 4,
            Self::Setup(_) | Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_exit_with_two() {
        let error = CliError::from(ValidationError::EmptyTicker);
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn analysis_errors_exit_with_four() {
        let error = CliError::from(AnalyzeError::Fetch(
            stocklens_core::ProviderError::unavailable("offline"),
        ));
        assert_eq!(error.exit_code(), 4);
    }
}
