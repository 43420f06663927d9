//! Error types for breathe.

use thiserror::Error;

/// Errors produced by the breathe library and CLI.
#[derive(Debug, Error)]
pub enum BreatheError {
    /// A breathing pattern failed validation.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// An operation needed a pattern but none has been started.
    #[error("No breathing pattern has been started")]
    NoPattern,

    /// A requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration could not be read, parsed, or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session history database failure.
    #[error("Database error: {0}")]
    Database(String),

    /// A presenter could not perform an effect.
    #[error("Presenter error: {0}")]
    Presenter(String),

    /// A command-line argument was malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Terminal setup or drawing failed.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BreatheError {
    /// Whether the error came from bad user input rather than the environment.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPattern(_) | Self::NotFound(_) | Self::InvalidArgument(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BreatheError::InvalidPattern("repetitions must be at least 1".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid pattern: repetitions must be at least 1"
        );
        assert_eq!(
            BreatheError::NotFound("Pattern 'x'".to_string()).to_string(),
            "Not found: Pattern 'x'"
        );
    }

    #[test]
    fn test_is_user_error() {
        assert!(BreatheError::InvalidArgument("x".to_string()).is_user_error());
        assert!(!BreatheError::Database("x".to_string()).is_user_error());
        assert!(!BreatheError::NoPattern.is_user_error());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: BreatheError = io.into();
        assert!(matches!(err, BreatheError::Io(_)));
    }
}
