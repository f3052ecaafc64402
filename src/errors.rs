//! Error types for Suraksha
//!
//! Library code returns `SurakshaError`; the binary wraps it in `anyhow`.
//! None of these are fatal to an interactive session: callers on the
//! interactive path log them and fall back to a user-safe default.

use thiserror::Error;

/// Main error type for the Suraksha terminal
#[derive(Error, Debug)]
pub enum SurakshaError {
    /// Progress record could not be read or written
    #[error("Progress storage error at {path}: {source}")]
    Storage {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Outbound navigation could not be handed to the launcher
    #[error("Navigation to {target} failed: {reason}")]
    Navigation { target: String, reason: String },

    /// Line editor errors
    #[error("Input error: {0}")]
    InputError(String),
}

/// Result type alias for Suraksha operations
pub type Result<T> = std::result::Result<T, SurakshaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SurakshaError::Navigation {
            target: "modules/learn.html".to_string(),
            reason: "launcher missing".to_string(),
        };
        assert!(err.to_string().contains("modules/learn.html"));
        assert!(err.to_string().contains("launcher missing"));
    }

    #[test]
    fn test_storage_error_keeps_path() {
        let err = SurakshaError::Storage {
            path: "/tmp/suraksha_progress.json".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("suraksha_progress.json"));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_config_error_display() {
        let err = SurakshaError::ConfigError("hint_every must be greater than 0".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: hint_every must be greater than 0"
        );
    }
}
