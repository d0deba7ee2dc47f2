//! Error types for entropy_keyphrase
//!
//! The extraction core is infallible over a well-formed document; errors only
//! arise at the edges (configuration and serialization).

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, KeyphraseError>;

/// Main error type for entropy_keyphrase
#[derive(Error, Debug, Clone)]
pub enum KeyphraseError {
    /// Configuration validation failed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl KeyphraseError {
    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Check if this error was caused by a rejected configuration
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }
}

impl From<serde_json::Error> for KeyphraseError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
