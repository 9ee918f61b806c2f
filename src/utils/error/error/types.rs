//! Error types for the Gateway

use crate::core::providers::unified_provider::ProviderError;
use thiserror::Error;

/// Result type alias for the Gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the Gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Provider errors
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Missing or malformed request fields
    #[error("Validation error: {0}")]
    Validation(String),

    /// Upload exceeds the configured body limit
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// The provider answered but produced no image part
    #[error("No image generated")]
    NoImageGenerated {
        /// Any text the provider returned alongside
        text: String,
    },

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
