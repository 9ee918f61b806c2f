//! Helper functions for creating specific error types

use super::types::GatewayError;

/// Helper functions for creating specific errors
impl GatewayError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn payload_too_large<S: Into<String>>(message: S) -> Self {
        Self::PayloadTooLarge(message.into())
    }

    pub fn no_image_generated<S: Into<String>>(text: S) -> Self {
        Self::NoImageGenerated { text: text.into() }
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Message shown to callers in the `detail` field.
    ///
    /// Request-level variants carry the raw message without the `Display`
    /// prefix; everything else falls back to `Display`.
    pub fn detail(&self) -> String {
        match self {
            Self::BadRequest(msg)
            | Self::Validation(msg)
            | Self::PayloadTooLarge(msg)
            | Self::Internal(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
