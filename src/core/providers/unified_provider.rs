//! Unified Provider Error Handling
//!
//! Single error type for the upstream generation provider.
//!
//! | Variant | Purpose | HTTP Status |
//! |------|------|------------|
//! | Authentication | Key rejected by the provider | 401 |
//! | RateLimit | Rate limit exceeded | 429 |
//! | NotFound | Model or endpoint not found | 404 |
//! | InvalidRequest | Provider rejected the request | 400 |
//! | Network | Transport failure | 503 |
//! | Timeout | Request timed out | 408 |
//! | ProviderUnavailable | Provider is down | 503 |
//! | ContentFiltered | Prompt blocked by safety systems | 400 |
//! | ResponseParsing | Upstream response could not be decoded | 502 |
//! | ApiError | Any other upstream status | as returned |
//!
//! The gateway never retries and never exposes these statuses to callers;
//! they exist so logs and the key validation endpoint carry a precise message.

/// Unified provider error type
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("Authentication failed for {provider}: {message}")]
    Authentication {
        provider: &'static str,
        message: String,
    },

    #[error("Rate limit exceeded for {provider}: {message}")]
    RateLimit {
        provider: &'static str,
        message: String,
        retry_after: Option<u64>,
    },

    #[error("Not found for {provider}: {message}")]
    NotFound {
        provider: &'static str,
        message: String,
    },

    #[error("Invalid request for {provider}: {message}")]
    InvalidRequest {
        provider: &'static str,
        message: String,
    },

    #[error("Network error for {provider}: {message}")]
    Network {
        provider: &'static str,
        message: String,
    },

    #[error("Timeout for {provider}: {message}")]
    Timeout {
        provider: &'static str,
        message: String,
    },

    #[error("Provider {provider} is unavailable: {message}")]
    ProviderUnavailable {
        provider: &'static str,
        message: String,
    },

    #[error("Content filtered by {provider}: {reason}")]
    ContentFiltered {
        provider: &'static str,
        reason: String,
    },

    #[error("Failed to parse {provider} response: {message}")]
    ResponseParsing {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} API error ({status}): {message}")]
    ApiError {
        provider: &'static str,
        status: u16,
        message: String,
    },
}

impl ProviderError {
    /// Create authentication error
    pub fn authentication(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Authentication {
            provider,
            message: message.into(),
        }
    }

    /// Create rate limit error
    pub fn rate_limit(
        provider: &'static str,
        message: impl Into<String>,
        retry_after: Option<u64>,
    ) -> Self {
        let message = message.into();
        Self::RateLimit {
            provider,
            message: match retry_after {
                Some(seconds) => format!("{} (retry after {} seconds)", message, seconds),
                None => message,
            },
            retry_after,
        }
    }

    /// Create not found error
    pub fn not_found(provider: &'static str, message: impl Into<String>) -> Self {
        Self::NotFound {
            provider,
            message: message.into(),
        }
    }

    /// Seconds the provider asked callers to wait, if any
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Create invalid request error
    pub fn invalid_request(provider: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            provider,
            message: message.into(),
        }
    }

    /// Create network error
    pub fn network(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Network {
            provider,
            message: message.into(),
        }
    }

    /// Create timeout error
    pub fn timeout(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Timeout {
            provider,
            message: message.into(),
        }
    }

    /// Create provider unavailable error
    pub fn provider_unavailable(provider: &'static str, message: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            provider,
            message: message.into(),
        }
    }

    /// Create content filtered error
    pub fn content_filtered(provider: &'static str, reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            provider,
            reason: reason.into(),
        }
    }

    /// Create response parsing error
    pub fn response_parsing(provider: &'static str, message: impl Into<String>) -> Self {
        Self::ResponseParsing {
            provider,
            message: message.into(),
        }
    }

    /// Create generic API error with an upstream status
    pub fn api_error(provider: &'static str, status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            provider,
            status,
            message: message.into(),
        }
    }

    /// Name of the provider that produced the error
    pub fn provider(&self) -> &'static str {
        match self {
            Self::Authentication { provider, .. }
            | Self::RateLimit { provider, .. }
            | Self::NotFound { provider, .. }
            | Self::InvalidRequest { provider, .. }
            | Self::Network { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::ProviderUnavailable { provider, .. }
            | Self::ContentFiltered { provider, .. }
            | Self::ResponseParsing { provider, .. }
            | Self::ApiError { provider, .. } => provider,
        }
    }

    /// Get HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Authentication { .. } => 401,
            Self::RateLimit { .. } => 429,
            Self::NotFound { .. } => 404,
            Self::InvalidRequest { .. } | Self::ContentFiltered { .. } => 400,
            Self::Timeout { .. } => 408,
            Self::Network { .. } | Self::ProviderUnavailable { .. } => 503,
            Self::ResponseParsing { .. } => 502,
            Self::ApiError { status, .. } => *status,
        }
    }
}
