//! Gemini Error Handling
//!
//! Maps non-success responses of the REST API onto `ProviderError`.

use crate::core::providers::unified_provider::ProviderError;

pub type GeminiError = ProviderError;

const PROVIDER: &str = "gemini";

/// Maps Gemini error envelopes to provider errors
pub struct GeminiErrorMapper;

impl GeminiErrorMapper {
    /// Map an HTTP status and raw body
    ///
    /// Gemini wraps errors as `{"error": {"code", "message", "status", "details"}}`;
    /// when the body is not that envelope the raw text is used as the message.
    pub fn from_http_status(status: u16, body: &str) -> ProviderError {
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(json) if json.get("error").is_some() => Self::from_api_response(status, &json),
            _ => Self::from_status_and_message(status, "", body.trim()),
        }
    }

    /// Map a parsed error envelope
    pub fn from_api_response(http_status: u16, response: &serde_json::Value) -> ProviderError {
        let error = &response["error"];
        let code = error
            .get("code")
            .and_then(|c| c.as_u64())
            .map(|c| c as u16)
            .unwrap_or(http_status);
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error");
        let status = error.get("status").and_then(|s| s.as_str()).unwrap_or("");

        if Self::is_invalid_key(error) {
            return ProviderError::authentication(PROVIDER, message);
        }

        match Self::from_status_and_message(code, status, message) {
            ProviderError::RateLimit { .. } => {
                ProviderError::rate_limit(PROVIDER, message, Self::retry_delay(error))
            }
            other => other,
        }
    }

    fn from_status_and_message(code: u16, status: &str, message: &str) -> ProviderError {
        match (code, status) {
            (401, _) | (403, _) | (_, "UNAUTHENTICATED") | (_, "PERMISSION_DENIED") => {
                ProviderError::authentication(PROVIDER, message)
            }
            (404, _) | (_, "NOT_FOUND") => ProviderError::not_found(PROVIDER, message),
            (429, _) | (_, "RESOURCE_EXHAUSTED") => {
                ProviderError::rate_limit(PROVIDER, message, None)
            }
            (400, _) | (_, "INVALID_ARGUMENT") | (_, "FAILED_PRECONDITION") => {
                ProviderError::invalid_request(PROVIDER, message)
            }
            (503, _) | (_, "UNAVAILABLE") => {
                ProviderError::provider_unavailable(PROVIDER, message)
            }
            _ => ProviderError::api_error(PROVIDER, code, message),
        }
    }

    /// Whole seconds from a `google.rpc.RetryInfo` detail such as `"37s"`
    fn retry_delay(error: &serde_json::Value) -> Option<u64> {
        error
            .get("details")?
            .as_array()?
            .iter()
            .find_map(|d| d.get("retryDelay").and_then(|r| r.as_str()))
            .and_then(|delay| delay.trim_end_matches('s').parse::<f64>().ok())
            .map(|seconds| seconds.ceil() as u64)
    }

    /// Gemini reports a bad key as 400 INVALID_ARGUMENT with reason API_KEY_INVALID
    fn is_invalid_key(error: &serde_json::Value) -> bool {
        error
            .get("details")
            .and_then(|d| d.as_array())
            .map(|details| {
                details
                    .iter()
                    .any(|d| d.get("reason").and_then(|r| r.as_str()) == Some("API_KEY_INVALID"))
            })
            .unwrap_or(false)
    }
}

pub fn gemini_network_error(msg: impl Into<String>) -> ProviderError {
    ProviderError::network(PROVIDER, msg)
}

pub fn gemini_timeout_error(msg: impl Into<String>) -> ProviderError {
    ProviderError::timeout(PROVIDER, msg)
}

pub fn gemini_parse_error(msg: impl Into<String>) -> ProviderError {
    ProviderError::response_parsing(PROVIDER, msg)
}

pub fn gemini_auth_error(msg: impl Into<String>) -> ProviderError {
    ProviderError::authentication(PROVIDER, msg)
}

pub fn gemini_safety_error(reason: impl Into<String>) -> ProviderError {
    ProviderError::content_filtered(PROVIDER, reason)
}

/// Map a transport failure from reqwest
pub fn from_reqwest(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        gemini_timeout_error(err.to_string())
    } else {
        gemini_network_error(err.to_string())
    }
}
