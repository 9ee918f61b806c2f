//! Gemini Configuration Module
//!
//! Connection settings for the Google AI Studio REST API.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::mask_secret;

/// Default image-capable model
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp-image-generation";

/// Google AI Studio base URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini connection configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Default API key, used whenever the caller supplies none or an invalid one
    #[serde(default)]
    pub api_key: String,

    /// Base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API version path segment
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Model used for both editing and generation
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// Safety settings sent with every generation request
    #[serde(default = "relaxed_safety_settings")]
    pub safety_settings: Vec<SafetySetting>,
}

/// Harm categories understood by the generation endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmCategory {
    HarmCategoryHarassment,
    HarmCategoryHateSpeech,
    HarmCategorySexuallyExplicit,
    HarmCategoryDangerousContent,
}

/// Blocking thresholds, from most to least restrictive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    BlockLowAndAbove,
    BlockMediumAndAbove,
    BlockOnlyHigh,
    BlockNone,
}

/// Per-category safety setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

/// `BLOCK_NONE` for every harm category
pub fn relaxed_safety_settings() -> Vec<SafetySetting> {
    [
        HarmCategory::HarmCategoryHarassment,
        HarmCategory::HarmCategoryHateSpeech,
        HarmCategory::HarmCategorySexuallyExplicit,
        HarmCategory::HarmCategoryDangerousContent,
    ]
    .into_iter()
    .map(|category| SafetySetting {
        category,
        threshold: HarmBlockThreshold::BlockNone,
    })
    .collect()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_version() -> String {
    "v1beta".to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_request_timeout() -> u64 {
    120
}

fn default_connect_timeout() -> u64 {
    10
}

impl GeminiConfig {
    /// Create a Google AI Studio configuration with the given default key
    pub fn new_google_ai(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            api_version: default_api_version(),
            model: default_model(),
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
            safety_settings: relaxed_safety_settings(),
        }
    }

    /// Point the client at another base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.request_timeout = timeout_secs;
        self
    }

    /// `{base}/{version}/models/{model}:{operation}`
    pub fn get_endpoint(&self, model: &str, operation: &str) -> String {
        format!(
            "{}/{}/models/{}:{}",
            self.base_url.trim_end_matches('/'),
            self.api_version,
            model,
            operation
        )
    }

    /// `{base}/{version}/models`
    pub fn models_endpoint(&self) -> String {
        format!(
            "{}/{}/models",
            self.base_url.trim_end_matches('/'),
            self.api_version
        )
    }

    /// Validate connection settings
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("GOOGLE_API_KEY environment variable not set".to_string());
        }

        if self.base_url.is_empty() {
            return Err("Gemini base URL cannot be empty".to_string());
        }

        if self.model.is_empty() {
            return Err("Gemini model cannot be empty".to_string());
        }

        if self.request_timeout == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }

        if self.connect_timeout == 0 {
            return Err("Connect timeout must be greater than 0".to_string());
        }

        if self.connect_timeout > self.request_timeout {
            return Err("Connect timeout cannot be greater than request timeout".to_string());
        }

        Ok(())
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self::new_google_ai("")
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &mask_secret(&self.api_key))
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("model", &self.model)
            .field("request_timeout", &self.request_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("safety_settings", &self.safety_settings)
            .finish()
    }
}
