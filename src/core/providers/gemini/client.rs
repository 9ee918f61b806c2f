//! Gemini Client
//!
//! Thin REST client for Google AI Studio. The API key is passed per call so
//! one pooled client serves both the default key and caller-supplied keys.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::core::credentials::KeyValidator;
use crate::core::providers::unified_provider::ProviderError;

use super::config::GeminiConfig;
use super::error::{
    GeminiErrorMapper, from_reqwest, gemini_auth_error, gemini_network_error, gemini_parse_error,
};
use super::models::{GenerateContentRequest, GenerateContentResponse, ListModelsResponse};

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http_client: Client,
}

impl GeminiClient {
    /// Create
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let http_client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .build()
            .map_err(|e| gemini_network_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// List the models visible to `api_key`
    pub async fn list_models(&self, api_key: &str) -> Result<ListModelsResponse, ProviderError> {
        let url = self.config.models_endpoint();
        debug!("Gemini request: GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .headers(self.build_headers(api_key)?)
            .send()
            .await
            .map_err(from_reqwest)?;

        self.handle_response(response).await
    }

    /// Call `generateContent` on the configured model
    pub async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let url = self
            .config
            .get_endpoint(&self.config.model, "generateContent");
        debug!("Gemini request: POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .headers(self.build_headers(api_key)?)
            .json(request)
            .send()
            .await
            .map_err(from_reqwest)?;

        self.handle_response(response).await
    }

    fn build_headers(&self, api_key: &str) -> Result<HeaderMap, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| gemini_auth_error(format!("Invalid API key format: {}", e)))?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);

        Ok(headers)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, ProviderError> {
        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| gemini_network_error(format!("Failed to read response: {}", e)))?;

        debug!("Gemini response status: {}", status);

        if !status.is_success() {
            return Err(GeminiErrorMapper::from_http_status(
                status.as_u16(),
                &response_text,
            ));
        }

        serde_json::from_str(&response_text)
            .map_err(|e| gemini_parse_error(format!("Failed to parse response JSON: {}", e)))
    }
}

#[async_trait]
impl KeyValidator for GeminiClient {
    /// A key is valid when it can list models
    async fn validate(&self, api_key: &str) -> Result<(), ProviderError> {
        self.list_models(api_key).await.map(|_| ())
    }
}
