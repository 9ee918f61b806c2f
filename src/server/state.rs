//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::credentials::CredentialResolver;
use crate::core::generation::ImageService;
use crate::core::providers::gemini::create_gemini_client;
use crate::utils::error::Result;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Everything here is read-only after startup, so workers share it through
/// `Arc` without locking.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Edit and generation service, holding the pooled provider client
    pub images: Arc<ImageService>,
}

impl AppState {
    /// Build the provider client and credential resolver from configuration
    ///
    /// The provider client doubles as the key validator.
    pub fn new(config: Config) -> Result<Self> {
        let client = create_gemini_client(config.gemini().clone())?;
        let resolver =
            CredentialResolver::new(config.gemini().api_key.clone(), Arc::new(client.clone()))?;

        Ok(Self::with_service(config, ImageService::new(client, resolver)))
    }

    /// Create state around an existing service
    pub fn with_service(config: Config, images: ImageService) -> Self {
        Self {
            config: Arc::new(config),
            images: Arc::new(images),
        }
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
