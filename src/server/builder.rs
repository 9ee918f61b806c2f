//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};
use crate::utils::mask_secret;
use tracing::info;

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Validate the configuration and build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        config.validate()?;
        HttpServer::new(&config)
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build and run the server for a loaded configuration
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting Gemini Image Gateway");
    info!(
        "Using model {} with default key {}",
        config.gemini().model,
        mask_secret(&config.gemini().api_key)
    );

    let server = ServerBuilder::new().with_config(config).build()?;

    info!("Server starting at: http://{}", server.config().address());
    info!("API Endpoints:");
    info!("   GET  /                    - Service banner");
    info!("   GET  /api/health          - Health check");
    info!("   POST /api/edit-image      - Edit an uploaded image");
    info!("   POST /api/generate-image  - Generate an image from a prompt");
    info!("   POST /api/validate-key    - Check a caller API key");

    server.start().await
}
