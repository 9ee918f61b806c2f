//! Configuration management for the Gateway
//!
//! Configuration is layered: built-in defaults, then an optional YAML file,
//! then environment variables, then command line overrides. Validation runs
//! once every layer has been applied.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::core::providers::gemini::GeminiConfig;
use crate::utils::error::{GatewayError, Result};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Main configuration struct for the Gateway
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Gateway configuration
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// The file is parsed but not validated; the default key usually arrives
    /// later from the environment.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        let gateway: GatewayConfig = serde_yaml::from_str(&content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))?;

        debug!("Configuration file parsed");
        Ok(Self { gateway })
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Defaults, then the optional file, then the environment
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path).await?,
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    ///
    /// Empty values are ignored. `GEMINI_API_KEY` is only consulted when
    /// `GOOGLE_API_KEY` is unset.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = var("GOOGLE_API_KEY").or_else(|| var("GEMINI_API_KEY")) {
            self.gateway.gemini.api_key = key;
        }
        if let Some(base_url) = var("GEMINI_BASE_URL") {
            self.gateway.gemini.base_url = base_url;
        }
        if let Some(version) = var("GEMINI_API_VERSION") {
            self.gateway.gemini.api_version = version;
        }
        if let Some(model) = var("GEMINI_MODEL") {
            self.gateway.gemini.model = model;
        }
        if let Some(timeout) = var("GEMINI_TIMEOUT") {
            let gemini = &mut self.gateway.gemini;
            gemini.request_timeout = parse_var("GEMINI_TIMEOUT", &timeout)?;
            gemini.connect_timeout = gemini.connect_timeout.min(gemini.request_timeout);
        }
        if let Some(timeout) = var("GEMINI_CONNECT_TIMEOUT") {
            self.gateway.gemini.connect_timeout = parse_var("GEMINI_CONNECT_TIMEOUT", &timeout)?;
        }
        if let Some(host) = var("HOST") {
            self.gateway.server.host = host;
        }
        if let Some(port) = var("PORT") {
            self.gateway.server.port = parse_var("PORT", &port)?;
        }
        if let Some(size) = var("MAX_BODY_SIZE") {
            self.gateway.server.max_body_size = parse_var("MAX_BODY_SIZE", &size)?;
        }
        if let Some(origins) = var("FRONTEND_ORIGIN") {
            self.gateway.server.cors.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }

        Ok(())
    }

    /// Apply command line overrides
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.gateway.server.host = host;
        }
        if let Some(port) = port {
            self.gateway.server.port = port;
        }
        self
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    /// Get provider configuration
    pub fn gemini(&self) -> &GeminiConfig {
        &self.gateway.gemini
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        Validate::validate(&self.gateway).map_err(GatewayError::Config)?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.gateway)?)
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| GatewayError::Config(format!("Invalid value for {}: {}", name, e)))
}
