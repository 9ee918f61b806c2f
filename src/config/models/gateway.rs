//! Main gateway configuration

use super::ServerConfig;
use crate::core::providers::gemini::GeminiConfig;
use serde::{Deserialize, Serialize};

/// Main gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream provider configuration, including the default key
    #[serde(default)]
    pub gemini: GeminiConfig,
}
