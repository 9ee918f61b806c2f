//! Google Gemini Provider
//!
//! Google AI Studio client used for image editing and image generation.
//! Requests ask for both text and image modalities and send relaxed safety
//! settings for every harm category.

pub mod client;
pub mod config;
pub mod error;
pub mod models;

// Re-export main types
pub use client::GeminiClient;
pub use config::{GeminiConfig, HarmBlockThreshold, HarmCategory, SafetySetting};
pub use error::{GeminiError, GeminiErrorMapper};
pub use models::{GenerateContentRequest, GenerateContentResponse, InlineData, Modality, Part};

/// Create a client from configuration
pub fn create_gemini_client(config: GeminiConfig) -> Result<GeminiClient, GeminiError> {
    GeminiClient::new(config)
}
