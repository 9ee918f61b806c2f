//! Upstream provider implementations

pub mod gemini;
pub mod unified_provider;

pub use unified_provider::ProviderError;
