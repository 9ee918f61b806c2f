//! Core functionality for the Gateway
//!
//! Credential selection, the image service and the upstream provider client.

pub mod credentials;
pub mod generation;
pub mod providers;

pub use credentials::{Credential, CredentialResolver, KeyProvenance, KeyValidator};
pub use generation::{EditRequest, GenerateRequest, GenerationResult, ImageService};
