//! Error Handling utilities
//!
//! This module provides the gateway error type and its HTTP rendering.

pub mod error;

// Re-export commonly used types
pub use error::*;
