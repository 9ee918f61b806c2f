//! Error handling for the Gateway
//!
//! This module defines all error types used throughout the gateway.

#![allow(missing_docs)]

mod helpers;
mod response;
mod types;

pub use response::{ErrorResponse, NoImageResponse};
pub use types::{GatewayError, Result};
