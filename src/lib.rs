//! # Gemini Image Gateway
//!
//! A thin HTTP gateway in front of Google Gemini's image-capable models.
//!
//! - `POST /api/edit-image`: multipart image plus prompt, returns the edited image
//! - `POST /api/generate-image`: prompt only, returns a generated image
//! - `POST /api/validate-key`: checks a caller-supplied key
//!
//! Callers may pass their own provider key in the `x-api-key` header. Keys that
//! fail validation fall back to the default key configured at startup, and
//! every response reports which key was used.
//!
//! ## Embedding the app
//!
//! ```rust,no_run
//! use actix_web::{HttpServer, web};
//! use gemini_image_gateway::{Config, server::{AppState, create_app}};
//!
//! #[actix_web::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     config.validate()?;
//!     let state = web::Data::new(AppState::new(config)?);
//!     HttpServer::new(move || create_app(state.clone()))
//!         .bind(("127.0.0.1", 8000))?
//!         .run()
//!         .await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{GatewayError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
