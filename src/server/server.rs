//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and the application factory.

use crate::config::{Config, ServerConfig};
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_cors::Cors;
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::{DefaultHeaders, Logger, NormalizePath},
    web,
};
use std::time::Duration;
use tracing::info;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let state = AppState::new(config.clone())?;

        Ok(Self {
            config: config.gateway.server.clone(),
            state,
        })
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let port = self.config.port;

        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || create_app(state.clone()))
            .client_request_timeout(Duration::from_secs(self.config.timeout))
            .bind(&bind_addr)
            .map_err(|e| Self::format_bind_error(e, &bind_addr, port))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| GatewayError::internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Create the Actix-web application
///
/// Paths are matched with any trailing slash trimmed, so `/api/edit-image`
/// and `/api/edit-image/` reach the same handler.
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let server_config = &state.config.gateway.server;
    let cors = build_cors(server_config);
    let body_limit = server_config.max_body_size;

    App::new()
        .app_data(state)
        .app_data(web::FormConfig::default().limit(body_limit))
        .app_data(web::PayloadConfig::new(body_limit))
        .wrap(cors)
        .wrap(NormalizePath::trim())
        .wrap(Logger::default())
        .wrap(DefaultHeaders::new().add(("Server", "Gemini-Image-Gateway")))
        .configure(routes::configure_routes)
}

fn build_cors(config: &ServerConfig) -> Cors {
    let cors_config = &config.cors;
    let mut cors = Cors::default();

    if cors_config.enabled {
        if cors_config.allows_all_origins() {
            cors = cors.allow_any_origin();
        } else {
            for origin in &cors_config.allowed_origins {
                cors = cors.allowed_origin(origin);
            }
        }

        cors = cors
            .allow_any_method()
            .allow_any_header()
            .max_age(cors_config.max_age);

        if cors_config.allow_credentials {
            cors = cors.supports_credentials();
        }
    }

    cors
}
