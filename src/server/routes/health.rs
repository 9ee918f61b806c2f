//! Service banner and health check endpoints

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/api/health", web::get().to(health_check));
}

/// Body of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceBanner {
    pub message: String,
}

/// Body of `GET /api/health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Service banner
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(ServiceBanner {
        message: "Gemini Image Editor API".to_string(),
    })
}

/// Basic health check endpoint
///
/// Does not contact the provider; it only reports that the process is serving.
pub async fn health_check() -> HttpResponse {
    debug!("Health check requested");

    HttpResponse::Ok().json(HealthStatus {
        status: "healthy".to_string(),
    })
}
