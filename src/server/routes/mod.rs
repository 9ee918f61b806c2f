//! HTTP route modules
//!
//! This module contains all HTTP route handlers organized by functionality.

pub mod health;
pub mod images;
pub mod keys;

use actix_web::{HttpRequest, web};

/// Header carrying an optional caller-supplied provider key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Configure all routes
///
/// Routes are registered without a trailing slash; `NormalizePath` trims it
/// from incoming requests.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .service(
            web::scope("/api")
                .route("/edit-image", web::post().to(images::edit_image))
                .route("/generate-image", web::post().to(images::generate_image))
                .route("/validate-key", web::post().to(keys::validate_key)),
        );
}

/// The caller's key, if the header is present, readable and non-empty
pub(crate) fn caller_api_key(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(String::from)
}
