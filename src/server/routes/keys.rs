//! Caller key validation endpoint

use crate::server::routes::API_KEY_HEADER;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Outcome of a key check, always returned with HTTP 200
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyValidationResponse {
    pub valid: bool,
    pub message: String,
}

/// Check a caller key against the provider without any fallback
pub async fn validate_key(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let api_key = req
        .headers()
        .get(API_KEY_HEADER)
        .ok_or_else(|| GatewayError::validation(format!("Missing header: {}", API_KEY_HEADER)))?
        .to_str()
        .map_err(|_| GatewayError::validation(format!("Invalid header: {}", API_KEY_HEADER)))?;

    let body = match state.images.resolver().check(api_key).await {
        Ok(()) => {
            info!("Caller API key is valid");
            KeyValidationResponse {
                valid: true,
                message: "API key is valid".to_string(),
            }
        }
        Err(e) => {
            warn!("Caller API key rejected: {}", e);
            KeyValidationResponse {
                valid: false,
                message: format!("Invalid API key: {}", e),
            }
        }
    };

    Ok(HttpResponse::Ok().json(body))
}
