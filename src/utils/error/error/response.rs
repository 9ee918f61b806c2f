//! HTTP response handling for errors

use super::types::GatewayError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            GatewayError::NoImageGenerated { .. } => StatusCode::NOT_FOUND,
            GatewayError::Config(_)
            | GatewayError::Yaml(_)
            | GatewayError::Provider(_)
            | GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());

        match self {
            GatewayError::NoImageGenerated { text } => builder.json(NoImageResponse {
                error: "No image generated".to_string(),
                text: text.clone(),
            }),
            other => builder.json(ErrorResponse {
                detail: other.detail(),
            }),
        }
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Body returned when the provider produced no image part
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct NoImageResponse {
    pub error: String,
    pub text: String,
}
