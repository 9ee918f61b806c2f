//! Image edit and generation endpoints

use crate::core::generation::{EditRequest, GenerateRequest, GenerationResult};
use crate::server::routes::caller_api_key;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_multipart::{Field, Multipart};
use actix_web::{FromRequest, HttpMessage, HttpRequest, HttpResponse, web};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Success body shared by both endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResponse {
    pub message: String,
    pub using_default_key: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Base64 encoded image bytes
    pub image: String,
    pub mime_type: String,
}

impl TryFrom<GenerationResult> for ImageResponse {
    type Error = GatewayError;

    fn try_from(result: GenerationResult) -> Result<Self> {
        let using_default_key = result.using_default_key();
        let (image, text) = result.require_image()?;

        Ok(Self {
            message: "Processing complete".to_string(),
            using_default_key,
            text,
            image: image.to_base64(),
            mime_type: image.mime_type,
        })
    }
}

/// Uploaded file part
#[derive(Debug, Default)]
struct Upload {
    data: Vec<u8>,
    mime_type: Option<String>,
    filename: Option<String>,
}

/// Fields collected from a multipart body
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<Upload>,
    prompt: Option<String>,
}

/// Urlencoded body of the generate endpoint
#[derive(Debug, Deserialize)]
struct PromptForm {
    prompt: Option<String>,
}

/// Edit an uploaded image
///
/// Expects multipart fields `file` and `prompt`, plus the optional `x-api-key`
/// header.
pub async fn edit_image(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: Multipart,
) -> Result<HttpResponse> {
    info!("Image edit request");

    let limit = state.config().server().max_body_size;
    let form = read_multipart(payload, limit).await?;

    let upload = form.file.ok_or_else(|| missing_field("file"))?;
    let prompt = required_text(form.prompt, "prompt")?;

    let request = EditRequest {
        image: upload.data,
        // An upload without a declared type cannot be shown to be an image
        mime_type: upload
            .mime_type
            .unwrap_or_else(|| "application/octet-stream".to_string()),
        prompt,
        api_key: caller_api_key(&req),
    };
    if let Some(filename) = upload.filename.as_deref() {
        info!("Received upload {}", filename);
    }

    let result = state
        .images
        .edit(request)
        .await
        .map_err(|e| provider_failure("Error processing image", e))?;

    respond(result)
}

/// Generate an image from a prompt
///
/// Accepts the `prompt` field either as multipart or urlencoded form data.
pub async fn generate_image(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Payload,
) -> Result<HttpResponse> {
    info!("Image generation request");

    let mut payload = payload.into_inner();
    let prompt = if req.content_type().starts_with("multipart/") {
        let limit = state.config().server().max_body_size;
        let multipart = Multipart::new(req.headers(), payload);
        read_multipart(multipart, limit).await?.prompt
    } else {
        web::Form::<PromptForm>::from_request(&req, &mut payload)
            .await
            .map_err(|e| GatewayError::validation(format!("Invalid form data: {}", e)))?
            .into_inner()
            .prompt
    };
    let prompt = required_text(prompt, "prompt")?;

    let request = GenerateRequest {
        prompt,
        api_key: caller_api_key(&req),
    };

    let result = state
        .images
        .generate(request)
        .await
        .map_err(|e| provider_failure("Error generating image", e))?;

    respond(result)
}

fn respond(result: GenerationResult) -> Result<HttpResponse> {
    match ImageResponse::try_from(result) {
        Ok(body) => Ok(HttpResponse::Ok().json(body)),
        Err(e) => {
            warn!("Provider returned no image");
            Err(e)
        }
    }
}

/// Prefix provider failures; other errors already carry their outcome
fn provider_failure(prefix: &str, err: GatewayError) -> GatewayError {
    match err {
        GatewayError::Provider(e) => {
            error!(
                provider = e.provider(),
                status = e.http_status(),
                retry_after = ?e.retry_after(),
                "{}: {}",
                prefix,
                e
            );
            GatewayError::internal(format!("{}: {}", prefix, e))
        }
        other => other,
    }
}

fn missing_field(name: &str) -> GatewayError {
    GatewayError::validation(format!("Field required: {}", name))
}

/// An empty form value counts as missing
fn required_text(value: Option<String>, name: &str) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| missing_field(name))
}

async fn read_multipart(mut payload: Multipart, limit: usize) -> Result<UploadForm> {
    let mut form = UploadForm::default();
    let mut total = 0usize;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| {
            error!("Error reading multipart field: {}", e);
            GatewayError::bad_request(format!("Invalid multipart data: {}", e))
        })?;

        let field_name = match field.name() {
            Some(name) => name.to_string(),
            None => continue,
        };

        match field_name.as_str() {
            "file" => {
                let mime_type = field.content_type().map(|m| m.essence_str().to_string());
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .map(String::from);
                let data = read_field(&mut field, limit, &mut total).await?;
                form.file = Some(Upload {
                    data,
                    mime_type,
                    filename,
                });
            }
            "prompt" => {
                let data = read_field(&mut field, limit, &mut total).await?;
                form.prompt = Some(String::from_utf8_lossy(&data).into_owned());
            }
            _ => {
                // Skip unknown fields
                read_field(&mut field, limit, &mut total).await?;
            }
        }
    }

    Ok(form)
}

async fn read_field(field: &mut Field, limit: usize, total: &mut usize) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let bytes = chunk.map_err(|e| {
            error!("Error reading multipart chunk: {}", e);
            GatewayError::bad_request(format!("Invalid multipart data: {}", e))
        })?;

        *total += bytes.len();
        if *total > limit {
            return Err(GatewayError::payload_too_large(format!(
                "Upload exceeds the maximum size of {} bytes",
                limit
            )));
        }
        data.extend_from_slice(&bytes);
    }
    Ok(data)
}
