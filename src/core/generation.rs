//! Image editing and generation
//!
//! Builds the provider request for an edit or a generation, runs it with the
//! resolved credential and unwraps the first candidate into a
//! [`GenerationResult`].

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, info};

use crate::core::credentials::{CredentialResolver, KeyProvenance};
use crate::core::providers::gemini::error::{gemini_parse_error, gemini_safety_error};
use crate::core::providers::gemini::models::{GenerateContentRequest, GenerateContentResponse, Part};
use crate::core::providers::gemini::GeminiClient;
use crate::core::providers::unified_provider::ProviderError;
use crate::utils::error::{GatewayError, Result};

/// Image upload plus an instruction
#[derive(Debug, Clone)]
pub struct EditRequest {
    pub image: Vec<u8>,
    pub mime_type: String,
    pub prompt: String,
    pub api_key: Option<String>,
}

/// Instruction for a new image
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub prompt: String,
    pub api_key: Option<String>,
}

/// Binary image returned by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl GeneratedImage {
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }
}

/// Unwrapped provider output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub text: Option<String>,
    pub image: Option<GeneratedImage>,
    pub provenance: KeyProvenance,
}

impl GenerationResult {
    /// Unwrap the first candidate's parts
    ///
    /// Text parts and inline data parts each overwrite the previous capture of
    /// the same kind. A response without candidates or without content is
    /// malformed and reported as a provider error.
    pub fn from_response(
        response: GenerateContentResponse,
        provenance: KeyProvenance,
    ) -> std::result::Result<Self, ProviderError> {
        let Some(candidate) = response.candidates.into_iter().next() else {
            if let Some(reason) = response
                .prompt_feedback
                .and_then(|feedback| feedback.block_reason)
            {
                return Err(gemini_safety_error(format!("prompt blocked: {}", reason)));
            }
            return Err(gemini_parse_error("response contained no candidates"));
        };

        let content = candidate.content.ok_or_else(|| {
            gemini_parse_error(format!(
                "candidate has no content (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            ))
        })?;

        let mut result = Self {
            text: None,
            image: None,
            provenance,
        };

        for part in content.parts {
            if let Some(text) = part.text {
                result.text = Some(text);
            } else if let Some(inline) = part.inline_data {
                let data = inline
                    .decode()
                    .map_err(|e| gemini_parse_error(format!("invalid inline image data: {}", e)))?;
                result.image = Some(GeneratedImage {
                    data,
                    mime_type: inline.mime_type,
                });
            }
        }

        Ok(result)
    }

    pub fn using_default_key(&self) -> bool {
        self.provenance.is_default()
    }

    /// Split into the image and any text, or `NoImageGenerated` carrying the text
    pub fn require_image(self) -> Result<(GeneratedImage, Option<String>)> {
        match self.image {
            Some(image) => Ok((image, self.text)),
            None => Err(GatewayError::no_image_generated(self.text.unwrap_or_default())),
        }
    }
}

/// Runs edits and generations against the provider
#[derive(Debug, Clone)]
pub struct ImageService {
    client: GeminiClient,
    resolver: CredentialResolver,
}

impl ImageService {
    pub fn new(client: GeminiClient, resolver: CredentialResolver) -> Self {
        Self { client, resolver }
    }

    pub fn resolver(&self) -> &CredentialResolver {
        &self.resolver
    }

    /// Edit an uploaded image
    ///
    /// A non-image media type is rejected before any provider call.
    pub async fn edit(&self, request: EditRequest) -> Result<GenerationResult> {
        if !request.mime_type.starts_with("image/") {
            return Err(GatewayError::bad_request("Uploaded file is not an image"));
        }

        info!(
            "Editing {} byte {} image",
            request.image.len(),
            request.mime_type
        );

        let parts = vec![
            Part::text(request.prompt),
            Part::inline(request.mime_type, &request.image),
        ];
        self.run(parts, request.api_key.as_deref()).await
    }

    /// Generate an image from text alone
    pub async fn generate(&self, request: GenerateRequest) -> Result<GenerationResult> {
        info!("Generating image from a {} character prompt", request.prompt.len());

        self.run(vec![Part::text(request.prompt)], request.api_key.as_deref())
            .await
    }

    async fn run(&self, parts: Vec<Part>, api_key: Option<&str>) -> Result<GenerationResult> {
        let credential = self.resolver.resolve(api_key).await;
        debug!(
            "Using {} key",
            if credential.using_default_key() {
                "default"
            } else {
                "caller"
            }
        );

        let request = GenerateContentRequest::text_and_image(
            parts,
            self.client.config().safety_settings.clone(),
        );
        let response = self
            .client
            .generate_content(credential.api_key(), &request)
            .await?;

        Ok(GenerationResult::from_response(
            response,
            credential.provenance,
        )?)
    }
}
