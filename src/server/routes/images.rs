//! Image generation and manipulation endpoints

use crate::core::normalizer::{IMAGE_MANIPULATION, ResponseNormalizer, TEXT_TO_IMAGE};
use crate::core::providers::gemini::{GenerateContentRequest, Part};
use crate::server::routes::GenerationResponse;
use crate::server::routes::upload::ManipulationForm;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::{error, info, warn};

/// `/generate-image` body
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateImageRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Text to image
pub async fn generate_image(
    state: web::Data<AppState>,
    request: web::Json<GenerateImageRequest>,
) -> Result<HttpResponse> {
    let prompt = required_prompt(request.into_inner().prompt)?;
    ensure_credential(&state)?;

    info!(
        route = "/generate-image",
        prompt_len = prompt.len(),
        "Text to image request"
    );

    generate(&state, vec![Part::text(prompt.clone())], TEXT_TO_IMAGE, prompt)
        .await
        .inspect_err(|e| error!(route = "/generate-image", "Generation failed: {}", e))
}

/// Uploaded image plus prompt to image
pub async fn manipulate_image(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse> {
    ensure_credential(&state)?;

    let form = ManipulationForm::read(payload, state.config.upload().max_file_size).await?;
    let image = form
        .image
        .ok_or_else(|| GatewayError::bad_request("Image file is required"))?;
    let prompt = required_prompt(form.prompt)?;

    info!(
        route = "/manipulate-image",
        prompt_len = prompt.len(),
        image_bytes = image.data.len(),
        mime_type = %image.mime_type,
        "Image manipulation request"
    );

    let parts = vec![
        Part::text(prompt.clone()),
        Part::inline_data(image.mime_type, &image.data),
    ];

    generate(&state, parts, IMAGE_MANIPULATION, prompt)
        .await
        .inspect_err(|e| error!(route = "/manipulate-image", "Generation failed: {}", e))
}

fn required_prompt(prompt: Option<String>) -> Result<String> {
    prompt
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| GatewayError::bad_request("Prompt is required"))
}

fn ensure_credential(state: &AppState) -> Result<()> {
    if state.config.gemini().has_credential() {
        Ok(())
    } else {
        warn!("Rejecting request: API key not configured");
        Err(GatewayError::MissingCredential)
    }
}

/// Stream from the model, normalize, publish
async fn generate(
    state: &AppState,
    parts: Vec<Part>,
    base_name: &str,
    prompt: String,
) -> Result<HttpResponse> {
    let request =
        GenerateContentRequest::user(parts, state.config.gemini().response_modalities.clone());

    let stream = state.generator.stream_generate_content(request).await?;
    let results = ResponseNormalizer::new(base_name).normalize(stream).await?;

    if results.is_empty() {
        return Err(GatewayError::EmptyResult);
    }

    let images = results.iter().filter(|r| r.is_image()).count();
    info!(
        "{} returned {} results ({} images)",
        state.generator.name(),
        results.len(),
        images
    );

    let published = state.images.publish(results).await?;
    Ok(HttpResponse::Ok().json(GenerationResponse::new(prompt, published)))
}
