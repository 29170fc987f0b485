//! Multipart form parsing for image manipulation

use crate::utils::error::{GatewayError, Result};
use actix_multipart::{Field, Multipart};
use futures::StreamExt;
use tracing::debug;

/// Longest prompt accepted in a form field
pub const MAX_PROMPT_BYTES: usize = 64 * 1024;

/// Uploaded image
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub data: Vec<u8>,
    /// Declared media type, always `image/*`
    pub mime_type: String,
}

/// Fields of a `/manipulate-image` form
#[derive(Debug, Default)]
pub struct ManipulationForm {
    pub image: Option<ImageUpload>,
    pub prompt: Option<String>,
}

impl ManipulationForm {
    /// Read the whole form. Unknown fields are drained and ignored.
    pub async fn read(mut payload: Multipart, max_file_size: usize) -> Result<Self> {
        let mut form = Self::default();

        while let Some(item) = payload.next().await {
            let mut field = item.map_err(|e| {
                GatewayError::bad_request(format!("Invalid multipart data: {}", e))
            })?;

            let field_name = match field.name() {
                Some(name) => name.to_string(),
                None => continue,
            };

            match field_name.as_str() {
                "image" => {
                    let mime_type = match field.content_type() {
                        Some(mime) if mime.type_().as_str() == "image" => {
                            mime.essence_str().to_string()
                        }
                        _ => return Err(GatewayError::bad_request("Only image files are allowed")),
                    };
                    let data = read_limited(&mut field, max_file_size, |size| {
                        GatewayError::PayloadTooLarge {
                            size,
                            limit: max_file_size,
                        }
                    })
                    .await?;

                    debug!("Received image upload: {} ({} bytes)", mime_type, data.len());
                    if !data.is_empty() {
                        form.image = Some(ImageUpload { data, mime_type });
                    }
                }
                "prompt" => {
                    let bytes = read_limited(&mut field, MAX_PROMPT_BYTES, |_| {
                        GatewayError::bad_request("Prompt is too long")
                    })
                    .await?;
                    form.prompt = Some(String::from_utf8_lossy(&bytes).into_owned());
                }
                _ => {
                    while let Some(chunk) = field.next().await {
                        chunk.map_err(|e| {
                            GatewayError::bad_request(format!("Invalid multipart data: {}", e))
                        })?;
                    }
                }
            }
        }

        Ok(form)
    }
}

/// Read a field, giving up as soon as it grows past `limit`
async fn read_limited<F>(field: &mut Field, limit: usize, on_overflow: F) -> Result<Vec<u8>>
where
    F: FnOnce(usize) -> GatewayError,
{
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let bytes = chunk
            .map_err(|e| GatewayError::bad_request(format!("Error reading upload: {}", e)))?;
        data.extend_from_slice(&bytes);
        if data.len() > limit {
            return Err(on_overflow(data.len()));
        }
    }
    Ok(data)
}
