//! HTTP route modules
//!
//! Generation endpoints and the response body they share.

pub mod images;
pub mod upload;

use crate::storage::{PublishedResult, StoredImage};
use crate::utils::error::GatewayError;
use actix_web::web;
use serde::{Deserialize, Serialize};

/// Register the generation endpoints
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/generate-image", web::post().to(images::generate_image))
        .route("/manipulate-image", web::post().to(images::manipulate_image));
}

/// JSON extractor settings; body errors answer in the gateway's error format
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            GatewayError::bad_request(format!("Invalid JSON body: {}", err)).into()
        })
}

/// Successful generation body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationResponse {
    pub success: bool,
    pub prompt: String,
    pub results: Vec<ResultItem>,
}

impl GenerationResponse {
    pub fn new(prompt: String, results: Vec<PublishedResult>) -> Self {
        Self {
            success: true,
            prompt,
            results: results.into_iter().map(ResultItem::from).collect(),
        }
    }
}

/// One entry of `results`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResultItem {
    Image {
        /// Base64 payload (inline mode)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<String>,
        /// Public URL (disk mode)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(rename = "mimeType")]
        mime_type: String,
        filename: String,
    },
    Text {
        content: String,
    },
}

impl From<PublishedResult> for ResultItem {
    fn from(result: PublishedResult) -> Self {
        match result {
            PublishedResult::Image {
                image,
                mime_type,
                filename,
            } => {
                let (data, url) = match image {
                    StoredImage::Inline(data) => (Some(data), None),
                    StoredImage::Url(url) => (None, Some(url)),
                };
                ResultItem::Image {
                    data,
                    url,
                    mime_type,
                    filename,
                }
            }
            PublishedResult::Text { content } => ResultItem::Text { content },
        }
    }
}
