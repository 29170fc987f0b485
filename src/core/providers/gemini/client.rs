//! Gemini Client
//!
//! Streaming client for the Google AI Studio `streamGenerateContent` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder};
use tracing::debug;

use super::error::GeminiErrorMapper;
use super::models::GenerateContentRequest;
use super::streaming::GeminiStream;
use crate::config::GeminiConfig;
use crate::core::providers::ContentGenerator;
use crate::core::providers::error::ProviderError;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http_client: Client,
}

impl GeminiClient {
    /// Create a client from explicit configuration
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let http_client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .build()
            .map_err(|e| {
                ProviderError::network("gemini", format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn build_headers(&self) -> Result<HeaderMap, ProviderError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ProviderError::authentication("gemini", "API key not configured"))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(api_key).map_err(|e| {
                ProviderError::authentication("gemini", format!("Invalid API key format: {}", e))
            })?,
        );
        Ok(headers)
    }

    /// Send the request and hand back the SSE body as a chunk stream
    pub async fn send_stream_request(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GeminiStream, ProviderError> {
        let url = self.config.stream_endpoint();
        let headers = self.build_headers()?;

        debug!("Gemini stream request URL: {}", url);

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::timeout("gemini", format!("Request timeout: {}", e))
                } else {
                    ProviderError::network("gemini", format!("Network error: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.map_err(|e| {
                ProviderError::network("gemini", format!("Failed to read error response: {}", e))
            })?;
            debug!("Gemini returned {}: {}", status, error_text);
            return Err(GeminiErrorMapper::from_http_status(
                status.as_u16(),
                &error_text,
            ));
        }

        Ok(GeminiStream::from_response(response))
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn stream_generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GeminiStream, ProviderError> {
        self.send_stream_request(&request).await
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
