//! Mocked Gemini upstream
//!
//! Serves `streamGenerateContent?alt=sse` from a wiremock server so the real
//! `GeminiClient` runs end to end.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use gemini_image_gateway::config::GeminiConfig;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

/// Wiremock server answering like Gemini
pub struct MockGemini {
    pub server: MockServer,
}

impl MockGemini {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Matcher for an authenticated stream request to the default model
    pub fn stream_request() -> MockBuilder {
        let model = GeminiConfig::default().model;
        Mock::given(method("POST"))
            .and(path(format!("/v1beta/models/{}:streamGenerateContent", model)))
            .and(query_param("alt", "sse"))
            .and(header("x-goog-api-key", "test-api-key"))
    }

    /// Answer with `chunks` as an SSE body, expecting `calls` requests
    pub async fn mount_stream(&self, chunks: &[Value], calls: u64) {
        Self::stream_request()
            .respond_with(sse_response(chunks))
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    /// Answer with an error status and body
    pub async fn mount_error(&self, status: u16, body: Value) {
        Self::stream_request()
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Fail the test if any request reaches the upstream
    pub async fn expect_no_calls(&self) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }
}

/// 200 response carrying `chunks` as `data:` events
pub fn sse_response(chunks: &[Value]) -> ResponseTemplate {
    let body: String = chunks
        .iter()
        .map(|chunk| format!("data: {}\n\n", chunk))
        .collect();
    ResponseTemplate::new(200).set_body_raw(body, "text/event-stream")
}

/// Chunk carrying one inline image
pub fn image_chunk(mime_type: &str, bytes: &[u8]) -> Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{"inlineData": {"mimeType": mime_type, "data": STANDARD.encode(bytes)}}]
            }
        }]
    })
}

/// Chunk carrying one text part
pub fn text_chunk(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]}
        }]
    })
}

/// Google API error body
pub fn api_error(code: u16, status: &str, message: &str) -> Value {
    json!({"error": {"code": code, "message": message, "status": status}})
}
