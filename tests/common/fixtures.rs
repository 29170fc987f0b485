//! Test fixtures and data factories

use gemini_image_gateway::Config;
use gemini_image_gateway::config::OutputMode;
use std::path::Path;

/// Bytes of a 1x1 PNG
pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Factory for gateway configs
pub struct ConfigFactory;

impl ConfigFactory {
    /// Inline-mode config pointing at `base_url` with a test key
    pub fn for_upstream(base_url: &str) -> Config {
        let mut config = Config::default();
        config.gateway.gemini.api_key = Some("test-api-key".to_string());
        config.gateway.gemini.base_url = base_url.to_string();
        config
    }

    /// Same, without a credential
    pub fn without_key(base_url: &str) -> Config {
        let mut config = Self::for_upstream(base_url);
        config.gateway.gemini.api_key = None;
        config
    }

    /// Disk-mode config writing into `dir`
    pub fn disk(base_url: &str, dir: &Path) -> Config {
        let mut config = Self::for_upstream(base_url);
        config.gateway.output.mode = OutputMode::Disk;
        config.gateway.output.dir = dir.to_string_lossy().to_string();
        config
    }
}

/// Hand-built `multipart/form-data` body
pub struct MultipartBody {
    boundary: String,
    body: Vec<u8>,
}

impl Default for MultipartBody {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartBody {
    pub fn new() -> Self {
        Self {
            boundary: "----gateway-test-boundary".to_string(),
            body: Vec::new(),
        }
    }

    /// Plain text field
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// File field with an explicit content type
    pub fn file(mut self, name: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.body
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                name, filename
            )
            .as_bytes(),
        );
        self.body
            .extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// `Content-Type` header value
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Finished body bytes
    pub fn build(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.body
    }
}
