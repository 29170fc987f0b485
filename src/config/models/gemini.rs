//! Gemini upstream configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Response modalities Gemini accepts in `generationConfig`
pub const KNOWN_MODALITIES: [&str; 2] = ["IMAGE", "TEXT"];

/// Gemini client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key; absent means handlers answer "API key not configured"
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_response_modalities")]
    pub response_modalities: Vec<String>,
    /// Whole-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            api_version: default_api_version(),
            response_modalities: default_response_modalities(),
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.masked_api_key())
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("response_modalities", &self.response_modalities)
            .field("request_timeout", &self.request_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl GeminiConfig {
    /// `{base_url}/{api_version}/models/{model}:streamGenerateContent?alt=sse`
    pub fn stream_endpoint(&self) -> String {
        format!(
            "{}/{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url.trim_end_matches('/'),
            self.api_version,
            self.model
        )
    }

    pub fn has_credential(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// API key for log output
    pub fn masked_api_key(&self) -> String {
        match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => crate::utils::logging::mask_secret(key),
            _ => "<unset>".to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!("Invalid base URL: {}", self.base_url));
        }

        if self.response_modalities.is_empty() {
            return Err("At least one response modality is required".to_string());
        }

        if let Some(unknown) = self
            .response_modalities
            .iter()
            .find(|m| !KNOWN_MODALITIES.contains(&m.as_str()))
        {
            return Err(format!("Unknown response modality: {}", unknown));
        }

        if self.request_timeout == 0 || self.connect_timeout == 0 {
            return Err("Timeouts cannot be 0".to_string());
        }

        Ok(())
    }
}

fn default_model() -> String {
    "gemini-2.0-flash-preview-image-generation".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_api_version() -> String {
    "v1beta".to_string()
}

fn default_response_modalities() -> Vec<String> {
    KNOWN_MODALITIES.iter().map(|m| m.to_string()).collect()
}
