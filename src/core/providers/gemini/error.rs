//! Gemini Error Handling
//!
//! Maps HTTP statuses and Google API error payloads onto [`ProviderError`].

use crate::core::providers::error::ProviderError;

const PROVIDER: &str = "gemini";

/// Error mapper for Gemini responses
pub struct GeminiErrorMapper;

impl GeminiErrorMapper {
    /// Classify a non-success HTTP response
    pub fn from_http_status(status: u16, body: &str) -> ProviderError {
        let message = Self::extract_message(body).unwrap_or_else(|| body.to_string());
        match status {
            400 => ProviderError::invalid_request(PROVIDER, message),
            401 | 403 => ProviderError::authentication(PROVIDER, message),
            404 => ProviderError::model_not_found(PROVIDER, message),
            429 => {
                let retry_after = Self::extract_retry_after(body);
                ProviderError::rate_limit_with_retry(PROVIDER, message, retry_after)
            }
            503 => ProviderError::provider_unavailable(PROVIDER, message),
            504 => ProviderError::timeout(PROVIDER, message),
            _ => ProviderError::api_error(PROVIDER, status, message),
        }
    }

    /// Classify an `{"error": {...}}` payload, as sent inside an SSE stream
    pub fn from_api_response(response: &serde_json::Value) -> ProviderError {
        let Some(error) = response.get("error") else {
            return ProviderError::api_error(PROVIDER, 500, "Unknown API error");
        };

        let code = error
            .get("code")
            .and_then(|c| c.as_u64())
            .and_then(|c| u16::try_from(c).ok())
            .unwrap_or(500);
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error");
        let status = error.get("status").and_then(|s| s.as_str()).unwrap_or("");

        match (code, status) {
            (401, _) | (_, "UNAUTHENTICATED") => ProviderError::authentication(PROVIDER, message),
            (403, _) | (_, "PERMISSION_DENIED") => ProviderError::authentication(PROVIDER, message),
            (400, _) | (_, "INVALID_ARGUMENT") | (_, "FAILED_PRECONDITION") => {
                ProviderError::invalid_request(PROVIDER, message)
            }
            (404, _) | (_, "NOT_FOUND") => ProviderError::model_not_found(PROVIDER, message),
            (429, _) | (_, "RESOURCE_EXHAUSTED") => ProviderError::rate_limit_with_retry(
                PROVIDER,
                message,
                Self::extract_retry_after_from_error(error),
            ),
            (503, _) | (_, "UNAVAILABLE") => ProviderError::provider_unavailable(PROVIDER, message),
            _ => ProviderError::api_error(PROVIDER, code, message),
        }
    }

    /// Pull `error.message` out of a JSON error body
    fn extract_message(body: &str) -> Option<String> {
        let json = serde_json::from_str::<serde_json::Value>(body).ok()?;
        json.get("error")?
            .get("message")?
            .as_str()
            .map(|s| s.to_string())
    }

    fn extract_retry_after(body: &str) -> Option<u64> {
        let json = serde_json::from_str::<serde_json::Value>(body).ok()?;
        if let Some(error) = json.get("error") {
            return Self::extract_retry_after_from_error(error);
        }
        json.get("retry_after").and_then(|r| r.as_u64())
    }

    /// Google reports the delay as a `RetryInfo` detail, e.g. `"retryDelay": "17s"`
    fn extract_retry_after_from_error(error: &serde_json::Value) -> Option<u64> {
        if let Some(retry_after) = error.get("retry_after").and_then(|r| r.as_u64()) {
            return Some(retry_after);
        }

        error
            .get("details")?
            .as_array()?
            .iter()
            .find_map(|detail| {
                detail
                    .get("retryDelay")
                    .and_then(|d| d.as_str())
                    .and_then(|d| d.trim_end_matches('s').parse::<f64>().ok())
                    .map(|secs| secs.ceil() as u64)
            })
    }
}
