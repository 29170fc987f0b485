//! Error handling for the Gateway
//!
//! Every failure a handler can hit ends up as a [`GatewayError`], which
//! renders itself as `{ error, details?, suggestion? }` with the matching
//! HTTP status.

use crate::core::providers::ProviderError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Result type alias for the Gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the Gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request validation errors; the message is shown to the client as is
    #[error("{0}")]
    BadRequest(String),

    /// Uploaded file over the size ceiling
    #[error("Image file too large: {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { size: usize, limit: usize },

    /// Model credential not configured
    #[error("API key not configured")]
    MissingCredential,

    /// Upstream model errors
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The stream finished without a single usable result
    #[error("No results generated")]
    EmptyResult,

    /// File storage errors
    #[error("File storage error: {0}")]
    FileStorage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Standard error response format
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            suggestion: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl GatewayError {
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Body sent to the client
    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            GatewayError::BadRequest(message) => ErrorResponse::new(message.clone()),
            GatewayError::PayloadTooLarge { .. } => {
                ErrorResponse::new("Image file too large").with_details(self.to_string())
            }
            GatewayError::MissingCredential => ErrorResponse::new("API key not configured")
                .with_suggestion("Set GEMINI_API_KEY in the environment or gemini.api_key in the config file"),
            GatewayError::Provider(provider_error) => match provider_error {
                ProviderError::RateLimit { message, .. } => {
                    let suggestion = match provider_error.retry_delay() {
                        Some(seconds) => format!("Please wait {} seconds and try again", seconds),
                        None => "Please wait a moment and try again".to_string(),
                    };
                    ErrorResponse::new("Rate limit exceeded")
                        .with_details(message.clone())
                        .with_suggestion(suggestion)
                }
                ProviderError::Authentication { message, .. } => {
                    ErrorResponse::new("Invalid API key")
                        .with_details(message.clone())
                        .with_suggestion("Check that the configured Gemini API key is valid")
                }
                ProviderError::InvalidRequest { message, .. } => {
                    ErrorResponse::new("Invalid request").with_details(message.clone())
                }
                _ => ErrorResponse::new("Failed to generate content")
                    .with_details(provider_error.message()),
            },
            GatewayError::EmptyResult => ErrorResponse::new("No results generated")
                .with_suggestion("Try rephrasing the prompt"),
            GatewayError::FileStorage(message) => {
                ErrorResponse::new("Failed to save generated image").with_details(message.clone())
            }
            GatewayError::Config(_) | GatewayError::Io(_) | GatewayError::Internal(_) => {
                ErrorResponse::new("An internal error occurred").with_details(self.to_string())
            }
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::BadRequest(_) | GatewayError::PayloadTooLarge { .. } => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::Provider(provider_error) => match provider_error {
                ProviderError::RateLimit { .. } => StatusCode::TOO_MANY_REQUESTS,
                ProviderError::Authentication { .. } => StatusCode::UNAUTHORIZED,
                ProviderError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            GatewayError::MissingCredential
            | GatewayError::EmptyResult
            | GatewayError::FileStorage(_)
            | GatewayError::Config(_)
            | GatewayError::Io(_)
            | GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.to_error_response())
    }
}
