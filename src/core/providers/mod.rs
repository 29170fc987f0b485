//! Model providers
//!
//! [`ContentGenerator`] is the seam between request handlers and the external
//! model client. Handlers hold an `Arc<dyn ContentGenerator>`; production wires
//! in [`gemini::GeminiClient`].

pub mod error;
pub mod gemini;

pub use error::ProviderError;

use async_trait::async_trait;
use gemini::{GenerateContentRequest, GeminiStream};

/// Streaming content generation
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Start a streamed generation; the returned stream is finite
    async fn stream_generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GeminiStream, ProviderError>;

    /// Model identifier requests are sent to
    fn model(&self) -> &str;

    /// Provider name used in logs
    fn name(&self) -> &'static str;
}
