//! Google Gemini Provider
//!
//! Streaming generate-content client used for image generation and image
//! manipulation (`responseModalities: ["IMAGE", "TEXT"]`).

pub mod client;
pub mod error;
pub mod models;
pub mod streaming;

pub use client::GeminiClient;
pub use error::GeminiErrorMapper;
pub use models::{
    Candidate, CandidateContent, Content, GenerateContentChunk, GenerateContentRequest,
    GenerationConfig, InlineData, Part, ResponseInlineData, ResponsePart,
};
pub use streaming::{GeminiSSEEvent, GeminiSSEParser, GeminiStream};
