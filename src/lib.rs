//! # gemini-image-gateway
//!
//! HTTP front end for Gemini image generation. Accepts a text prompt, or an
//! uploaded image plus a prompt, streams the request to Gemini's
//! `streamGenerateContent`, and answers with the images and text found in the
//! streamed chunks.
//!
//! ## Endpoints
//!
//! - `POST /generate-image` with `{"prompt": "..."}`
//! - `POST /manipulate-image` with a multipart `image` file and `prompt` field
//! - `GET /health`
//!
//! ## Embedding
//!
//! ```rust,no_run
//! use gemini_image_gateway::{CliOverrides, Config, server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(&CliOverrides::default()).await?;
//!     server::run_server(config).await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use crate::config::{CliOverrides, Config};
pub use crate::core::normalizer::{NormalizedResult, ResponseNormalizer, normalize};
pub use crate::core::providers::gemini::GeminiClient;
pub use crate::core::providers::{ContentGenerator, ProviderError};
pub use crate::utils::error::{GatewayError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
