//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::providers::ContentGenerator;
use crate::core::providers::gemini::GeminiClient;
use crate::storage::ImageStore;
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Everything here is read-only after startup, so handlers share it through
/// `Arc` without locking.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Upstream model client
    pub generator: Arc<dyn ContentGenerator>,
    /// Generated image publication
    pub images: Arc<ImageStore>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, generator: Arc<dyn ContentGenerator>, images: ImageStore) -> Self {
        Self {
            config: Arc::new(config),
            generator,
            images: Arc::new(images),
        }
    }

    /// Wire the Gemini client and image store described by `config`
    pub async fn from_config(config: Config) -> Result<Self> {
        let client = GeminiClient::new(config.gemini().clone()).map_err(GatewayError::Provider)?;
        let images = ImageStore::new(config.output());
        images.init().await?;

        Ok(Self::new(config, Arc::new(client), images))
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
