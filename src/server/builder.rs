//! Server builder and run_server function

use crate::config::Config;
use crate::core::providers::ContentGenerator;
use crate::server::server::HttpServer;
use crate::server::state::AppState;
use crate::storage::ImageStore;
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    generator: Option<Arc<dyn ContentGenerator>>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Use `generator` instead of a Gemini client built from the config
    pub fn with_generator(mut self, generator: Arc<dyn ContentGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        match self.generator {
            Some(generator) => {
                let images = ImageStore::new(config.output());
                images.init().await?;
                Ok(HttpServer::with_state(AppState::new(config, generator, images)))
            }
            None => HttpServer::new(&config).await,
        }
    }
}

/// Run the server with an already loaded configuration
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting Gemini image gateway");

    let gemini = config.gemini();
    if gemini.has_credential() {
        info!(
            "Model: {} (API key {})",
            gemini.model,
            gemini.masked_api_key()
        );
    } else {
        warn!("GEMINI_API_KEY is not set; generation requests will fail until it is configured");
    }
    info!("Output mode: {}", config.output().mode);

    let server = ServerBuilder::new().with_config(config.clone()).build().await?;
    info!(
        "Server starting at: http://{}:{}",
        config.server().host,
        config.server().port
    );
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   POST /generate-image - Text to image");
    info!("   POST /manipulate-image - Image plus prompt to image");

    server.start().await
}
