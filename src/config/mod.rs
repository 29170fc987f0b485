//! Configuration management for the Gateway
//!
//! This module handles loading, validation, and management of all gateway configuration.

pub mod loader;
pub mod models;

pub use loader::{CliOverrides, DEFAULT_CONFIG_PATH};
pub use models::*;

use crate::utils::error::{GatewayError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the Gateway
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Gateway configuration
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        let gateway: GatewayConfig = serde_yaml::from_str(&content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))?;

        debug!("Configuration file parsed");
        Ok(Self { gateway })
    }

    /// Load configuration from every source and validate it.
    ///
    /// Precedence from lowest to highest: defaults, YAML file, `.env`,
    /// process environment, command line.
    pub async fn load(overrides: &CliOverrides) -> Result<Self> {
        let mut config = match &overrides.config {
            Some(path) => Self::from_file(path).await?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH).await?
            }
            None => {
                debug!("No config file found, starting from defaults");
                Self::default()
            }
        };

        // .env never overrides variables already set in the process
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {:?}", path),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(GatewayError::Config(format!("Failed to load .env: {}", e))),
        }

        config.gateway.apply_env(|key| std::env::var(key).ok())?;
        config.gateway.apply_cli(overrides);

        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    pub fn gemini(&self) -> &GeminiConfig {
        &self.gateway.gemini
    }

    pub fn upload(&self) -> &UploadConfig {
        &self.gateway.upload
    }

    pub fn output(&self) -> &OutputConfig {
        &self.gateway.output
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.gateway.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.gateway
            .server
            .validate()
            .map_err(|e| GatewayError::Config(format!("Server config error: {}", e)))?;

        self.gateway
            .server
            .cors
            .validate()
            .map_err(|e| GatewayError::Config(format!("CORS config error: {}", e)))?;

        self.gateway
            .gemini
            .validate()
            .map_err(|e| GatewayError::Config(format!("Gemini config error: {}", e)))?;

        if self.gateway.upload.max_file_size == 0 {
            return Err(GatewayError::Config(
                "Upload config error: Max file size cannot be 0".to_string(),
            ));
        }

        self.gateway
            .output
            .validate()
            .map_err(|e| GatewayError::Config(format!("Output config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.gateway)
            .map_err(|e| GatewayError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
