//! Configuration loading utilities
//!
//! Layers applied on top of the YAML file: `.env`, process environment, then
//! command line overrides.

use super::models::*;
use crate::utils::error::{GatewayError, Result};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

/// Config file looked up when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "config/gateway.yaml";

/// Overrides taken from the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl GatewayConfig {
    /// Apply environment overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        debug!("Applying environment overrides");

        if let Some(api_key) = lookup("GEMINI_API_KEY").filter(|v| !v.is_empty()) {
            self.gemini.api_key = Some(api_key);
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            self.gemini.model = model;
        }
        if let Some(base_url) = lookup("GEMINI_BASE_URL") {
            self.gemini.base_url = base_url;
        }

        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_var("PORT", &port)?;
        }

        if let Some(mode) = lookup("OUTPUT_MODE") {
            self.output.mode = OutputMode::from_str(&mode).map_err(GatewayError::Config)?;
        }
        if let Some(dir) = lookup("OUTPUT_DIR") {
            self.output.dir = dir;
        }
        if let Some(size) = lookup("MAX_FILE_SIZE") {
            self.upload.max_file_size = parse_var("MAX_FILE_SIZE", &size)?;
        }

        Ok(())
    }

    /// Apply command line overrides
    pub fn apply_cli(&mut self, overrides: &CliOverrides) {
        if let Some(host) = &overrides.host {
            self.server.host = host.clone();
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| GatewayError::Config(format!("Invalid {}: {}", name, e)))
}
