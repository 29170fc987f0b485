//! Main gateway configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Main gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Gemini upstream configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Upload limits
    #[serde(default)]
    pub upload: UploadConfig,
    /// Where generated images go
    #[serde(default)]
    pub output: OutputConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}
