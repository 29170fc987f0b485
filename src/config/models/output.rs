//! Upload limits and generated-image output

use super::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Largest accepted image in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
        }
    }
}

/// How generated images are handed back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Base64 in the response body
    #[default]
    Inline,
    /// Written under `dir`, returned as a URL
    Disk,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Inline => write!(f, "inline"),
            OutputMode::Disk => write!(f, "disk"),
        }
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inline" => Ok(OutputMode::Inline),
            "disk" => Ok(OutputMode::Disk),
            other => Err(format!("Unknown output mode: {}", other)),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub mode: OutputMode,
    /// Directory images are written to in disk mode
    #[serde(default = "default_output_dir")]
    pub dir: String,
    /// URL prefix the directory is served under
    #[serde(default = "default_public_path")]
    pub public_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::default(),
            dir: default_output_dir(),
            public_path: default_public_path(),
        }
    }
}

impl OutputConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.mode == OutputMode::Disk {
            if self.dir.trim().is_empty() {
                return Err("Output directory cannot be empty in disk mode".to_string());
            }
            if !self.public_path.starts_with('/') || self.public_path.trim_end_matches('/').is_empty() {
                return Err(format!(
                    "Public path must be a non-root absolute path: {}",
                    self.public_path
                ));
            }
        }
        Ok(())
    }
}

fn default_output_dir() -> String {
    "generated".to_string()
}

fn default_public_path() -> String {
    "/generated".to_string()
}
