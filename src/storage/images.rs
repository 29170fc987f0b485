//! Generated image publication
//!
//! In `inline` mode image bytes go back to the client base64 encoded and
//! nothing touches the filesystem. In `disk` mode each image is written to the
//! output directory and the client receives a URL served from
//! `output.public_path`.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::config::{OutputConfig, OutputMode};
use crate::core::normalizer::NormalizedResult;
use crate::utils::error::{GatewayError, Result};

/// Client-facing form of a generated image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredImage {
    /// Base64 payload
    Inline(String),
    /// Public URL of the written file
    Url(String),
}

/// Client-facing form of one normalized result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishedResult {
    Image {
        image: StoredImage,
        mime_type: String,
        filename: String,
    },
    Text {
        content: String,
    },
}

/// Image publication according to the configured output mode
#[derive(Debug, Clone)]
pub struct ImageStore {
    mode: OutputMode,
    dir: PathBuf,
    public_path: String,
}

impl ImageStore {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            mode: config.mode,
            dir: PathBuf::from(&config.dir),
            public_path: config.public_path.trim_end_matches('/').to_string(),
        }
    }

    /// Create the output directory if this store writes to disk
    pub async fn init(&self) -> Result<()> {
        if self.mode == OutputMode::Disk {
            ensure_dir(&self.dir).await?;
            info!("Generated images will be written to: {}", self.dir.display());
        }
        Ok(())
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Publish results in order. Any write failure fails the whole batch.
    pub async fn publish(&self, results: Vec<NormalizedResult>) -> Result<Vec<PublishedResult>> {
        let mut published = Vec::with_capacity(results.len());
        for result in results {
            published.push(match result {
                NormalizedResult::Image {
                    data,
                    mime_type,
                    filename,
                } => {
                    let image = self.store(&filename, &data).await?;
                    PublishedResult::Image {
                        image,
                        mime_type,
                        filename,
                    }
                }
                NormalizedResult::Text { content } => PublishedResult::Text { content },
            });
        }
        Ok(published)
    }

    async fn store(&self, filename: &str, data: &[u8]) -> Result<StoredImage> {
        match self.mode {
            OutputMode::Inline => Ok(StoredImage::Inline(STANDARD.encode(data))),
            OutputMode::Disk => {
                let path = self.write_file(filename, data).await?;
                debug!("Image stored: {} ({} bytes)", path.display(), data.len());
                Ok(StoredImage::Url(format!("{}/{}", self.public_path, filename)))
            }
        }
    }

    async fn write_file(&self, filename: &str, data: &[u8]) -> Result<PathBuf> {
        ensure_dir(&self.dir).await?;
        let path = self.dir.join(filename);

        // Never replace an image another response already points at
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| GatewayError::FileStorage(format!("Failed to create file: {}", e)))?;
        file.write_all(data)
            .await
            .map_err(|e| GatewayError::FileStorage(format!("Failed to write file: {}", e)))?;
        file.flush()
            .await
            .map_err(|e| GatewayError::FileStorage(format!("Failed to flush file: {}", e)))?;

        Ok(path)
    }
}

async fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).await.map_err(|e| {
        GatewayError::FileStorage(format!("Failed to create output directory: {}", e))
    })
}
