//! Response normalization
//!
//! Turns the heterogeneous chunks of a streamed generate-content response into
//! an ordered list of typed results. Each chunk is classified once, at
//! ingestion, into a [`ChunkCandidate`]; chunks without a usable
//! `candidates[0].content.parts[0]` path are dropped without interrupting the
//! stream.
//!
//! Ordering contract: result order is chunk arrival order. Text fragments are
//! never merged and nothing is deduplicated.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures::{Stream, StreamExt};
use tracing::debug;

use crate::core::providers::ProviderError;
use crate::core::providers::gemini::GenerateContentChunk;

/// Filename tag for prompt-only generations
pub const TEXT_TO_IMAGE: &str = "text_to_image";
/// Filename tag for generations that edit an uploaded image
pub const IMAGE_MANIPULATION: &str = "image_manipulation";

/// Media type assumed when a payload does not declare one
pub const DEFAULT_MIME_TYPE: &str = "image/png";

/// Well-formed chunk content
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkCandidate {
    /// First part carries decoded inline bytes
    InlineData {
        data: Vec<u8>,
        mime_type: Option<String>,
    },
    /// First part carries a text field
    Text(String),
    /// Path exists but the first part carries neither
    Empty,
}

impl ChunkCandidate {
    /// Classify a chunk. `None` means malformed: a level of the
    /// candidate/content/parts path is missing or empty, or the inline
    /// payload is not valid base64.
    pub fn from_chunk(chunk: &GenerateContentChunk) -> Option<Self> {
        let part = chunk
            .candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?
            .first()?;

        if let Some(inline) = &part.inline_data {
            if let Some(encoded) = inline.data.as_deref() {
                let data = match STANDARD.decode(encoded) {
                    Ok(data) => data,
                    Err(e) => {
                        debug!("Skipping chunk with undecodable inline data: {}", e);
                        return None;
                    }
                };
                return Some(Self::InlineData {
                    data,
                    mime_type: inline.mime_type.clone(),
                });
            }
        }

        match &part.text {
            Some(text) => Some(Self::Text(text.clone())),
            None => Some(Self::Empty),
        }
    }
}

/// One normalized result
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedResult {
    Image {
        data: Vec<u8>,
        mime_type: String,
        filename: String,
    },
    Text {
        content: String,
    },
}

impl NormalizedResult {
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }
}

/// `{base}_{timestampMillis}_{index}.{ext}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFilename {
    pub base: String,
    pub timestamp_millis: i64,
    pub index: usize,
    pub extension: &'static str,
}

impl GeneratedFilename {
    pub fn new(base: &str, timestamp_millis: i64, index: usize, mime_type: Option<&str>) -> Self {
        Self {
            base: base.to_string(),
            timestamp_millis,
            index,
            extension: extension_for_mime(mime_type),
        }
    }
}

impl fmt::Display for GeneratedFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}.{}",
            self.base, self.timestamp_millis, self.index, self.extension
        )
    }
}

/// File extension for a declared media type; unknown or absent means png
pub fn extension_for_mime(mime_type: Option<&str>) -> &'static str {
    let Some(mime_type) = mime_type else {
        return "png";
    };
    let lowered = mime_type.trim().to_ascii_lowercase();
    let essence = lowered.split(';').next().unwrap_or_default().trim();
    match essence {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "png",
    }
}

/// Single pass over a chunk sequence
#[derive(Debug)]
pub struct ResponseNormalizer {
    base_name: String,
    timestamp_millis: i64,
    next_index: usize,
    results: Vec<NormalizedResult>,
}

impl ResponseNormalizer {
    /// Start a normalization; the filename timestamp is captured now
    pub fn new(base_name: impl Into<String>) -> Self {
        Self::with_timestamp(base_name, chrono::Utc::now().timestamp_millis())
    }

    pub fn with_timestamp(base_name: impl Into<String>, timestamp_millis: i64) -> Self {
        Self {
            base_name: base_name.into(),
            timestamp_millis,
            next_index: 0,
            results: Vec::new(),
        }
    }

    /// Process one chunk
    pub fn push(&mut self, chunk: &GenerateContentChunk) {
        match ChunkCandidate::from_chunk(chunk) {
            Some(ChunkCandidate::InlineData { data, mime_type }) => {
                let filename = GeneratedFilename::new(
                    &self.base_name,
                    self.timestamp_millis,
                    self.next_index,
                    mime_type.as_deref(),
                );
                self.next_index += 1;
                self.results.push(NormalizedResult::Image {
                    data,
                    mime_type: mime_type.unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
                    filename: filename.to_string(),
                });
            }
            Some(ChunkCandidate::Text(content)) => {
                self.results.push(NormalizedResult::Text { content });
            }
            Some(ChunkCandidate::Empty) => {}
            None => debug!("Skipping malformed chunk"),
        }
    }

    /// Results so far, in arrival order
    pub fn finish(self) -> Vec<NormalizedResult> {
        self.results
    }

    /// Normalize an in-memory chunk sequence
    pub fn normalize_chunks<I>(mut self, chunks: I) -> Vec<NormalizedResult>
    where
        I: IntoIterator<Item = GenerateContentChunk>,
    {
        for chunk in chunks {
            self.push(&chunk);
        }
        self.finish()
    }

    /// Drain a chunk stream to exhaustion. An error item from the transport
    /// aborts the pass and is returned as is.
    pub async fn normalize<S>(mut self, stream: S) -> Result<Vec<NormalizedResult>, ProviderError>
    where
        S: Stream<Item = Result<GenerateContentChunk, ProviderError>>,
    {
        futures::pin_mut!(stream);
        while let Some(chunk) = stream.next().await {
            self.push(&chunk?);
        }
        Ok(self.finish())
    }
}

/// Normalize `stream` with filenames tagged `base_name`
pub async fn normalize<S>(stream: S, base_name: &str) -> Result<Vec<NormalizedResult>, ProviderError>
where
    S: Stream<Item = Result<GenerateContentChunk, ProviderError>>,
{
    ResponseNormalizer::new(base_name).normalize(stream).await
}
