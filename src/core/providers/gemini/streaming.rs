//! Gemini Streaming Module
//!
//! SSE parsing for `streamGenerateContent?alt=sse` and the chunk stream handed
//! to the normalizer.

use std::pin::Pin;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use reqwest::Response;
use serde_json::Value;
use tracing::debug;

use super::error::GeminiErrorMapper;
use super::models::GenerateContentChunk;
use crate::core::providers::error::ProviderError;

/// SSE event types
#[derive(Debug, Clone)]
pub enum GeminiSSEEvent {
    /// One generate-content chunk
    Chunk(GenerateContentChunk),
    /// Error payload sent in-band
    Error(Value),
    /// Empty data line (heartbeat)
    Ping,
    /// `[DONE]` sentinel
    Done,
    /// Data that is not a recognizable chunk
    Unknown(String),
}

/// SSE parser
pub struct GeminiSSEParser;

impl GeminiSSEParser {
    /// Parse one SSE line; comments, `event:` lines and blanks yield `None`
    pub fn parse_event(line: &str) -> Option<GeminiSSEEvent> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() || line.starts_with(':') {
            return None;
        }

        let data = line.strip_prefix("data:")?.trim();

        if data == "[DONE]" {
            return Some(GeminiSSEEvent::Done);
        }

        if data.is_empty() {
            return Some(GeminiSSEEvent::Ping);
        }

        let Ok(json) = serde_json::from_str::<Value>(data) else {
            return Some(GeminiSSEEvent::Unknown(data.to_string()));
        };

        if json.get("error").is_some() {
            return Some(GeminiSSEEvent::Error(json));
        }

        match serde_json::from_value::<GenerateContentChunk>(json) {
            Ok(chunk) => Some(GeminiSSEEvent::Chunk(chunk)),
            Err(_) => Some(GeminiSSEEvent::Unknown(data.to_string())),
        }
    }

    /// Turn an event into a stream item; `None` means "nothing to emit"
    fn into_item(event: GeminiSSEEvent) -> Option<Result<GenerateContentChunk, ProviderError>> {
        match event {
            GeminiSSEEvent::Chunk(chunk) => Some(Ok(chunk)),
            GeminiSSEEvent::Error(error) => Some(Err(GeminiErrorMapper::from_api_response(&error))),
            GeminiSSEEvent::Unknown(data) => {
                debug!("Skipping unrecognized SSE data: {}", data);
                None
            }
            GeminiSSEEvent::Ping | GeminiSSEEvent::Done => None,
        }
    }
}

type ChunkStream = Pin<Box<dyn Stream<Item = Result<GenerateContentChunk, ProviderError>> + Send>>;

/// Finite stream of response chunks in arrival order
pub struct GeminiStream {
    inner: ChunkStream,
}

struct SseState<S> {
    bytes: Pin<Box<S>>,
    buffer: Vec<u8>,
    finished: bool,
}

impl GeminiStream {
    /// Wrap any chunk stream, e.g. one produced by a test double
    pub fn new<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<GenerateContentChunk, ProviderError>> + Send + 'static,
    {
        Self {
            inner: Box::pin(stream),
        }
    }

    /// Stream over the body of a successful SSE response
    pub fn from_response(response: Response) -> Self {
        Self::from_byte_stream(response.bytes_stream())
    }

    /// Parse SSE out of raw body bytes; events may span reads
    pub fn from_byte_stream<S, E>(bytes: S) -> Self
    where
        S: Stream<Item = Result<Bytes, E>> + Send + 'static,
        E: std::fmt::Display + Send + 'static,
    {
        let state = SseState {
            bytes: Box::pin(bytes),
            buffer: Vec::new(),
            finished: false,
        };

        let stream = futures::stream::unfold(state, |mut state| async move {
            loop {
                if let Some(pos) = state.buffer.iter().position(|b| *b == b'\n') {
                    let line: Vec<u8> = state.buffer.drain(..=pos).collect();
                    let line = String::from_utf8_lossy(&line);
                    if let Some(item) =
                        GeminiSSEParser::parse_event(&line).and_then(GeminiSSEParser::into_item)
                    {
                        return Some((item, state));
                    }
                    continue;
                }

                if state.finished {
                    if state.buffer.is_empty() {
                        return None;
                    }
                    // Unterminated last line
                    let rest = std::mem::take(&mut state.buffer);
                    let line = String::from_utf8_lossy(&rest);
                    return GeminiSSEParser::parse_event(&line)
                        .and_then(GeminiSSEParser::into_item)
                        .map(|item| (item, state));
                }

                match state.bytes.next().await {
                    Some(Ok(bytes)) => state.buffer.extend_from_slice(&bytes),
                    Some(Err(e)) => {
                        state.finished = true;
                        state.buffer.clear();
                        return Some((
                            Err(ProviderError::streaming(
                                "gemini",
                                format!("Stream read error: {}", e),
                            )),
                            state,
                        ));
                    }
                    None => state.finished = true,
                }
            }
        });

        Self::new(stream)
    }
}

impl Stream for GeminiStream {
    type Item = Result<GenerateContentChunk, ProviderError>;

    fn poll_next(
        mut self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}
