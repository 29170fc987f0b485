//! Configuration data models
//!
//! This module defines all configuration structures used throughout the gateway.

#![allow(missing_docs)]

pub mod gateway;
pub mod gemini;
pub mod logging;
pub mod output;
pub mod server;

// Re-export all configuration types
pub use gateway::*;
pub use gemini::*;
pub use logging::*;
pub use output::*;
pub use server::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    3000
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    16 * 1024 * 1024
}

/// Default upload ceiling for a single image
pub fn default_max_file_size() -> usize {
    10 * 1024 * 1024 // 10MB
}

/// Default upstream request timeout in seconds
pub fn default_request_timeout() -> u64 {
    120
}

pub fn default_connect_timeout() -> u64 {
    10
}

pub fn default_true() -> bool {
    true
}
