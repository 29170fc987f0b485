//! Utility modules for the gateway
//!
//! - **error**: Gateway error type and its HTTP mapping
//! - **logging**: Tracing subscriber setup and secret masking

pub mod error;
pub mod logging;
