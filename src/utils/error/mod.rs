//! Error Handling utilities
//!
//! Gateway error taxonomy and the JSON error body returned to clients.

pub mod error;

pub use error::*;
