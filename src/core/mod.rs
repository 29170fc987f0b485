//! Core functionality for the Gateway
//!
//! Response normalization and the model providers it consumes.

pub mod normalizer;
pub mod providers;

pub use normalizer::{NormalizedResult, ResponseNormalizer};
