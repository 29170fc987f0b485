//! Storage layer for the Gateway
//!
//! Only generated images are ever stored, and only in `disk` output mode.

pub mod images;

pub use images::{ImageStore, PublishedResult, StoredImage};
