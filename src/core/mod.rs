//! Core materialization logic.
//!
//! - Materializer: resolve, allocate, copy
//! - Error: the failure taxonomy surfaced to callers

pub mod error;
pub mod materializer;

pub use error::MaterializeError;
pub use materializer::{ContentMaterializer, FILE_PREFIX};
