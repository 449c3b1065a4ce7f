//! Domain types for cachecopy.
//!
//! - Reference: the opaque content identifier a caller hands in
//! - Mime: MIME classification and the fixed extension table
//! - Materialized: the local file handed back on success

pub mod materialized;
pub mod mime;
pub mod reference;

// Re-export commonly used types
pub use materialized::MaterializedFile;
pub use mime::{extension_for, mime_from_path, InvalidMimeType, MimeType, FALLBACK_EXTENSION};
pub use reference::{ContentReference, ReferenceError};
