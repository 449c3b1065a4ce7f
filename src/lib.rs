//! cachecopy - Materialize opaque content references as local cache files
//!
//! Given a content reference (a `content://` or `file://` URI, a path, or any
//! identifier a resolver understands), cachecopy resolves its MIME type,
//! creates a uniquely named file in a cache directory with a matching
//! extension, copies every byte into it and hands back the absolute path.
//!
//! # Architecture
//!
//! - Platform access sits behind two capabilities: a `ContentResolver`
//!   (MIME lookup, byte streams) and a `CacheAllocator` (exclusive file
//!   creation)
//! - `ContentMaterializer` drives one synchronous copy through them
//! - `MethodBridge` exposes the materializer over a named method channel
//!
//! # Modules
//!
//! - `adapters`: Capability traits and bundled implementations
//! - `bridge`: Host method-channel protocol
//! - `core`: Materialization logic and errors
//! - `domain`: Data structures (ContentReference, MimeType, MaterializedFile)
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Copy a local file into the cache
//! cachecopy materialize file:///sdcard/Music/song.mp3 --cache-dir /tmp/cache
//!
//! # Answer a host method call
//! echo '{"method":"copyContentToCache","arguments":{"uri":"/music/a.flac"}}' | cachecopy call
//! ```

pub mod adapters;
pub mod bridge;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use crate::adapters::{CacheAllocator, ContentResolver, FileResolver, MemoryResolver, TempfileAllocator};
pub use crate::bridge::{MethodBridge, MethodCall, MethodResult};
pub use crate::core::{ContentMaterializer, MaterializeError};
pub use crate::domain::{ContentReference, MaterializedFile, MimeType};
