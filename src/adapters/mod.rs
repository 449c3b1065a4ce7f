//! Capability interfaces for the platform side of materialization.
//!
//! The materializer never talks to a platform directly. It is handed a
//! [`ContentResolver`] (MIME lookup and byte streams) and a
//! [`CacheAllocator`] (exclusive creation of cache files), so the copy logic
//! can run against in-memory fakes as easily as against the real filesystem.

pub mod allocator;
pub mod file;
pub mod memory;

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::domain::{ContentReference, MimeType};

// Re-export the bundled implementations
pub use allocator::TempfileAllocator;
pub use file::FileResolver;
pub use memory::MemoryResolver;

/// Byte stream opened on a content reference
pub type ContentStream = Box<dyn Read + Send>;

/// Content-resolution capability
pub trait ContentResolver: Send + Sync {
    /// Human-readable resolver name (for logs)
    fn name(&self) -> &str;

    /// MIME type of the referenced content, `None` if unknown
    fn mime_type(&self, reference: &ContentReference) -> Option<MimeType>;

    /// Open a byte stream on the reference.
    ///
    /// `Ok(None)` means the resolver knows of no such content.
    fn open_stream(&self, reference: &ContentReference) -> io::Result<Option<ContentStream>>;
}

/// Filesystem capability for creating cache files
pub trait CacheAllocator: Send + Sync {
    /// Writer returned for a freshly created file
    type Sink: Write;

    /// Atomically create a new file named `<prefix><random><suffix>` in `dir`.
    ///
    /// Must fail rather than reuse an existing name. The returned path is
    /// absolute and the file outlives the returned sink.
    fn create_unique_file(
        &self,
        dir: &Path,
        prefix: &str,
        suffix: &str,
    ) -> io::Result<(PathBuf, Self::Sink)>;
}
