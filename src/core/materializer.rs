//! Copy an opaque content reference into a local cache file.
//!
//! Steps:
//! 1. Validate the reference and cache directory
//! 2. Resolve the MIME type and pick an extension from the fixed table
//! 3. Open the source stream
//! 4. Atomically create `audio_stream_<random>.<ext>` in the cache directory
//! 5. Copy until end of stream, flush, close both ends
//!
//! The source is opened before the destination is created, so a reference
//! that cannot be read never leaves a file behind.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::adapters::{CacheAllocator, ContentResolver};
use crate::domain::{extension_for, ContentReference, MaterializedFile};

use super::error::MaterializeError;

/// Prefix of every cache file name
pub const FILE_PREFIX: &str = "audio_stream_";

/// Materializes content references into files in a cache directory
pub struct ContentMaterializer<R, A> {
    resolver: R,
    allocator: A,
}

impl<R, A> ContentMaterializer<R, A>
where
    R: ContentResolver,
    A: CacheAllocator,
{
    pub fn new(resolver: R, allocator: A) -> Self {
        Self {
            resolver,
            allocator,
        }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Copy `reference` into a new file under `cache_dir` and return it.
    ///
    /// Blocks for the whole copy. On an I/O failure after the destination
    /// exists, the partial file is left in place and its path is reported in
    /// the error.
    pub fn materialize(
        &self,
        reference: &str,
        cache_dir: &Path,
    ) -> Result<MaterializedFile, MaterializeError> {
        let reference = ContentReference::parse(reference)?;
        validate_cache_dir(cache_dir)?;

        let mime = self.resolver.mime_type(&reference);
        let extension = extension_for(mime.as_ref());
        tracing::debug!(
            "Resolved {} via {}: mime={}, extension={}",
            reference,
            self.resolver.name(),
            mime.as_ref().map(|m| m.as_str()).unwrap_or("unknown"),
            extension
        );

        let mut source = match self.resolver.open_stream(&reference) {
            Ok(Some(stream)) => stream,
            Ok(None) => {
                tracing::warn!("No input stream for {}", reference);
                return Err(MaterializeError::SourceUnavailable {
                    reference: reference.to_string(),
                    message: "resolver returned no stream".to_string(),
                    source: None,
                });
            }
            Err(e) => {
                tracing::warn!("Failed to open {}: {}", reference, e);
                return Err(MaterializeError::SourceUnavailable {
                    reference: reference.to_string(),
                    message: e.to_string(),
                    source: Some(e),
                });
            }
        };

        let suffix = format!(".{}", extension);
        let (path, mut sink) = self
            .allocator
            .create_unique_file(cache_dir, FILE_PREFIX, &suffix)
            .map_err(|e| MaterializeError::IoFailure {
                message: format!(
                    "Failed to create cache file in {}: {}",
                    cache_dir.display(),
                    e
                ),
                partial_path: None,
                source: e,
            })?;

        let started = Instant::now();
        let copied = io::copy(&mut source, &mut sink).and_then(|n| {
            sink.flush()?;
            Ok(n)
        });
        drop(sink);
        drop(source);

        let size_bytes = copied.map_err(|e| {
            tracing::warn!("Copy into {} failed: {}", path.display(), e);
            MaterializeError::IoFailure {
                message: format!("Failed to copy {} into {}: {}", reference, path.display(), e),
                partial_path: Some(path.clone()),
                source: e,
            }
        })?;

        tracing::info!(
            "Materialized {} -> {} ({} bytes in {}ms)",
            reference,
            path.display(),
            size_bytes,
            started.elapsed().as_millis()
        );

        Ok(MaterializedFile::new(path, mime, extension, size_bytes))
    }
}

impl<R, A> ContentMaterializer<R, A>
where
    R: ContentResolver + 'static,
    A: CacheAllocator + 'static,
{
    /// Run [`materialize`](Self::materialize) on tokio's blocking pool.
    ///
    /// For callers on an async runtime that must not stall a worker thread
    /// for the duration of the copy.
    pub async fn materialize_async(
        self: Arc<Self>,
        reference: String,
        cache_dir: PathBuf,
    ) -> Result<MaterializedFile, MaterializeError> {
        tokio::task::spawn_blocking(move || self.materialize(&reference, &cache_dir))
            .await
            .map_err(|e| MaterializeError::IoFailure {
                message: format!("Materialization task failed: {}", e),
                partial_path: None,
                source: io::Error::other(e),
            })?
    }
}

/// The cache directory is supplied by the host and never created here
fn validate_cache_dir(cache_dir: &Path) -> Result<(), MaterializeError> {
    if cache_dir.as_os_str().is_empty() {
        return Err(MaterializeError::invalid("Cache directory path is empty"));
    }
    if !cache_dir.is_dir() {
        return Err(MaterializeError::invalid(format!(
            "Cache directory does not exist: {}",
            cache_dir.display()
        )));
    }
    Ok(())
}
