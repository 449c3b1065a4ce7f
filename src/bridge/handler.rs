//! Dispatch of host method calls onto the materializer.

use std::error::Error as _;
use std::path::{Path, PathBuf};

use crate::adapters::{CacheAllocator, ContentResolver};
use crate::core::{ContentMaterializer, MaterializeError};
use crate::domain::ContentReference;

use super::call::{MethodCall, MethodResult};

/// Channel the host registers the handler on
pub const CHANNEL: &str = "cachecopy/content_resolver";

/// Copy a content reference into the cache and return its path
pub const METHOD_COPY_CONTENT_TO_CACHE: &str = "copyContentToCache";

/// Argument carrying the reference for [`METHOD_COPY_CONTENT_TO_CACHE`]
pub const ARG_URI: &str = "uri";

pub const CODE_INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
pub const CODE_COPY_ERROR: &str = "COPY_ERROR";

/// Answers method calls for one cache directory
pub struct MethodBridge<R, A> {
    materializer: ContentMaterializer<R, A>,
    cache_dir: PathBuf,
}

impl<R, A> MethodBridge<R, A>
where
    R: ContentResolver,
    A: CacheAllocator,
{
    pub fn new(materializer: ContentMaterializer<R, A>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            materializer,
            cache_dir: cache_dir.into(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn materializer(&self) -> &ContentMaterializer<R, A> {
        &self.materializer
    }

    /// Handle one call. Never panics and never returns a Rust error: every
    /// outcome is encoded in the [`MethodResult`].
    pub fn handle(&self, call: &MethodCall) -> MethodResult {
        match call.method.as_str() {
            METHOD_COPY_CONTENT_TO_CACHE => self.copy_content_to_cache(call),
            other => {
                tracing::debug!("Unhandled method on {}: {}", CHANNEL, other);
                MethodResult::NotImplemented
            }
        }
    }

    fn copy_content_to_cache(&self, call: &MethodCall) -> MethodResult {
        let Some(uri) = call.argument::<String>(ARG_URI) else {
            return MethodResult::error(CODE_INVALID_ARGUMENT, "URI is required", None);
        };

        // Only a bad `uri` is the caller's fault; cache directory problems are
        // host configuration and surface as copy errors.
        if let Err(e) = ContentReference::parse(uri.as_str()) {
            return MethodResult::error(CODE_INVALID_ARGUMENT, e.to_string(), None);
        }

        match self.materializer.materialize(&uri, &self.cache_dir) {
            Ok(file) => MethodResult::success(file.into_path().to_string_lossy().into_owned()),
            Err(e) => MethodResult::error(
                CODE_COPY_ERROR,
                format!("Failed to copy content URI: {}", e),
                Some(error_details(&e)),
            ),
        }
    }
}

/// `<CODE>` followed by the underlying cause, when there is one
fn error_details(e: &MaterializeError) -> String {
    match e.source() {
        Some(cause) => format!("{}: {}", e.code(), cause),
        None => e.code().to_string(),
    }
}
