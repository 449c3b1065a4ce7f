//! Cache file allocation backed by the `tempfile` crate.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use super::CacheAllocator;

/// Creates cache files with `tempfile::Builder`.
///
/// `tempfile` opens with create-new semantics and retries on name clashes, so
/// two concurrent allocations can never land on the same path. The file is
/// kept on disk once created; deleting it is the caller's business.
#[derive(Debug, Clone, Default)]
pub struct TempfileAllocator;

impl TempfileAllocator {
    pub fn new() -> Self {
        Self
    }
}

impl CacheAllocator for TempfileAllocator {
    type Sink = File;

    fn create_unique_file(
        &self,
        dir: &Path,
        prefix: &str,
        suffix: &str,
    ) -> io::Result<(PathBuf, File)> {
        let named = tempfile::Builder::new()
            .prefix(prefix)
            .suffix(suffix)
            .tempfile_in(dir)?;

        let (file, path) = named.keep().map_err(|e| e.error)?;

        let path = if path.is_absolute() {
            path
        } else {
            std::env::current_dir()?.join(path)
        };

        tracing::debug!("Allocated cache file {}", path.display());
        Ok((path, file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    #[test]
    fn test_creates_file_with_prefix_and_suffix() {
        let temp = TempDir::new().unwrap();
        let (path, _file) = TempfileAllocator::new()
            .create_unique_file(temp.path(), "audio_stream_", ".mp3")
            .unwrap();

        assert!(path.is_absolute());
        assert!(path.exists());
        assert_eq!(path.parent().unwrap(), temp.path());

        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("audio_stream_"));
        assert!(name.ends_with(".mp3"));
    }

    #[test]
    fn test_file_survives_sink_drop() {
        let temp = TempDir::new().unwrap();
        let (path, file) = TempfileAllocator::new()
            .create_unique_file(temp.path(), "audio_stream_", ".tmp")
            .unwrap();
        drop(file);

        assert!(path.exists());
    }

    #[test]
    fn test_names_never_collide() {
        let temp = TempDir::new().unwrap();
        let allocator = TempfileAllocator::new();

        let paths: HashSet<PathBuf> = (0..50)
            .map(|_| {
                allocator
                    .create_unique_file(temp.path(), "audio_stream_", ".ogg")
                    .unwrap()
                    .0
            })
            .collect();

        assert_eq!(paths.len(), 50);
    }

    #[test]
    fn test_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        let result = TempfileAllocator::new().create_unique_file(&missing, "audio_stream_", ".wav");
        assert!(result.is_err());
        assert!(!missing.exists());
    }
}
