//! Resolver for references that point at the local filesystem.
//!
//! Handles `file://` URIs and bare paths. Anything with another scheme
//! (`content://`, `https://`, ...) is unknown to this resolver.

use std::fs::File;
use std::io;
use std::path::PathBuf;

use url::Url;

use super::{ContentResolver, ContentStream};
use crate::domain::{mime_from_path, ContentReference, MimeType};

/// Resolves `file://` URIs and plain paths
#[derive(Debug, Clone, Default)]
pub struct FileResolver;

impl FileResolver {
    pub fn new() -> Self {
        Self
    }

    /// Local path a reference points at, if this resolver handles it
    pub fn local_path(&self, reference: &ContentReference) -> Option<PathBuf> {
        match reference.scheme() {
            None => Some(PathBuf::from(reference.as_str())),
            Some(scheme) if scheme.eq_ignore_ascii_case("file") => {
                let url = Url::parse(reference.as_str()).ok()?;
                url.to_file_path().ok()
            }
            Some(_) => None,
        }
    }
}

impl ContentResolver for FileResolver {
    fn name(&self) -> &str {
        "file"
    }

    fn mime_type(&self, reference: &ContentReference) -> Option<MimeType> {
        mime_from_path(&self.local_path(reference)?)
    }

    fn open_stream(&self, reference: &ContentReference) -> io::Result<Option<ContentStream>> {
        let Some(path) = self.local_path(reference) else {
            return Ok(None);
        };

        // A directory opens fine on Unix but fails on the first read
        if path.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is a directory", path.display()),
            ));
        }

        let file = File::open(&path)?;
        Ok(Some(Box::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    fn reference(raw: &str) -> ContentReference {
        ContentReference::parse(raw).unwrap()
    }

    #[test]
    fn test_mime_from_path_extension() {
        let resolver = FileResolver::new();

        assert_eq!(
            resolver.mime_type(&reference("/music/a.MP3")).unwrap().as_str(),
            "audio/mpeg"
        );
        assert_eq!(
            resolver.mime_type(&reference("file:///music/b.flac")).unwrap().as_str(),
            "audio/flac"
        );
        assert_eq!(
            resolver.mime_type(&reference("/music/c.m4a")).unwrap().as_str(),
            "audio/mp4"
        );
        assert!(resolver.mime_type(&reference("/music/noext")).is_none());
    }

    #[test]
    fn test_foreign_schemes_are_unknown() {
        let resolver = FileResolver::new();
        let content = reference("content://media/external/audio/media/7.mp3");

        assert!(resolver.local_path(&content).is_none());
        assert!(resolver.mime_type(&content).is_none());
        assert!(resolver.open_stream(&content).unwrap().is_none());
    }

    #[test]
    fn test_file_uri_is_percent_decoded() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("my song.ogg");
        std::fs::write(&path, b"oggdata").unwrap();

        let url = Url::from_file_path(&path).unwrap();
        assert!(url.as_str().contains("%20"));

        let resolver = FileResolver::new();
        let uri = reference(url.as_str());
        assert_eq!(resolver.local_path(&uri).unwrap(), path);

        let mut stream = resolver.open_stream(&uri).unwrap().unwrap();
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).unwrap();
        assert_eq!(buf, b"oggdata");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone.mp3");

        let result = FileResolver::new().open_stream(&reference(missing.to_str().unwrap()));
        match result {
            Err(e) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            Ok(_) => panic!("Expected NotFound"),
        }
    }

    #[test]
    fn test_directory_is_rejected() {
        let temp = TempDir::new().unwrap();
        let result = FileResolver::new().open_stream(&reference(temp.path().to_str().unwrap()));
        assert!(result.is_err());
    }
}
