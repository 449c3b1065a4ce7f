//! The file produced by a successful materialization.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::mime::MimeType;

/// A local copy of a content reference.
///
/// Ownership of the file passes to the caller; nothing here tracks or
/// deletes it afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterializedFile {
    /// Absolute path to the copy
    pub path: PathBuf,

    /// MIME type reported by the resolver, if any
    pub mime_type: Option<MimeType>,

    /// Extension chosen from the MIME table (without the dot)
    pub extension: String,

    /// Bytes copied into the file
    pub size_bytes: u64,

    /// When the copy finished
    pub created_at: DateTime<Utc>,
}

impl MaterializedFile {
    pub fn new(
        path: PathBuf,
        mime_type: Option<MimeType>,
        extension: impl Into<String>,
        size_bytes: u64,
    ) -> Self {
        Self {
            path,
            mime_type,
            extension: extension.into(),
            size_bytes,
            created_at: Utc::now(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consume and return just the path
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_materialized_file_serialization() {
        let file = MaterializedFile::new(
            PathBuf::from("/cache/audio_stream_ab12.mp3"),
            MimeType::new("audio/mpeg"),
            "mp3",
            12_345,
        );

        let json = serde_json::to_string(&file).unwrap();
        let parsed: MaterializedFile = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.path, PathBuf::from("/cache/audio_stream_ab12.mp3"));
        assert_eq!(parsed.mime_type.unwrap().as_str(), "audio/mpeg");
        assert_eq!(parsed.extension, "mp3");
        assert_eq!(parsed.size_bytes, 12_345);
    }
}
