//! MIME classification and the fixed MIME → extension table.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Extension used when the MIME type is unknown or not in the table
pub const FALLBACK_EXTENSION: &str = "tmp";

/// Rejected MIME strings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("MIME type is empty: {0:?}")]
pub struct InvalidMimeType(pub String);

/// A MIME type as reported by a content resolver.
///
/// Stored normalized: lowercase essence with any parameters removed, so
/// `Audio/MPEG; rate=44100` and `audio/mpeg` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct MimeType(String);

impl MimeType {
    /// Normalize a raw MIME string. Returns `None` for blank input.
    pub fn new(raw: &str) -> Option<Self> {
        let essence = raw.split(';').next().unwrap_or_default().trim();
        if essence.is_empty() {
            return None;
        }
        Some(Self(essence.to_ascii_lowercase()))
    }

    /// Get the normalized string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for MimeType {
    type Error = InvalidMimeType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or(InvalidMimeType(value))
    }
}

/// Map a MIME classification to the file extension used for the cache file.
///
/// The table is part of the external contract and must not grow silently:
/// anything not listed, including unknown, maps to [`FALLBACK_EXTENSION`].
pub fn extension_for(mime: Option<&MimeType>) -> &'static str {
    match mime.map(MimeType::as_str) {
        Some("audio/mpeg") => "mp3",
        Some("audio/mp4") | Some("audio/mp4a-latm") => "m4a",
        Some("audio/ogg") => "ogg",
        Some("audio/wav") | Some("audio/x-wav") => "wav",
        Some("audio/flac") => "flac",
        _ => FALLBACK_EXTENSION,
    }
}

/// Guess a MIME type from a path's extension.
///
/// Guesses come from `mime_guess`; the few names it reports differently from
/// content resolvers (`audio/m4a`, `audio/x-flac`, ...) are folded onto the
/// names the extension table uses.
pub fn mime_from_path(path: &Path) -> Option<MimeType> {
    let guess = mime_guess::from_path(path).first()?;
    let essence = match guess.essence_str() {
        "audio/m4a" | "audio/x-m4a" => "audio/mp4",
        "audio/x-flac" => "audio/flac",
        "audio/wave" | "audio/vnd.wave" => "audio/wav",
        "audio/mp3" => "audio/mpeg",
        other => other,
    };
    MimeType::new(essence)
}
