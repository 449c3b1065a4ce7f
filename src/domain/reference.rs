//! Content references handed in by the caller.
//!
//! A reference is opaque to the materializer: it is only checked for being
//! usable at all, and its scheme is exposed so resolvers can route on it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a reference string is rejected before any I/O
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("Content reference is empty")]
    Empty,

    #[error("Content reference contains a NUL byte")]
    ContainsNul,
}

/// Opaque, URI-like identifier for a data source outside the process
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentReference(String);

impl ContentReference {
    /// Validate and wrap a reference string
    pub fn parse(raw: impl Into<String>) -> Result<Self, ReferenceError> {
        let raw = raw.into();

        if raw.trim().is_empty() {
            return Err(ReferenceError::Empty);
        }
        if raw.contains('\0') {
            return Err(ReferenceError::ContainsNul);
        }

        Ok(Self(raw))
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URI scheme (`content`, `file`, ...), if the reference carries one.
    ///
    /// Follows RFC 3986: a letter followed by letters, digits, `+`, `-` or `.`,
    /// terminated by `:`. Single-letter schemes are treated as Windows drive
    /// letters and ignored.
    pub fn scheme(&self) -> Option<&str> {
        let (scheme, _) = self.0.split_once(':')?;

        let mut chars = scheme.chars();
        let first = chars.next()?;
        if !first.is_ascii_alphabetic() || scheme.len() < 2 {
            return None;
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
            return None;
        }

        Some(scheme)
    }
}

impl std::fmt::Display for ContentReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ContentReference {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ContentReference {
    type Error = ReferenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ContentReference> for String {
    fn from(value: ContentReference) -> Self {
        value.0
    }
}
