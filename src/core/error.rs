//! Failures reported by the materializer.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::ReferenceError;

/// Everything that can go wrong while materializing a reference.
///
/// None of these are retried internally; the caller decides whether to
/// surface them or start over.
#[derive(Debug, Error)]
pub enum MaterializeError {
    /// Bad input, detected before any I/O on the reference
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The reference could not be opened for reading
    #[error("Cannot open input stream for {reference}: {message}")]
    SourceUnavailable {
        reference: String,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Reading, writing or creating the destination failed
    #[error("I/O failure: {message}")]
    IoFailure {
        message: String,
        /// Destination created before the failure, if any. Its content is
        /// partial and should be treated as invalid.
        partial_path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },
}

impl MaterializeError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT",
            Self::SourceUnavailable { .. } => "SOURCE_UNAVAILABLE",
            Self::IoFailure { .. } => "IO_FAILURE",
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

impl From<ReferenceError> for MaterializeError {
    fn from(e: ReferenceError) -> Self {
        Self::invalid(e.to_string())
    }
}
