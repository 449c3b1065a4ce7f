//! In-memory resolver.
//!
//! Serves registered byte buffers by reference string. Used as a fake in
//! tests and by embedders that already hold the content in memory.

use std::collections::HashMap;
use std::io::{self, Cursor};
use std::sync::{Arc, RwLock};

use super::{ContentResolver, ContentStream};
use crate::domain::{ContentReference, MimeType};

#[derive(Debug, Clone)]
enum Entry {
    Readable {
        mime: Option<MimeType>,
        bytes: Arc<[u8]>,
    },
    Unreadable {
        mime: Option<MimeType>,
    },
}

/// Resolver backed by a map of reference → bytes
#[derive(Debug, Default)]
pub struct MemoryResolver {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register readable content under `reference`
    pub fn insert(&self, reference: &str, mime: Option<&str>, bytes: impl Into<Vec<u8>>) {
        let entry = Entry::Readable {
            mime: mime.and_then(MimeType::new),
            bytes: Arc::from(bytes.into()),
        };
        self.write_entries().insert(reference.to_string(), entry);
    }

    /// Register content that is known but cannot be opened (permission denied)
    pub fn insert_unreadable(&self, reference: &str, mime: Option<&str>) {
        let entry = Entry::Unreadable {
            mime: mime.and_then(MimeType::new),
        };
        self.write_entries().insert(reference.to_string(), entry);
    }

    /// Forget a reference, as if the underlying content was deleted
    pub fn remove(&self, reference: &str) -> bool {
        self.write_entries().remove(reference).is_some()
    }

    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_entries(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Entry>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_entries(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Entry>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl ContentResolver for MemoryResolver {
    fn name(&self) -> &str {
        "memory"
    }

    fn mime_type(&self, reference: &ContentReference) -> Option<MimeType> {
        match self.read_entries().get(reference.as_str())? {
            Entry::Readable { mime, .. } | Entry::Unreadable { mime } => mime.clone(),
        }
    }

    fn open_stream(&self, reference: &ContentReference) -> io::Result<Option<ContentStream>> {
        match self.read_entries().get(reference.as_str()) {
            None => Ok(None),
            Some(Entry::Readable { bytes, .. }) => {
                Ok(Some(Box::new(Cursor::new(Arc::clone(bytes)))))
            }
            Some(Entry::Unreadable { .. }) => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("Permission denied: {}", reference),
            )),
        }
    }
}
