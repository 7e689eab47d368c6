//! Template storage collaborator.
//!
//! The core never performs I/O itself. Hosts hand the session a
//! [`TemplateStore`] and the session reads or writes whole documents through
//! it; a failed read leaves the session untouched.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::BTreeMap;

use crate::doc::{DocumentError, TemplateDocument};

/// Error returned by template store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("template not found: {0}")]
    NotFound(String),
    #[error("template already exists: {0}")]
    AlreadyExists(String),
    #[error("invalid template key: {0:?}")]
    InvalidKey(String),
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Invalid(#[from] DocumentError),
}

impl StoreError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_NOT_FOUND",
            Self::AlreadyExists(_) => "E_ALREADY_EXISTS",
            Self::InvalidKey(_) => "E_INVALID_KEY",
            Self::Io(_) => "E_IO",
            Self::Invalid(_) => "E_INVALID_DOCUMENT",
        }
    }
}

/// Create/read/update access to stored template documents by key.
pub trait TemplateStore {
    /// Store a new document under `key`.
    ///
    /// # Errors
    ///
    /// [`StoreError::AlreadyExists`] if `key` is taken.
    fn create(&mut self, key: &str, doc: &TemplateDocument) -> Result<(), StoreError>;

    /// Fetch the document stored under `key`.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if nothing is stored under `key`.
    fn read(&self, key: &str) -> Result<TemplateDocument, StoreError>;

    /// Replace the document stored under `key`.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] if nothing is stored under `key`.
    fn update(&mut self, key: &str, doc: &TemplateDocument) -> Result<(), StoreError>;

    /// Keys of all stored documents, sorted.
    ///
    /// # Errors
    ///
    /// Backend-specific failures.
    fn list(&self) -> Result<Vec<String>, StoreError>;
}

/// Check that `key` is usable as a template name: non-empty, at most 128
/// bytes of ASCII alphanumerics, `-`, `_` or `.`, not starting with `.`.
///
/// # Errors
///
/// [`StoreError::InvalidKey`] otherwise.
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key.len() <= 128
        && !key.starts_with('.')
        && key.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'));
    if valid { Ok(()) } else { Err(StoreError::InvalidKey(key.to_owned())) }
}

/// In-memory store. Documents round-trip through JSON so stored values
/// behave like ones read back from disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    templates: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert raw JSON under `key`, bypassing validation. Used to stage
    /// malformed documents.
    pub fn insert_raw(&mut self, key: &str, json: &str) {
        self.templates.insert(key.to_owned(), json.to_owned());
    }
}

impl TemplateStore for MemoryStore {
    fn create(&mut self, key: &str, doc: &TemplateDocument) -> Result<(), StoreError> {
        validate_key(key)?;
        if self.templates.contains_key(key) {
            return Err(StoreError::AlreadyExists(key.to_owned()));
        }
        self.templates.insert(key.to_owned(), doc.to_json_pretty()?);
        Ok(())
    }

    fn read(&self, key: &str) -> Result<TemplateDocument, StoreError> {
        validate_key(key)?;
        let raw = self.templates.get(key).ok_or_else(|| StoreError::NotFound(key.to_owned()))?;
        Ok(TemplateDocument::from_json(raw)?)
    }

    fn update(&mut self, key: &str, doc: &TemplateDocument) -> Result<(), StoreError> {
        validate_key(key)?;
        let json = doc.to_json_pretty()?;
        let slot = self.templates.get_mut(key).ok_or_else(|| StoreError::NotFound(key.to_owned()))?;
        *slot = json;
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.templates.keys().cloned().collect())
    }
}
