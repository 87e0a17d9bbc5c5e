use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by catalog sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found: {location}")]
    NotFound { location: String },

    #[error("failed to read {location}: {source}")]
    Io {
        location: String,
        source: std::io::Error,
    },
}

/// Source of the raw vocabulary document.
///
/// Sources only deliver text; parsing and shape validation happen in the domain
/// layer so every backend reports malformed documents the same way.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human-readable location used in logs and errors.
    fn location(&self) -> String;

    /// Read the whole document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` when the document does not exist, or
    /// `StorageError::Io` when it exists but cannot be read.
    async fn read_document(&self) -> Result<String, StorageError>;
}

/// Document held in memory, for tests and embedded catalogs.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalogSource {
    document: Option<Arc<str>>,
}

impl InMemoryCatalogSource {
    #[must_use]
    pub fn new(document: impl Into<Arc<str>>) -> Self {
        Self {
            document: Some(document.into()),
        }
    }

    /// A source that behaves like a missing file.
    #[must_use]
    pub fn empty() -> Self {
        Self { document: None }
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalogSource {
    fn location(&self) -> String {
        "memory".to_owned()
    }

    async fn read_document(&self) -> Result<String, StorageError> {
        self.document
            .as_deref()
            .map(str::to_owned)
            .ok_or_else(|| StorageError::NotFound {
                location: self.location(),
            })
    }
}
