use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::repository::{CatalogSource, StorageError};

/// Catalog document stored as a UTF-8 JSON file on disk.
#[derive(Clone, Debug)]
pub struct JsonFileCatalogSource {
    path: PathBuf,
}

impl JsonFileCatalogSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for JsonFileCatalogSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn read_document(&self) -> Result<String, StorageError> {
        tracing::debug!(path = %self.path.display(), "reading catalog document");
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => StorageError::NotFound {
                    location: self.location(),
                },
                _ => StorageError::Io {
                    location: self.location(),
                    source,
                },
            })
    }
}
