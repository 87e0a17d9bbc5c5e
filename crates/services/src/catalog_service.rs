use std::sync::Arc;

use storage::{CatalogSource, JsonFileCatalogSource, StorageError};
use vocab_core::model::Catalog;

use crate::error::CatalogLoadError;

/// Loads the vocabulary catalog once at startup.
pub struct CatalogService;

impl CatalogService {
    /// Read and validate the catalog document from `source`.
    ///
    /// Subsections without words are dropped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `CatalogLoadError` when the document is missing, unreadable, not
    /// JSON, or lacks the `vocabulary_database` root.
    pub async fn load(source: &dyn CatalogSource) -> Result<Arc<Catalog>, CatalogLoadError> {
        let location = source.location();
        let document = source.read_document().await.map_err(|err| match err {
            StorageError::NotFound { location } => CatalogLoadError::Missing { location },
            other => CatalogLoadError::Unreadable(other),
        })?;

        let catalog = Catalog::from_json_str(&document).map_err(|source| {
            CatalogLoadError::Malformed {
                location: location.clone(),
                source,
            }
        })?;

        for key in catalog.dropped_subsections() {
            tracing::warn!(%key, "subsection has no words and was skipped");
        }
        if catalog.is_empty() {
            tracing::warn!(%location, "vocabulary catalog has no sections");
        }
        tracing::info!(
            %location,
            sections = catalog.sections().len(),
            words = catalog.word_count(),
            "vocabulary catalog loaded"
        );

        Ok(Arc::new(catalog))
    }

    /// Convenience wrapper around [`CatalogService::load`] for a file path.
    ///
    /// # Errors
    ///
    /// See [`CatalogService::load`].
    pub async fn load_file(
        path: impl Into<std::path::PathBuf>,
    ) -> Result<Arc<Catalog>, CatalogLoadError> {
        Self::load(&JsonFileCatalogSource::new(path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::InMemoryCatalogSource;

    #[tokio::test]
    async fn loads_catalog_from_source() {
        let source = InMemoryCatalogSource::new(
            r#"{"vocabulary_database": {"core_subjects": {"subsections": {"anatomy": {"words": ["heart"]}}}}}"#,
        );
        let catalog = CatalogService::load(&source).await.unwrap();
        assert_eq!(catalog.words_in("core_subjects", "anatomy"), ["heart".to_string()]);
    }

    #[tokio::test]
    async fn empty_database_loads_as_empty_catalog() {
        let source = InMemoryCatalogSource::new(
            r#"{"vocabulary_database": {"daily_life": {"subsections": {"food": {"words": []}}}}}"#,
        );
        let catalog = CatalogService::load(&source).await.unwrap();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.dropped_subsections().len(), 1);

        let source = InMemoryCatalogSource::new(r#"{"vocabulary_database": {}}"#);
        let catalog = CatalogService::load(&source).await.unwrap();
        assert!(catalog.is_empty());
    }

    #[tokio::test]
    async fn missing_document_maps_to_missing() {
        let err = CatalogService::load(&InMemoryCatalogSource::empty())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogLoadError::Missing { .. }));
    }

    #[tokio::test]
    async fn malformed_document_maps_to_malformed() {
        let source = InMemoryCatalogSource::new(r#"{"words": []}"#);
        let err = CatalogService::load(&source).await.unwrap_err();
        assert!(matches!(err, CatalogLoadError::Malformed { .. }));

        let source = InMemoryCatalogSource::new("not json at all");
        let err = CatalogService::load(&source).await.unwrap_err();
        assert!(matches!(err, CatalogLoadError::Malformed { .. }));
    }
}
