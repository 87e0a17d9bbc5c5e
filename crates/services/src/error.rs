//! Shared error types for the services crate.

use thiserror::Error;

use storage::StorageError;
use vocab_core::model::{CatalogError, ProgressKey, RecordError};

/// Errors emitted while loading the vocabulary catalog. Fatal to startup.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogLoadError {
    #[error("vocabulary catalog not found at {location}")]
    Missing { location: String },
    #[error("vocabulary catalog is unreadable")]
    Unreadable(#[source] StorageError),
    #[error("vocabulary catalog at {location} is malformed")]
    Malformed {
        location: String,
        #[source]
        source: CatalogError,
    },
}

/// Errors emitted by a `ModelClient`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModelError {
    #[error("language model is not configured (set DRILL_AI_API_KEY or GEMINI_API_KEY)")]
    NotConfigured,
    #[error("language model returned an empty response")]
    EmptyResponse,
    #[error("language model request failed with status {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ModelError {
    /// Whether another round trip could plausibly succeed.
    ///
    /// Only a missing configuration is permanent; every transport or status
    /// failure is redriven within the retry budget.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::NotConfigured)
    }
}

/// Why a single generation attempt was rejected.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AttemptError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("response contains no JSON object")]
    NoPayload,
    #[error("response payload is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error(transparent)]
    Record(#[from] RecordError),
}

impl AttemptError {
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Model(err) => err.is_retryable(),
            Self::NoPayload | Self::InvalidJson(_) | Self::Record(_) => true,
        }
    }
}

/// Errors emitted by `WordGenerator`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("cannot generate content for an empty word")]
    EmptyWord,
    #[error("content generation failed after {attempts} attempt(s): {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: AttemptError,
    },
    #[error("content generation aborted: {0}")]
    Aborted(#[source] AttemptError),
}

/// Errors emitted by `ProgressTracker`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("unknown section `{section}`")]
    UnknownSection { section: String },
    #[error("unknown subsection `{subsection}` in section `{section}`")]
    UnknownSubsection { section: String, subsection: String },
    #[error("`{word}` is not a word of {key}")]
    ForeignWord { key: ProgressKey, word: String },
}

/// Errors emitted by session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no subsection selected")]
    NothingSelected,
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}
