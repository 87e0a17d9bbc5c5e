#![forbid(unsafe_code)]

pub mod ai;
pub mod catalog_service;
pub mod error;
pub mod generator;
pub mod sessions;

pub use sessions as session;

pub use ai::{ChatCompletionsClient, ModelClient, ModelConfig};
pub use catalog_service::CatalogService;
pub use error::{
    AttemptError, CatalogLoadError, GenerationError, ModelError, ProgressError, SessionError,
};
pub use generator::{PromptBuilder, RetryPolicy, WordGenerator};
pub use sessions::{
    CompletionStats, DrillService, NextWord, ProgressTracker, SectionProgress, Session,
    SubsectionProgress,
};
