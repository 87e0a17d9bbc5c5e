#![forbid(unsafe_code)]

//! Domain types for the vocabulary drill: the read-only catalog, progress
//! keys, and the validated word record produced by the content generator.

pub mod model;

pub use model::{Catalog, CatalogError, ProgressKey, RecordError, Section, Subsection, WordRecord};
