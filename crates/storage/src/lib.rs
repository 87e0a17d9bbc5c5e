#![forbid(unsafe_code)]

pub mod json_file;
pub mod repository;

pub use json_file::JsonFileCatalogSource;
pub use repository::{CatalogSource, InMemoryCatalogSource, StorageError};
