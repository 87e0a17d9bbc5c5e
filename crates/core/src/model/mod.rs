mod catalog;
mod keys;
pub mod record;
pub mod text;

pub use catalog::{Catalog, CatalogError, NO_DESCRIPTION, ROOT_KEY, Section, Subsection};
pub use keys::ProgressKey;
pub use record::{
    CaseForms, DifficultyLevel, MoodForms, Negation, NOT_AVAILABLE, NOT_AVAILABLE_LONG, PastForms,
    PersonForms, PluralForms, REQUIRED_FIELDS, RecordError, VerbConjugation, WordFormation,
    WordRecord, or_placeholder,
};
