use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::keys::ProgressKey;
use crate::model::text::display_name_from_key;

/// Top-level key every catalog document must carry.
pub const ROOT_KEY: &str = "vocabulary_database";

/// Returned by the describe queries when the document carries no description.
pub const NO_DESCRIPTION: &str = "No description available";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog document is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("catalog document has no top-level `vocabulary_database` key")]
    MissingRoot,

    #[error("`vocabulary_database` must map section keys to objects")]
    RootNotObject,

    #[error("section `{key}` is malformed: {source}")]
    InvalidSection {
        key: String,
        source: serde_json::Error,
    },

    #[error("subsection `{section}/{key}` is malformed: {source}")]
    InvalidSubsection {
        section: String,
        key: String,
        source: serde_json::Error,
    },
}

//
// ─── DOCUMENT SHAPE ────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct RawSection {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    subsections: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct RawSubsection {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    words: Option<Vec<String>>,
}

//
// ─── SUBSECTION ────────────────────────────────────────────────────────────────
//

/// A leaf of the taxonomy: an ordered, duplicate-free list of English words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subsection {
    key: String,
    display_name: String,
    description: Option<String>,
    words: Vec<String>,
}

impl Subsection {
    /// Creates a subsection.
    ///
    /// A missing or blank `name` falls back to the title-cased key. Words are
    /// trimmed; blanks and repeats are dropped while keeping first-seen order.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        name: Option<String>,
        description: Option<String>,
        words: impl IntoIterator<Item = String>,
    ) -> Self {
        let key = key.into();
        let mut unique: Vec<String> = Vec::new();
        for word in words {
            let word = word.trim();
            if word.is_empty() || unique.iter().any(|w| w == word) {
                continue;
            }
            unique.push(word.to_owned());
        }

        Self {
            display_name: display_name_or_fallback(name, &key),
            description: normalize_description(description),
            key,
            words: unique,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    fn matches(&self, id: &str) -> bool {
        self.key == id || self.display_name == id
    }
}

//
// ─── SECTION ───────────────────────────────────────────────────────────────────
//

/// A top-level topic grouping subsections in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    key: String,
    display_name: String,
    description: Option<String>,
    subsections: Vec<Subsection>,
}

impl Section {
    /// Creates a section. Later subsections sharing a key with an earlier one
    /// are ignored so keys stay unique within the section.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        name: Option<String>,
        description: Option<String>,
        subsections: impl IntoIterator<Item = Subsection>,
    ) -> Self {
        let key = key.into();
        let mut unique: Vec<Subsection> = Vec::new();
        for subsection in subsections {
            if unique.iter().any(|s| s.key == subsection.key) {
                continue;
            }
            unique.push(subsection);
        }

        Self {
            display_name: display_name_or_fallback(name, &key),
            description: normalize_description(description),
            key,
            subsections: unique,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn subsections(&self) -> &[Subsection] {
        &self.subsections
    }

    /// Find a subsection by key, falling back to its display name.
    #[must_use]
    pub fn subsection(&self, id: &str) -> Option<&Subsection> {
        self.subsections
            .iter()
            .find(|s| s.key == id)
            .or_else(|| self.subsections.iter().find(|s| s.matches(id)))
    }

    /// Total number of words across all subsections.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.subsections.iter().map(|s| s.words.len()).sum()
    }

    fn matches(&self, id: &str) -> bool {
        self.key == id || self.display_name == id
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Read-only vocabulary taxonomy.
///
/// Every lookup accepts either the stable key from the source document or the
/// display name; an exact key match always wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    sections: Vec<Section>,
    dropped: Vec<ProgressKey>,
}

impl Catalog {
    #[must_use]
    pub fn new(sections: impl IntoIterator<Item = Section>) -> Self {
        let mut unique: Vec<Section> = Vec::new();
        let mut dropped = Vec::new();
        for mut section in sections {
            if unique.iter().any(|s| s.key == section.key) {
                continue;
            }
            section.subsections.retain(|sub| {
                if sub.words.is_empty() {
                    dropped.push(ProgressKey::new(&section.key, &sub.key));
                    false
                } else {
                    true
                }
            });
            unique.push(section);
        }
        Self {
            sections: unique,
            dropped,
        }
    }

    /// Parse a catalog document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` when the text is not JSON, has no
    /// `vocabulary_database` object, or a section/subsection has the wrong shape.
    pub fn from_json_str(document: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(document).map_err(CatalogError::InvalidJson)?;
        Self::from_value(value)
    }

    /// Build a catalog from an already parsed document.
    ///
    /// # Errors
    ///
    /// See [`Catalog::from_json_str`].
    pub fn from_value(document: Value) -> Result<Self, CatalogError> {
        let Value::Object(mut root) = document else {
            return Err(CatalogError::MissingRoot);
        };
        let database = root.remove(ROOT_KEY).ok_or(CatalogError::MissingRoot)?;
        let Value::Object(database) = database else {
            return Err(CatalogError::RootNotObject);
        };

        let mut sections = Vec::with_capacity(database.len());
        for (section_key, raw) in database {
            let raw: RawSection =
                serde_json::from_value(raw).map_err(|source| CatalogError::InvalidSection {
                    key: section_key.clone(),
                    source,
                })?;

            let mut subsections = Vec::new();
            for (subsection_key, raw_sub) in raw.subsections.unwrap_or_default() {
                let raw_sub: RawSubsection = serde_json::from_value(raw_sub).map_err(|source| {
                    CatalogError::InvalidSubsection {
                        section: section_key.clone(),
                        key: subsection_key.clone(),
                        source,
                    }
                })?;
                subsections.push(Subsection::new(
                    subsection_key,
                    raw_sub.name,
                    raw_sub.description,
                    raw_sub.words.unwrap_or_default(),
                ));
            }

            sections.push(Section::new(
                section_key,
                raw.name,
                raw.description,
                subsections,
            ));
        }

        Ok(Self::new(sections))
    }

    /// All sections in document order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Alias of [`Catalog::sections`] matching the collaborator vocabulary.
    #[must_use]
    pub fn list_sections(&self) -> &[Section] {
        self.sections()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Subsections removed at load time because they listed no words.
    #[must_use]
    pub fn dropped_subsections(&self) -> &[ProgressKey] {
        &self.dropped
    }

    /// Find a section by key, falling back to its display name.
    #[must_use]
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.key == id)
            .or_else(|| self.sections.iter().find(|s| s.matches(id)))
    }

    #[must_use]
    pub fn subsection(&self, section: &str, subsection: &str) -> Option<(&Section, &Subsection)> {
        let section = self.section(section)?;
        let subsection = section.subsection(subsection)?;
        Some((section, subsection))
    }

    /// Resolve a (section, subsection) pair given by key or display name.
    #[must_use]
    pub fn resolve(&self, section: &str, subsection: &str) -> Option<ProgressKey> {
        self.subsection(section, subsection)
            .map(|(section, subsection)| ProgressKey::new(&section.key, &subsection.key))
    }

    /// Look up a subsection by its canonical key.
    #[must_use]
    pub fn by_key(&self, key: &ProgressKey) -> Option<(&Section, &Subsection)> {
        let section = self.sections.iter().find(|s| s.key == key.section())?;
        let subsection = section
            .subsections
            .iter()
            .find(|s| s.key == key.subsection())?;
        Some((section, subsection))
    }

    /// Words of a subsection, empty when either id is unknown.
    #[must_use]
    pub fn words_in(&self, section: &str, subsection: &str) -> &[String] {
        self.subsection(section, subsection)
            .map(|(_, subsection)| subsection.words())
            .unwrap_or_default()
    }

    /// Words of a subsection addressed by canonical key.
    #[must_use]
    pub fn words_for(&self, key: &ProgressKey) -> &[String] {
        self.by_key(key)
            .map(|(_, subsection)| subsection.words())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn count_words(&self, section: &str, subsection: &str) -> usize {
        self.words_in(section, subsection).len()
    }

    #[must_use]
    pub fn describe_section(&self, section: &str) -> &str {
        self.section(section)
            .and_then(Section::description)
            .unwrap_or(NO_DESCRIPTION)
    }

    #[must_use]
    pub fn describe_subsection(&self, section: &str, subsection: &str) -> &str {
        self.subsection(section, subsection)
            .and_then(|(_, subsection)| subsection.description())
            .unwrap_or(NO_DESCRIPTION)
    }

    /// The subsection that follows `key` within the same section, if any.
    #[must_use]
    pub fn next_subsection_after(&self, key: &ProgressKey) -> Option<&Subsection> {
        let (section, _) = self.by_key(key)?;
        let index = section
            .subsections
            .iter()
            .position(|s| s.key == key.subsection())?;
        section.subsections.get(index + 1)
    }

    /// Total number of words across the whole catalog.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.sections.iter().map(Section::word_count).sum()
    }
}

fn display_name_or_fallback(name: Option<String>, key: &str) -> String {
    name.map(|n| n.trim().to_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| display_name_from_key(key))
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_owned())
        .filter(|d| !d.is_empty())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
