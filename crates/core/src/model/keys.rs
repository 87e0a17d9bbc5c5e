use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable address of a subsection: its section key plus its own key.
///
/// Progress is tracked per `ProgressKey`, never per display name, so renaming a
/// section in the source document does not orphan progress within a session.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProgressKey {
    section: String,
    subsection: String,
}

impl ProgressKey {
    /// Creates a new `ProgressKey`
    #[must_use]
    pub fn new(section: impl Into<String>, subsection: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            subsection: subsection.into(),
        }
    }

    /// Returns the section key
    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    /// Returns the subsection key
    #[must_use]
    pub fn subsection(&self) -> &str {
        &self.subsection
    }
}

impl fmt::Debug for ProgressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProgressKey({}/{})", self.section, self.subsection)
    }
}

impl fmt::Display for ProgressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.section, self.subsection)
    }
}
