use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Placeholder rendered for optional metadata the model did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder rendered for headline text that is missing.
pub const NOT_AVAILABLE_LONG: &str = "Not available";

/// Payload keys that must be present (as strings) for a response to be accepted.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "russian_word",
    "part_of_speech",
    "formal_sentence",
    "informal_sentence",
    "question",
    "answer",
];

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecordError {
    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("payload is missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("payload could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl FromStr for DifficultyLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(()),
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        };
        f.write_str(label)
    }
}

//
// ─── GRAMMAR GROUPS ────────────────────────────────────────────────────────────
//

/// Declension across the six Russian cases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseForms {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub nominative: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub accusative: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub genitive: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub dative: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub instrumental: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub prepositional: Option<String>,
}

impl CaseForms {
    /// Case name and form pairs in textbook order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, Option<&str>); 6] {
        [
            ("nominative", self.nominative.as_deref()),
            ("accusative", self.accusative.as_deref()),
            ("genitive", self.genitive.as_deref()),
            ("dative", self.dative.as_deref()),
            ("instrumental", self.instrumental.as_deref()),
            ("prepositional", self.prepositional.as_deref()),
        ]
    }
}

/// Forms keyed by grammatical person, as used for present and future tense.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonForms {
    #[serde(
        rename = "я",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub first_singular: Option<String>,
    #[serde(
        rename = "ты",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub second_singular: Option<String>,
    #[serde(
        rename = "он_она",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub third_singular: Option<String>,
    #[serde(
        rename = "мы",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub first_plural: Option<String>,
    #[serde(
        rename = "вы",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub second_plural: Option<String>,
    #[serde(
        rename = "они",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub third_plural: Option<String>,
}

impl PersonForms {
    /// Pronoun and form pairs in conjugation-table order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, Option<&str>); 6] {
        [
            ("я", self.first_singular.as_deref()),
            ("ты", self.second_singular.as_deref()),
            ("он/она", self.third_singular.as_deref()),
            ("мы", self.first_plural.as_deref()),
            ("вы", self.second_plural.as_deref()),
            ("они", self.third_plural.as_deref()),
        ]
    }
}

/// Past tense agrees in gender and number rather than person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PastForms {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub masculine: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub feminine: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub neuter: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
}

impl PastForms {
    #[must_use]
    pub fn entries(&self) -> [(&'static str, Option<&str>); 4] {
        [
            ("masculine", self.masculine.as_deref()),
            ("feminine", self.feminine.as_deref()),
            ("neuter", self.neuter.as_deref()),
            ("plural", self.plural.as_deref()),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbConjugation {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub infinitive: Option<String>,
    #[serde(default, deserialize_with = "lenient::group", skip_serializing_if = "Option::is_none")]
    pub present: Option<PersonForms>,
    #[serde(default, deserialize_with = "lenient::group", skip_serializing_if = "Option::is_none")]
    pub past: Option<PastForms>,
    #[serde(default, deserialize_with = "lenient::group", skip_serializing_if = "Option::is_none")]
    pub future: Option<PersonForms>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub aspect: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub perfective_partner: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub imperfective_partner: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodForms {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub imperative: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub conditional: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluralForms {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub nominative_plural: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub genitive_plural: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub other_plurals: Option<String>,
}

/// Prefix and suffix analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFormation {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub common_prefixes: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub common_suffixes: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub related_words: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Negation {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub negative_form: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub negative_example: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub negative_example_english: Option<String>,
}

//
// ─── WORD RECORD ───────────────────────────────────────────────────────────────
//

/// Validated linguistic explanation of one English word.
///
/// The headline fields are always present. Everything else is optional: absence
/// means "not applicable" for this word and is rendered as a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    #[serde(default, skip_deserializing)]
    pub english_word: String,
    pub russian_word: String,
    pub part_of_speech: String,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub pronunciation_stress: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub etymology: Option<String>,

    pub formal_sentence: String,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub formal_sentence_english: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub formal_pos: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub formal_grammar: Option<String>,

    pub informal_sentence: String,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub informal_sentence_english: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub informal_pos: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub informal_grammar: Option<String>,

    pub question: String,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub question_english: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub question_pos: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub question_grammar: Option<String>,

    pub answer: String,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub answer_english: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub answer_pos: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub answer_grammar: Option<String>,

    #[serde(default, deserialize_with = "lenient::group", skip_serializing_if = "Option::is_none")]
    pub cases: Option<CaseForms>,
    #[serde(default, deserialize_with = "lenient::group", skip_serializing_if = "Option::is_none")]
    pub verb_conjugation: Option<VerbConjugation>,
    #[serde(default, deserialize_with = "lenient::group", skip_serializing_if = "Option::is_none")]
    pub mood: Option<MoodForms>,
    #[serde(default, deserialize_with = "lenient::group", skip_serializing_if = "Option::is_none")]
    pub plural_forms: Option<PluralForms>,
    #[serde(default, deserialize_with = "lenient::group", skip_serializing_if = "Option::is_none")]
    pub prefixes_suffixes: Option<WordFormation>,
    #[serde(default, deserialize_with = "lenient::group", skip_serializing_if = "Option::is_none")]
    pub negation: Option<Negation>,
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub common_collocations: Vec<String>,

    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub regional_variations: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<String>,
}

impl WordRecord {
    /// Validate a decoded model payload and turn it into a record.
    ///
    /// Every key in [`REQUIRED_FIELDS`] must be present with a string value.
    /// Optional groups with an unexpected shape are dropped instead of failing.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::NotAnObject` for non-object payloads,
    /// `RecordError::MissingFields` listing every absent required key, or
    /// `RecordError::Decode` if the object cannot be decoded.
    pub fn from_payload(payload: Value, english_word: &str) -> Result<Self, RecordError> {
        let Value::Object(fields) = &payload else {
            return Err(RecordError::NotAnObject);
        };

        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|key| !fields.get(*key).is_some_and(Value::is_string))
            .collect();
        if !missing.is_empty() {
            return Err(RecordError::MissingFields(missing));
        }

        let mut record: Self = serde_json::from_value(payload).map_err(RecordError::Decode)?;
        record.english_word = english_word.trim().to_owned();
        Ok(record)
    }

    /// Parsed difficulty, when the model used one of the expected labels.
    #[must_use]
    pub fn difficulty(&self) -> Option<DifficultyLevel> {
        self.difficulty_level.as_deref()?.parse().ok()
    }
}

/// Render an optional field, substituting [`NOT_AVAILABLE`] when absent.
#[must_use]
pub fn or_placeholder(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_AVAILABLE)
}

//
// ─── LENIENT DECODING ──────────────────────────────────────────────────────────
//

mod lenient {
    use super::{CaseForms, MoodForms, Negation, PastForms, PersonForms, PluralForms};
    use super::{VerbConjugation, WordFormation};
    use super::{DeserializeOwned, Deserialize, Deserializer, Value};

    /// Groups collapse to `None` when none of their fields carry text.
    pub(super) trait Group {
        fn is_blank(&self) -> bool;
    }

    macro_rules! blank_when_all_none {
        ($ty:ty => $($field:ident),+) => {
            impl Group for $ty {
                fn is_blank(&self) -> bool {
                    true $(&& self.$field.is_none())+
                }
            }
        };
    }

    blank_when_all_none!(
        CaseForms =>
        nominative,
        accusative,
        genitive,
        dative,
        instrumental,
        prepositional
    );
    blank_when_all_none!(
        PersonForms =>
        first_singular,
        second_singular,
        third_singular,
        first_plural,
        second_plural,
        third_plural
    );
    blank_when_all_none!(PastForms => masculine, feminine, neuter, plural);
    blank_when_all_none!(
        VerbConjugation =>
        infinitive,
        present,
        past,
        future,
        aspect,
        perfective_partner,
        imperfective_partner
    );
    blank_when_all_none!(MoodForms => imperative, conditional);
    blank_when_all_none!(PluralForms => nominative_plural, genitive_plural, other_plurals);
    blank_when_all_none!(WordFormation => common_prefixes, common_suffixes, related_words);
    blank_when_all_none!(Negation => negative_form, negative_example, negative_example_english);

    pub(super) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(text_from_value(Value::deserialize(deserializer)?))
    }

    pub(super) fn list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items = match Value::deserialize(deserializer)? {
            Value::Array(items) => items.into_iter().filter_map(text_from_value).collect(),
            other => text_from_value(other).into_iter().collect(),
        };
        Ok(items)
    }

    pub(super) fn group<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Group,
    {
        let value = Value::deserialize(deserializer)?;
        if !value.is_object() {
            return Ok(None);
        }
        Ok(serde_json::from_value::<T>(value)
            .ok()
            .filter(|group| !group.is_blank()))
    }

    fn text_from_value(value: Value) -> Option<String> {
        match value {
            Value::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_owned())
            }
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Array(items) => {
                let parts: Vec<String> = items.into_iter().filter_map(text_from_value).collect();
                (!parts.is_empty()).then(|| parts.join("; "))
            }
            Value::Null | Value::Object(_) => None,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
