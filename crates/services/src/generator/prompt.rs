const DEFAULT_AUDIENCE: &str = "MBBS students in Russia";

const RESPONSE_SCHEMA: &str = r#"{
    "russian_word": "Russian translation with pronunciation in parentheses",
    "part_of_speech": "noun/verb/adjective/adverb/etc.",
    "gender": "masculine/feminine/neuter/not applicable",
    "pronunciation_stress": "Word with stress mark (е́, а́, etc.) and phonetic guide",
    "etymology": "Brief origin/etymology of the word",

    "formal_sentence": "A formal sentence using this word in Russian context",
    "formal_sentence_english": "English translation of the formal sentence",
    "formal_pos": "Part of speech used in formal sentence",
    "formal_grammar": "Grammatical form used (case, number, tense, etc.)",

    "informal_sentence": "An informal/casual sentence using this word",
    "informal_sentence_english": "English translation of the informal sentence",
    "informal_pos": "Part of speech used in informal sentence",
    "informal_grammar": "Grammatical form used (case, number, tense, etc.)",

    "question": "A question in Russian that would naturally use this word",
    "question_english": "English translation of the question",
    "question_pos": "Part of speech used in question",
    "question_grammar": "Grammatical form used (case, number, tense, etc.)",

    "answer": "An appropriate answer to that question in Russian",
    "answer_english": "English translation of the answer",
    "answer_pos": "Part of speech used in answer",
    "answer_grammar": "Grammatical form used (case, number, tense, etc.)",

    "cases": {
        "nominative": "Russian form with example sentence and English translation",
        "accusative": "Russian form with example sentence and English translation",
        "genitive": "Russian form with example sentence and English translation",
        "dative": "Russian form with example sentence and English translation",
        "instrumental": "Russian form with example sentence and English translation",
        "prepositional": "Russian form with example sentence and English translation"
    },

    "verb_conjugation": {
        "infinitive": "Infinitive form if verb",
        "present": {"я": "", "ты": "", "он_она": "", "мы": "", "вы": "", "они": ""},
        "past": {"masculine": "", "feminine": "", "neuter": "", "plural": ""},
        "future": {"я": "", "ты": "", "он_она": "", "мы": "", "вы": "", "они": ""},
        "aspect": "perfective/imperfective/both",
        "perfective_partner": "perfective form if imperfective",
        "imperfective_partner": "imperfective form if perfective"
    },

    "mood": {
        "imperative": "Command form",
        "conditional": "Conditional form"
    },

    "plural_forms": {
        "nominative_plural": "Plural nominative form with English explanation",
        "genitive_plural": "Plural genitive form with English explanation",
        "other_plurals": "Other important plural forms with English explanations"
    },

    "prefixes_suffixes": {
        "common_prefixes": "Common prefixes that change meaning with examples",
        "common_suffixes": "Common suffixes that change meaning with examples",
        "related_words": "Words formed with prefixes/suffixes with English translations"
    },

    "negation": {
        "negative_form": "How the word behaves in negative sentences with English explanation",
        "negative_example": "Example of the word in a negative sentence",
        "negative_example_english": "English translation of the negative example"
    },

    "common_collocations": [
        "Common phrase with this word (with English translation)"
    ],

    "regional_variations": "Any regional differences in usage",
    "difficulty_level": "beginner/intermediate/advanced"
}"#;

/// Builds the structured-output instruction sent for each word.
#[derive(Clone, Debug)]
pub struct PromptBuilder {
    audience: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_AUDIENCE)
    }
}

impl PromptBuilder {
    #[must_use]
    pub fn new(audience: impl Into<String>) -> Self {
        Self {
            audience: audience.into(),
        }
    }

    #[must_use]
    pub fn audience(&self) -> &str {
        &self.audience
    }

    #[must_use]
    pub fn build(&self, english_word: &str, section: &str, subsection: &str) -> String {
        let audience = &self.audience;
        format!(
            "You are a Russian language expert helping {audience} learn medical and general \
Russian vocabulary with comprehensive grammatical analysis.

Context: this is for the \"{section}\" section, specifically the \"{subsection}\" subsection.
English word: \"{english_word}\"

Respond with ONLY a valid JSON object with exactly this structure:
{RESPONSE_SCHEMA}

IMPORTANT:
1. For each case declension, give the Russian form AND a short example with English translation.
2. For plural forms, include English explanations of usage.
3. For negative examples, always include English translations.
4. For collocations, include English translations in parentheses.
5. Make all examples relevant to {audience}.
6. Use an empty string for any field that does not apply to this word.
"
        )
    }
}
