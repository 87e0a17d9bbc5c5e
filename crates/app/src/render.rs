use std::fmt;

use services::{CompletionStats, SectionProgress, SubsectionProgress};
use vocab_core::model::{Catalog, NOT_AVAILABLE_LONG, WordRecord, or_placeholder};

const BAR_WIDTH: usize = 20;

/// Plain-text rendering of a generated record.
pub struct RecordView<'a>(pub &'a WordRecord);

impl fmt::Display for RecordView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        writeln!(f, "{} → {}", r.english_word, r.russian_word)?;
        writeln!(
            f,
            "  part of speech: {}   gender: {}   difficulty: {}",
            r.part_of_speech,
            or_placeholder(r.gender.as_deref()),
            difficulty(r),
        )?;
        writeln!(f, "  stress: {}", long(r.pronunciation_stress.as_deref()))?;
        writeln!(f, "  etymology: {}", long(r.etymology.as_deref()))?;

        example(
            f,
            "Formal",
            &r.formal_sentence,
            r.formal_sentence_english.as_deref(),
            (r.formal_pos.as_deref(), r.formal_grammar.as_deref()),
        )?;
        example(
            f,
            "Informal",
            &r.informal_sentence,
            r.informal_sentence_english.as_deref(),
            (r.informal_pos.as_deref(), r.informal_grammar.as_deref()),
        )?;
        example(
            f,
            "Question",
            &r.question,
            r.question_english.as_deref(),
            (r.question_pos.as_deref(), r.question_grammar.as_deref()),
        )?;
        example(
            f,
            "Answer",
            &r.answer,
            r.answer_english.as_deref(),
            (r.answer_pos.as_deref(), r.answer_grammar.as_deref()),
        )?;

        if let Some(cases) = &r.cases {
            table(f, "Cases", &cases.entries())?;
        }
        if let Some(verb) = &r.verb_conjugation {
            writeln!(f, "\nVerb")?;
            writeln!(f, "  infinitive: {}", or_placeholder(verb.infinitive.as_deref()))?;
            writeln!(f, "  aspect: {}", or_placeholder(verb.aspect.as_deref()))?;
            if let Some(partner) = verb.perfective_partner.as_deref() {
                writeln!(f, "  perfective partner: {partner}")?;
            }
            if let Some(partner) = verb.imperfective_partner.as_deref() {
                writeln!(f, "  imperfective partner: {partner}")?;
            }
            if let Some(present) = &verb.present {
                table(f, "Present", &present.entries())?;
            }
            if let Some(past) = &verb.past {
                table(f, "Past", &past.entries())?;
            }
            if let Some(future) = &verb.future {
                table(f, "Future", &future.entries())?;
            }
        }
        if let Some(mood) = &r.mood {
            table(
                f,
                "Mood",
                &[
                    ("imperative", mood.imperative.as_deref()),
                    ("conditional", mood.conditional.as_deref()),
                ],
            )?;
        }
        if let Some(plural) = &r.plural_forms {
            table(
                f,
                "Plural",
                &[
                    ("nominative", plural.nominative_plural.as_deref()),
                    ("genitive", plural.genitive_plural.as_deref()),
                    ("other", plural.other_plurals.as_deref()),
                ],
            )?;
        }
        if let Some(formation) = &r.prefixes_suffixes {
            table(
                f,
                "Word formation",
                &[
                    ("prefixes", formation.common_prefixes.as_deref()),
                    ("suffixes", formation.common_suffixes.as_deref()),
                    ("related", formation.related_words.as_deref()),
                ],
            )?;
        }
        if let Some(negation) = &r.negation {
            table(
                f,
                "Negation",
                &[
                    ("form", negation.negative_form.as_deref()),
                    ("example", negation.negative_example.as_deref()),
                    ("english", negation.negative_example_english.as_deref()),
                ],
            )?;
        }
        if !r.common_collocations.is_empty() {
            writeln!(f, "\nCollocations")?;
            for phrase in &r.common_collocations {
                writeln!(f, "  • {phrase}")?;
            }
        }
        if let Some(regional) = r.regional_variations.as_deref() {
            writeln!(f, "\nRegional variations\n  {regional}")?;
        }
        Ok(())
    }
}

/// Normalized difficulty label, or the model's own wording when it is not one
/// of the known levels.
fn difficulty(record: &WordRecord) -> String {
    record.difficulty().map_or_else(
        || or_placeholder(record.difficulty_level.as_deref()).to_owned(),
        |level| level.to_string(),
    )
}

fn long(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_AVAILABLE_LONG)
}

fn example(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    russian: &str,
    english: Option<&str>,
    (pos, grammar): (Option<&str>, Option<&str>),
) -> fmt::Result {
    writeln!(f, "\n{label}")?;
    writeln!(f, "  {russian}")?;
    writeln!(f, "  {}", long(english))?;
    writeln!(f, "  grammar: {} - {}", or_placeholder(pos), or_placeholder(grammar))
}

fn table(f: &mut fmt::Formatter<'_>, title: &str, rows: &[(&str, Option<&str>)]) -> fmt::Result {
    writeln!(f, "\n{title}")?;
    for (label, value) in rows {
        writeln!(f, "  {label}: {}", or_placeholder(*value))?;
    }
    Ok(())
}

/// `[#######-------------] 33%`
pub struct ProgressBar(pub f64);

impl fmt::Display for ProgressBar {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fraction = self.0.clamp(0.0, 1.0);
        let filled = (fraction * BAR_WIDTH as f64).round() as usize;
        write!(
            f,
            "[{}{}] {:.0}%",
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled),
            fraction * 100.0
        )
    }
}

pub fn subsection_line(progress: &SubsectionProgress) -> String {
    format!(
        "{}: {}/{} words {}",
        progress.display_name,
        progress.used.min(progress.quota),
        progress.quota,
        ProgressBar(progress.fraction)
    )
}

pub fn section_line(progress: &SectionProgress) -> String {
    format!(
        "{} overall: {}/{} {}",
        progress.display_name,
        progress.learned,
        progress.possible,
        ProgressBar(progress.fraction)
    )
}

pub fn completion(stats: &CompletionStats) -> String {
    format!(
        "Congratulations! You've completed {} words from '{}'.\n  \
         mastered: {}   available: {}   completion rate: {:.1}%",
        stats.mastered, stats.display_name, stats.mastered, stats.available, stats.completion_rate
    )
}

/// Sections and their subsections with descriptions and word counts.
pub struct CatalogView<'a>(pub &'a Catalog);

impl fmt::Display for CatalogView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let catalog = self.0;
        for section in catalog.list_sections() {
            writeln!(f, "{} ({})", section.display_name(), section.key())?;
            writeln!(f, "  {}", catalog.describe_section(section.key()))?;
            for sub in section.subsections() {
                writeln!(
                    f,
                    "  - {} ({}): {} words. {}",
                    sub.display_name(),
                    sub.key(),
                    sub.words().len(),
                    catalog.describe_subsection(section.key(), sub.key())
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(extra: serde_json::Value) -> WordRecord {
        let mut payload = json!({
            "russian_word": "сердце",
            "part_of_speech": "noun",
            "formal_sentence": "Сердце работает.",
            "informal_sentence": "Сердце стучит!",
            "question": "Где сердце?",
            "answer": "В груди.",
        });
        if let (Some(base), Some(extra)) = (payload.as_object_mut(), extra.as_object()) {
            base.extend(extra.clone());
        }
        WordRecord::from_payload(payload, "heart").unwrap()
    }

    #[test]
    fn missing_optional_fields_render_placeholders() {
        let text = RecordView(&record(json!({}))).to_string();
        assert!(text.starts_with("heart → сердце"));
        assert!(text.contains("gender: N/A"));
        assert!(text.contains("etymology: Not available"));
        assert!(text.contains("grammar: N/A - N/A"));
        assert!(!text.contains("Cases"));
        assert!(!text.contains("Collocations"));
    }

    #[test]
    fn present_groups_are_rendered() {
        let text = RecordView(&record(json!({
            "gender": "neuter",
            "cases": {"nominative": "сердце", "genitive": "сердца"},
            "common_collocations": ["больное сердце (a weak heart)"],
        })))
        .to_string();
        assert!(text.contains("gender: neuter"));
        assert!(text.contains("genitive: сердца"));
        assert!(text.contains("dative: N/A"));
        assert!(text.contains("• больное сердце (a weak heart)"));
    }

    #[test]
    fn difficulty_is_normalized_when_recognized() {
        let text = RecordView(&record(json!({"difficulty_level": " Intermediate "}))).to_string();
        assert!(text.contains("difficulty: intermediate"));

        let text = RecordView(&record(json!({"difficulty_level": "B2"}))).to_string();
        assert!(text.contains("difficulty: B2"));

        let text = RecordView(&record(json!({}))).to_string();
        assert!(text.contains("difficulty: N/A"));
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(ProgressBar(0.0).to_string(), format!("[{}] 0%", "-".repeat(20)));
        assert_eq!(ProgressBar(1.0).to_string(), format!("[{}] 100%", "#".repeat(20)));
        assert_eq!(
            ProgressBar(0.5).to_string(),
            format!("[{}{}] 50%", "#".repeat(10), "-".repeat(10))
        );
        assert!(ProgressBar(7.0).to_string().ends_with("100%"));
    }

    #[test]
    fn catalog_listing_uses_sentinel_descriptions() {
        let catalog = Catalog::from_json_str(
            r#"{"vocabulary_database": {"daily_life": {"subsections": {"food": {"words": ["bread"]}}}}}"#,
        )
        .unwrap();
        let text = CatalogView(&catalog).to_string();
        assert!(text.contains("Daily Life (daily_life)"));
        assert!(text.contains("No description available"));
        assert!(text.contains("Food (food): 1 words."));
    }
}
