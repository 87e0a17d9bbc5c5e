use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use services::{
    CatalogService, DrillService, GenerationError, ModelClient, ModelError, NextWord,
    ProgressTracker, RetryPolicy, SessionError, WordGenerator,
};
use storage::InMemoryCatalogSource;
use vocab_core::model::Catalog;

const DOCUMENT: &str = r#"{
    "vocabulary_database": {
        "core_subjects": {
            "name": "Core Subjects",
            "description": "Preclinical foundations",
            "subsections": {
                "anatomy": {"name": "Anatomy", "words": ["heart", "liver", "bone"]},
                "physiology": {
                    "words": ["pulse", "breath", "blood", "nerve", "muscle",
                              "kidney", "lung", "brain", "skin", "stomach"]
                }
            }
        }
    }
}"#;

fn record_json(russian: &str) -> String {
    format!(
        r#"Here you go:
```json
{{"russian_word": "{russian}", "part_of_speech": "noun",
  "formal_sentence": "f", "informal_sentence": "i", "question": "q", "answer": "a",
  "cases": {{"nominative": "{russian}"}},
  "common_collocations": ["one", "two"]}}
```"#
    )
}

/// Replays scripted replies and records every prompt it was sent.
#[derive(Default)]
struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, ModelError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    fn push(&self, reply: Result<String, ModelError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for ScriptedModel {
    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(record_json("слово")))
    }
}

async fn catalog() -> Arc<Catalog> {
    CatalogService::load(&InMemoryCatalogSource::new(DOCUMENT))
        .await
        .unwrap()
}

fn drill(catalog: Arc<Catalog>, model: Arc<ScriptedModel>) -> DrillService {
    let generator = WordGenerator::new(model).with_retry(RetryPolicy {
        max_attempts: 3,
        base_backoff: Duration::ZERO,
    });
    DrillService::new(catalog, generator)
}

#[tokio::test]
async fn anatomy_is_exhausted_after_three_cycles() {
    let mut tracker = ProgressTracker::new(catalog().await);
    let mut seen = HashSet::new();

    for cycle in 1..=3 {
        assert!(!tracker.is_complete("Core Subjects", "Anatomy"));
        let word = tracker.select_next("Core Subjects", "Anatomy").unwrap();
        assert!(seen.insert(word.clone()), "{word} selected twice");
        assert!(tracker.mark_used("Core Subjects", "Anatomy", &word).unwrap());
        assert_eq!(tracker.used_count("core_subjects", "anatomy"), cycle);
    }

    assert_eq!(tracker.select_next("Core Subjects", "Anatomy"), None);
    assert!(tracker.is_complete("Core Subjects", "Anatomy"));
    assert_eq!(
        seen,
        HashSet::from(["heart".to_string(), "liver".to_string(), "bone".to_string()])
    );
}

#[tokio::test]
async fn ten_word_subsection_completes_after_three() {
    let mut tracker = ProgressTracker::new(catalog().await);
    for _ in 0..3 {
        let word = tracker.select_next("core_subjects", "physiology").unwrap();
        tracker.mark_used("core_subjects", "physiology", &word).unwrap();
    }

    assert!(tracker.is_complete("core_subjects", "physiology"));
    assert_eq!(tracker.quota("core_subjects", "physiology"), 3);
    let unused = tracker
        .catalog()
        .words_in("core_subjects", "physiology")
        .iter()
        .filter(|w| !tracker.is_used("core_subjects", "physiology", w))
        .count();
    assert_eq!(unused, 7);
}

#[tokio::test]
async fn session_drills_until_quota_then_recommends_next() {
    let model = Arc::new(ScriptedModel::default());
    let service = drill(catalog().await, model.clone());
    let mut session = service.start_session();

    service
        .select_subsection(&mut session, "Core Subjects", "Anatomy")
        .unwrap();

    for step in 1..=3 {
        let NextWord::Generated(record) = service.next_word(&mut session).await.unwrap() else {
            panic!("expected a generated word at step {step}");
        };
        assert_eq!(session.current(), Some(record.as_ref()));
        assert_eq!(record.part_of_speech, "noun");
        assert_eq!(record.common_collocations, ["one", "two"]);
        let progress = service.subsection_progress(&session).unwrap();
        assert_eq!(progress.used, step);
    }

    match service.next_word(&mut session).await.unwrap() {
        NextWord::QuotaReached(stats) => {
            assert_eq!(stats.mastered, 3);
            assert_eq!(stats.available, 3);
            assert!((stats.completion_rate - 100.0).abs() < 1e-9);
        }
        other => panic!("expected quota reached, got {other:?}"),
    }
    assert_eq!(model.prompts().len(), 3);
    assert!(model.prompts().iter().all(|p| p.contains("\"Anatomy\" subsection")));

    let next = service.recommended_next(&session).unwrap();
    assert_eq!(next.subsection(), "physiology");
    let section = service.section_progress(&session).unwrap();
    assert_eq!((section.learned, section.possible), (3, 6));
}

#[tokio::test]
async fn failed_generation_leaves_word_unused() {
    let model = Arc::new(ScriptedModel::default());
    for _ in 0..3 {
        model.push(Ok("the model rambled without any JSON".into()));
    }
    let service = drill(catalog().await, model.clone());
    let mut session = service.start_session();
    service
        .select_subsection(&mut session, "core_subjects", "anatomy")
        .unwrap();

    let err = service.next_word(&mut session).await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::Generation(GenerationError::Exhausted { attempts: 3, .. })
    ));
    assert!(session.current().is_none());
    assert_eq!(session.tracker().used_count("core_subjects", "anatomy"), 0);

    // The scripted model now answers with valid payloads.
    assert!(matches!(
        service.next_word(&mut session).await.unwrap(),
        NextWord::Generated(_)
    ));
    assert_eq!(session.tracker().used_count("core_subjects", "anatomy"), 1);
}

#[tokio::test]
async fn missing_required_field_is_retried_not_accepted() {
    let model = Arc::new(ScriptedModel::default());
    model.push(Ok(r#"{"russian_word": "сердце", "part_of_speech": "noun"}"#.into()));
    model.push(Ok(record_json("сердце")));
    let service = drill(catalog().await, model.clone());
    let mut session = service.start_session();
    service
        .select_subsection(&mut session, "core_subjects", "anatomy")
        .unwrap();

    let NextWord::Generated(record) = service.next_word(&mut session).await.unwrap() else {
        panic!("expected a generated word");
    };
    assert_eq!(record.formal_sentence, "f");
    assert_eq!(model.prompts().len(), 2);
}

#[tokio::test]
async fn resets_and_navigation_clear_current_record() {
    let model = Arc::new(ScriptedModel::default());
    let service = drill(catalog().await, model);
    let mut session = service.start_session();

    assert!(matches!(
        service.next_word(&mut session).await,
        Err(SessionError::NothingSelected)
    ));
    assert!(service
        .select_subsection(&mut session, "core_subjects", "surgery")
        .is_err());

    service
        .select_subsection(&mut session, "core_subjects", "anatomy")
        .unwrap();
    service.next_word(&mut session).await.unwrap();
    assert!(session.current().is_some());

    service.reset_current(&mut session).unwrap();
    assert!(session.current().is_none());
    assert_eq!(service.subsection_progress(&session).unwrap().used, 0);

    service
        .select_subsection(&mut session, "core_subjects", "physiology")
        .unwrap();
    service.next_word(&mut session).await.unwrap();
    service
        .select_subsection(&mut session, "core_subjects", "anatomy")
        .unwrap();
    service.next_word(&mut session).await.unwrap();
    service.reset_section(&mut session).unwrap();
    let section = service.section_progress(&session).unwrap();
    assert_eq!(section.learned, 0);

    service.go_home(&mut session);
    assert!(session.selection().is_none());
    assert!(session.current().is_none());
    assert!(service.recommended_next(&session).is_none());
}
