use std::sync::Arc;

use vocab_core::model::WordRecord;

use crate::ai::ModelClient;
use crate::error::{AttemptError, GenerationError};
use crate::generator::payload::parse_record;
use crate::generator::prompt::PromptBuilder;
use crate::generator::retry::RetryPolicy;

/// Turns one vocabulary word into a validated [`WordRecord`].
///
/// Every call makes a fresh model round trip; responses are never cached.
#[derive(Clone)]
pub struct WordGenerator {
    client: Arc<dyn ModelClient>,
    retry: RetryPolicy,
    prompt: PromptBuilder,
}

impl WordGenerator {
    #[must_use]
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self {
            client,
            retry: RetryPolicy::default(),
            prompt: PromptBuilder::default(),
        }
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: PromptBuilder) -> Self {
        self.prompt = prompt;
        self
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Generate content for `english_word` in the given section context.
    ///
    /// The whole request is repeated on transport errors, unparseable output
    /// or missing required fields, up to the retry policy's attempt budget.
    ///
    /// # Errors
    ///
    /// `EmptyWord` for a blank word, `Aborted` when a failure cannot succeed
    /// on retry, `Exhausted` once every attempt has failed.
    pub async fn generate(
        &self,
        english_word: &str,
        section_name: &str,
        subsection_name: &str,
    ) -> Result<WordRecord, GenerationError> {
        let word = english_word.trim();
        if word.is_empty() {
            return Err(GenerationError::EmptyWord);
        }

        let prompt = self.prompt.build(word, section_name, subsection_name);
        let attempts = self.retry.attempts();
        let mut attempt = 0;
        loop {
            attempt += 1;
            let err = match self.attempt(&prompt, word).await {
                Ok(record) => {
                    tracing::debug!(%word, attempt, "word content generated");
                    return Ok(record);
                }
                Err(err) => err,
            };

            if !err.is_retryable() {
                tracing::warn!(%word, attempt, error = %err, "content generation aborted");
                return Err(GenerationError::Aborted(err));
            }
            if attempt >= attempts {
                tracing::warn!(%word, attempts, error = %err, "content generation exhausted");
                return Err(GenerationError::Exhausted {
                    attempts: attempt,
                    last: err,
                });
            }

            let delay = self.retry.backoff_for(attempt);
            tracing::warn!(
                %word,
                attempt,
                max_attempts = attempts,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "content generation failed, retrying"
            );
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }

    async fn attempt(&self, prompt: &str, word: &str) -> Result<WordRecord, AttemptError> {
        let raw = self.client.complete(prompt).await?;
        parse_record(&raw, word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    const VALID: &str = r#"{"russian_word":"кость","part_of_speech":"noun","formal_sentence":"a","informal_sentence":"b","question":"c","answer":"d"}"#;

    struct ScriptedClient {
        replies: Mutex<VecDeque<Result<String, ModelError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedClient {
        fn new(replies: Vec<Result<String, ModelError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ModelClient for ScriptedClient {
        async fn complete(&self, _prompt: &str) -> Result<String, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(ModelError::EmptyResponse))
        }
    }

    fn fast() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_backoff: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn first_valid_reply_wins() {
        let client = ScriptedClient::new(vec![Ok(VALID.into())]);
        let generator = WordGenerator::new(client.clone()).with_retry(fast());
        let record = generator.generate("bone", "Core Subjects", "Anatomy").await.unwrap();
        assert_eq!(record.english_word, "bone");
        assert_eq!(record.russian_word, "кость");
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn invalid_replies_are_retried() {
        let client = ScriptedClient::new(vec![
            Ok("no json here".into()),
            Ok(r#"{"russian_word":"кость"}"#.into()),
            Ok(format!("```json\n{VALID}\n```")),
        ]);
        let generator = WordGenerator::new(client.clone()).with_retry(fast());
        let record = generator.generate("bone", "Core Subjects", "Anatomy").await.unwrap();
        assert_eq!(record.part_of_speech, "noun");
        assert_eq!(client.calls(), 3);
    }

    #[tokio::test]
    async fn gives_up_after_budget() {
        let client = ScriptedClient::new(vec![
            Ok("{}".into()),
            Ok("{}".into()),
            Ok("{}".into()),
            Ok(VALID.into()),
        ]);
        let generator = WordGenerator::new(client.clone()).with_retry(fast());
        let err = generator.generate("bone", "s", "t").await.unwrap_err();
        assert!(matches!(err, GenerationError::Exhausted { attempts: 3, .. }));
        assert_eq!(client.calls(), 3);
    }

    #[tokio::test]
    async fn model_errors_are_retried() {
        let client = ScriptedClient::new(vec![
            Err(ModelError::HttpStatus {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                body: "overloaded".into(),
            }),
            Err(ModelError::EmptyResponse),
            Ok(VALID.into()),
        ]);
        let generator = WordGenerator::new(client.clone()).with_retry(fast());
        let record = generator.generate("bone", "s", "t").await.unwrap();
        assert_eq!(record.russian_word, "кость");
        assert_eq!(client.calls(), 3);
    }

    #[tokio::test]
    async fn client_error_status_is_retried() {
        let client = ScriptedClient::new(vec![
            Err(ModelError::HttpStatus {
                status: reqwest::StatusCode::BAD_REQUEST,
                body: "overloaded".into(),
            }),
            Ok(VALID.into()),
        ]);
        let generator = WordGenerator::new(client.clone()).with_retry(fast());
        let record = generator.generate("bone", "s", "t").await.unwrap();
        assert_eq!(record.english_word, "bone");
        assert_eq!(client.calls(), 2);
    }

    #[tokio::test]
    async fn persistent_server_errors_exhaust_budget() {
        let server_error = || {
            Err(ModelError::HttpStatus {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                body: String::new(),
            })
        };
        let client = ScriptedClient::new(vec![server_error(), server_error(), server_error()]);
        let generator = WordGenerator::new(client.clone()).with_retry(fast());
        let err = generator.generate("bone", "s", "t").await.unwrap_err();
        assert!(matches!(
            err,
            GenerationError::Exhausted {
                attempts: 3,
                last: AttemptError::Model(ModelError::HttpStatus { .. })
            }
        ));
        assert_eq!(client.calls(), 3);
    }

    #[tokio::test]
    async fn unconfigured_model_aborts_immediately() {
        let client = ScriptedClient::new(vec![Err(ModelError::NotConfigured)]);
        let generator = WordGenerator::new(client.clone()).with_retry(fast());
        let err = generator.generate("bone", "s", "t").await.unwrap_err();
        assert!(matches!(err, GenerationError::Aborted(_)));
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn blank_word_never_reaches_model() {
        let client = ScriptedClient::new(vec![Ok(VALID.into())]);
        let generator = WordGenerator::new(client.clone());
        let err = generator.generate("   ", "s", "t").await.unwrap_err();
        assert!(matches!(err, GenerationError::EmptyWord));
        assert_eq!(client.calls(), 0);
    }
}
