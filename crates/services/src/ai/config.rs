use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Connection settings for an OpenAI-compatible chat completions endpoint.
#[derive(Clone, Debug)]
pub struct ModelConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl ModelConfig {
    /// Read the configuration from the process environment.
    ///
    /// `DRILL_AI_API_KEY` (or `GEMINI_API_KEY`) is required; `DRILL_AI_BASE_URL`,
    /// `DRILL_AI_MODEL` and `DRILL_AI_TIMEOUT_MS` are optional.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ModelConfig::from_env`] with an injectable variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = var("DRILL_AI_API_KEY").or_else(|| var("GEMINI_API_KEY"))?;
        let base_url = var("DRILL_AI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let model = var("DRILL_AI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into());
        let timeout_ms = var("DRILL_AI_TIMEOUT_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        Some(Self {
            base_url: base_url.trim().trim_end_matches('/').to_owned(),
            api_key: api_key.trim().to_owned(),
            model: model.trim().to_owned(),
            timeout: Duration::from_millis(timeout_ms),
        })
    }

    #[must_use]
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
