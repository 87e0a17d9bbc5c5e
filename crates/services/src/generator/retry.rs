use std::env;
use std::time::Duration;

const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_BASE_BACKOFF_MS: u64 = 200;
const MAX_BACKOFF: Duration = Duration::from_secs(10);

/// Bounded retry with exponential backoff between attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_backoff: Duration::from_millis(DEFAULT_BASE_BACKOFF_MS),
        }
    }
}

impl RetryPolicy {
    /// Policy from `DRILL_AI_MAX_ATTEMPTS` and `DRILL_AI_BACKOFF_MS`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let max_attempts = lookup("DRILL_AI_MAX_ATTEMPTS")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.max_attempts);
        let base_backoff = lookup("DRILL_AI_BACKOFF_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map_or(defaults.base_backoff, Duration::from_millis);
        Self {
            max_attempts,
            base_backoff,
        }
    }

    /// A policy that makes exactly one attempt.
    #[must_use]
    pub fn once() -> Self {
        Self {
            max_attempts: 1,
            base_backoff: Duration::ZERO,
        }
    }

    /// Delay before retrying after failed attempt number `attempt` (1-based).
    #[must_use]
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_backoff
            .saturating_mul(1 << exponent)
            .min(MAX_BACKOFF)
    }

    /// Attempts actually made; never less than one.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_three_attempts() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.attempts(), 3);
        assert_eq!(policy.base_backoff, Duration::from_millis(200));
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff_for(1), Duration::from_millis(200));
        assert_eq!(policy.backoff_for(2), Duration::from_millis(400));
        assert_eq!(policy.backoff_for(3), Duration::from_millis(800));
        assert_eq!(policy.backoff_for(40), MAX_BACKOFF);
    }

    #[test]
    fn zero_attempts_still_tries_once() {
        let policy = RetryPolicy {
            max_attempts: 0,
            base_backoff: Duration::ZERO,
        };
        assert_eq!(policy.attempts(), 1);
    }

    #[test]
    fn lookup_overrides_and_ignores_garbage() {
        let policy = RetryPolicy::from_lookup(|key| match key {
            "DRILL_AI_MAX_ATTEMPTS" => Some("5".into()),
            "DRILL_AI_BACKOFF_MS" => Some("50".into()),
            _ => None,
        });
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.base_backoff, Duration::from_millis(50));

        let policy = RetryPolicy::from_lookup(|key| match key {
            "DRILL_AI_MAX_ATTEMPTS" => Some("0".into()),
            "DRILL_AI_BACKOFF_MS" => Some("soon".into()),
            _ => None,
        });
        assert_eq!(policy, RetryPolicy::default());
    }
}
