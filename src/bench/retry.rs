use std::time::Duration;

use crate::args::PositiveU32;
use crate::http::AttemptOutcome;

use super::BenchmarkConfig;

/// What the concurrent executor does after an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryStep {
    /// Produce the final result from this attempt.
    Finish,
    /// Sleep for the given delay, then issue the next attempt.
    Backoff(Duration),
}

/// Bounded retry with exponential backoff on timeouts and linear backoff on
/// every other failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: PositiveU32,
    backoff: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub const fn new(max_attempts: PositiveU32, backoff: Duration) -> Self {
        Self {
            max_attempts,
            backoff,
        }
    }

    #[must_use]
    pub fn from_config(config: &BenchmarkConfig) -> Self {
        Self::new(config.max_attempts(), config.retry_backoff())
    }

    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts.get()
    }

    /// Decides the next step for a 1-based `attempt` that produced `outcome`.
    #[must_use]
    pub fn next_step(&self, attempt: u32, outcome: &AttemptOutcome) -> RetryStep {
        if attempt >= self.max_attempts() {
            return RetryStep::Finish;
        }
        match outcome {
            AttemptOutcome::Success { .. } => RetryStep::Finish,
            AttemptOutcome::TimedOut => RetryStep::Backoff(self.exponential_delay(attempt)),
            AttemptOutcome::Failed { .. } => RetryStep::Backoff(self.linear_delay(attempt)),
        }
    }

    /// `backoff * 2^(attempt - 1)`, saturating.
    #[must_use]
    pub fn exponential_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        let factor = 2_u32.checked_pow(exponent).unwrap_or(u32::MAX);
        self.backoff.saturating_mul(factor)
    }

    /// `backoff * attempt`, saturating.
    #[must_use]
    pub const fn linear_delay(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(attempt)
    }
}
