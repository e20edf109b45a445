use std::time::Duration;

use url::Url;

use crate::args::{
    DEFAULT_RETRIES, DEFAULT_RETRY_BACKOFF, DEFAULT_TIMEOUT, PositiveU32, PositiveUsize,
};
use crate::http::AttemptOutcome;
use crate::stats;

use super::TIMEOUT_ERROR;

/// Immutable parameters for one benchmark invocation.
///
/// The concurrency limit is clamped to the request count on construction.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    requests: PositiveUsize,
    concurrency: PositiveUsize,
    url: Url,
    timeout: Duration,
    retries: u32,
    retry_backoff: Duration,
    verbose: bool,
    show_progress: bool,
}

impl BenchmarkConfig {
    #[must_use]
    pub fn new(requests: PositiveUsize, concurrency: PositiveUsize, url: Url) -> Self {
        Self {
            requests,
            concurrency: concurrency.min(requests),
            url,
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
            verbose: false,
            show_progress: true,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    #[must_use]
    pub fn with_retry_backoff(mut self, retry_backoff: Duration) -> Self {
        self.retry_backoff = retry_backoff;
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    #[must_use]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    #[must_use]
    pub const fn requests(&self) -> usize {
        self.requests.get()
    }

    #[must_use]
    pub const fn concurrency(&self) -> usize {
        self.concurrency.get()
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub const fn retries(&self) -> u32 {
        self.retries
    }

    /// Physical attempts allowed per logical request; never less than one.
    #[must_use]
    pub fn max_attempts(&self) -> PositiveU32 {
        PositiveU32::at_least_one(self.retries)
    }

    #[must_use]
    pub const fn retry_backoff(&self) -> Duration {
        self.retry_backoff
    }

    #[must_use]
    pub const fn verbose(&self) -> bool {
        self.verbose
    }

    #[must_use]
    pub const fn show_progress(&self) -> bool {
        self.show_progress
    }
}

/// Outcome of one logical request, possibly after several attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestResult {
    status_code: u16,
    duration: Duration,
    attempt: u32,
    error: Option<String>,
}

impl RequestResult {
    #[must_use]
    pub const fn success(status_code: u16, duration: Duration, attempt: u32) -> Self {
        Self {
            status_code,
            duration,
            attempt,
            error: None,
        }
    }

    /// Failed results always carry status code 0.
    #[must_use]
    pub fn failure(duration: Duration, attempt: u32, error: impl Into<String>) -> Self {
        Self {
            status_code: 0,
            duration,
            attempt,
            error: Some(error.into()),
        }
    }

    /// Terminal result for an attempt outcome that will not be retried.
    #[must_use]
    pub fn from_outcome(outcome: AttemptOutcome, duration: Duration, attempt: u32) -> Self {
        match outcome {
            AttemptOutcome::Success { status } => Self::success(status, duration, attempt),
            AttemptOutcome::TimedOut => Self::failure(duration, attempt, TIMEOUT_ERROR),
            AttemptOutcome::Failed { error, .. } => Self::failure(duration, attempt, error),
        }
    }

    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub const fn attempt(&self) -> u32 {
        self.attempt
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Everything one executor produced: ordered results plus wall-clock time.
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    pub total_time: Duration,
    pub results: Vec<RequestResult>,
    pub interrupted: bool,
}

impl RunOutcome {
    /// Placeholder for a run that never started because of an interrupt.
    #[must_use]
    pub const fn skipped() -> Self {
        Self {
            total_time: Duration::ZERO,
            results: Vec::new(),
            interrupted: true,
        }
    }

    #[must_use]
    pub fn success_rate(&self) -> f64 {
        stats::success_rate(&self.results)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BenchmarkResults {
    pub sequential: RunOutcome,
    pub concurrent: RunOutcome,
}

impl BenchmarkResults {
    #[must_use]
    pub const fn new(sequential: RunOutcome, concurrent: RunOutcome) -> Self {
        Self {
            sequential,
            concurrent,
        }
    }

    #[must_use]
    pub const fn speedup(&self) -> f64 {
        stats::speedup(self.sequential.total_time, self.concurrent.total_time)
    }

    #[must_use]
    pub fn efficiency(&self) -> Option<f64> {
        stats::efficiency(
            self.sequential.success_rate(),
            self.sequential.total_time,
            self.concurrent.success_rate(),
            self.concurrent.total_time,
        )
    }

    #[must_use]
    pub const fn interrupted(&self) -> bool {
        self.sequential.interrupted || self.concurrent.interrupted
    }
}
