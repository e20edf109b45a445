use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::args::PositiveUsize;
use crate::error::{AppError, AppResult};
use crate::http::{AttemptOutcome, Transport};

use super::BenchmarkConfig;

/// Replays a script of outcomes, then repeats `fallback` forever.
///
/// Each call sleeps for `latency` on the tokio clock and tracks how many
/// calls are in flight at once.
pub(super) struct ScriptedTransport {
    script: Mutex<VecDeque<AttemptOutcome>>,
    fallback: AttemptOutcome,
    latency: Duration,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedTransport {
    pub(super) fn always(outcome: AttemptOutcome, latency: Duration) -> Self {
        Self::scripted(Vec::new(), outcome, latency)
    }

    pub(super) fn scripted(
        script: Vec<AttemptOutcome>,
        fallback: AttemptOutcome,
        latency: Duration,
    ) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            latency,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(super) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn next_outcome(&self) -> AttemptOutcome {
        let scripted = match self.script.lock() {
            Ok(mut script) => script.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        };
        scripted.unwrap_or_else(|| self.fallback.clone())
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self) -> AttemptOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst).saturating_add(1);
        self.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);
        let outcome = self.next_outcome();
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome
    }
}

/// Returns status `200 + n` for the n-th call and sleeps less on every
/// call, so later submissions complete first.
pub(super) struct DescendingLatencyTransport {
    calls: AtomicUsize,
    first_latency: Duration,
    step: Duration,
}

impl DescendingLatencyTransport {
    pub(super) const fn new(first_latency: Duration, step: Duration) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            first_latency,
            step,
        }
    }
}

#[async_trait]
impl Transport for DescendingLatencyTransport {
    async fn get(&self) -> AttemptOutcome {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        let factor = u32::try_from(index).unwrap_or(u32::MAX);
        let latency = self
            .first_latency
            .saturating_sub(self.step.saturating_mul(factor));
        tokio::time::sleep(latency).await;
        let status = u16::try_from(index).map_or(u16::MAX, |offset| 200_u16.saturating_add(offset));
        AttemptOutcome::Success { status }
    }
}

/// Panics on every call to exercise task-failure handling.
pub(super) struct PanickingTransport;

#[async_trait]
impl Transport for PanickingTransport {
    #[expect(clippy::panic, reason = "Simulates a crashing request task")]
    async fn get(&self) -> AttemptOutcome {
        panic!("transport exploded");
    }
}

pub(super) fn test_config(requests: usize, concurrency: usize, retries: u32) -> AppResult<BenchmarkConfig> {
    let url = Url::parse("http://127.0.0.1:9/")
        .map_err(|err| AppError::validation(format!("Invalid test url: {}", err)))?;
    Ok(BenchmarkConfig::new(
        PositiveUsize::try_from(requests)?,
        PositiveUsize::try_from(concurrency)?,
        url,
    )
    .with_retries(retries)
    .with_retry_backoff(Duration::from_millis(300))
    .with_timeout(Duration::from_secs(1))
    .with_progress(false))
}

/// Runs a future on a current-thread runtime with the tokio clock paused, so
/// sleeps complete instantly while `Instant` still measures simulated time.
pub(super) fn run_paused_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .start_paused(true)
        .build()
        .map_err(|err| AppError::validation(format!("Failed to build runtime: {}", err)))?;
    runtime.block_on(future)
}
