use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{Instant, sleep};
use tracing::{debug, info};

use crate::http::Transport;
use crate::shutdown::{ShutdownSender, wait_for_shutdown};

use super::sequential::log_result;
use super::{BenchmarkConfig, ProgressTracker, RequestResult, RetryPolicy, RetryStep, RunOutcome};

/// Launches every logical request at once and lets a counting semaphore cap
/// how many execute simultaneously.
///
/// A permit is held for the whole logical request, retries and backoff
/// included. Results come back in submission order whatever the completion
/// order; a task that dies is recorded as a failed result. Progress advances
/// once per joined request, panicked tasks included. An interrupt keeps every
/// request that already finished, even out of order, and aborts the rest.
pub async fn run_concurrent(
    config: &BenchmarkConfig,
    transport: Arc<dyn Transport>,
    progress: Arc<ProgressTracker>,
    shutdown_tx: &ShutdownSender,
) -> RunOutcome {
    info!(
        "Running concurrent benchmark ({} requests, concurrency={})...",
        config.requests(),
        config.concurrency()
    );

    let mut shutdown_rx = shutdown_tx.subscribe();
    let gate = Arc::new(Semaphore::new(config.concurrency()));
    let policy = RetryPolicy::from_config(config);
    let verbose = config.verbose();
    let run_start = Instant::now();

    let mut handles: Vec<JoinHandle<RequestResult>> = Vec::with_capacity(config.requests());
    for request_id in 1..=config.requests() {
        let gate = Arc::clone(&gate);
        let transport = Arc::clone(&transport);
        handles.push(tokio::spawn(async move {
            let result = fetch_with_gate(&gate, transport.as_ref(), policy, request_id).await;
            if verbose {
                log_result("Concurrent", request_id, &result);
            }
            result
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    let mut interrupted = false;
    let mut pending = handles.into_iter();
    for mut handle in pending.by_ref() {
        let joined = tokio::select! {
            biased;
            () = wait_for_shutdown(&mut shutdown_rx) => {
                interrupted = true;
                keep_if_finished(handle, &mut results, &progress).await;
                break;
            }
            joined = &mut handle => joined,
        };
        results.push(collect_result(joined));
        progress.advance();
    }
    for handle in pending {
        keep_if_finished(handle, &mut results, &progress).await;
    }

    RunOutcome {
        total_time: run_start.elapsed(),
        results,
        interrupted,
    }
}

async fn fetch_with_gate(
    gate: &Semaphore,
    transport: &dyn Transport,
    policy: RetryPolicy,
    request_id: usize,
) -> RequestResult {
    let _permit = match gate.acquire().await {
        Ok(permit) => permit,
        Err(err) => return RequestResult::failure(Duration::ZERO, 1, err.to_string()),
    };

    let mut attempt: u32 = 1;
    loop {
        let attempt_start = Instant::now();
        let outcome = transport.get().await;
        let elapsed = attempt_start.elapsed();

        match policy.next_step(attempt, &outcome) {
            RetryStep::Finish => return RequestResult::from_outcome(outcome, elapsed, attempt),
            RetryStep::Backoff(delay) => {
                debug!(
                    "Request {} attempt {} failed ({:?}); retrying in {:?}",
                    request_id, attempt, outcome, delay
                );
                sleep(delay).await;
                attempt = attempt.saturating_add(1);
            }
        }
    }
}

async fn keep_if_finished(
    handle: JoinHandle<RequestResult>,
    results: &mut Vec<RequestResult>,
    progress: &ProgressTracker,
) {
    if handle.is_finished() {
        results.push(collect_result(handle.await));
        progress.advance();
    } else {
        handle.abort();
    }
}

fn collect_result(joined: Result<RequestResult, JoinError>) -> RequestResult {
    joined.unwrap_or_else(|err| RequestResult::failure(Duration::ZERO, 1, err.to_string()))
}
