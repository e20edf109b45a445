use tokio::time::Instant;
use tracing::{debug, info};

use crate::http::Transport;
use crate::shutdown::{ShutdownSender, wait_for_shutdown};

use super::{BenchmarkConfig, ProgressTracker, RequestResult, RunOutcome};

/// Issues every request one after another with a single attempt each.
///
/// Failures are recorded, never propagated, so a completed run always holds
/// exactly `config.requests()` results in issuance order. An interrupt stops
/// the loop and returns what was collected so far.
pub async fn run_sequential(
    config: &BenchmarkConfig,
    transport: &dyn Transport,
    progress: &ProgressTracker,
    shutdown_tx: &ShutdownSender,
) -> RunOutcome {
    info!("Running sequential benchmark ({} requests)...", config.requests());

    let mut shutdown_rx = shutdown_tx.subscribe();
    let mut results = Vec::with_capacity(config.requests());
    let mut interrupted = false;
    let run_start = Instant::now();

    for request_id in 1..=config.requests() {
        let request_start = Instant::now();
        let outcome = tokio::select! {
            biased;
            () = wait_for_shutdown(&mut shutdown_rx) => {
                interrupted = true;
                break;
            }
            outcome = transport.get() => outcome,
        };
        let result = RequestResult::from_outcome(outcome, request_start.elapsed(), 1);

        if config.verbose() {
            log_result("Sequential", request_id, &result);
        }
        results.push(result);
        progress.advance();
    }

    RunOutcome {
        total_time: run_start.elapsed(),
        results,
        interrupted,
    }
}

pub(super) fn log_result(run: &str, request_id: usize, result: &RequestResult) {
    match result.error() {
        None => debug!(
            "{} request {}: {} ({:.3}s, attempt {})",
            run,
            request_id,
            result.status_code(),
            result.duration().as_secs_f64(),
            result.attempt()
        ),
        Some(error) => debug!(
            "{} request {}: ERROR - {} (attempt {})",
            run,
            request_id,
            error,
            result.attempt()
        ),
    }
}
