use crate::args::{BenchArgs, parse_target_url};
use crate::bench::BenchmarkConfig;
use crate::error::{AppError, AppResult};

/// Validates merged arguments and freezes them into a [`BenchmarkConfig`].
///
/// # Errors
///
/// Returns an error when the target URL is not an absolute http(s) URL.
pub fn build_benchmark_config(args: &BenchArgs) -> AppResult<BenchmarkConfig> {
    let url = parse_target_url(&args.url).map_err(AppError::validation)?;
    if args.concurrency > args.requests {
        tracing::debug!(
            "Clamping concurrency {} to request count {}",
            args.concurrency.get(),
            args.requests.get()
        );
    }

    Ok(BenchmarkConfig::new(args.requests, args.concurrency, url)
        .with_timeout(args.timeout)
        .with_retries(args.retries)
        .with_retry_backoff(args.retry_backoff)
        .with_verbose(args.verbose)
        .with_progress(!args.no_progress))
}
