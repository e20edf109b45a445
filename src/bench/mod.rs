//! Sequential and bounded-concurrency executors plus the types they produce.
mod concurrent;
mod progress;
mod retry;
mod sequential;
mod types;

#[cfg(test)]
mod test_support;

pub use concurrent::run_concurrent;
pub use progress::ProgressTracker;
pub use retry::{RetryPolicy, RetryStep};
pub use sequential::run_sequential;
pub use types::{BenchmarkConfig, BenchmarkResults, RequestResult, RunOutcome};

/// Error text recorded when the final attempt of a request timed out.
pub const TIMEOUT_ERROR: &str = "Timeout";
