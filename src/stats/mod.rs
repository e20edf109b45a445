//! Aggregation of per-request results into run statistics and comparisons.
use std::time::Duration;

use serde::Serialize;

use crate::bench::RequestResult;


/// Summary of one run. Latency figures are in seconds and cover successful
/// requests only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStatistics {
    pub success_count: usize,
    pub error_count: usize,
    pub mean_secs: f64,
    pub median_secs: f64,
    /// Sample standard deviation; 0 with fewer than two successes.
    pub std_dev_secs: f64,
    pub min_secs: f64,
    pub max_secs: f64,
    pub total_secs: f64,
    /// Successes divided by the summed success durations.
    pub requests_per_second: f64,
}

/// Computes [`RunStatistics`]; an empty slice yields the zeroed default.
#[must_use]
pub fn calculate_statistics(results: &[RequestResult]) -> RunStatistics {
    let mut durations: Vec<f64> = results
        .iter()
        .filter(|result| result.is_success())
        .map(|result| result.duration().as_secs_f64())
        .collect();
    let success_count = durations.len();
    let error_count = results.len().saturating_sub(success_count);

    if durations.is_empty() {
        return RunStatistics {
            error_count,
            ..RunStatistics::default()
        };
    }

    durations.sort_by(f64::total_cmp);
    let count = count_as_f64(success_count);
    let total_secs: f64 = durations.iter().sum();
    let mean_secs = total_secs / count;
    let min_secs = durations.first().copied().unwrap_or_default();
    let max_secs = durations.last().copied().unwrap_or_default();
    let requests_per_second = if total_secs > 0.0 {
        count / total_secs
    } else {
        0.0
    };

    RunStatistics {
        success_count,
        error_count,
        mean_secs,
        median_secs: median(&durations),
        std_dev_secs: sample_std_dev(&durations, mean_secs),
        min_secs,
        max_secs,
        total_secs,
        requests_per_second,
    }
}

/// Fraction of results without an error; 0 for an empty slice.
#[must_use]
pub fn success_rate(results: &[RequestResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let successful = results.iter().filter(|result| result.is_success()).count();
    count_as_f64(successful) / count_as_f64(results.len())
}

/// Sequential wall-clock time divided by concurrent wall-clock time.
///
/// Infinite when the concurrent run took no measurable time.
#[must_use]
pub const fn speedup(sequential: Duration, concurrent: Duration) -> f64 {
    if concurrent.is_zero() {
        return f64::INFINITY;
    }
    sequential.as_secs_f64() / concurrent.as_secs_f64()
}

/// Success-rate-normalised throughput of the concurrent run relative to the
/// sequential run: `(rate_c / time_c) / (rate_s / time_s)`.
///
/// `None` when either time is zero or the sequential run had no successes.
#[must_use]
pub const fn efficiency(
    sequential_rate: f64,
    sequential_time: Duration,
    concurrent_rate: f64,
    concurrent_time: Duration,
) -> Option<f64> {
    if sequential_time.is_zero() || concurrent_time.is_zero() || sequential_rate <= 0.0 {
        return None;
    }
    let concurrent_throughput = concurrent_rate / concurrent_time.as_secs_f64();
    let sequential_throughput = sequential_rate / sequential_time.as_secs_f64();
    Some(concurrent_throughput / sequential_throughput)
}

fn median(sorted: &[f64]) -> f64 {
    let len = sorted.len();
    let mid = len / 2;
    if len % 2 == 1 {
        return sorted.get(mid).copied().unwrap_or_default();
    }
    match (sorted.get(mid.saturating_sub(1)), sorted.get(mid)) {
        (Some(lower), Some(upper)) => (lower + upper) / 2.0,
        (Some(value), None) | (None, Some(value)) => *value,
        (None, None) => 0.0,
    }
}

fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let squared: f64 = values
        .iter()
        .map(|value| {
            let diff = value - mean;
            diff * diff
        })
        .sum();
    let degrees = count_as_f64(values.len().saturating_sub(1));
    (squared / degrees).sqrt()
}

fn count_as_f64(count: usize) -> f64 {
    f64::from(u32::try_from(count).unwrap_or(u32::MAX))
}
