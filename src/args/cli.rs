use clap::Parser;
use std::time::Duration;

use super::defaults::{DEFAULT_CONCURRENCY, DEFAULT_REQUESTS, DEFAULT_RETRIES, DEFAULT_URL};
use super::parsers::{parse_backoff_arg, parse_positive_usize, parse_retries, parse_timeout_arg};
use super::types::{OutputFormat, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Run the same HTTP workload sequentially and with bounded concurrency, then compare latency, throughput, and speedup.",
    after_help = "Examples:\n  benchpair --requests 100 --concurrency 20\n  benchpair --url https://httpbin.org/delay/2 --timeout 45\n  benchpair --requests 50 --verbose --no-progress"
)]
pub struct BenchArgs {
    /// Total number of requests to make per run
    #[arg(
        long = "requests",
        short = 'n',
        default_value_t = default_requests(),
        value_parser = parse_positive_usize,
        allow_negative_numbers = true
    )]
    pub requests: PositiveUsize,

    /// Maximum concurrent requests in the concurrent run (clamped to --requests)
    #[arg(
        long,
        short = 'c',
        default_value_t = default_concurrency(),
        value_parser = parse_positive_usize,
        allow_negative_numbers = true
    )]
    pub concurrency: PositiveUsize,

    /// URL to request
    #[arg(long, short = 'u', default_value = DEFAULT_URL)]
    pub url: String,

    /// Per-attempt timeout in seconds (fractions and ms/s/m/h suffixes accepted)
    #[arg(long, short = 't', default_value = "30", value_parser = parse_timeout_arg)]
    pub timeout: Duration,

    /// Attempts per request in the concurrent run
    #[arg(
        long,
        short = 'r',
        default_value_t = DEFAULT_RETRIES,
        value_parser = parse_retries,
        allow_negative_numbers = true
    )]
    pub retries: u32,

    /// Base retry backoff in seconds
    #[arg(long = "retry-backoff", default_value = "0.3", value_parser = parse_backoff_arg)]
    pub retry_backoff: Duration,

    /// Log every request (enables benchpair debug logs unless overridden by BENCHPAIR_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable progress bars
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Path to config file (TOML/JSON). Defaults to ./benchpair.toml or ./benchpair.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Output format for the final report
    #[arg(long = "output-format", value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,

    /// Disable color output
    #[arg(long = "no-color")]
    pub no_color: bool,
}

fn default_requests() -> PositiveUsize {
    PositiveUsize::try_from(DEFAULT_REQUESTS).unwrap_or(PositiveUsize::ONE)
}

fn default_concurrency() -> PositiveUsize {
    PositiveUsize::try_from(DEFAULT_CONCURRENCY).unwrap_or(PositiveUsize::ONE)
}
