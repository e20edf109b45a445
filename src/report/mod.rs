//! Console and JSON rendering of a finished benchmark.
mod banner;
mod lines;


use std::io::IsTerminal;

use serde::Serialize;

use crate::args::OutputFormat;
use crate::bench::{BenchmarkConfig, BenchmarkResults, RunOutcome};
use crate::error::AppResult;
use crate::stats::{self, RunStatistics};

pub use banner::{banner_lines, print_banner};
pub use lines::report_lines;

/// Serializable snapshot of a benchmark: configuration, both runs and the
/// comparison between them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkReport {
    pub config: ConfigSummary,
    pub sequential: RunReport,
    pub concurrent: RunReport,
    pub comparison: Comparison,
    pub interrupted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigSummary {
    pub url: String,
    pub requests: usize,
    pub concurrency: usize,
    pub timeout_secs: f64,
    pub retries: u32,
    pub retry_backoff_secs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub total_secs: f64,
    pub success_rate: f64,
    pub interrupted: bool,
    pub stats: RunStatistics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// `None` when the concurrent run took no measurable time.
    pub speedup: Option<f64>,
    pub efficiency: Option<f64>,
}

impl BenchmarkReport {
    #[must_use]
    pub fn new(config: &BenchmarkConfig, results: &BenchmarkResults) -> Self {
        let speedup = results.speedup();
        Self {
            config: ConfigSummary::from_config(config),
            sequential: RunReport::from_outcome(&results.sequential),
            concurrent: RunReport::from_outcome(&results.concurrent),
            comparison: Comparison {
                speedup: speedup.is_finite().then_some(speedup),
                efficiency: results.efficiency(),
            },
            interrupted: results.interrupted(),
        }
    }

    /// Renders the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl ConfigSummary {
    fn from_config(config: &BenchmarkConfig) -> Self {
        Self {
            url: config.url().to_string(),
            requests: config.requests(),
            concurrency: config.concurrency(),
            timeout_secs: config.timeout().as_secs_f64(),
            retries: config.retries(),
            retry_backoff_secs: config.retry_backoff().as_secs_f64(),
        }
    }
}

impl RunReport {
    fn from_outcome(outcome: &RunOutcome) -> Self {
        Self {
            total_secs: outcome.total_time.as_secs_f64(),
            success_rate: outcome.success_rate(),
            interrupted: outcome.interrupted,
            stats: stats::calculate_statistics(&outcome.results),
        }
    }
}

/// Writes the report to stdout in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn print_report(report: &BenchmarkReport, format: OutputFormat, no_color: bool) -> AppResult<()> {
    match format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => {
            let use_color = !no_color && std::io::stdout().is_terminal();
            for line in report_lines(report, use_color) {
                println!("{line}");
            }
        }
    }
    Ok(())
}
