use std::sync::Arc;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::{info, warn};

use crate::args::{BenchArgs, OutputFormat};
use crate::bench::{
    BenchmarkConfig, BenchmarkResults, ProgressTracker, RunOutcome, run_concurrent, run_sequential,
};
use crate::config::{apply_config, build_benchmark_config, load_config};
use crate::error::{AppError, AppResult};
use crate::http::{ReqwestTransport, Transport};
use crate::report::{BenchmarkReport, print_banner, print_report};
use crate::shutdown::{ShutdownSender, setup_signal_shutdown_handler, shutdown_channel};


const SEQUENTIAL_LABEL: &str = "Sequential Progress";
const CONCURRENT_LABEL: &str = "Concurrent Progress";

/// Runs the CLI: parse arguments, merge config, benchmark, print the report.
///
/// # Errors
///
/// Returns an error for invalid configuration, HTTP client construction
/// failures, or when the benchmark was interrupted (after the partial report
/// has been printed).
pub fn run() -> AppResult<()> {
    let (mut args, matches) = parse_args()?;
    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &config)?;
    }

    crate::logger::init_logging(args.verbose, args.no_color);

    let config = build_benchmark_config(&args)?;
    if args.output_format == OutputFormat::Text {
        print_banner(&config, args.no_color);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let results = runtime.block_on(run_benchmark(&config, args.no_color))?;

    let report = BenchmarkReport::new(&config, &results);
    print_report(&report, args.output_format, args.no_color)?;

    if results.interrupted() {
        warn!("Benchmark interrupted; report is partial.");
        return Err(AppError::Interrupted);
    }
    Ok(())
}

fn parse_args() -> AppResult<(BenchArgs, ArgMatches)> {
    let matches = BenchArgs::command().get_matches();
    let args = BenchArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

/// Builds the production transport and runs both benchmarks with Ctrl+C
/// handling installed.
///
/// # Errors
///
/// Returns an error when the HTTP client cannot be built.
pub async fn run_benchmark(config: &BenchmarkConfig, no_color: bool) -> AppResult<BenchmarkResults> {
    let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(config)?);
    let (shutdown_tx, _shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let results = run_comparison(config, transport, &shutdown_tx, no_color).await;

    signal_handle.abort();
    Ok(results)
}

/// Sequential run first, then the concurrent run over the same transport.
/// An interrupted sequential run skips the concurrent one.
pub async fn run_comparison(
    config: &BenchmarkConfig,
    transport: Arc<dyn Transport>,
    shutdown_tx: &ShutdownSender,
    no_color: bool,
) -> BenchmarkResults {
    let sequential_progress = ProgressTracker::for_terminal(
        SEQUENTIAL_LABEL,
        config.requests(),
        config.show_progress(),
        no_color,
    );
    let sequential =
        run_sequential(config, transport.as_ref(), &sequential_progress, shutdown_tx).await;
    if sequential.interrupted {
        info!("Skipping concurrent benchmark after interrupt.");
        return BenchmarkResults::new(sequential, RunOutcome::skipped());
    }

    let concurrent_progress = Arc::new(ProgressTracker::for_terminal(
        CONCURRENT_LABEL,
        config.requests(),
        config.show_progress(),
        no_color,
    ));
    let concurrent = run_concurrent(config, transport, concurrent_progress, shutdown_tx).await;

    BenchmarkResults::new(sequential, concurrent)
}
