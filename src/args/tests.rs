use std::time::Duration;

use clap::Parser;

use super::*;
use crate::error::{AppError, AppResult, ValidationError};

fn parse(argv: &[&str]) -> Result<BenchArgs, clap::Error> {
    BenchArgs::try_parse_from(argv)
}

#[test]
fn defaults_match_documented_values() -> AppResult<()> {
    let args = parse(&["benchpair"])?;

    if args.requests.get() != 20 || args.concurrency.get() != 10 || args.retries != 3 {
        return Err(AppError::validation(format!("Unexpected counts: {:?}", args)));
    }
    if args.url != "https://httpbin.org/delay/1" {
        return Err(AppError::validation(format!("Unexpected url: {}", args.url)));
    }
    if args.timeout != Duration::from_secs(30) || args.retry_backoff != Duration::from_millis(300)
    {
        return Err(AppError::validation(format!("Unexpected durations: {:?}", args)));
    }
    if args.verbose || args.no_progress || args.no_color || args.config.is_some() {
        return Err(AppError::validation("Unexpected flags"));
    }
    if args.output_format != OutputFormat::Text {
        return Err(AppError::validation("Expected text output"));
    }
    Ok(())
}

#[test]
fn short_flags_are_parsed() -> AppResult<()> {
    let args = parse(&[
        "benchpair", "-n", "100", "-c", "20", "-u", "http://localhost:8000/", "-t", "2.5", "-r",
        "0", "-v",
    ])?;

    if args.requests.get() != 100 || args.concurrency.get() != 20 || args.retries != 0 {
        return Err(AppError::validation(format!("Unexpected counts: {:?}", args)));
    }
    if args.timeout != Duration::from_millis(2_500) || !args.verbose {
        return Err(AppError::validation(format!("Unexpected args: {:?}", args)));
    }
    Ok(())
}

#[test]
fn long_flags_are_parsed() -> AppResult<()> {
    let args = parse(&[
        "benchpair",
        "--retry-backoff",
        "0.05",
        "--no-progress",
        "--no-color",
        "--output-format",
        "json",
        "--config",
        "bench.toml",
    ])?;

    if args.retry_backoff != Duration::from_millis(50) {
        return Err(AppError::validation(format!(
            "Unexpected backoff: {:?}",
            args.retry_backoff
        )));
    }
    if !args.no_progress || !args.no_color || args.output_format != OutputFormat::Json {
        return Err(AppError::validation("Unexpected flags"));
    }
    if args.config.as_deref() != Some("bench.toml") {
        return Err(AppError::validation("Unexpected config path"));
    }
    Ok(())
}

#[test]
fn non_positive_counts_are_rejected() -> AppResult<()> {
    for argv in [
        ["benchpair", "-n", "0"],
        ["benchpair", "-n", "-5"],
        ["benchpair", "-c", "0"],
        ["benchpair", "-c", "-1"],
        ["benchpair", "-r", "-1"],
        ["benchpair", "-t", "0"],
        ["benchpair", "-n", "many"],
    ] {
        if parse(&argv).is_ok() {
            return Err(AppError::validation(format!("Expected {:?} to fail", argv)));
        }
    }
    Ok(())
}

#[test]
fn parse_seconds_accepts_fractions_and_units() -> AppResult<()> {
    let cases = [
        ("0.3", Duration::from_millis(300)),
        ("30", Duration::from_secs(30)),
        ("250ms", Duration::from_millis(250)),
        ("2s", Duration::from_secs(2)),
        ("1m", Duration::from_secs(60)),
        ("1h", Duration::from_secs(3_600)),
        ("0", Duration::ZERO),
    ];
    for (input, expected) in cases {
        let parsed = parse_seconds(input)?;
        if parsed != expected {
            return Err(AppError::validation(format!(
                "Parsed '{}' as {:?}",
                input, parsed
            )));
        }
    }
    Ok(())
}

#[test]
fn parse_seconds_rejects_garbage() -> AppResult<()> {
    let checks = [
        ("", "empty"),
        ("-1", "negative"),
        ("ms", "missing number"),
        ("5d", "unknown unit"),
    ];
    for (input, label) in checks {
        if parse_seconds(input).is_ok() {
            return Err(AppError::validation(format!(
                "Expected {} input '{}' to fail",
                label, input
            )));
        }
    }
    Ok(())
}

#[test]
fn parse_target_url_requires_http_and_host() -> AppResult<()> {
    parse_target_url("https://httpbin.org/delay/1")?;
    parse_target_url("http://127.0.0.1:8080")?;

    match parse_target_url("ftp://example.com") {
        Err(ValidationError::UnsupportedScheme { scheme }) if scheme == "ftp" => {}
        other => {
            return Err(AppError::validation(format!(
                "Expected unsupported scheme, got {:?}",
                other
            )));
        }
    }
    match parse_target_url("not a url") {
        Err(ValidationError::InvalidUrl { .. }) => Ok(()),
        other => Err(AppError::validation(format!(
            "Expected invalid url, got {:?}",
            other
        ))),
    }
}

#[test]
fn positive_newtypes_guard_zero() -> AppResult<()> {
    if PositiveUsize::try_from(0).is_ok() {
        return Err(AppError::validation("Zero must be rejected"));
    }
    if "-3".parse::<PositiveUsize>().is_ok() {
        return Err(AppError::validation("Negative must be rejected"));
    }
    if PositiveU32::at_least_one(0).get() != 1 || PositiveU32::at_least_one(4).get() != 4 {
        return Err(AppError::validation("Unexpected attempt normalisation"));
    }
    Ok(())
}
