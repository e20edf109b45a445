use std::time::Duration;

use url::Url;

use super::types::PositiveUsize;
use crate::error::{AppError, AppResult, ValidationError};

pub(super) fn parse_positive_usize(s: &str) -> AppResult<PositiveUsize> {
    s.parse::<PositiveUsize>().map_err(AppError::from)
}

pub(super) fn parse_retries(s: &str) -> AppResult<u32> {
    let value: i64 = s
        .trim()
        .parse()
        .map_err(|err| AppError::validation(ValidationError::InvalidNumber { source: err }))?;
    u32::try_from(value).map_err(|_err| AppError::validation(ValidationError::ValueTooSmall { min: 0 }))
}

pub(super) fn parse_timeout_arg(s: &str) -> AppResult<Duration> {
    let duration = parse_seconds(s)?;
    if duration.is_zero() {
        return Err(AppError::validation(ValidationError::DurationZero));
    }
    Ok(duration)
}

pub(super) fn parse_backoff_arg(s: &str) -> AppResult<Duration> {
    parse_seconds(s).map_err(AppError::from)
}

/// Parses a non-negative duration given either as fractional seconds
/// (`0.3`, `30`) or with a unit suffix (`300ms`, `2s`, `1m`, `1h`).
pub(crate) fn parse_seconds(s: &str) -> Result<Duration, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    if let Ok(seconds) = value.parse::<f64>() {
        return Duration::try_from_secs_f64(seconds).map_err(|err| {
            ValidationError::InvalidSeconds {
                value: value.to_owned(),
                source: err,
            }
        });
    }

    let digits_len = value.chars().take_while(char::is_ascii_digit).count();
    if digits_len == 0 {
        return Err(ValidationError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }
    let (num_part, unit_part) = value.split_at(digits_len);
    let number: u64 = num_part
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })?;

    match unit_part {
        "ms" => Ok(Duration::from_millis(number)),
        "s" => Ok(Duration::from_secs(number)),
        "m" => number
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or(ValidationError::DurationOverflow),
        "h" => number
            .checked_mul(60)
            .and_then(|minutes| minutes.checked_mul(60))
            .map(Duration::from_secs)
            .ok_or(ValidationError::DurationOverflow),
        unit => Err(ValidationError::InvalidDurationUnit {
            unit: unit.to_owned(),
        }),
    }
}

/// Validates a benchmark target: absolute http(s) URL with a host.
pub(crate) fn parse_target_url(s: &str) -> Result<Url, ValidationError> {
    let url = Url::parse(s.trim()).map_err(|err| ValidationError::InvalidUrl {
        url: s.to_owned(),
        source: err,
    })?;
    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(ValidationError::UnsupportedScheme {
                scheme: scheme.to_owned(),
            });
        }
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::UrlMissingHost);
    }
    Ok(url)
}
