use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::AuthError;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses an issuer-declared expiry. Offsets are honoured; timestamps without
/// one are taken as UTC.
///
/// # Errors
///
/// Returns [`AuthError::InvalidExpiry`] when the value matches no known format.
pub fn parse_expiry(value: &str) -> Result<DateTime<Utc>, AuthError> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AuthError::InvalidExpiry {
            value: value.to_owned(),
        })
}
