use std::time::Duration;

use serde::Deserialize;

use crate::args::{OutputFormat, parse_seconds};
use crate::error::ValidationError;

/// Keys accepted in `benchpair.toml` / `benchpair.json`; each mirrors a CLI flag.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub requests: Option<usize>,
    pub concurrency: Option<usize>,
    pub url: Option<String>,
    pub timeout: Option<SecondsValue>,
    pub retries: Option<u32>,
    pub retry_backoff: Option<SecondsValue>,
    pub verbose: Option<bool>,
    pub no_progress: Option<bool>,
    pub output_format: Option<OutputFormat>,
    pub no_color: Option<bool>,
}

/// A duration written either as a number of seconds or as text (`"300ms"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SecondsValue {
    Seconds(f64),
    Text(String),
}

impl SecondsValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            Self::Seconds(secs) => {
                Duration::try_from_secs_f64(*secs).map_err(|err| ValidationError::InvalidSeconds {
                    value: secs.to_string(),
                    source: err,
                })
            }
            Self::Text(text) => parse_seconds(text),
        }
    }
}
