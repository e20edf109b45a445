//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
mod parsers;
mod types;

#[cfg(test)]
mod tests;

pub use cli::BenchArgs;
pub use types::{OutputFormat, PositiveU32, PositiveUsize};

pub(crate) use defaults::{
    DEFAULT_RETRIES, DEFAULT_RETRY_BACKOFF, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT,
};
pub(crate) use parsers::{parse_seconds, parse_target_url};
