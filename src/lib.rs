//! Core library for the `benchpair` CLI.
//!
//! `benchpair` issues the same batch of GET requests twice against one
//! target, first one at a time and then through a bounded-concurrency
//! executor with retries, and reports how the two runs compare. The modules
//! below hold the CLI argument types, configuration merging, the transport
//! seam, both executors, statistics and report rendering.
pub mod args;
pub mod auth;
pub mod bench;
pub mod config;
mod entry;
pub mod error;
pub mod http;
pub mod logger;
pub mod report;
pub mod session_key;
pub mod shutdown;
pub mod stats;

#[cfg(test)]
mod test_support;

pub use entry::{run, run_benchmark, run_comparison};
