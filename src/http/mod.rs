//! HTTP transport seam used by both executors.
mod client;
mod execution;
mod transport;


pub use client::ReqwestTransport;
pub use transport::{AttemptOutcome, Transport};
