use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::args::DEFAULT_USER_AGENT;
use crate::bench::BenchmarkConfig;
use crate::error::{AppError, AppResult, HttpError};

use super::execution::{classify_error, complete_response};
use super::{AttemptOutcome, Transport};

/// Connect and socket-read timeouts are this fraction of the per-attempt timeout.
const PHASE_TIMEOUT_DIVISOR: u32 = 3;
/// Idle connections kept per concurrency slot.
const POOL_SLOTS_PER_TASK: usize = 2;

/// [`Transport`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    url: Url,
}

impl ReqwestTransport {
    /// Builds a client sized for the configured concurrency.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(config: &BenchmarkConfig) -> AppResult<Self> {
        let timeout = config.timeout();
        let phase_timeout = timeout
            .checked_div(PHASE_TIMEOUT_DIVISOR)
            .filter(|value| !value.is_zero())
            .unwrap_or(timeout);
        let pool_size = config.concurrency().saturating_mul(POOL_SLOTS_PER_TASK);

        debug!(
            "Building HTTP client: timeout={:?}, connect/read timeout={:?}, pool={}",
            timeout, phase_timeout, pool_size
        );

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(phase_timeout)
            .read_timeout(phase_timeout)
            .pool_max_idle_per_host(pool_size)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;

        Ok(Self {
            client,
            url: config.url().clone(),
        })
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self) -> AttemptOutcome {
        match self.client.get(self.url.clone()).send().await {
            Ok(response) => complete_response(response).await,
            Err(err) => classify_error(&err),
        }
    }
}
