use std::time::Duration;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("benchpair/", env!("CARGO_PKG_VERSION"));

pub(crate) const DEFAULT_URL: &str = "https://httpbin.org/delay/1";
pub(crate) const DEFAULT_REQUESTS: usize = 20;
pub(crate) const DEFAULT_CONCURRENCY: usize = 10;
pub(crate) const DEFAULT_RETRIES: u32 = 3;
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub(crate) const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(300);
