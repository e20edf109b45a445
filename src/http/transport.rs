use async_trait::async_trait;

/// Result of a single physical attempt.
///
/// Executors inspect this variant to decide between finishing and retrying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// 2xx response whose body was fully read.
    Success { status: u16 },
    /// The attempt exceeded its timeout (connect, headers, or body).
    TimedOut,
    /// Transport error or non-2xx status.
    Failed { status: Option<u16>, error: String },
}

impl AttemptOutcome {
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            status: None,
            error: error.into(),
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Issues one GET against a fixed target.
///
/// Implementations must never panic on network failure; every failure is
/// reported as an [`AttemptOutcome`] variant.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self) -> AttemptOutcome;
}
