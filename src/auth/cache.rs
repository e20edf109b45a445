use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::AuthError;

/// Tokens are refreshed once they are this close to expiring.
pub const EXPIRY_MARGIN: TimeDelta = TimeDelta::minutes(1);
/// Lifetime assumed when the issuer does not declare an expiry.
pub const DEFAULT_TOKEN_LIFETIME: TimeDelta = TimeDelta::minutes(5);

/// A token as handed out by an issuer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Requests a fresh token.
    ///
    /// # Errors
    ///
    /// Returns an error when the issuer cannot produce a token.
    async fn issue(&self) -> Result<TokenGrant, AuthError>;
}

#[derive(Debug)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .checked_sub_signed(EXPIRY_MARGIN)
            .is_some_and(|refresh_at| now < refresh_at)
    }
}

/// Caches the most recent grant of one issuer.
///
/// Concurrent callers serialize on the cache, so an expired token is
/// refreshed once rather than once per caller.
pub struct TokenCache<I> {
    issuer: I,
    cached: Mutex<Option<CachedToken>>,
}

impl<I: TokenIssuer> TokenCache<I> {
    #[must_use]
    pub fn new(issuer: I) -> Self {
        Self {
            issuer,
            cached: Mutex::new(None),
        }
    }

    #[must_use]
    pub const fn issuer(&self) -> &I {
        &self.issuer
    }

    /// Returns the cached token, fetching a new one if it is missing or
    /// about to expire.
    ///
    /// # Errors
    ///
    /// Returns the issuer's error when a refresh fails.
    pub async fn get_valid_token(&self) -> Result<String, AuthError> {
        self.token_at(Utc::now()).await
    }

    /// Same as [`Self::get_valid_token`] with an explicit clock reading.
    ///
    /// # Errors
    ///
    /// Returns the issuer's error when a refresh fails.
    pub async fn token_at(&self, now: DateTime<Utc>) -> Result<String, AuthError> {
        let mut cached = self.cached.lock().await;
        if let Some(entry) = cached.as_ref()
            && entry.is_fresh_at(now)
        {
            debug!("Reusing cached token until {}", entry.expires_at);
            return Ok(entry.token.clone());
        }

        let grant = self.issuer.issue().await?;
        let expires_at = grant
            .expires_at
            .or_else(|| now.checked_add_signed(DEFAULT_TOKEN_LIFETIME))
            .unwrap_or(now);
        info!("New token obtained, expires at {}", expires_at);
        *cached = Some(CachedToken {
            token: grant.token.clone(),
            expires_at,
        });
        Ok(grant.token)
    }

    /// `Authorization` header value for the current token.
    ///
    /// # Errors
    ///
    /// Returns the issuer's error when a refresh fails.
    pub async fn bearer_header(&self) -> Result<String, AuthError> {
        let token = self.get_valid_token().await?;
        Ok(format!("Bearer {token}"))
    }

    /// Drops the cached token so the next call asks the issuer again.
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }
}
