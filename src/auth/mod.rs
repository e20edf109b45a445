//! Bearer-token caching for authenticated targets.
//!
//! A [`TokenCache`] owns its [`TokenIssuer`] and hands out the cached token
//! until it is within [`EXPIRY_MARGIN`] of expiring.
mod cache;
mod expiry;
mod issuer;


pub use cache::{DEFAULT_TOKEN_LIFETIME, EXPIRY_MARGIN, TokenCache, TokenGrant, TokenIssuer};
pub use expiry::parse_expiry;
pub use issuer::JsonTokenIssuer;
