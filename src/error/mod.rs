mod app;
mod auth;
mod config;
mod http;
mod session_key;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use auth::AuthError;
pub use config::ConfigError;
pub use http::HttpError;
pub use session_key::SessionKeyError;
pub use validation::ValidationError;
