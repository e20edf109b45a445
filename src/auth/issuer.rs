use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::AuthError;

use super::cache::{TokenGrant, TokenIssuer};
use super::expiry::parse_expiry;

const STATUS_OK: &str = "200";

/// Issues tokens by posting consumer credentials as JSON to an auth endpoint.
pub struct JsonTokenIssuer {
    client: reqwest::Client,
    auth_url: Url,
    consumer_key: String,
    consumer_secret: String,
}

#[derive(Serialize)]
struct TokenRequest<'req> {
    consumer_key: &'req str,
    consumer_secret: &'req str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: Option<String>,
    #[serde(rename = "expiryDate")]
    expiry_date: Option<String>,
    status: Option<serde_json::Value>,
    message: Option<String>,
    error: Option<serde_json::Value>,
}

impl JsonTokenIssuer {
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        auth_url: Url,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> Self {
        Self {
            client,
            auth_url,
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }
}

#[async_trait]
impl TokenIssuer for JsonTokenIssuer {
    async fn issue(&self) -> Result<TokenGrant, AuthError> {
        tracing::info!("Requesting new access token from {}", self.auth_url);
        let response = self
            .client
            .post(self.auth_url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&TokenRequest {
                consumer_key: &self.consumer_key,
                consumer_secret: &self.consumer_secret,
            })
            .send()
            .await
            .map_err(|err| AuthError::Request { source: err })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let payload: TokenResponse = response
            .json()
            .await
            .map_err(|err| AuthError::Request { source: err })?;
        grant_from_response(payload)
    }
}

fn grant_from_response(payload: TokenResponse) -> Result<TokenGrant, AuthError> {
    let status_ok = payload.status.as_ref().is_none_or(|status| match status {
        serde_json::Value::String(text) => text == STATUS_OK,
        serde_json::Value::Number(number) => number.as_u64() == Some(200),
        serde_json::Value::Null
        | serde_json::Value::Bool(_)
        | serde_json::Value::Array(_)
        | serde_json::Value::Object(_) => false,
    });

    let token = match payload.token {
        Some(token) if status_ok && !token.is_empty() => token,
        Some(_) | None => {
            let message = payload
                .message
                .or_else(|| payload.error.map(|error| error.to_string()))
                .unwrap_or_else(|| "Unknown authentication error".to_owned());
            tracing::error!("Authentication failed: {}", message);
            return Err(AuthError::MissingToken { message });
        }
    };

    let expires_at = payload
        .expiry_date
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .map(parse_expiry)
        .transpose()?;

    Ok(TokenGrant { token, expires_at })
}

#[cfg(test)]
pub(super) fn grant_from_json(body: &str) -> Result<TokenGrant, AuthError> {
    let payload: TokenResponse =
        serde_json::from_str(body).map_err(|err| AuthError::from(err.to_string()))?;
    grant_from_response(payload)
}
