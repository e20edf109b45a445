use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token request failed: {source}")]
    Request {
        #[source]
        source: reqwest::Error,
    },
    #[error("Token endpoint returned HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Token endpoint did not issue a token: {message}")]
    MissingToken { message: String },
    #[error("Invalid token expiry '{value}'.")]
    InvalidExpiry { value: String },
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
