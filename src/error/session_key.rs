use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionKeyError {
    #[error("Public key is not valid base64: {source}")]
    InvalidBase64 {
        #[source]
        source: base64::DecodeError,
    },
    #[error("Public key is not a DER-encoded RSA key: {source}")]
    InvalidPublicKey {
        #[source]
        source: rsa::pkcs8::spki::Error,
    },
    #[error("RSA encryption failed: {source}")]
    EncryptFailed {
        #[source]
        source: rsa::Error,
    },
}
