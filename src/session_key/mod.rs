//! RSA encryption of API keys and session ids for gateways that expect a
//! base64 ciphertext made with their published public key.
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use rsa::pkcs8::DecodePublicKey;
use rsa::{Oaep, Pkcs1v15Encrypt, RsaPublicKey};
use sha2::Sha256;

use crate::error::SessionKeyError;


/// Padding applied before RSA encryption.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Padding {
    #[default]
    Pkcs1v15,
    /// OAEP with SHA-256 for both the digest and MGF1.
    OaepSha256,
}

/// A gateway public key ready to encrypt secrets.
#[derive(Debug, Clone)]
pub struct SessionKeyEncryptor {
    key: RsaPublicKey,
}

impl SessionKeyEncryptor {
    /// Loads a base64-encoded DER `SubjectPublicKeyInfo`.
    ///
    /// # Errors
    ///
    /// Returns an error when the text is not base64 or the bytes are not an
    /// RSA public key.
    pub fn from_base64_der(public_key: &str) -> Result<Self, SessionKeyError> {
        let der = STANDARD
            .decode(public_key.trim())
            .map_err(|err| SessionKeyError::InvalidBase64 { source: err })?;
        let key = RsaPublicKey::from_public_key_der(&der)
            .map_err(|err| SessionKeyError::InvalidPublicKey { source: err })?;
        Ok(Self { key })
    }

    /// Encrypts `plaintext` and returns the ciphertext as standard base64.
    ///
    /// # Errors
    ///
    /// Returns an error when the plaintext is too long for the key and padding.
    pub fn encrypt(&self, plaintext: &str, padding: Padding) -> Result<String, SessionKeyError> {
        let mut rng = rand::thread_rng();
        let message = plaintext.as_bytes();
        let ciphertext = match padding {
            Padding::Pkcs1v15 => self.key.encrypt(&mut rng, Pkcs1v15Encrypt, message),
            Padding::OaepSha256 => self.key.encrypt(&mut rng, Oaep::new::<Sha256>(), message),
        }
        .map_err(|err| SessionKeyError::EncryptFailed { source: err })?;
        Ok(STANDARD.encode(ciphertext))
    }
}

/// One-shot helper: load `public_key` and encrypt `plaintext` with it.
///
/// # Errors
///
/// Returns an error when the key cannot be loaded or encryption fails.
pub fn encrypt_session_key(
    public_key: &str,
    plaintext: &str,
    padding: Padding,
) -> Result<String, SessionKeyError> {
    SessionKeyEncryptor::from_base64_der(public_key)?.encrypt(plaintext, padding)
}
