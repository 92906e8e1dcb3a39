//! Error types for the blind-crypto crate

use thiserror::Error;

/// Result type alias using `CryptoError`
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Errors that can occur during cryptographic operations
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Encryption failed
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// AEAD tag verification failed: wrong key or tampered ciphertext
    #[error("authentication failed: wrong key or corrupted ciphertext")]
    Authentication,

    /// Invalid key format or length
    #[error("invalid key: {0}")]
    InvalidKey(String),
}
