//! Client error types
//!
//! Every pipeline failure surfaces as a distinguishable variant; nothing is
//! swallowed into a default result and nothing here panics.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// The anchor string has the wrong length or invalid characters
    #[error("bad anchor: expected 43 or 22 characters, got {0}")]
    AnchorFormat(usize),

    /// The split-form second factor failed to combine with the anchor
    #[error("bad code: check that the 25-character code was typed correctly")]
    BadCode,

    /// A short anchor was opened without its second-factor code
    #[error("this anchor needs its 25-character code")]
    CodeRequired,

    /// Cryptographic failure (includes AEAD authentication failures)
    #[error("crypto error: {0}")]
    Crypto(#[from] blind_crypto::CryptoError),

    /// Block cache failure (not found, network, corrupt block)
    #[error("cache error: {0}")]
    Cache(#[from] blind_blockcache::BlockCacheError),

    /// The decrypted index is not a valid file listing
    #[error("malformed index: {0}")]
    MalformedIndex(String),

    /// Reassembled file size does not match the declared size
    #[error("size mismatch for {name}: expected {expected} bytes, received {actual}")]
    SizeIntegrity {
        name: String,
        expected: u64,
        actual: u64,
    },

    /// Retries exhausted uploading a file's chunks or the index block
    #[error("upload failed after {tries} attempts: {what}")]
    UploadExhausted { what: String, tries: u32 },

    /// IO error reading a staged file
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::MalformedIndex(err.to_string())
    }
}

impl ClientError {
    /// Whether this failure means the block no longer exists (expired link
    /// or mistyped code)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Cache(blind_blockcache::BlockCacheError::NotFound(_))
        )
    }

    /// Whether this failure means decryption was refused (wrong key or
    /// tampered ciphertext)
    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            Self::Crypto(blind_crypto::CryptoError::Authentication)
        )
    }
}
