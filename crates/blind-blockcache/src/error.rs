//! Error types for the blind-blockcache crate

use thiserror::Error;

/// Result type alias using `BlockCacheError`
pub type Result<T> = std::result::Result<T, BlockCacheError>;

/// Errors that can occur talking to the block cache
#[derive(Error, Debug)]
pub enum BlockCacheError {
    /// Block not found: expired link or wrong code
    #[error("block not found: {0}")]
    NotFound(String),

    /// The cache answered with an unexpected HTTP status
    #[error("unexpected HTTP status {status} for block {id}")]
    UnexpectedStatus { id: String, status: u16 },

    /// Decoy marker missing or payload too short to hold the tail
    #[error("corrupt block: {0}")]
    CorruptBlock(String),

    /// Connection error
    #[error("connection error: {0}")]
    Connection(String),

    /// Timeout error
    #[error("operation timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// HTTP transport error
    #[error("http error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for BlockCacheError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BlockCacheError::Timeout { seconds: 30 }
        } else if err.is_connect() {
            BlockCacheError::Connection(err.to_string())
        } else {
            BlockCacheError::Http(err.to_string())
        }
    }
}
