//! # Blind Blockcache
//!
//! Storage layer for the blindupload system: an untrusted content cache that
//! holds opaque ciphertext blocks keyed by their public identifier.
//!
//! This crate provides:
//! - **`BlockCache` trait**: put/get of ciphertext blocks by [`BlockId`]
//! - **HTTP backend**: the real cache/CDN protocol over reqwest
//! - **Memory backend**: an in-process cache for tests and demos
//! - **Decoy handling**: the HTML-shaped wrapping the cache serves blocks
//!   in, and the strip routine that recovers the true ciphertext
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            Upload / Download            │
//! ├─────────────────────────────────────────┤
//! │            BlockCache Trait             │
//! ├─────────────────────┬───────────────────┤
//! │   HttpBlockCache    │  MemoryBlockCache │
//! ├─────────────────────┴───────────────────┤
//! │            Cache / CDN tier             │
//! └─────────────────────────────────────────┘
//! ```
//!
//! The cache never sees plaintext, filenames, or keys; it stores bytes under
//! a 22-character base-62 name and serves them back wrapped in decoy HTML.

pub mod decoy;
pub mod error;
pub mod http;
pub mod memory;

pub use decoy::{strip, wrap, DECOY_MARKER, TAIL_LENGTH};
pub use error::{BlockCacheError, Result};
pub use http::{CacheConfig, HttpBlockCache};
pub use memory::MemoryBlockCache;

use async_trait::async_trait;
use blind_crypto::BlockId;
use bytes::Bytes;

/// A content cache holding ciphertext blocks under opaque names.
///
/// `put_block` stores raw ciphertext. `get_block` returns the block as the
/// cache serves it: decoy-wrapped, to be fed through [`decoy::strip`].
#[async_trait]
pub trait BlockCache: Send + Sync {
    /// Store a ciphertext block under its identifier
    async fn put_block(&self, id: &BlockId, body: Bytes) -> Result<()>;

    /// Retrieve the decoy-wrapped payload for an identifier
    async fn get_block(&self, id: &BlockId) -> Result<Bytes>;
}
