//! # blindupload
//!
//! Facade crate over the blindupload workspace: encrypted, chunked file
//! sharing through an untrusted content cache that only ever sees opaque
//! ciphertext blocks.
//!
//! - [`crypto`]: 256-bit values, one-shot block keys, key-derived block ids
//! - [`blockcache`]: the cache seam (HTTP and in-memory) and decoy handling
//! - [`client`]: upload and download pipelines plus share codes

pub use blind_blockcache as blockcache;
pub use blind_client as client;
pub use blind_crypto as crypto;
