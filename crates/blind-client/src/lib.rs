//! # Blind Client
//!
//! Sender and recipient pipelines for blindupload.
//!
//! An [`UploadSession`] splits files into fixed-size chunks, seals every
//! chunk under its own freshly generated key, stores the ciphertext on the
//! block cache under the key's hash, and publishes a single encrypted index
//! block describing all files. The whole upload collapses into one share
//! code: the index key, in its long 43-character form or split into a
//! 22-character anchor plus a 25-character spoken code.
//!
//! A [`DownloadSession`] walks the same path backwards: anchor to index key,
//! index key to index block, index entries to chunk keys, chunk keys to
//! reassembled plaintext.
//!
//! ## Example
//!
//! ```rust,ignore
//! use blind_client::{Config, DownloadSession, UploadSession};
//! use blind_blockcache::HttpBlockCache;
//! use std::sync::Arc;
//!
//! let cache = Arc::new(HttpBlockCache::from_url("https://ca1.blindupload.org")?);
//!
//! let mut session = UploadSession::new(Arc::clone(&cache) as _, Config::default());
//! session.stage_bytes("notes.txt", b"hello".to_vec());
//! let share = session.run().await?;
//! println!("send this: {}", share.long_url());
//!
//! let download = DownloadSession::new(cache);
//! let index = download.open_anchor(&share.long_anchor(), None).await?;
//! let bytes = download.fetch_file(&index[0]).await?;
//! ```

pub mod anchor;
pub mod config;
pub mod download;
pub mod error;
pub mod index;
pub mod transfer;
pub mod upload;

pub use anchor::{Anchor, ShareCode};
pub use config::Config;
pub use download::DownloadSession;
pub use error::{ClientError, Result};
pub use index::FileEntry;
pub use transfer::{chunk_count, ChunkState, ChunkStates, TransferObserver};
pub use upload::UploadSession;

/// Size of a plaintext chunk in bytes
pub const CHUNK_SIZE: usize = 1_000_000;

/// Maximum number of full retry passes over a file's chunks, and of
/// attempts to store the index block
pub const MAX_TRIES: u32 = 10;
