//! # Blind Crypto
//!
//! Cryptographic core for the blindupload file-sharing system.
//!
//! This crate provides:
//! - **Value256**: a fixed 256-bit unsigned integer with lossless conversion
//!   between raw bytes, hex, base-62, and the split base-62/base-33 form used
//!   for short share codes
//! - **BlockKey**: a one-shot AES-256-GCM key, randomly generated per block
//! - **BlockId**: the public storage name of a block, derived as SHA-256 of
//!   its key
//!
//! ## Security Model
//!
//! All encryption happens on the sender's machine. The storage tier only ever
//! sees ciphertext addressed by an opaque identifier; keys travel inside the
//! share code or inside the encrypted index, never server-side.
//!
//! Every key seals exactly one message. Because of that discipline the AEAD
//! nonce is fixed at all-zero and never exposed through the API.
//!
//! ## Example
//!
//! ```rust,ignore
//! use blind_crypto::{BlockKey, BlockId};
//!
//! let key = BlockKey::generate();
//! let ciphertext = key.seal(b"chunk bytes")?;
//!
//! // The block's public name is a pure function of the key.
//! let id = BlockId::from_key(&key);
//! println!("stored as {}", id.name());
//!
//! let plaintext = key.open(&ciphertext)?;
//! ```

pub mod error;
pub mod ident;
pub mod keys;
pub mod value;

pub use error::{CryptoError, Result};
pub use ident::BlockId;
pub use keys::{BlockKey, KEY_SIZE, NONCE_SIZE};
pub use value::{
    Value256, BASE62_DIGITS, HEX_DIGITS, LOWER_BASE33_DIGITS, UPPER_BASE62_DIGITS,
};
