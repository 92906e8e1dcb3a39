//! The encrypted file index
//!
//! The index is a JSON array with one entry per uploaded file, sealed as a
//! single block under its own key. It is the only place the chunk keys and
//! file names exist outside the sender's memory, and it only ever travels
//! encrypted.

use crate::{chunk_count, ClientError, Result};
use serde::{Deserialize, Serialize};

/// One file inside the index: its name, declared size, and the full
/// 43-character base-62 key of every chunk, in chunk order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
    pub keys: Vec<String>,
}

impl FileEntry {
    /// Number of chunks this entry references
    pub fn num_chunks(&self) -> usize {
        self.keys.len()
    }

    /// Whether the key list is consistent with the declared size
    pub fn is_consistent(&self) -> bool {
        self.keys.len() == chunk_count(self.size)
    }
}

/// Serialize an index to its JSON wire form
pub fn encode_index(entries: &[FileEntry]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(entries)?)
}

/// Parse a decrypted index block into file entries
pub fn decode_index(bytes: &[u8]) -> Result<Vec<FileEntry>> {
    let entries: Vec<FileEntry> = serde_json::from_slice(bytes)?;
    for entry in &entries {
        if !entry.is_consistent() {
            return Err(ClientError::MalformedIndex(format!(
                "{}: {} chunk keys for {} bytes",
                entry.name,
                entry.keys.len(),
                entry.size
            )));
        }
    }
    Ok(entries)
}
