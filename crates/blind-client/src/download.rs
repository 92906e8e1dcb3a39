//! The download pipeline
//!
//! A [`DownloadSession`] resolves an anchor into the index key, fetches and
//! opens the index block, and reassembles any selected file chunk by chunk.
//! Every block goes through the same procedure: derive the id from the key,
//! fetch, strip the decoy wrapping, open.

use crate::{
    anchor::Anchor,
    index::{decode_index, FileEntry},
    ClientError, Result,
};
use blind_blockcache::{decoy, BlockCache};
use blind_crypto::{BlockId, BlockKey};
use std::sync::Arc;
use tracing::{debug, instrument};

/// A download session against one block cache
pub struct DownloadSession {
    cache: Arc<dyn BlockCache>,
}

impl DownloadSession {
    /// Create a session reading from the given cache
    pub fn new(cache: Arc<dyn BlockCache>) -> Self {
        Self { cache }
    }

    /// Resolve an anchor string (plus the out-of-band code for short
    /// anchors) and fetch the file listing it points at.
    // the anchor is key material: only its length may reach the log
    #[instrument(skip_all, fields(anchor_len = anchor.len()))]
    pub async fn open_anchor(&self, anchor: &str, code: Option<&str>) -> Result<Vec<FileEntry>> {
        let key = Anchor::parse(anchor)?.into_key(code)?;
        self.fetch_index(&key).await
    }

    /// Fetch and open the index block for a known index key
    pub async fn fetch_index(&self, index_key: &BlockKey) -> Result<Vec<FileEntry>> {
        let plaintext = self.fetch_block(index_key).await?;
        let entries = decode_index(&plaintext)?;
        debug!(files = entries.len(), "index opened");
        Ok(entries)
    }

    /// Reassemble one file: fetch and open every chunk in key order into a
    /// buffer sized to the declared length, then verify the byte count.
    ///
    /// Only the per-block AEAD tag protects content; there is no separate
    /// whole-file hash.
    #[instrument(skip(self, entry), fields(name = %entry.name, size = entry.size))]
    pub async fn fetch_file(&self, entry: &FileEntry) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; entry.size as usize];
        let mut offset = 0usize;

        for key_str in &entry.keys {
            let key = BlockKey::from_base62(key_str).ok_or_else(|| {
                ClientError::MalformedIndex(format!("invalid chunk key for {}", entry.name))
            })?;
            let plaintext = self.fetch_block(&key).await?;

            let end = offset + plaintext.len();
            if end > buf.len() {
                return Err(ClientError::SizeIntegrity {
                    name: entry.name.clone(),
                    expected: entry.size,
                    actual: end as u64,
                });
            }
            buf[offset..end].copy_from_slice(&plaintext);
            offset = end;
        }

        if offset as u64 != entry.size {
            return Err(ClientError::SizeIntegrity {
                name: entry.name.clone(),
                expected: entry.size,
                actual: offset as u64,
            });
        }
        Ok(buf)
    }

    /// Fetch, strip, and open one block by its key
    async fn fetch_block(&self, key: &BlockKey) -> Result<Vec<u8>> {
        let id = BlockId::from_key(key);
        let wrapped = self.cache.get_block(&id).await?;
        let ciphertext = decoy::strip(&wrapped)?;
        Ok(key.open(ciphertext)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blind_blockcache::MemoryBlockCache;
    use bytes::Bytes;

    async fn store_sealed(cache: &MemoryBlockCache, key: &BlockKey, plaintext: &[u8]) {
        let id = BlockId::from_key(key);
        let ciphertext = key.seal(plaintext).unwrap();
        cache.put_block(&id, Bytes::from(ciphertext)).await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_index_roundtrip() {
        let cache = MemoryBlockCache::new();
        let index_key = BlockKey::generate();
        let entries = vec![FileEntry {
            name: "readme.md".to_string(),
            size: 4,
            keys: vec![BlockKey::generate().to_base62()],
        }];
        store_sealed(&cache, &index_key, &serde_json::to_vec(&entries).unwrap()).await;

        let session = DownloadSession::new(Arc::new(cache));
        assert_eq!(session.fetch_index(&index_key).await.unwrap(), entries);
    }

    #[tokio::test]
    async fn test_missing_index_is_not_found() {
        let session = DownloadSession::new(Arc::new(MemoryBlockCache::new()));
        let err = session
            .fetch_index(&BlockKey::generate())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_undeclared_bytes_fail_size_check() {
        // chunk holds 8 bytes but the entry declares 4
        let cache = MemoryBlockCache::new();
        let chunk_key = BlockKey::generate();
        store_sealed(&cache, &chunk_key, b"too long").await;

        let entry = FileEntry {
            name: "short.bin".to_string(),
            size: 4,
            keys: vec![chunk_key.to_base62()],
        };
        let session = DownloadSession::new(Arc::new(cache));
        assert!(matches!(
            session.fetch_file(&entry).await,
            Err(ClientError::SizeIntegrity { expected: 4, .. })
        ));
    }

    #[tokio::test]
    async fn test_short_delivery_fails_size_check() {
        // chunk holds 4 bytes but the entry declares 9
        let cache = MemoryBlockCache::new();
        let chunk_key = BlockKey::generate();
        store_sealed(&cache, &chunk_key, b"four").await;

        let entry = FileEntry {
            name: "long.bin".to_string(),
            size: 9,
            keys: vec![chunk_key.to_base62()],
        };
        let session = DownloadSession::new(Arc::new(cache));
        assert!(matches!(
            session.fetch_file(&entry).await,
            Err(ClientError::SizeIntegrity {
                expected: 9,
                actual: 4,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_malformed_chunk_key_rejected() {
        let entry = FileEntry {
            name: "bad.bin".to_string(),
            size: 1,
            keys: vec!["not-a-key".to_string()],
        };
        let session = DownloadSession::new(Arc::new(MemoryBlockCache::new()));
        assert!(matches!(
            session.fetch_file(&entry).await,
            Err(ClientError::MalformedIndex(_))
        ));
    }
}
