//! In-memory block cache for tests and demos
//!
//! Stores raw ciphertext and serves it decoy-wrapped, matching what the real
//! cache tier does, so code exercising the download path always goes through
//! the strip routine.

use crate::{decoy, BlockCache, BlockCacheError, Result};
use async_trait::async_trait;
use blind_crypto::BlockId;
use bytes::Bytes;
use dashmap::DashMap;
use std::sync::Arc;

/// An in-memory block cache
#[derive(Clone, Default)]
pub struct MemoryBlockCache {
    blocks: Arc<DashMap<String, Bytes>>,
}

impl MemoryBlockCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            blocks: Arc::new(DashMap::new()),
        }
    }

    /// Get the number of blocks stored
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Clear all blocks
    pub fn clear(&self) {
        self.blocks.clear();
    }

    /// Check whether a block is present
    pub fn contains(&self, id: &BlockId) -> bool {
        self.blocks.contains_key(&id.name())
    }
}

#[async_trait]
impl BlockCache for MemoryBlockCache {
    async fn put_block(&self, id: &BlockId, body: Bytes) -> Result<()> {
        self.blocks.insert(id.name(), body);
        Ok(())
    }

    async fn get_block(&self, id: &BlockId) -> Result<Bytes> {
        self.blocks
            .get(&id.name())
            .map(|entry| Bytes::from(decoy::wrap(entry.value())))
            .ok_or_else(|| BlockCacheError::NotFound(id.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blind_crypto::BlockKey;

    fn fresh_id() -> BlockId {
        BlockId::from_key(&BlockKey::generate())
    }

    #[tokio::test]
    async fn test_put_get_roundtrip_through_decoy() {
        let cache = MemoryBlockCache::new();
        let id = fresh_id();

        cache
            .put_block(&id, Bytes::from_static(b"ciphertext"))
            .await
            .unwrap();
        assert!(cache.contains(&id));

        let wrapped = cache.get_block(&id).await.unwrap();
        assert_ne!(wrapped.as_ref(), b"ciphertext");
        assert_eq!(decoy::strip(&wrapped).unwrap(), b"ciphertext");
    }

    #[tokio::test]
    async fn test_missing_block_is_not_found() {
        let cache = MemoryBlockCache::new();
        let result = cache.get_block(&fresh_id()).await;
        assert!(matches!(result, Err(BlockCacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_clear() {
        let cache = MemoryBlockCache::new();
        cache
            .put_block(&fresh_id(), Bytes::from_static(b"x"))
            .await
            .unwrap();
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
