//! HTTP client for the cache/CDN block protocol
//!
//! Blocks are written with `PUT {base}/upload/block/{name}` and read with
//! `GET {base}/block/{name}`, where `name` is the 22-character base-62
//! identifier. Any 2xx acknowledges a write; a 404 on read means the block
//! expired or the code is wrong.

use crate::{BlockCache, BlockCacheError, Result};
use async_trait::async_trait;
use blind_crypto::BlockId;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

/// Configuration for the cache connection
#[derive(Clone, Debug)]
pub struct CacheConfig {
    /// Cache base URL (e.g., "https://ca1.blindupload.org")
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl CacheConfig {
    /// Create with a custom base URL
    pub fn with_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Block cache over HTTP
#[derive(Clone)]
pub struct HttpBlockCache {
    client: Client,
    config: CacheConfig,
}

impl HttpBlockCache {
    /// Create a new HTTP block cache
    pub fn new(config: CacheConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BlockCacheError::Connection(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create from a base URL string
    pub fn from_url(url: &str) -> Result<Self> {
        Self::new(CacheConfig::with_url(url))
    }

    /// Get the configuration
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn upload_url(&self, id: &BlockId) -> String {
        format!("{}/upload/block/{}", self.config.base_url, id.name())
    }

    fn download_url(&self, id: &BlockId) -> String {
        format!("{}/block/{}", self.config.base_url, id.name())
    }
}

#[async_trait]
impl BlockCache for HttpBlockCache {
    #[instrument(skip(self, body), fields(id = %id, size = body.len()))]
    async fn put_block(&self, id: &BlockId, body: Bytes) -> Result<()> {
        let url = self.upload_url(id);
        let response = self.client.put(&url).body(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BlockCacheError::UnexpectedStatus {
                id: id.name(),
                status: status.as_u16(),
            });
        }

        debug!(%url, "block stored");
        Ok(())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn get_block(&self, id: &BlockId) -> Result<Bytes> {
        let url = self.download_url(id);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(BlockCacheError::NotFound(id.name()));
        }
        if status.as_u16() != 200 {
            return Err(BlockCacheError::UnexpectedStatus {
                id: id.name(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!(%url, size = body.len(), "block fetched");
        Ok(body)
    }
}
