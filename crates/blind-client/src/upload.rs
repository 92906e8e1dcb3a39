//! The upload pipeline
//!
//! An [`UploadSession`] owns everything for one send: the staged files, the
//! per-chunk state slots, the cache handle, and the progress observer. Files
//! are fully buffered, chunked, and sealed chunk by chunk under one-shot
//! keys; the encrypted index goes up last, only after every chunk of every
//! file is confirmed stored.

use crate::{
    anchor::ShareCode,
    config::Config,
    index::{encode_index, FileEntry},
    transfer::{chunk_range, ChunkState, ChunkStates, NoopObserver, TransferObserver},
    ClientError, Result,
};
use blind_blockcache::BlockCache;
use blind_crypto::{BlockId, BlockKey};
use bytes::Bytes;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Pause between attempts to store the index block
const INDEX_RETRY_PAUSE: Duration = Duration::from_millis(100);

/// One staged file: name, resident bytes, chunk slots, and the recorded
/// chunk keys (filled in as chunks confirm)
struct StagedFile {
    name: String,
    data: Bytes,
    states: ChunkStates,
    keys: Vec<String>,
}

impl StagedFile {
    fn new(name: String, data: Bytes) -> Self {
        let states = ChunkStates::for_size(data.len() as u64);
        let keys = vec![String::new(); states.len()];
        Self {
            name,
            data,
            states,
            keys,
        }
    }

    fn entry(&self) -> FileEntry {
        FileEntry {
            name: self.name.clone(),
            size: self.data.len() as u64,
            keys: self.keys.clone(),
        }
    }
}

/// An upload session over a set of staged files.
///
/// The whole file is held in memory from staging until its last chunk
/// confirms, which bounds usable file sizes to available memory.
pub struct UploadSession {
    cache: Arc<dyn BlockCache>,
    config: Config,
    observer: Arc<dyn TransferObserver>,
    files: Vec<StagedFile>,
}

impl UploadSession {
    /// Create a session storing into the given cache
    pub fn new(cache: Arc<dyn BlockCache>, config: Config) -> Self {
        Self {
            cache,
            config,
            observer: Arc::new(NoopObserver),
            files: Vec::new(),
        }
    }

    /// Attach a progress observer
    pub fn with_observer(mut self, observer: Arc<dyn TransferObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Stage a file from bytes already in memory
    pub fn stage_bytes(&mut self, name: impl Into<String>, data: impl Into<Bytes>) {
        self.files.push(StagedFile::new(name.into(), data.into()));
    }

    /// Stage a file from disk, named after its final path component
    pub async fn stage_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());
        self.stage_bytes(name, data);
        Ok(())
    }

    /// Number of staged files
    pub fn num_files(&self) -> usize {
        self.files.len()
    }

    /// Upload every staged file, then the index; returns the share code.
    ///
    /// No index is ever published unless every chunk of every file
    /// confirmed first.
    #[instrument(skip(self), fields(files = self.files.len()))]
    pub async fn run(&mut self) -> Result<ShareCode> {
        for file_index in 0..self.files.len() {
            self.upload_file(file_index).await?;
        }

        let entries: Vec<FileEntry> = self.files.iter().map(StagedFile::entry).collect();
        let index_key = self.upload_index(&entries).await?;

        Ok(ShareCode::new(index_key, self.config.www_url.clone()))
    }

    /// Drive one file's chunks through the transfer state machine, with up
    /// to `max_tries` full passes over the slots.
    async fn upload_file(&mut self, file_index: usize) -> Result<()> {
        let num_chunks = self.files[file_index].states.len();
        debug!(
            name = %self.files[file_index].name,
            size = self.files[file_index].data.len(),
            num_chunks,
            "uploading file"
        );

        // the file is fully resident, so every slot loads at once
        self.files[file_index].states.mark_all_loaded();
        for chunk_index in 0..num_chunks {
            self.observer
                .on_chunk_state(file_index, chunk_index, ChunkState::Loaded);
        }

        for _pass in 0..self.config.max_tries {
            for chunk_index in 0..num_chunks {
                if self.files[file_index].states.get(chunk_index).is_attemptable() {
                    self.upload_chunk(file_index, chunk_index).await?;
                }
            }
            if self.files[file_index].states.all_uploaded() {
                break;
            }
        }

        if !self.files[file_index].states.all_uploaded() {
            return Err(ClientError::UploadExhausted {
                what: format!("file {}", self.files[file_index].name),
                tries: self.config.max_tries,
            });
        }
        Ok(())
    }

    /// One attempt at one chunk: fresh key, seal, store.
    ///
    /// The key is regenerated on every attempt, so a retried chunk never
    /// seals two messages under the same key.
    async fn upload_chunk(&mut self, file_index: usize, chunk_index: usize) -> Result<()> {
        self.set_state(file_index, chunk_index, ChunkState::Uploading);

        let file = &self.files[file_index];
        let chunk = file
            .data
            .slice(chunk_range(file.data.len() as u64, chunk_index));

        let key = BlockKey::generate();
        let id = BlockId::from_key(&key);
        let ciphertext = key.seal(&chunk)?;

        let stored = self.cache.put_block(&id, Bytes::from(ciphertext)).await;
        match stored {
            Ok(()) => {
                self.files[file_index].keys[chunk_index] = key.to_base62();
                self.set_state(file_index, chunk_index, ChunkState::Uploaded);
            }
            Err(err) => {
                warn!(%err, file_index, chunk_index, "chunk upload failed");
                self.set_state(file_index, chunk_index, ChunkState::Errored);
            }
        }
        Ok(())
    }

    /// Seal the index under a fresh key and store it with bounded retries
    async fn upload_index(&self, entries: &[FileEntry]) -> Result<BlockKey> {
        let index_bytes = encode_index(entries)?;
        let index_key = BlockKey::generate();
        let id = BlockId::from_key(&index_key);
        let ciphertext = Bytes::from(index_key.seal(&index_bytes)?);

        for attempt in 1..=self.config.max_tries {
            match self.cache.put_block(&id, ciphertext.clone()).await {
                Ok(()) => {
                    debug!(%id, attempt, "index stored");
                    return Ok(index_key);
                }
                Err(err) => {
                    warn!(%err, attempt, "index upload failed");
                    if attempt < self.config.max_tries {
                        tokio::time::sleep(INDEX_RETRY_PAUSE).await;
                    }
                }
            }
        }

        Err(ClientError::UploadExhausted {
            what: "index block".to_string(),
            tries: self.config.max_tries,
        })
    }

    fn set_state(&mut self, file_index: usize, chunk_index: usize, state: ChunkState) {
        self.files[file_index].states.set(chunk_index, state);
        self.observer.on_chunk_state(file_index, chunk_index, state);
    }
}
