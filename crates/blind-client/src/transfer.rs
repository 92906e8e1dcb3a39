//! Per-chunk transfer state
//!
//! Each staged file carries one state slot per chunk. Slots start `Pending`,
//! become `Loaded` together once the file's bytes are resident, and move
//! through `Uploading` to `Uploaded` or `Errored`; errored slots are
//! re-attempted on the next pass. The upload scheduler owns all mutation;
//! observers only ever see state change notifications.

use crate::CHUNK_SIZE;

/// Lifecycle of a single chunk slot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChunkState {
    /// File bytes not yet resident
    Pending,
    /// Plaintext in memory, not yet attempted
    Loaded,
    /// Network PUT in flight
    Uploading,
    /// Confirmed stored
    Uploaded,
    /// Last attempt failed; eligible for retry
    Errored,
}

impl ChunkState {
    /// Whether the scheduler should attempt this slot
    pub fn is_attemptable(&self) -> bool {
        matches!(self, Self::Loaded | Self::Errored)
    }
}

/// Progress sink for transfer state changes.
///
/// The pipelines call this on every slot transition; implementations render
/// progress however they like and are never consulted for control flow.
pub trait TransferObserver: Send + Sync {
    fn on_chunk_state(&self, file_index: usize, chunk_index: usize, state: ChunkState);
}

/// Observer that ignores everything
pub struct NoopObserver;

impl TransferObserver for NoopObserver {
    fn on_chunk_state(&self, _file_index: usize, _chunk_index: usize, _state: ChunkState) {}
}

/// State slots for one file, one per chunk
#[derive(Clone, Debug)]
pub struct ChunkStates {
    slots: Vec<ChunkState>,
}

impl ChunkStates {
    /// Create all-pending slots for a file of the given size
    pub fn for_size(size: u64) -> Self {
        Self {
            slots: vec![ChunkState::Pending; chunk_count(size)],
        }
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the file has no chunks at all (empty file)
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// State of one slot
    pub fn get(&self, chunk_index: usize) -> ChunkState {
        self.slots[chunk_index]
    }

    /// Set one slot
    pub fn set(&mut self, chunk_index: usize, state: ChunkState) {
        self.slots[chunk_index] = state;
    }

    /// Mark every slot `Loaded`; the whole file is buffered before any
    /// chunk is attempted
    pub fn mark_all_loaded(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = ChunkState::Loaded;
        }
    }

    /// Whether every slot reached `Uploaded`
    pub fn all_uploaded(&self) -> bool {
        self.slots.iter().all(|s| *s == ChunkState::Uploaded)
    }

    /// How many slots reached `Uploaded`
    pub fn uploaded_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| **s == ChunkState::Uploaded)
            .count()
    }
}

/// Number of chunks for a file of `size` bytes
pub fn chunk_count(size: u64) -> usize {
    size.div_ceil(CHUNK_SIZE as u64) as usize
}

/// Byte range of one chunk within a file
pub fn chunk_range(size: u64, chunk_index: usize) -> std::ops::Range<usize> {
    let start = chunk_index * CHUNK_SIZE;
    let end = (start + CHUNK_SIZE).min(size as usize);
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_count_boundaries() {
        assert_eq!(chunk_count(0), 0);
        assert_eq!(chunk_count(1), 1);
        assert_eq!(chunk_count(999_999), 1);
        assert_eq!(chunk_count(1_000_000), 1);
        assert_eq!(chunk_count(1_000_001), 2);
        assert_eq!(chunk_count(1_999_999), 2);
        assert_eq!(chunk_count(2_000_000), 2);
        assert_eq!(chunk_count(2_000_001), 3);
    }

    #[test]
    fn test_chunk_ranges_cover_file() {
        let size = 1_999_999u64;
        assert_eq!(chunk_range(size, 0), 0..1_000_000);
        assert_eq!(chunk_range(size, 1), 1_000_000..1_999_999);

        let size = 2_000_000u64;
        assert_eq!(chunk_range(size, 0), 0..1_000_000);
        assert_eq!(chunk_range(size, 1), 1_000_000..2_000_000);
    }

    #[test]
    fn test_slots_start_pending() {
        let states = ChunkStates::for_size(2_500_000);
        assert_eq!(states.len(), 3);
        for i in 0..states.len() {
            assert_eq!(states.get(i), ChunkState::Pending);
        }
        assert!(!states.all_uploaded());
    }

    #[test]
    fn test_load_then_upload_lifecycle() {
        let mut states = ChunkStates::for_size(1_500_000);
        assert!(!states.get(0).is_attemptable());

        states.mark_all_loaded();
        assert!(states.get(0).is_attemptable());
        assert!(states.get(1).is_attemptable());

        states.set(0, ChunkState::Uploading);
        assert!(!states.get(0).is_attemptable());

        states.set(0, ChunkState::Uploaded);
        states.set(1, ChunkState::Errored);
        assert!(states.get(1).is_attemptable());
        assert_eq!(states.uploaded_count(), 1);
        assert!(!states.all_uploaded());

        states.set(1, ChunkState::Uploaded);
        assert!(states.all_uploaded());
    }

    #[test]
    fn test_empty_file_has_no_slots() {
        let states = ChunkStates::for_size(0);
        assert!(states.is_empty());
        assert!(states.all_uploaded());
    }
}
