//! Decoy wrapping of served blocks
//!
//! The cache serves every block inside an HTML-shaped byte stream so casual
//! inspection sees a web page rather than a ciphertext boundary. The true
//! payload starts immediately after the literal `</html>\n` marker and ends
//! [`TAIL_LENGTH`] bytes before the end of the stream.

use crate::{BlockCacheError, Result};

/// Byte marker that terminates the decoy preamble
pub const DECOY_MARKER: &[u8] = b"</html>\n";

/// Fixed number of padding bytes after the payload
pub const TAIL_LENGTH: usize = 32;

/// Decoy preamble used when this process does the wrapping (memory backend,
/// tests). Ends with the marker so `strip` finds the payload right after it.
const DECOY_PREAMBLE: &[u8] = b"<!DOCTYPE html>\n<html><head><title>document</title></head><body></body></html>\n";

/// Recover the ciphertext from a decoy-wrapped payload.
///
/// Scans forward for the first occurrence of `</html>\n`; the payload runs
/// from just past the marker to `TAIL_LENGTH` bytes before the end. A
/// missing marker, or a stream too short to hold the tail, is a
/// [`BlockCacheError::CorruptBlock`] - never a truncated slice.
pub fn strip(padded: &[u8]) -> Result<&[u8]> {
    let start = padded
        .windows(DECOY_MARKER.len())
        .position(|window| window == DECOY_MARKER)
        .ok_or_else(|| {
            BlockCacheError::CorruptBlock("decoy marker not found in download".to_string())
        })?
        + DECOY_MARKER.len();

    let end = padded.len().checked_sub(TAIL_LENGTH).filter(|&end| end >= start).ok_or_else(|| {
        BlockCacheError::CorruptBlock(format!(
            "payload too short: {} bytes after marker, {} byte tail expected",
            padded.len() - start,
            TAIL_LENGTH
        ))
    })?;

    Ok(&padded[start..end])
}

/// Wrap ciphertext the way the cache tier serves it: decoy preamble ending
/// in the marker, the payload, and the fixed-length tail.
pub fn wrap(ciphertext: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(DECOY_PREAMBLE.len() + ciphertext.len() + TAIL_LENGTH);
    out.extend_from_slice(DECOY_PREAMBLE);
    out.extend_from_slice(ciphertext);
    out.extend_from_slice(&[b'\n'; TAIL_LENGTH]);
    out
}
