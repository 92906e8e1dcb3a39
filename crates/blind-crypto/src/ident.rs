//! Block identifiers
//!
//! A block's public name is SHA-256 of its key's raw bytes. The mapping is
//! deterministic per key and one-directional; identical plaintext under two
//! different keys lands under two different names, so the storage tier can
//! never correlate uploads by content.

use crate::{keys::BlockKey, value::Value256};
use sha2::{Digest, Sha256};
use std::fmt;

/// The public, storage-tier name of a stored block
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId {
    value: Value256,
}

impl BlockId {
    /// Derive the identifier for a key: SHA-256 over its 32 raw bytes
    pub fn from_key(key: &BlockKey) -> Self {
        let digest: [u8; 32] = Sha256::digest(key.as_bytes()).into();
        Self {
            value: Value256::from_be_bytes(digest),
        }
    }

    /// The identifier as a 256-bit value
    pub fn value(&self) -> Value256 {
        self.value
    }

    /// The 22-character base-62 name used verbatim as the storage lookup key
    pub fn name(&self) -> String {
        self.value.upper_base62()
    }
}

impl fmt::Debug for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockId({})", self.name())
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::UPPER_BASE62_DIGITS;

    #[test]
    fn test_derivation_is_deterministic() {
        let key = BlockKey::generate();
        assert_eq!(BlockId::from_key(&key), BlockId::from_key(&key));
    }

    #[test]
    fn test_distinct_keys_distinct_ids() {
        let a = BlockId::from_key(&BlockKey::generate());
        let b = BlockId::from_key(&BlockKey::generate());
        assert_ne!(a, b);
    }

    #[test]
    fn test_name_is_upper_form() {
        let id = BlockId::from_key(&BlockKey::generate());
        assert_eq!(id.name().len(), UPPER_BASE62_DIGITS);
        assert_eq!(id.name(), id.value().upper_base62());
    }

    #[test]
    fn test_known_vector() {
        // SHA-256 of 32 zero bytes
        let key = BlockKey::from_bytes(&[0u8; 32]).unwrap();
        let id = BlockId::from_key(&key);
        assert_eq!(
            id.value().to_hex(),
            "66687AADF862BD776C8FC18B8E9F8E20089714856EE233B3902A591D0D5F2925"
        );
    }
}
