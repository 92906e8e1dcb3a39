//! One-shot block keys
//!
//! Every stored block gets a freshly generated 256-bit AES-256-GCM key, used
//! to seal exactly one message. The key doubles as the block's private
//! address: hashing it yields the public [`BlockId`](crate::BlockId).

use crate::{
    value::Value256,
    CryptoError, Result,
};
use aes_gcm::{
    aead::Aead,
    Aes256Gcm, KeyInit, Nonce,
};
use rand::rngs::OsRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of a block key in bytes (256 bits)
pub const KEY_SIZE: usize = 32;

/// Size of the AEAD nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// The fixed all-zero nonce.
///
/// Safe only because a key never seals more than one message; the API keeps
/// the nonce out of caller hands entirely.
const ZERO_NONCE: [u8; NONCE_SIZE] = [0u8; NONCE_SIZE];

/// A one-shot symmetric key for a single stored block
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct BlockKey {
    bytes: [u8; KEY_SIZE],
}

impl BlockKey {
    /// Generate a new random key
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        rand::RngCore::fill_bytes(&mut OsRng, &mut bytes);
        Self { bytes }
    }

    /// Create a key from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != KEY_SIZE {
            return Err(CryptoError::InvalidKey(format!(
                "block key must be {} bytes, got {}",
                KEY_SIZE,
                bytes.len()
            )));
        }
        let mut arr = [0u8; KEY_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// Create a key from a 256-bit value
    pub fn from_value(value: Value256) -> Self {
        Self {
            bytes: value.to_be_bytes(),
        }
    }

    /// Parse the full 43-digit base-62 key form; `None` on bad input
    pub fn from_base62(s: &str) -> Option<Self> {
        Value256::from_base62(s).map(Self::from_value)
    }

    /// Reassemble a key from the 22-digit base-62 upper half and the
    /// 25-digit base-33 code (dashes tolerated); `None` on bad input
    pub fn from_split(upper: &str, code: &str) -> Option<Self> {
        Value256::from_split(upper, code).map(Self::from_value)
    }

    /// Get the raw key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }

    /// The key as a 256-bit value
    pub fn value(&self) -> Value256 {
        Value256::from_be_bytes(self.bytes)
    }

    /// Full 43-digit base-62 form, the form recorded in the index
    pub fn to_base62(&self) -> String {
        self.value().to_base62()
    }

    /// Seal a buffer under this key: AES-256-GCM, 128-bit tag, fixed
    /// all-zero 96-bit nonce.
    ///
    /// A key must seal at most one message over its lifetime; callers
    /// generate a fresh key for every block, including retried uploads.
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let cipher = Aes256Gcm::new_from_slice(&self.bytes)
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;
        cipher
            .encrypt(Nonce::from_slice(&ZERO_NONCE), plaintext)
            .map_err(|e| CryptoError::Encryption(e.to_string()))
    }

    /// Open a sealed buffer. A tag mismatch fails with
    /// [`CryptoError::Authentication`]; corrupted plaintext is never
    /// returned.
    pub fn open(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let cipher = Aes256Gcm::new_from_slice(&self.bytes)
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;
        cipher
            .decrypt(Nonce::from_slice(&ZERO_NONCE), ciphertext)
            .map_err(|_| CryptoError::Authentication)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_keys_differ() {
        let a = BlockKey::generate();
        let b = BlockKey::generate();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_from_bytes_length_check() {
        assert!(BlockKey::from_bytes(&[0u8; KEY_SIZE]).is_ok());
        assert!(BlockKey::from_bytes(&[0u8; 16]).is_err());
    }

    #[test]
    fn test_seal_open_roundtrip() {
        let key = BlockKey::generate();
        let plaintext = b"one chunk of one file";

        let ciphertext = key.seal(plaintext).unwrap();
        assert_ne!(ciphertext.as_slice(), plaintext.as_slice());
        // 128-bit tag appended
        assert_eq!(ciphertext.len(), plaintext.len() + 16);

        let opened = key.open(&ciphertext).unwrap();
        assert_eq!(opened.as_slice(), plaintext.as_slice());
    }

    #[test]
    fn test_bit_flip_fails_authentication() {
        let key = BlockKey::generate();
        let mut ciphertext = key.seal(b"payload").unwrap();

        for i in 0..ciphertext.len() {
            ciphertext[i] ^= 0x01;
            assert!(matches!(
                key.open(&ciphertext),
                Err(CryptoError::Authentication)
            ));
            ciphertext[i] ^= 0x01;
        }
    }

    #[test]
    fn test_wrong_key_fails_authentication() {
        let ciphertext = BlockKey::generate().seal(b"payload").unwrap();
        let other = BlockKey::generate();
        assert!(matches!(
            other.open(&ciphertext),
            Err(CryptoError::Authentication)
        ));
    }

    #[test]
    fn test_base62_roundtrip() {
        let key = BlockKey::generate();
        let encoded = key.to_base62();
        let decoded = BlockKey::from_base62(&encoded).unwrap();
        assert_eq!(key.as_bytes(), decoded.as_bytes());
    }

    #[test]
    fn test_split_roundtrip() {
        let key = BlockKey::generate();
        let upper = key.value().upper_base62();
        let code = key.value().lower_base33_dashed();
        let decoded = BlockKey::from_split(&upper, &code).unwrap();
        assert_eq!(key.as_bytes(), decoded.as_bytes());
    }
}
