//! Anchors and share codes
//!
//! The recipient receives the index key as a URL fragment: either the full
//! 43-character base-62 form, or a 22-character short form whose missing
//! 126 bits arrive out of band as a 25-character base-33 code. The fragment
//! never reaches any server.

use crate::{ClientError, Result};
use blind_crypto::{BlockKey, BASE62_DIGITS, UPPER_BASE62_DIGITS};
use std::fmt;

/// A parsed anchor string, classified by length
#[derive(Clone)]
pub enum Anchor {
    /// 43 characters: the complete index key
    Long(BlockKey),
    /// 22 characters: needs the out-of-band code to become a key
    Short(String),
}

impl Anchor {
    /// Classify an anchor string.
    ///
    /// Length 43 parses as a complete key, length 22 as the upper half of a
    /// split key; anything else, or a foreign character, is
    /// [`ClientError::AnchorFormat`].
    pub fn parse(anchor: &str) -> Result<Self> {
        match anchor.len() {
            BASE62_DIGITS => BlockKey::from_base62(anchor)
                .map(Anchor::Long)
                .ok_or(ClientError::AnchorFormat(BASE62_DIGITS)),
            UPPER_BASE62_DIGITS => {
                // base-62 is exactly the ASCII alphanumerics
                if anchor.bytes().all(|b| b.is_ascii_alphanumeric()) {
                    Ok(Anchor::Short(anchor.to_string()))
                } else {
                    Err(ClientError::AnchorFormat(UPPER_BASE62_DIGITS))
                }
            }
            other => Err(ClientError::AnchorFormat(other)),
        }
    }

    /// Whether this anchor still needs its second-factor code
    pub fn requires_code(&self) -> bool {
        matches!(self, Anchor::Short(_))
    }

    /// Resolve the anchor into the index key.
    ///
    /// A short anchor combines with `code` (dashes tolerated); a failed
    /// combine is [`ClientError::BadCode`]. A long anchor ignores `code`.
    pub fn into_key(self, code: Option<&str>) -> Result<BlockKey> {
        match self {
            Anchor::Long(key) => Ok(key),
            Anchor::Short(upper) => {
                let code = code.ok_or(ClientError::CodeRequired)?;
                BlockKey::from_split(&upper, code).ok_or(ClientError::BadCode)
            }
        }
    }
}

/// The result of a completed upload: every form of the index key a sender
/// can hand to a recipient.
pub struct ShareCode {
    index_key: BlockKey,
    www_url: String,
}

impl ShareCode {
    pub(crate) fn new(index_key: BlockKey, www_url: String) -> Self {
        Self { index_key, www_url }
    }

    /// The index key itself
    pub fn index_key(&self) -> &BlockKey {
        &self.index_key
    }

    /// Self-contained 43-character anchor
    pub fn long_anchor(&self) -> String {
        self.index_key.to_base62()
    }

    /// 22-character anchor; useless without [`code`](Self::code)
    pub fn short_anchor(&self) -> String {
        self.index_key.value().upper_base62()
    }

    /// The 25-character base-33 second factor, dash-grouped for reading
    /// out loud
    pub fn code(&self) -> String {
        self.index_key.value().lower_base33_dashed()
    }

    /// Full link carrying the long anchor as its fragment
    pub fn long_url(&self) -> String {
        format!("{}/#{}", self.www_url, self.long_anchor())
    }

    /// Link carrying only the short anchor; the code travels separately
    pub fn short_url(&self) -> String {
        format!("{}/#{}", self.www_url, self.short_anchor())
    }
}

impl fmt::Debug for ShareCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShareCode")
            .field("index_key", &"<redacted>")
            .field("www_url", &self.www_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share() -> ShareCode {
        ShareCode::new(BlockKey::generate(), "https://www.example.org".to_string())
    }

    #[test]
    fn test_long_anchor_roundtrip() {
        let share = share();
        let anchor = Anchor::parse(&share.long_anchor()).unwrap();
        assert!(!anchor.requires_code());
        let key = anchor.into_key(None).unwrap();
        assert_eq!(key.as_bytes(), share.index_key().as_bytes());
    }

    #[test]
    fn test_short_anchor_needs_code() {
        let share = share();
        let anchor = Anchor::parse(&share.short_anchor()).unwrap();
        assert!(anchor.requires_code());
        assert!(matches!(
            anchor.clone().into_key(None),
            Err(ClientError::CodeRequired)
        ));

        let key = anchor.into_key(Some(&share.code())).unwrap();
        assert_eq!(key.as_bytes(), share.index_key().as_bytes());
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(matches!(
            Anchor::parse("too-short"),
            Err(ClientError::AnchorFormat(9))
        ));
        assert!(matches!(
            Anchor::parse(&"0".repeat(44)),
            Err(ClientError::AnchorFormat(44))
        ));
    }

    #[test]
    fn test_foreign_character_rejected() {
        let mut long = "0".repeat(43);
        long.replace_range(0..1, "#");
        assert!(matches!(
            Anchor::parse(&long),
            Err(ClientError::AnchorFormat(_))
        ));

        let mut short = "0".repeat(22);
        short.replace_range(5..6, "!");
        assert!(matches!(
            Anchor::parse(&short),
            Err(ClientError::AnchorFormat(_))
        ));
    }

    #[test]
    fn test_garbled_code_is_bad_code() {
        let share = share();
        let anchor = Anchor::parse(&share.short_anchor()).unwrap();
        // 'O' is excluded from the base-33 alphabet
        let garbled = format!("O{}", &share.code()[1..]);
        assert!(matches!(
            anchor.into_key(Some(&garbled)),
            Err(ClientError::BadCode)
        ));
    }

    #[test]
    fn test_urls_carry_fragment() {
        let share = share();
        assert_eq!(
            share.long_url(),
            format!("https://www.example.org/#{}", share.long_anchor())
        );
        assert!(share.short_url().ends_with(&share.short_anchor()));
    }
}
