//! Strong type definitions for digests and links.
//!
//! Both travel as lowercase hex strings. Parsing is strict (exact length,
//! lowercase only) so anything accepted re-encodes to the same text.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Length of a digest in bytes (SHA-256).
pub const DIGEST_LEN: usize = 32;

/// Length of a link in bytes. Rendered as 16 hex characters.
pub const LINK_LEN: usize = 8;

/// A SHA-256 digest over a record's canonical fields.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest(pub [u8; DIGEST_LEN]);

impl Digest {
    /// Create a digest from raw bytes.
    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Convert to a 64-character lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a 64-character lowercase hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        decode_lower_hex(s).map(Self)
    }

    /// The link the next record uses to point back at this one.
    ///
    /// This is the first 16 hex characters of the digest.
    pub fn link(&self) -> Link {
        let mut prefix = [0u8; LINK_LEN];
        prefix.copy_from_slice(&self.0[..LINK_LEN]);
        Link(prefix)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(de::Error::custom)
    }
}

/// A truncated back-reference to the previous record's digest.
///
/// The genesis record links to [`Link::GENESIS`], sixteen `'0'` characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Link(pub [u8; LINK_LEN]);

impl Link {
    /// The sentinel link carried by the genesis record.
    pub const GENESIS: Self = Self([0u8; LINK_LEN]);

    /// Create a link from raw bytes.
    pub const fn from_bytes(bytes: [u8; LINK_LEN]) -> Self {
        Self(bytes)
    }

    /// Convert to a 16-character lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a 16-character lowercase hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        decode_lower_hex(s).map(Self)
    }

    /// Whether this is the genesis sentinel.
    pub fn is_genesis(&self) -> bool {
        *self == Self::GENESIS
    }
}

impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Link({})", self.to_hex())
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(de::Error::custom)
    }
}

fn decode_lower_hex<const N: usize>(s: &str) -> Result<[u8; N], hex::FromHexError> {
    if s.len() != N * 2 {
        return Err(hex::FromHexError::InvalidStringLength);
    }
    if let Some((index, c)) = s
        .char_indices()
        .find(|(_, c)| !matches!(c, '0'..='9' | 'a'..='f'))
    {
        return Err(hex::FromHexError::InvalidHexCharacter { c, index });
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(s, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_hex_roundtrip() {
        let digest = Digest::from_bytes([0x42; 32]);
        let hex = digest.to_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(Digest::from_hex(&hex).unwrap(), digest);
    }

    #[test]
    fn test_digest_link_is_prefix() {
        let hex = "1ed97b3fe92e1f68bafe97312982680140f797a5724fb9b6c8b5f3a20795f958";
        let digest = Digest::from_hex(hex).unwrap();
        assert_eq!(digest.link().to_hex(), "1ed97b3fe92e1f68");
    }

    #[test]
    fn test_genesis_link() {
        assert_eq!(Link::GENESIS.to_hex(), "0000000000000000");
        assert!(Link::from_hex("0000000000000000").unwrap().is_genesis());
    }

    #[test]
    fn test_rejects_uppercase_hex() {
        let result = Link::from_hex("ABCDEF0123456789");
        assert!(matches!(
            result,
            Err(hex::FromHexError::InvalidHexCharacter { c: 'A', index: 0 })
        ));
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(Link::from_hex("abc").is_err());
        assert!(Digest::from_hex("0000000000000000").is_err());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let link = Link::from_bytes([0xab; 8]);
        let json = serde_json::to_string(&link).unwrap();
        assert_eq!(json, "\"abababababababab\"");
        let back: Link = serde_json::from_str(&json).unwrap();
        assert_eq!(back, link);
    }

    #[test]
    fn test_debug_is_abbreviated() {
        let digest = Digest::from_bytes([0xcd; 32]);
        assert_eq!(format!("{:?}", digest), "Digest(cdcdcdcdcdcdcdcd)");
    }
}
