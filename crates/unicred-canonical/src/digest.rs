use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use std::fmt;

use crate::validation::ValidationError;

static HEX_SHA256: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9a-f]{64}$").expect("invalid regex"));

/// SHA-256 digest rendered as 64 lowercase hex characters.
///
/// Serialized as a bare string so it can be stored in a text column and
/// compared byte-for-byte by third parties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentHash(String);

impl ContentHash {
    /// Hashes raw bytes.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self(hex::encode(Sha256::digest(bytes)))
    }

    /// Parses a claimed hash. Uppercase hex is accepted and lowercased.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let hex = value.into().to_ascii_lowercase();
        if !HEX_SHA256.is_match(&hex) {
            return Err(ValidationError::PatternMismatch {
                field: "content_hash",
                value: hex,
            });
        }
        Ok(Self(hex))
    }

    /// Returns the hex text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ContentHash {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ContentHash> for String {
    fn from(value: ContentHash) -> Self {
        value.0
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_known_vector() {
        let hash = ContentHash::of_bytes(b"abc");
        assert_eq!(
            hash.as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn parse_lowercases_and_rejects_bad_length() {
        let upper = "BA7816BF8F01CFEA414140DE5DAE2223B00361A396177A9CB410FF61F20015AD";
        assert_eq!(ContentHash::parse(upper).unwrap(), ContentHash::of_bytes(b"abc"));
        assert!(ContentHash::parse("abcd").is_err());
        assert!(ContentHash::parse("zz".repeat(32)).is_err());
    }

    #[test]
    fn serializes_as_bare_string() {
        let hash = ContentHash::of_bytes(b"abc");
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", hash));
        let back: ContentHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
        assert!(serde_json::from_str::<ContentHash>("\"nope\"").is_err());
    }
}
