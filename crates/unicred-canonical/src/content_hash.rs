//! Content hashing over canonical bytes.
//!
//! A content hash is `sha256(canonical_json(value))` rendered as lowercase hex.
//! No domain separator is mixed in: anyone holding the stored `raw_json` can
//! recompute the hash with a stock SHA-256 tool and compare.

use crate::{CanonicalizationError, Canonicalizer, ContentHash};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical text together with the hash derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedPayload {
    /// Canonical JSON text that was hashed.
    pub raw_json: String,
    /// SHA-256 of `raw_json`'s UTF-8 bytes.
    pub hash: ContentHash,
}

/// Outcome of checking a stored canonical payload against a claimed hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashVerdict {
    /// The payload is canonical and hashes to the claimed value.
    Authentic,
    /// The payload does not hash to the claimed value.
    HashMismatch,
    /// The payload hashes correctly but is not in canonical form, so it was
    /// not produced by this canonicalizer.
    NonCanonical,
}

/// Error during hash computation or verification.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The stored payload is not JSON.
    #[error("payload is not valid JSON: {0}")]
    InvalidJson(String),
    /// Canonicalization failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}

/// Canonicalizes `value` and hashes the canonical bytes.
///
/// # Example
///
/// ```rust
/// use unicred_canonical::{compute_content_hash, Canonicalizer};
/// use serde_json::json;
///
/// let a = compute_content_hash(&json!({"b": 1, "a": 2}), &Canonicalizer::new())?;
/// let b = compute_content_hash(&json!({"a": 2, "b": 1}), &Canonicalizer::new())?;
/// assert_eq!(a.raw_json, r#"{"a":2,"b":1}"#);
/// assert_eq!(a.hash, b.hash);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn compute_content_hash<T: Serialize>(
    value: &T,
    canonicalizer: &Canonicalizer,
) -> Result<HashedPayload, HashError> {
    let raw_json = canonicalizer.canonicalize_serialize(value)?;
    let hash = ContentHash::of_bytes(raw_json.as_bytes());
    Ok(HashedPayload { raw_json, hash })
}

/// Checks a stored `raw_json` against a claimed hash.
///
/// The hash comparison runs over the stored bytes exactly as given; the
/// canonical-form check runs second so a tampered payload always reports
/// [`HashVerdict::HashMismatch`].
pub fn verify_raw(
    raw_json: &str,
    claimed: &ContentHash,
    canonicalizer: &Canonicalizer,
) -> Result<HashVerdict, HashError> {
    let value: Value =
        serde_json::from_str(raw_json).map_err(|e| HashError::InvalidJson(e.to_string()))?;

    if ContentHash::of_bytes(raw_json.as_bytes()) != *claimed {
        return Ok(HashVerdict::HashMismatch);
    }

    let recanonicalized = canonicalizer.canonicalize(&value)?;
    if recanonicalized != raw_json {
        return Ok(HashVerdict::NonCanonical);
    }

    Ok(HashVerdict::Authentic)
}
