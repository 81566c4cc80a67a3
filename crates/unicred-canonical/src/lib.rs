//! Canonical data primitives shared across the unicred registry.
//!
//! Everything that participates in hashing or in the registration identity
//! rules lives in this crate:
//! - deterministic canonical JSON ([`Canonicalizer`])
//! - SHA-256 content hashes rendered as lowercase hex ([`ContentHash`])
//! - validated, normalized identifiers (wallet addresses, domains, emails,
//!   AISHE codes)
//!
#![deny(missing_docs)]

/// Canonicalization helpers for deterministic hashing.
pub mod canonicalizer;
/// Content hashing over canonical bytes.
pub mod content_hash;
/// Digest primitives.
pub mod digest;
/// Validated identifier newtypes.
pub mod identifiers;
/// Validation errors for canonical primitives.
pub mod validation;

pub use canonicalizer::{canonicalize, CanonicalizationError, Canonicalizer};
pub use content_hash::{compute_content_hash, verify_raw, HashError, HashVerdict, HashedPayload};
pub use digest::ContentHash;
pub use identifiers::{AisheCode, EmailAddress, HostName, WalletAddress, WebsiteDomain};
pub use validation::ValidationError;
