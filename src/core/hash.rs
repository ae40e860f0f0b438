//! Digest Primitives
//!
//! SHA-256 hashing used for leaf digests and internal tree nodes, plus
//! lowercase-hex rendering for the published surfaces (roots, proofs).
//!
//! The wire contract is a single bare SHA-256 over the canonical bytes:
//! no salt and no domain separation tag. That is a known weakness of the
//! format this crate commits to, kept for compatibility with existing
//! roots; second-preimage hardening would be a protocol version bump.

use sha2::{Digest as Sha2Digest, Sha256};

/// Hash output type (256 bits / 32 bytes)
pub type Digest = [u8; 32];

/// Compute the SHA-256 digest of arbitrary bytes.
pub fn hash_bytes(data: &[u8]) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Combine two child digests into their parent node digest.
///
/// Concatenation order is strictly (left, right); callers are responsible
/// for passing children in (lower index, higher index) order. Pairs are
/// never sorted - sorted-pair trees produce incompatible roots.
pub fn hash_pair(left: &Digest, right: &Digest) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// Render a digest as a lowercase hex string.
pub fn to_hex(digest: &Digest) -> String {
    hex::encode(digest)
}

/// Parse a digest from a hex string (either case).
///
/// Returns `None` unless the input decodes to exactly 32 bytes.
pub fn from_hex(s: &str) -> Option<Digest> {
    let bytes = hex::decode(s).ok()?;
    bytes.try_into().ok()
}

/// Serde adapter serializing a [`Digest`] as a lowercase hex string.
///
/// Used on every digest that crosses a process boundary (proof steps,
/// balance proofs, claim exports).
pub mod serde_hex {
    use super::Digest;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize a digest as lowercase hex.
    pub fn serialize<S: Serializer>(digest: &Digest, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(digest))
    }

    /// Deserialize a digest from a hex string, rejecting wrong lengths.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Digest, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::from_hex(&s).ok_or_else(|| serde::de::Error::custom("expected 64 hex characters"))
    }
}
