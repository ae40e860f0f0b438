//! Canonical Record Encoding
//!
//! Serializes one ledger record into the fixed wire form
//! `identifier || ":" || decimal(amount)` and hashes it into a leaf digest.
//!
//! The identifier is used verbatim: no case folding, no address-format
//! validation. Normalization is the upstream identity system's job, so
//! differently-cased identifiers commit to different leaves. Amounts are
//! rendered base-10 with no sign and no leading zeros, which `i64`'s
//! `Display` already guarantees for non-negative values.

use crate::attest::error::AttestError;
use crate::core::hash::{hash_bytes, Digest};

/// Encode one (identifier, amount) record into its leaf digest.
///
/// Fails only when `amount` is negative. Pure: no side effects, identical
/// inputs always produce the identical digest.
///
/// # Examples
///
/// ```
/// use ledger_attest::encode_record;
///
/// let leaf = encode_record("0x123...user1", 1000).unwrap();
/// let same = encode_record("0x123...user1", 1000).unwrap();
/// assert_eq!(leaf, same);
///
/// assert!(encode_record("0x123...user1", -1).is_err());
/// ```
pub fn encode_record(identifier: &str, amount: i64) -> Result<Digest, AttestError> {
    if amount < 0 {
        return Err(AttestError::InvalidRecord {
            identifier: identifier.to_string(),
            amount,
        });
    }

    Ok(hash_bytes(canonical_bytes(identifier, amount).as_bytes()))
}

/// The canonical pre-hash form of a record.
///
/// Callers must have validated `amount >= 0`.
fn canonical_bytes(identifier: &str, amount: i64) -> String {
    format!("{}:{}", identifier, amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hash::hash_bytes;

    #[test]
    fn test_encoding_matches_wire_form() {
        let leaf = encode_record("alice", 100).unwrap();
        assert_eq!(leaf, hash_bytes(b"alice:100"));
    }

    #[test]
    fn test_encoding_determinism() {
        let a = encode_record("0xabc", 750).unwrap();
        let b = encode_record("0xabc", 750).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_amount() {
        let leaf = encode_record("alice", 0).unwrap();
        assert_eq!(leaf, hash_bytes(b"alice:0"));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = encode_record("alice", -5).unwrap_err();
        assert_eq!(
            err,
            AttestError::InvalidRecord {
                identifier: "alice".to_string(),
                amount: -5,
            }
        );
    }

    #[test]
    fn test_identifier_used_verbatim() {
        // No normalization at this boundary: case changes the leaf.
        assert_ne!(
            encode_record("Alice", 100).unwrap(),
            encode_record("alice", 100).unwrap()
        );
    }

    #[test]
    fn test_amount_is_part_of_the_leaf() {
        assert_ne!(
            encode_record("alice", 100).unwrap(),
            encode_record("alice", 101).unwrap()
        );
    }

    #[test]
    fn test_separator_is_unambiguous_for_plain_identifiers() {
        // "a" with amount 11 vs "a:1" with amount 1 collide textually
        // ("a:11" vs "a:1:1" do not) - the colon keeps plain identifiers
        // and amounts from bleeding into each other.
        assert_ne!(
            encode_record("a", 11).unwrap(),
            encode_record("a:1", 1).unwrap()
        );
    }
}
