//! Error Kinds
//!
//! The four recoverable conditions of the attestation subsystem. All are
//! reported to the immediate caller; none are fatal to the process, and
//! none carry a retry policy - every operation here is deterministic, so
//! retrying with the same input cannot change the outcome.
//!
//! Verification deliberately has no error kind: [`verify_inclusion`] and
//! [`AttestationRegistry::verify_claim`] are total and report any
//! inconsistency as `false` so they can gate claim processing directly.
//!
//! [`verify_inclusion`]: crate::attest::proof::verify_inclusion
//! [`AttestationRegistry::verify_claim`]: crate::attest::registry::AttestationRegistry::verify_claim

use thiserror::Error;

/// Errors reported by the attestation subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttestError {
    /// A record failed validation at the encoding boundary.
    #[error("invalid record for {identifier:?}: amount {amount} is negative")]
    InvalidRecord {
        /// Identifier of the offending record.
        identifier: String,
        /// The rejected amount.
        amount: i64,
    },

    /// A tree was requested over zero leaves; the root is undefined.
    #[error("cannot build a tree over zero leaves")]
    EmptyInput,

    /// The digest a proof was requested for is not present at the leaf level.
    #[error("leaf digest not found in the tree")]
    LeafNotFound,

    /// The identifier is absent from the registry's current snapshot.
    #[error("no record for identifier {identifier:?} in the current snapshot")]
    RecordNotFound {
        /// The identifier that was queried.
        identifier: String,
    },
}
