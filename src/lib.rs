//! # Ledger Attest
//!
//! Merkle-tree balance attestation for token ledgers.
//!
//! Builds a binary SHA-256 commitment tree over a snapshot of an external
//! balance table, publishes a single root digest, and produces transferable
//! inclusion proofs that any holder can check against that root alone.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       LEDGER ATTEST                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Deterministic primitives                 │
//! │  └── hash.rs      - SHA-256 digests and hex rendering        │
//! │                                                              │
//! │  attest/          - Attestation subsystem                    │
//! │  ├── leaf.rs      - Canonical record encoding                │
//! │  ├── tree.rs      - Binary Merkle tree and proof generation  │
//! │  ├── proof.rs     - Detached proofs and total verification   │
//! │  ├── registry.rs  - Snapshot + tree pair, atomic rebuild     │
//! │  └── error.rs     - Recoverable error kinds                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! Tree construction is **100% deterministic**:
//! - Records are ordered canonically (ascending identifier) before encoding
//! - No randomness, no system time, no platform-dependent arithmetic
//! - Identical snapshots produce **byte-identical roots** on any platform
//!
//! Proofs are root-relative: verification needs only the leaf digest, the
//! sibling path, and the claimed root. A proof generated from one snapshot
//! stays valid against that snapshot's root after any number of rebuilds.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod attest;
pub mod core;

// Re-export commonly used types
pub use crate::attest::error::AttestError;
pub use crate::attest::leaf::encode_record;
pub use crate::attest::proof::{verify_inclusion, MerkleProof, ProofStep, Side};
pub use crate::attest::registry::{AttestationRegistry, BalanceProof, ClaimExport, RegistryStats};
pub use crate::attest::tree::MerkleTree;
pub use crate::core::hash::{hash_bytes, hash_pair, Digest};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
