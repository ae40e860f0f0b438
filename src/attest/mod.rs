//! Balance Attestation Subsystem
//!
//! Commits to a ledger snapshot and proves individual balances against the
//! published root:
//! - Canonical record encoding into leaf digests
//! - Binary Merkle tree construction over the ordered leaves
//! - Detached inclusion proofs and total verification
//! - Registry binding one snapshot + tree pair at a time
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ATTESTATION SUBSYSTEM                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  leaf.rs      - identifier:amount -> SHA-256 leaf digest    │
//! │  tree.rs      - level structure up to the root commitment   │
//! │  proof.rs     - sibling paths, wire shape, verification     │
//! │  registry.rs  - (snapshot, tree) pair with atomic rebuild   │
//! │  error.rs     - recoverable error kinds                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod leaf;
pub mod proof;
pub mod registry;
pub mod tree;

// Re-export key types
pub use error::AttestError;
pub use leaf::encode_record;
pub use proof::{verify_inclusion, MerkleProof, ProofStep, Side};
pub use registry::{
    Attestation, AttestationRegistry, BalanceProof, ClaimBundle, ClaimExport, RegistryStats,
};
pub use tree::MerkleTree;
