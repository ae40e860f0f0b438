//! Inclusion Proofs
//!
//! Detached sibling-digest paths from a leaf up to a root, plus the total
//! verifier that recomputes the root independently of any tree.
//!
//! A proof is an independently owned value: it holds no reference to the
//! tree it came from and stays valid for verification against its root
//! after the tree is dropped or the registry rebuilds. The wire shape is
//! an ordered array of `{"position": "left"|"right", "data": "<hex>"}`
//! objects, the exact form external claim handlers exchange.

use serde::{Deserialize, Serialize};

use crate::core::hash::{hash_pair, serde_hex, Digest};

/// Which side of the concatenation the sibling digest sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Sibling is the left input: parent = hash(sibling || current).
    Left,
    /// Sibling is the right input: parent = hash(current || sibling).
    Right,
}

/// One step of an inclusion proof: a sibling digest and its side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    /// Side the sibling occupies in the parent hash.
    #[serde(rename = "position")]
    pub side: Side,

    /// The sibling digest, hex on the wire.
    #[serde(rename = "data", with = "serde_hex")]
    pub sibling: Digest,
}

/// Merkle inclusion proof.
///
/// Contains one step per tree level below the root, leaf level first.
/// A single-leaf tree has an empty proof.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerkleProof {
    /// Sibling steps from the leaf level upward.
    pub steps: Vec<ProofStep>,
}

impl MerkleProof {
    /// Number of steps (tree levels below the root).
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True for the single-leaf tree's proof.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Verify this proof against a leaf digest and a claimed root.
    ///
    /// Delegates to [`verify_inclusion`].
    pub fn verify(&self, leaf: &Digest, root: &Digest) -> bool {
        verify_inclusion(leaf, self, root)
    }
}

/// Verify that `leaf` is committed under `root` by the given proof.
///
/// Total: never panics and never errors. A wrong sibling, wrong side,
/// truncated path, or tampered leaf all surface as `false`, so the result
/// can gate claim processing directly.
///
/// Only (leaf, proof, root) are consulted - never a tree - which is what
/// makes proofs transferable and independently auditable, including
/// against historical roots a registry has since replaced.
pub fn verify_inclusion(leaf: &Digest, proof: &MerkleProof, root: &Digest) -> bool {
    let mut current = *leaf;

    for step in &proof.steps {
        current = match step.side {
            Side::Left => hash_pair(&step.sibling, &current),
            Side::Right => hash_pair(&current, &step.sibling),
        };
    }

    current == *root
}
