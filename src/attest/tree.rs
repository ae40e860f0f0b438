//! Merkle Tree Commitments
//!
//! Binary Merkle tree over an ordered leaf sequence, built level by level
//! up to a single root digest.
//!
//! Two protocol parameters are fixed here and must match on any system
//! that verifies these roots:
//! - **Duplicate-pairing**: a lone final node at an odd-length level is
//!   hashed with itself, not promoted unchanged.
//! - **Unsorted concatenation**: pairs combine as (lower index, higher
//!   index); sorted-pair trees produce incompatible roots.
//!
//! Trees are immutable snapshots. Any change to the record sequence means
//! building a new tree; proofs already generated keep verifying against
//! the root they were generated for.

use crate::attest::error::AttestError;
use crate::attest::proof::{MerkleProof, ProofStep, Side};
use crate::core::hash::{hash_pair, to_hex, Digest};

/// Binary Merkle tree for commitment generation.
///
/// Holds every level, leaves at index 0 and the root level last. Built
/// once from an ordered leaf sequence; `levels[k + 1].len()` is always
/// `ceil(levels[k].len() / 2)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree {
    /// All tree levels (leaves at index 0, root level at the last index).
    levels: Vec<Vec<Digest>>,
}

impl MerkleTree {
    /// Build a tree from an ordered sequence of leaf digests.
    ///
    /// Leaves are committed in the order given; duplicates are distinct
    /// positions. A single leaf is its own root with no self-hash applied.
    /// Fails with [`AttestError::EmptyInput`] on zero leaves - the root of
    /// an empty tree is undefined.
    pub fn from_leaves(leaves: Vec<Digest>) -> Result<Self, AttestError> {
        if leaves.is_empty() {
            return Err(AttestError::EmptyInput);
        }

        let mut levels = Vec::new();
        let mut current = leaves;

        while current.len() > 1 {
            let mut next = Vec::with_capacity(current.len().div_ceil(2));

            for chunk in current.chunks(2) {
                let left = &chunk[0];
                // Lone odd node pairs with itself.
                let right = if chunk.len() > 1 { &chunk[1] } else { left };
                next.push(hash_pair(left, right));
            }

            levels.push(current);
            current = next;
        }

        levels.push(current);
        Ok(Self { levels })
    }

    /// The root commitment.
    pub fn root(&self) -> Digest {
        // The constructor guarantees a final level holding exactly one digest.
        self.levels[self.levels.len() - 1][0]
    }

    /// The root as a lowercase hex string, the published form.
    pub fn root_hex(&self) -> String {
        to_hex(&self.root())
    }

    /// Number of leaves committed.
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of levels above the leaf level.
    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    /// The committed leaf sequence.
    pub fn leaves(&self) -> &[Digest] {
        &self.levels[0]
    }

    /// Generate an inclusion proof for a leaf digest.
    ///
    /// The first matching position is proven when the digest appears more
    /// than once. Fails with [`AttestError::LeafNotFound`] if no leaf-level
    /// entry equals `leaf`.
    pub fn prove(&self, leaf: &Digest) -> Result<MerkleProof, AttestError> {
        let index = self.levels[0]
            .iter()
            .position(|candidate| candidate == leaf)
            .ok_or(AttestError::LeafNotFound)?;

        // Index came from the leaf level, so this cannot be out of bounds.
        self.prove_index(index).ok_or(AttestError::LeafNotFound)
    }

    /// Generate an inclusion proof for the leaf at `index`.
    ///
    /// Returns `None` if the index is out of bounds. The proof has exactly
    /// one step per level below the root: where the walk passes a lone odd
    /// node, the step carries that node's own digest as the sibling, which
    /// is exactly what the builder hashed there.
    pub fn prove_index(&self, index: usize) -> Option<MerkleProof> {
        if index >= self.levels[0].len() {
            return None;
        }

        let mut steps = Vec::with_capacity(self.depth());
        let mut current_index = index;

        for level in &self.levels[..self.levels.len() - 1] {
            let (sibling_index, side) = if current_index % 2 == 0 {
                (current_index + 1, Side::Right)
            } else {
                (current_index - 1, Side::Left)
            };

            let sibling = if sibling_index < level.len() {
                level[sibling_index]
            } else {
                // Self-paired lone node: its sibling is itself.
                level[current_index]
            };

            steps.push(ProofStep { side, sibling });
            current_index /= 2;
        }

        Some(MerkleProof { steps })
    }
}
