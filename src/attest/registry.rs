//! Attestation Registry
//!
//! Binds the tree builder and proof generator to one named snapshot of an
//! external balance table. The registry owns exactly one version-stamped
//! `(snapshot, tree)` pair at a time, published behind an `Arc` so readers
//! operate on an immutable pair without holding the lock.
//!
//! Lifecycle: created empty, then `rebuild` (immediate) or `stage` followed
//! by a lazy build on the next proof query. A replacement is all-or-nothing:
//! a failed build leaves the prior pair fully intact. The external ledger
//! decides when a snapshot is pulled and handed over - the registry never
//! fetches balances on its own.
//!
//! Proofs handed out are detached values scoped to the root they were
//! generated under; later rebuilds never invalidate them.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::attest::error::AttestError;
use crate::attest::leaf::encode_record;
use crate::attest::proof::{verify_inclusion, MerkleProof};
use crate::attest::tree::MerkleTree;
use crate::core::hash::{serde_hex, Digest};

/// One immutable (snapshot, tree) pair.
///
/// Everything needed to answer proof queries consistently: the record
/// snapshot the tree was built over, the tree itself, and a version stamp
/// that increases with every successful build.
#[derive(Clone, Debug)]
pub struct Attestation {
    snapshot: BTreeMap<String, i64>,
    tree: MerkleTree,
    version: u64,
}

impl Attestation {
    /// Encode the snapshot in ascending identifier order and build the tree.
    fn build(snapshot: &BTreeMap<String, i64>, version: u64) -> Result<Self, AttestError> {
        let mut leaves = Vec::with_capacity(snapshot.len());
        for (identifier, amount) in snapshot {
            leaves.push(encode_record(identifier, *amount)?);
        }

        let tree = MerkleTree::from_leaves(leaves)?;
        Ok(Self {
            snapshot: snapshot.clone(),
            tree,
            version,
        })
    }

    /// The root this pair commits to.
    pub fn root(&self) -> Digest {
        self.tree.root()
    }

    /// The underlying tree.
    pub fn tree(&self) -> &MerkleTree {
        &self.tree
    }

    /// The record snapshot the tree was built over.
    pub fn snapshot(&self) -> &BTreeMap<String, i64> {
        &self.snapshot
    }

    /// Version stamp of this pair (monotonic per registry).
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Prove membership of the stored record for `identifier`.
    fn prove_record(&self, identifier: &str) -> Result<BalanceProof, AttestError> {
        let amount = *self
            .snapshot
            .get(identifier)
            .ok_or_else(|| AttestError::RecordNotFound {
                identifier: identifier.to_string(),
            })?;

        let leaf = encode_record(identifier, amount)?;
        let proof = self.tree.prove(&leaf)?;

        Ok(BalanceProof {
            identifier: identifier.to_string(),
            amount,
            leaf,
            proof,
            root: self.tree.root(),
        })
    }
}

/// Everything a claim holder needs: record, leaf, path, and scoped root.
///
/// Serializes with digests as lowercase hex for the process boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceProof {
    /// The proven identifier.
    pub identifier: String,

    /// The proven amount.
    pub amount: i64,

    /// Leaf digest of the canonical record encoding.
    #[serde(with = "serde_hex")]
    pub leaf: Digest,

    /// Sibling path up to the root.
    pub proof: MerkleProof,

    /// The root this proof is scoped to.
    #[serde(with = "serde_hex")]
    pub root: Digest,
}

/// One exported claim: the per-record slice of a [`ClaimExport`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimBundle {
    /// Claimant identifier.
    pub identifier: String,

    /// Committed amount.
    pub amount: i64,

    /// Leaf digest of the record.
    #[serde(with = "serde_hex")]
    pub leaf: Digest,

    /// Sibling path up to the export's common root.
    pub proof: MerkleProof,
}

/// Full claim set for distribution to an external claim handler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimExport {
    /// The common root every bundle verifies against.
    #[serde(with = "serde_hex")]
    pub root: Digest,

    /// Number of committed records.
    pub record_count: usize,

    /// Sum of all committed amounts.
    pub total_amount: i64,

    /// One bundle per record, ascending identifier order.
    pub claims: Vec<ClaimBundle>,
}

/// Summary of the registry's current pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    /// Records in the current snapshot (0 when empty).
    pub record_count: usize,

    /// Current root as lowercase hex, `None` before the first build.
    pub root: Option<String>,

    /// Tree depth (levels above the leaves), 0 when empty.
    pub depth: usize,

    /// Sum of committed amounts (saturating).
    pub total_amount: i64,

    /// Version of the current pair, `None` before the first build.
    pub version: Option<u64>,

    /// True when a staged snapshot is awaiting its lazy build.
    pub stale: bool,
}

/// Interior state: at most one published pair plus one staged snapshot.
struct RegistryState {
    staged: Option<BTreeMap<String, i64>>,
    current: Option<Arc<Attestation>>,
    next_version: u64,
}

/// Registry binding tree construction to external ledger snapshots.
///
/// The only stateful component of the subsystem. All mutation happens
/// under a single write lock and swaps whole `Arc`-published pairs, so a
/// reader observes either the entirely-old or the entirely-new pair.
pub struct AttestationRegistry {
    state: RwLock<RegistryState>,
}

impl Default for AttestationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AttestationRegistry {
    /// Create an empty registry (no snapshot, no tree).
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState {
                staged: None,
                current: None,
                next_version: 1,
            }),
        }
    }

    /// Accept a freshly pulled ledger snapshot without building.
    ///
    /// Marks the registry stale; the next proof query performs the build.
    /// A second `stage` before that build replaces the staged snapshot.
    pub fn stage(&self, records: BTreeMap<String, i64>) {
        let mut state = self.lock_write();
        debug!(records = records.len(), "staged ledger snapshot");
        state.staged = Some(records);
    }

    /// Build a new pair from `records` and swap it in, returning the root.
    ///
    /// All-or-nothing: on [`AttestError::InvalidRecord`] or
    /// [`AttestError::EmptyInput`] the prior pair (and any staged snapshot)
    /// is left untouched. A successful rebuild supersedes staged data.
    pub fn rebuild(&self, records: BTreeMap<String, i64>) -> Result<Digest, AttestError> {
        let mut state = self.lock_write();

        let attestation = Attestation::build(&records, state.next_version)?;
        let root = attestation.root();

        debug!(
            version = attestation.version,
            leaves = attestation.tree.leaf_count(),
            root = %attestation.tree.root_hex(),
            "rebuilt attestation"
        );

        state.next_version += 1;
        state.staged = None;
        state.current = Some(Arc::new(attestation));

        Ok(root)
    }

    /// Prove the stored balance of `identifier` against the current root.
    ///
    /// Performs the deferred build first when a staged snapshot is pending,
    /// so the answer always reflects one consistent pair. Fails with
    /// [`AttestError::RecordNotFound`] when the identifier is absent -
    /// including on an empty registry. There is no proof of absence.
    pub fn prove_balance(&self, identifier: &str) -> Result<BalanceProof, AttestError> {
        let attestation = self
            .settle()?
            .ok_or_else(|| AttestError::RecordNotFound {
                identifier: identifier.to_string(),
            })?;

        attestation.prove_record(identifier)
    }

    /// Check a claimed (identifier, amount) pair against a root.
    ///
    /// Re-encodes the leaf and delegates to [`verify_inclusion`]. Total: a
    /// negative claimed amount is simply `false`. Consults no registry
    /// state, so claims verify against historical roots no longer equal to
    /// the registry's current one.
    pub fn verify_claim(
        identifier: &str,
        amount: i64,
        proof: &MerkleProof,
        root: &Digest,
    ) -> bool {
        match encode_record(identifier, amount) {
            Ok(leaf) => verify_inclusion(&leaf, proof, root),
            Err(_) => false,
        }
    }

    /// The current root, if a pair has been built.
    ///
    /// Observes the published pair only; a staged snapshot stays pending
    /// until a proof query or explicit rebuild.
    pub fn current_root(&self) -> Option<Digest> {
        self.lock_read().current.as_ref().map(|a| a.root())
    }

    /// Handle to the current consistent pair, if any.
    pub fn attestation(&self) -> Option<Arc<Attestation>> {
        self.lock_read().current.clone()
    }

    /// Export every record's claim bundle under the current root.
    ///
    /// Performs the deferred build first when one is pending. Fails with
    /// [`AttestError::EmptyInput`] on a registry that has nothing to commit.
    pub fn export_claims(&self) -> Result<ClaimExport, AttestError> {
        let attestation = self.settle()?.ok_or(AttestError::EmptyInput)?;

        let mut claims = Vec::with_capacity(attestation.snapshot.len());
        let mut total_amount: i64 = 0;
        for identifier in attestation.snapshot.keys() {
            let balance = attestation.prove_record(identifier)?;
            total_amount = total_amount.saturating_add(balance.amount);
            claims.push(ClaimBundle {
                identifier: balance.identifier,
                amount: balance.amount,
                leaf: balance.leaf,
                proof: balance.proof,
            });
        }

        Ok(ClaimExport {
            root: attestation.root(),
            record_count: claims.len(),
            total_amount,
            claims,
        })
    }

    /// Summary of the current pair without triggering a build.
    pub fn stats(&self) -> RegistryStats {
        let state = self.lock_read();
        let stale = state.staged.is_some();

        match &state.current {
            Some(attestation) => RegistryStats {
                record_count: attestation.snapshot.len(),
                root: Some(attestation.tree.root_hex()),
                depth: attestation.tree.depth(),
                total_amount: attestation
                    .snapshot
                    .values()
                    .fold(0i64, |sum, amount| sum.saturating_add(*amount)),
                version: Some(attestation.version),
                stale,
            },
            None => RegistryStats {
                record_count: 0,
                root: None,
                depth: 0,
                total_amount: 0,
                version: None,
                stale,
            },
        }
    }

    /// Build any staged snapshot, then return the current pair.
    ///
    /// On a failed build the staged snapshot stays queued and the prior
    /// pair stays published, so the error is observable and correctable.
    fn settle(&self) -> Result<Option<Arc<Attestation>>, AttestError> {
        {
            let state = self.lock_read();
            if state.staged.is_none() {
                return Ok(state.current.clone());
            }
        }

        let mut state = self.lock_write();
        let built = match &state.staged {
            Some(records) => Some(Attestation::build(records, state.next_version)?),
            None => None,
        };

        if let Some(attestation) = built {
            debug!(
                version = attestation.version,
                leaves = attestation.tree.leaf_count(),
                root = %attestation.tree.root_hex(),
                "built staged attestation"
            );
            state.next_version += 1;
            state.staged = None;
            state.current = Some(Arc::new(attestation));
        }

        Ok(state.current.clone())
    }

    fn lock_read(&self) -> std::sync::RwLockReadGuard<'_, RegistryState> {
        // A panicking writer cannot leave a torn pair (swaps are whole
        // values), so poisoning is absorbed rather than propagated.
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_write(&self) -> std::sync::RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
