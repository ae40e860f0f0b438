//! Ledger Attest Demo
//!
//! Drives the attestation registry over a simulated external balance
//! ledger: commit a snapshot, prove and verify individual balances, show
//! that proofs stay scoped to their root across rebuilds, and export the
//! full claim set as JSON.
//!
//! The in-memory ledger here stands in for the external collaborator that
//! owns mint/transfer bookkeeping; the library itself never mutates
//! balances.

use std::collections::BTreeMap;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ledger_attest::{AttestationRegistry, VERSION};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Ledger Attest v{}", VERSION);

    // Simulated external ledger: the balance table this subsystem is
    // built over but never owns.
    let mut ledger: BTreeMap<String, i64> = BTreeMap::new();
    ledger.insert("0x123...user1".to_string(), 1000);
    ledger.insert("0x456...user2".to_string(), 500);
    ledger.insert("0x789...user3".to_string(), 250);
    ledger.insert("0xabc...user4".to_string(), 750);
    ledger.insert("0xdef...user5".to_string(), 300);

    let registry = AttestationRegistry::new();

    info!("=== Committing Snapshot ===");
    let root = registry.rebuild(ledger.clone())?;
    info!("Root: {}", hex::encode(root));

    let stats = registry.stats();
    info!(
        "Committed {} records, total {} tokens, tree depth {}",
        stats.record_count, stats.total_amount, stats.depth
    );

    info!("=== Proving a Balance ===");
    let balance = registry.prove_balance("0x123...user1")?;
    info!("Identifier: {}", balance.identifier);
    info!("Amount: {}", balance.amount);
    info!("Leaf: {}", hex::encode(balance.leaf));
    info!("Proof steps: {}", balance.proof.len());
    info!(
        "Claim bundle (wire form): {}",
        serde_json::to_string_pretty(&balance)?
    );

    let valid = AttestationRegistry::verify_claim(
        &balance.identifier,
        balance.amount,
        &balance.proof,
        &balance.root,
    );
    info!("Verification against current root: {}", valid);

    let forged = AttestationRegistry::verify_claim(
        &balance.identifier,
        9999,
        &balance.proof,
        &balance.root,
    );
    info!("Verification with forged amount 9999: {}", forged);

    info!("=== Rebuilding After a Transfer ===");
    // The external ledger moves 300 tokens from user1 to user2, then
    // hands the registry a fresh snapshot. Staging defers the build to
    // the next query.
    transfer(&mut ledger, "0x123...user1", "0x456...user2", 300)?;
    registry.stage(ledger.clone());

    let fresh = registry.prove_balance("0x123...user1")?;
    info!("New amount for user1: {}", fresh.amount);
    info!("New root: {}", hex::encode(fresh.root));
    info!("Root changed: {}", fresh.root != root);

    // The pre-transfer proof stays valid against the root it was scoped
    // to and is meaningless against the new one.
    let old_still_valid = AttestationRegistry::verify_claim(
        &balance.identifier,
        balance.amount,
        &balance.proof,
        &balance.root,
    );
    let old_against_new = AttestationRegistry::verify_claim(
        &balance.identifier,
        balance.amount,
        &balance.proof,
        &fresh.root,
    );
    info!("Old proof against old root: {}", old_still_valid);
    info!("Old proof against new root: {}", old_against_new);

    info!("=== Exporting the Claim Set ===");
    let export = registry.export_claims()?;
    info!(
        "Exported {} claims, total {} tokens, root {}",
        export.record_count,
        export.total_amount,
        hex::encode(export.root)
    );
    for claim in &export.claims {
        info!(
            "  {} -> {} ({} proof steps)",
            claim.identifier,
            claim.amount,
            claim.proof.len()
        );
    }

    Ok(())
}

/// Minimal stand-in for the external ledger's transfer operation.
fn transfer(
    ledger: &mut BTreeMap<String, i64>,
    from: &str,
    to: &str,
    amount: i64,
) -> anyhow::Result<()> {
    let from_balance = ledger.get(from).copied().unwrap_or(0);
    anyhow::ensure!(from_balance >= amount, "insufficient balance for {from}");

    ledger.insert(from.to_string(), from_balance - amount);
    let to_balance = ledger.get(to).copied().unwrap_or(0);
    ledger.insert(to.to_string(), to_balance + amount);
    Ok(())
}
