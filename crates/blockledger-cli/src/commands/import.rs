//! Import and export command implementations

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use blockledger_core::{
    export::{read_snapshot, write_snapshot},
    import::{apply, parse_csv},
    LedgerGateway, SlotStore,
};
use chrono::Utc;
use tracing::warn;

use super::core::confirm;

pub fn cmd_import<S: SlotStore>(gateway: &LedgerGateway<S>, file: &Path) -> Result<()> {
    println!("📥 Importing adventure log from {}...", file.display());

    let csv_file =
        File::open(file).with_context(|| format!("Failed to open file: {}", file.display()))?;
    let rows = parse_csv(csv_file, Utc::now())?;
    println!("   Found {} entries", rows.len());

    let mut store = gateway.load_store()?;
    let stats = apply(&mut store, &rows)?;
    gateway.save(&store).context("Failed to save ledger")?;

    println!();
    println!("✅ Import complete!");
    println!("   Imported: {}", stats.imported);
    if stats.skipped > 0 {
        println!("   Skipped (duplicates): {}", stats.skipped);
    }

    Ok(())
}

pub fn cmd_export<S: SlotStore>(gateway: &LedgerGateway<S>, output: &Path) -> Result<()> {
    // Check output doesn't already exist
    if output.exists() {
        anyhow::bail!(
            "Output file already exists: {}\nUse a different filename or remove the existing file.",
            output.display()
        );
    }

    let snapshot = gateway.load()?;
    write_snapshot(&snapshot, output)
        .with_context(|| format!("Failed to write snapshot: {}", output.display()))?;

    println!("📦 Exported ledger to {}", output.display());
    println!(
        "   {} chests, {} quests, {} investments, {} log entries",
        snapshot.chests.len(),
        snapshot.goals.len(),
        snapshot.investments.len(),
        snapshot.transactions.len()
    );

    Ok(())
}

pub fn cmd_restore<S: SlotStore>(gateway: &LedgerGateway<S>, file: &Path, yes: bool) -> Result<()> {
    let snapshot = read_snapshot(file)
        .with_context(|| format!("Failed to read snapshot: {}", file.display()))?;

    let current = gateway.load()?;
    if !current.is_empty() && !yes {
        warn!(
            transactions = current.transactions.len(),
            "Restore will overwrite a non-empty ledger"
        );
        println!("⚠️  This will replace the current ledger with {}", file.display());
        if !confirm("Continue?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    gateway
        .save_snapshot(&snapshot)
        .context("Failed to save restored ledger")?;

    println!("✅ Ledger restored from {}", file.display());
    println!(
        "   {} chests, {} quests, {} investments, {} log entries",
        snapshot.chests.len(),
        snapshot.goals.len(),
        snapshot.investments.len(),
        snapshot.transactions.len()
    );

    Ok(())
}
