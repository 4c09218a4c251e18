//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_gateway` - Shared utility to open the slot database
//! - `load_config` - Shared utility to resolve the ledger config
//! - `cmd_init` - Initialize the database
//! - `cmd_status` - Database status
//! - `cmd_reset` - Empty the ledger

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use blockledger_core::{
    net_worth, LedgerConfig, LedgerGateway, SlotStore, SqliteSlots, StorageConfig,
};
use tracing::debug;

/// Open the slot database with encryption by default, or unencrypted if --no-encrypt
pub fn open_gateway(
    db_path: &Path,
    no_encrypt: bool,
    storage: &StorageConfig,
) -> Result<LedgerGateway<SqliteSlots>> {
    let path_str = db_path
        .to_str()
        .with_context(|| format!("Database path is not valid UTF-8: {}", db_path.display()))?;

    debug!(path = path_str, encrypted = !no_encrypt, "Opening ledger database");
    let slots = if no_encrypt {
        SqliteSlots::new_unencrypted(path_str).context("Failed to open database (unencrypted)")?
    } else {
        SqliteSlots::new(path_str).context("Failed to open database")?
    };

    Ok(LedgerGateway::new(slots, storage))
}

/// Resolve config from --config, the user override, or built-in defaults
pub fn load_config(path: Option<&Path>) -> Result<LedgerConfig> {
    LedgerConfig::load(path).context("Failed to load config")
}

/// Ask a y/N question on stdin
pub(crate) fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

pub fn cmd_init<S: SlotStore>(gateway: &LedgerGateway<S>) -> Result<()> {
    println!("🔧 Initializing ledger ({})...", gateway.slots().name());

    let store = gateway.load_store().context("Failed to read existing ledger")?;
    if store.is_empty() {
        gateway.save(&store).context("Failed to write empty ledger")?;
        println!("   Created an empty ledger");
    } else {
        println!(
            "   Existing ledger kept ({} chests, {} log entries)",
            store.chests().len(),
            store.transactions().len()
        );
    }

    println!("✅ Ledger initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Add a chest: blockledger chest add \"Main Chest\" 1500");
    println!("  2. Set a quest: blockledger goal add \"Netherite Armor\" 5000");
    println!("  3. Ask the oracle: blockledger oracle");

    Ok(())
}

pub fn cmd_status(gateway: &LedgerGateway<SqliteSlots>) -> Result<()> {
    let slots = gateway.slots();
    let size = std::fs::metadata(slots.path()).map(|m| m.len()).unwrap_or(0);

    println!();
    println!("📊 BlockLedger Status");
    println!("   ─────────────────────────────");
    println!("   Database:    {}", slots.path());
    println!("   Size:        {:.1} KB", size as f64 / 1024.0);
    if slots.is_encrypted() {
        println!("   🔒 Encryption: ENABLED");
    } else {
        println!("   ⚠️  Encryption: DISABLED");
    }

    match slots.updated_at(gateway.data_key())? {
        Some(at) => println!("   Last saved:  {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("   Last saved:  never"),
    }

    let store = gateway.load_store()?;
    println!();
    println!("   Chests:        {}", store.chests().len());
    println!("   Quests:        {}", store.goals().len());
    println!("   Investments:   {}", store.investments().len());
    println!("   Log entries:   {}", store.transactions().len());
    println!("   Net worth:     {}", super::format_diamonds(net_worth(&store)));

    Ok(())
}

pub fn cmd_reset<S: SlotStore>(gateway: &LedgerGateway<S>, yes: bool) -> Result<()> {
    if !yes {
        println!("⚠️  This will delete every chest, quest, investment and log entry.");
        println!("   Your adventurer name is kept.");
        println!();
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let mut store = gateway.load_store()?;
    store.reset_all();
    gateway.save(&store).context("Failed to save reset ledger")?;

    println!("✅ Ledger reset complete.");
    Ok(())
}
