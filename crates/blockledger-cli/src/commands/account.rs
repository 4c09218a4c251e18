//! Adventurer commands
//!
//! The credential slot only remembers a name. Login is a name check, not
//! authentication.

use anyhow::{Context, Result};
use blockledger_core::{LedgerGateway, SlotStore};

pub fn cmd_signup<S: SlotStore>(gateway: &LedgerGateway<S>, username: &str) -> Result<()> {
    let record = gateway
        .signup(username)
        .context("Failed to register adventurer")?;

    println!("🧭 Welcome, {}! Your adventure begins.", record.username);
    Ok(())
}

pub fn cmd_login<S: SlotStore>(gateway: &LedgerGateway<S>, username: &str) -> Result<()> {
    let record = gateway.login(username)?;
    println!("🔑 Welcome back, {}.", record.username);
    Ok(())
}

pub fn cmd_logout<S: SlotStore>(gateway: &LedgerGateway<S>) -> Result<()> {
    gateway.logout().context("Failed to log out")?;
    println!("👋 Logged out. Your ledger is kept.");
    Ok(())
}

pub fn cmd_whoami<S: SlotStore>(gateway: &LedgerGateway<S>) -> Result<()> {
    match gateway.current_user()? {
        Some(record) => println!("🧍 {}", record.username),
        None => {
            println!("No adventurer registered. Sign up with:");
            println!("  blockledger signup <name>");
        }
    }
    Ok(())
}
