//! Chest, quest, investment and adventure log commands

use anyhow::{Context, Result};
use blockledger_core::{
    goal_progress, story, ChronicleConfig, LedgerGateway, SlotStore, TransactionType,
};
use chrono::{DateTime, Utc};

use super::{format_diamonds, progress_bar, truncate};

// ========== Chests ==========

pub fn cmd_chest_add<S: SlotStore>(
    gateway: &LedgerGateway<S>,
    name: &str,
    amount: f64,
) -> Result<()> {
    let mut store = gateway.load_store()?;
    let chest = store.add_chest(name, amount)?;
    gateway.save(&store).context("Failed to save ledger")?;

    println!(
        "🧰 Added chest '{}' holding {}",
        chest.name,
        format_diamonds(chest.amount)
    );
    Ok(())
}

pub fn cmd_chest_list<S: SlotStore>(gateway: &LedgerGateway<S>) -> Result<()> {
    let store = gateway.load_store()?;

    if store.chests().is_empty() {
        println!("No chests yet. Add one with:");
        println!("  blockledger chest add \"Main Chest\" 1500");
        return Ok(());
    }

    println!();
    println!("🧰 Chests");
    println!("   ─────────────────────────────");
    for chest in store.chests() {
        println!(
            "   {:<30} {:>16}",
            truncate(&chest.name, 30),
            format_diamonds(chest.amount)
        );
    }

    Ok(())
}

// ========== Quests ==========

pub fn cmd_goal_add<S: SlotStore>(
    gateway: &LedgerGateway<S>,
    name: &str,
    target: f64,
    current: Option<f64>,
) -> Result<()> {
    let mut store = gateway.load_store()?;
    let goal = store.add_goal(name, target, current)?;
    gateway.save(&store).context("Failed to save ledger")?;

    println!(
        "🎯 New quest '{}': {} of {} ({:.0}%)",
        goal.name,
        format_diamonds(goal.current),
        format_diamonds(goal.target),
        goal_progress(&goal)
    );
    Ok(())
}

pub fn cmd_goal_list<S: SlotStore>(gateway: &LedgerGateway<S>) -> Result<()> {
    let store = gateway.load_store()?;

    if store.goals().is_empty() {
        println!("No quests yet. Set one with:");
        println!("  blockledger goal add \"Netherite Armor\" 5000");
        return Ok(());
    }

    println!();
    println!("🎯 Quests");
    println!("   ─────────────────────────────");
    for goal in store.goals() {
        let progress = goal_progress(goal);
        let marker = if goal.is_complete() { "✅" } else { "  " };
        println!(
            "   {} {:<24} {} {:>5.1}%  ({} / {})",
            marker,
            truncate(&goal.name, 24),
            progress_bar(progress),
            progress,
            format_diamonds(goal.current),
            format_diamonds(goal.target)
        );
    }

    Ok(())
}

// ========== Investments ==========

pub fn cmd_invest_add<S: SlotStore>(
    gateway: &LedgerGateway<S>,
    name: &str,
    amount: f64,
    link: Option<String>,
) -> Result<()> {
    let mut store = gateway.load_store()?;
    let investment = store.add_investment(name, amount, link)?;
    gateway.save(&store).context("Failed to save ledger")?;

    println!(
        "📈 Added investment '{}' worth {}",
        investment.name,
        format_diamonds(investment.amount)
    );
    Ok(())
}

pub fn cmd_invest_list<S: SlotStore>(gateway: &LedgerGateway<S>) -> Result<()> {
    let store = gateway.load_store()?;

    if store.investments().is_empty() {
        println!("No investments yet. Add one with:");
        println!("  blockledger invest add \"Index Fund\" 1000");
        return Ok(());
    }

    println!();
    println!("📈 Investments");
    println!("   ─────────────────────────────");
    for investment in store.investments() {
        println!(
            "   {:<30} {:>16}",
            truncate(&investment.name, 30),
            format_diamonds(investment.amount)
        );
        if let Some(link) = &investment.link {
            println!("      🔗 {}", link);
        }
    }

    Ok(())
}

// ========== Adventure Log ==========

pub fn cmd_log_add<S: SlotStore>(
    gateway: &LedgerGateway<S>,
    title: &str,
    amount: f64,
    kind: &str,
    source: &str,
    at: Option<&str>,
    chronicle: &ChronicleConfig,
) -> Result<()> {
    let kind: TransactionType = kind.parse().map_err(anyhow::Error::msg)?;
    let timestamp = at
        .map(|s| DateTime::parse_from_rfc3339(s).map(|ts| ts.with_timezone(&Utc)))
        .transpose()
        .context("Invalid --at timestamp (use RFC 3339, e.g. 2024-06-01T09:30:00Z)")?;

    let mut store = gateway.load_store()?;
    let tx = store.add_transaction(title, amount, kind, source, timestamp)?;
    gateway.save(&store).context("Failed to save ledger")?;

    println!("📜 Logged {} of {}", tx.kind, format_diamonds(tx.amount));
    println!("   {}", story::narrate(&tx, chronicle));
    Ok(())
}

pub fn cmd_log_list<S: SlotStore>(
    gateway: &LedgerGateway<S>,
    limit: usize,
    chronicle: &ChronicleConfig,
) -> Result<()> {
    let store = gateway.load_store()?;

    if store.transactions().is_empty() {
        println!("The adventure log is empty. Record an entry with:");
        println!("  blockledger log add \"Salary\" 2500 --type credit");
        return Ok(());
    }

    println!();
    println!("📜 Adventure Log (latest {})", limit.min(store.transactions().len()));
    println!("   ─────────────────────────────");
    for tx in store.transactions().iter().rev().take(limit) {
        let sign = match tx.kind {
            TransactionType::Credit => "+",
            TransactionType::Debit => "-",
        };
        println!(
            "   {}  {}{:<14} {:<30} [{}]",
            tx.timestamp.format("%Y-%m-%d"),
            sign,
            format_diamonds(tx.amount),
            truncate(&tx.title, 30),
            tx.source
        );
        println!("      {}", story::narrate(tx, chronicle));
    }

    Ok(())
}
