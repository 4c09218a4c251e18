//! Dashboard, oracle and chronicle commands

use anyhow::Result;
use blockledger_core::{
    cash_flow, chronicle, goal_progress, net_worth, ChronicleConfig, Finding, InsightEngine,
    InsightType, LedgerConfig, LedgerGateway, OracleConfig, SlotStore,
};
use chrono::Utc;

use super::{format_diamonds, progress_bar, truncate};

fn insight_icon(insight_type: InsightType) -> &'static str {
    match insight_type {
        InsightType::StartJourney => "🧭",
        InsightType::FirstQuest => "🎯",
        InsightType::BuildLog => "📜",
        InsightType::IncomeStreak => "💎",
        InsightType::QuestMaster => "🏆",
        InsightType::InvestmentOpportunity => "📈",
        InsightType::AllSystemsGreen => "✅",
    }
}

fn print_findings(findings: &[Finding]) {
    for finding in findings {
        println!("  {} {}", insight_icon(finding.insight_type), finding.title);
        println!("     {}", finding.text);
    }
}

pub fn cmd_dashboard<S: SlotStore>(
    gateway: &LedgerGateway<S>,
    config: &LedgerConfig,
) -> Result<()> {
    let store = gateway.load_store()?;
    let flow = cash_flow(&store);

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│        ⛏️  BlockLedger Dashboard         │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Net Worth:       {}", format_diamonds(net_worth(&store)));
    println!("  Chests:          {}", store.chests().len());
    println!("  Investments:     {}", store.investments().len());
    println!();
    println!("  Log entries:     {}", store.transactions().len());
    println!("     Gained:       {}", format_diamonds(flow.credits));
    println!("     Spent:        {}", format_diamonds(flow.debits));
    println!("     Net:          {}", format_diamonds(flow.net()));

    if !store.goals().is_empty() {
        println!();
        println!("  🎯 Quests");
        for goal in store.goals() {
            let progress = goal_progress(goal);
            println!(
                "     {:<24} {} {:>5.1}%",
                truncate(&goal.name, 24),
                progress_bar(progress),
                progress
            );
        }
    }

    println!();
    println!("  🔮 Oracle");
    let findings = InsightEngine::with_config(config.oracle.clone()).evaluate(&store, Utc::now());
    print_findings(&findings);
    println!();

    Ok(())
}

pub fn cmd_oracle<S: SlotStore>(gateway: &LedgerGateway<S>, config: &OracleConfig) -> Result<()> {
    let store = gateway.load_store()?;
    let findings = InsightEngine::with_config(config.clone()).evaluate(&store, Utc::now());

    println!();
    println!("🔮 The Oracle speaks");
    println!("   ─────────────────────────────");
    print_findings(&findings);

    Ok(())
}

pub fn cmd_chronicle<S: SlotStore>(
    gateway: &LedgerGateway<S>,
    config: &ChronicleConfig,
) -> Result<()> {
    let store = gateway.load_store()?;
    let summary = chronicle::summarize(&store, Utc::now(), config);

    println!();
    println!("📖 Chronicle of the last {} days", config.recent_days);
    println!("   ─────────────────────────────");
    for line in summary.to_string().lines() {
        println!("   {}", line);
    }

    Ok(())
}
