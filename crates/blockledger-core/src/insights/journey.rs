//! Journey Guide Insight
//!
//! Walks the adventurer through getting started. The first three checks are
//! one exclusive chain; only when none of them applies does the guide look
//! at recent income and completed quests, and those two may both fire:
//!
//! 1. Net worth is exactly zero -> "Start Your Journey"
//! 2. Chests but no quests -> "Set Your First Quest"
//! 3. Fewer log entries than the threshold -> "Build Your Adventure Log"
//! 4. Otherwise: recent credits -> "Income Streak", completed quests ->
//!    "Quest Master"

use chrono::Duration;
use serde_json::json;

use crate::aggregate::completed_goals;
use crate::models::TransactionType;

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightType};

/// Insight that guides a new or established adventurer
pub struct JourneyInsight;

impl JourneyInsight {
    pub fn new() -> Self {
        Self
    }

    /// Credits whose timestamp falls in the trailing window ending at `now`
    fn recent_credits(ctx: &AnalysisContext<'_>) -> usize {
        let window_start = ctx.now - Duration::days(ctx.config.recent_days);
        ctx.store
            .transactions()
            .iter()
            .filter(|tx| tx.kind == TransactionType::Credit)
            .filter(|tx| tx.timestamp >= window_start && tx.timestamp <= ctx.now)
            .count()
    }
}

impl Default for JourneyInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for JourneyInsight {
    fn name(&self) -> &'static str {
        "Journey Guide"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        let store = ctx.store;
        let mut findings = Vec::new();

        if ctx.net_worth == 0.0 {
            findings.push(Finding::new(
                InsightType::StartJourney,
                "Your chests are empty. Add your first chest or investment to begin the adventure.",
            ));
        } else if !store.chests().is_empty() && store.goals().is_empty() {
            findings.push(Finding::new(
                InsightType::FirstQuest,
                "You have treasure stored away. Set a savings quest to give it a purpose.",
            ));
        } else if store.transactions().len() < ctx.config.log_threshold {
            let logged = store.transactions().len();
            findings.push(
                Finding::new(
                    InsightType::BuildLog,
                    format!(
                        "You have logged {} of {} adventures. Keep recording so the Oracle can read your patterns.",
                        logged, ctx.config.log_threshold
                    ),
                )
                .with_data(json!({ "logged": logged, "threshold": ctx.config.log_threshold })),
            );
        } else {
            let credits = Self::recent_credits(ctx);
            if credits > 0 {
                findings.push(
                    Finding::new(
                        InsightType::IncomeStreak,
                        format!(
                            "{} income {} landed in the last {} days. Keep the diamonds flowing!",
                            credits,
                            if credits == 1 { "deposit" } else { "deposits" },
                            ctx.config.recent_days
                        ),
                    )
                    .with_data(json!({ "count": credits, "days": ctx.config.recent_days })),
                );
            }

            let completed = completed_goals(store);
            if completed > 0 {
                let total = store.goals().len();
                findings.push(
                    Finding::new(
                        InsightType::QuestMaster,
                        format!(
                            "You have completed {} of {} quests. Legendary work, adventurer!",
                            completed, total
                        ),
                    )
                    .with_data(json!({ "completed": completed, "total": total })),
                );
            }
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OracleConfig;
    use crate::store::LedgerStore;
    use chrono::{DateTime, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn analyze(store: &LedgerStore) -> Vec<Finding> {
        let config = OracleConfig::default();
        let ctx = AnalysisContext::new(store, now(), &config);
        JourneyInsight::new().analyze(&ctx)
    }

    fn log(store: &mut LedgerStore, kind: TransactionType, days_ago: i64) {
        store
            .add_transaction(
                "Entry",
                25.0,
                kind,
                "Bank",
                Some(now() - Duration::days(days_ago)),
            )
            .unwrap();
    }

    #[test]
    fn test_zero_net_worth_short_circuits() {
        // Chests summing to zero still count as an empty journey
        let mut store = LedgerStore::new();
        store.add_chest("In", 50.0).unwrap();
        store.add_chest("Out", -50.0).unwrap();
        for _ in 0..6 {
            log(&mut store, TransactionType::Credit, 1);
        }

        let findings = analyze(&store);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].insight_type, InsightType::StartJourney);
    }

    #[test]
    fn test_investments_only_skips_first_quest() {
        let mut store = LedgerStore::new();
        store.add_investment("Fund", 300.0, None).unwrap();

        let findings = analyze(&store);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].insight_type, InsightType::BuildLog);
        assert_eq!(findings[0].data["logged"], 0);
    }

    #[test]
    fn test_build_log_below_threshold() {
        let mut store = LedgerStore::new();
        store.add_chest("Main", 100.0).unwrap();
        store.add_goal("Quest", 1000.0, Some(1000.0)).unwrap();
        for _ in 0..4 {
            log(&mut store, TransactionType::Credit, 1);
        }

        let findings = analyze(&store);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].title, "Build Your Adventure Log");
        assert!(findings[0].text.contains("4 of 5"));
    }

    #[test]
    fn test_income_streak_counts_window_only() {
        let mut store = LedgerStore::new();
        store.add_chest("Main", 100.0).unwrap();
        store.add_goal("Quest", 1000.0, None).unwrap();
        log(&mut store, TransactionType::Credit, 0);
        log(&mut store, TransactionType::Credit, 30);
        log(&mut store, TransactionType::Credit, 31);
        log(&mut store, TransactionType::Debit, 2);
        log(&mut store, TransactionType::Debit, 3);

        let findings = analyze(&store);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].insight_type, InsightType::IncomeStreak);
        assert_eq!(findings[0].data["count"], 2);
        assert!(findings[0].text.starts_with("2 income deposits"));
    }

    #[test]
    fn test_future_credits_not_counted() {
        let mut store = LedgerStore::new();
        store.add_chest("Main", 100.0).unwrap();
        store.add_goal("Quest", 1000.0, None).unwrap();
        for _ in 0..4 {
            log(&mut store, TransactionType::Debit, 1);
        }
        log(&mut store, TransactionType::Credit, -3);

        assert!(analyze(&store).is_empty());
    }

    #[test]
    fn test_streak_and_quest_master_both_fire() {
        let mut store = LedgerStore::new();
        store.add_chest("Main", 100.0).unwrap();
        store.add_goal("Sword", 1000.0, Some(1000.0)).unwrap();
        store.add_goal("Shield", 1000.0, Some(10.0)).unwrap();
        store.add_goal("Boots", 1000.0, Some(999.0)).unwrap();
        for _ in 0..4 {
            log(&mut store, TransactionType::Debit, 40);
        }
        log(&mut store, TransactionType::Credit, 5);

        let findings = analyze(&store);
        let types: Vec<_> = findings.iter().map(|f| f.insight_type).collect();
        assert_eq!(
            types,
            vec![InsightType::IncomeStreak, InsightType::QuestMaster]
        );
        assert!(findings[0].text.starts_with("1 income deposit landed"));
        assert!(findings[1].text.contains("1 of 3"));
    }

    #[test]
    fn test_quiet_established_ledger_says_nothing() {
        let mut store = LedgerStore::new();
        store.add_chest("Main", 100.0).unwrap();
        store.add_goal("Quest", 1000.0, None).unwrap();
        for _ in 0..5 {
            log(&mut store, TransactionType::Debit, 1);
        }

        assert!(analyze(&store).is_empty());
    }
}
