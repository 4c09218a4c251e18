//! Investment Scout Insight
//!
//! Runs regardless of the journey chain: a net worth above the threshold
//! with an empty portfolio earns an investment nudge.

use serde_json::json;

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightType};

/// Insight that spots idle treasure
pub struct InvestmentScoutInsight;

impl InvestmentScoutInsight {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InvestmentScoutInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for InvestmentScoutInsight {
    fn name(&self) -> &'static str {
        "Investment Scout"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        if !ctx.store.investments().is_empty()
            || ctx.net_worth <= ctx.config.investment_threshold
        {
            return vec![];
        }

        vec![Finding::new(
            InsightType::InvestmentOpportunity,
            format!(
                "You hold {:.2} diamonds but none of it is invested. Put some treasure to work.",
                ctx.net_worth
            ),
        )
        .with_data(json!({
            "net_worth": ctx.net_worth,
            "threshold": ctx.config.investment_threshold,
        }))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OracleConfig;
    use crate::store::LedgerStore;
    use chrono::Utc;

    fn analyze(store: &LedgerStore) -> Vec<Finding> {
        let config = OracleConfig::default();
        let ctx = AnalysisContext::new(store, Utc::now(), &config);
        InvestmentScoutInsight::new().analyze(&ctx)
    }

    #[test]
    fn test_fires_above_threshold_without_investments() {
        let mut store = LedgerStore::new();
        store.add_chest("Main", 1000.01).unwrap();

        let findings = analyze(&store);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].title, "Investment Opportunity");
        assert!(findings[0].text.contains("1000.01"));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut store = LedgerStore::new();
        store.add_chest("Main", 1000.0).unwrap();
        assert!(analyze(&store).is_empty());
    }

    #[test]
    fn test_silent_with_investments() {
        let mut store = LedgerStore::new();
        store.add_chest("Main", 5000.0).unwrap();
        store.add_investment("Fund", 1.0, None).unwrap();
        assert!(analyze(&store).is_empty());
    }
}
