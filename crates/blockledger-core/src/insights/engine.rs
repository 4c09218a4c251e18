//! Insight Engine - runs the oracle analyzers in order

use chrono::{DateTime, Utc};

use crate::aggregate::net_worth;
use crate::config::OracleConfig;
use crate::store::LedgerStore;

use super::types::{Finding, InsightType};
use super::{InvestmentScoutInsight, JourneyInsight};

/// Context provided to insight analyzers
pub struct AnalysisContext<'a> {
    /// Ledger being analyzed (read-only)
    pub store: &'a LedgerStore,
    /// Evaluation instant; analyzers never read the clock themselves
    pub now: DateTime<Utc>,
    /// Rule thresholds
    pub config: &'a OracleConfig,
    /// Net worth of `store`, computed once
    pub net_worth: f64,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(store: &'a LedgerStore, now: DateTime<Utc>, config: &'a OracleConfig) -> Self {
        Self {
            store,
            now,
            config,
            net_worth: net_worth(store),
        }
    }
}

/// Trait for insight analyzers
pub trait Insight: Send + Sync {
    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Analyze the ledger and produce findings, in emission order
    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding>;
}

/// The oracle: an ordered list of analyzers plus a fallback
///
/// Analyzers run in registration order and their findings are concatenated
/// without re-sorting, so the output order is part of the contract. When no
/// analyzer says anything, a single "All Systems Green" finding is returned.
pub struct InsightEngine {
    insights: Vec<Box<dyn Insight>>,
    config: OracleConfig,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in analyzers and default thresholds
    pub fn new() -> Self {
        Self::with_config(OracleConfig::default())
    }

    /// Create an engine with the built-in analyzers and custom thresholds
    pub fn with_config(config: OracleConfig) -> Self {
        let mut engine = Self {
            insights: vec![],
            config,
        };

        // The journey chain must run before the independent checks
        engine.register(Box::new(JourneyInsight::new()));
        engine.register(Box::new(InvestmentScoutInsight::new()));

        engine
    }

    /// Register an additional analyzer, run after the existing ones
    pub fn register(&mut self, insight: Box<dyn Insight>) {
        self.insights.push(insight);
    }

    /// Thresholds in use
    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    /// Evaluate every analyzer against `store` as of `now`
    pub fn evaluate(&self, store: &LedgerStore, now: DateTime<Utc>) -> Vec<Finding> {
        let ctx = AnalysisContext::new(store, now, &self.config);
        let mut all_findings = vec![];

        for insight in &self.insights {
            let findings = insight.analyze(&ctx);
            tracing::debug!(
                insight = insight.name(),
                count = findings.len(),
                "Insight analysis complete"
            );
            all_findings.extend(findings);
        }

        if all_findings.is_empty() {
            all_findings.push(Finding::new(
                InsightType::AllSystemsGreen,
                "Your ledger looks healthy. Keep adventuring at this steady pace.",
            ));
        }

        all_findings
    }

    /// Names of the registered analyzers, in run order
    pub fn insight_names(&self) -> Vec<&'static str> {
        self.insights.iter().map(|i| i.name()).collect()
    }
}
