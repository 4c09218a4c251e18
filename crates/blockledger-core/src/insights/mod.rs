//! Insight Engine - the Oracle
//!
//! A static, ordered set of heuristic rules over the ledger. It never
//! mutates the store and never reads the clock: the evaluation instant is
//! passed in, so a fixed store and a fixed instant always produce the same
//! findings.
//!
//! ## Built-in analyzers
//!
//! - **Journey Guide** - the exclusive getting-started chain, then income
//!   streak and quest completion
//! - **Investment Scout** - idle treasure, evaluated independently
//!
//! ## Usage
//!
//! ```rust
//! use blockledger_core::insights::InsightEngine;
//! use blockledger_core::LedgerStore;
//!
//! let store = LedgerStore::new();
//! let findings = InsightEngine::new().evaluate(&store, chrono::Utc::now());
//! assert_eq!(findings[0].title, "Start Your Journey");
//! ```

pub mod engine;
pub mod investment_scout;
pub mod journey;
pub mod types;

pub use engine::{AnalysisContext, Insight, InsightEngine};
pub use investment_scout::InvestmentScoutInsight;
pub use journey::JourneyInsight;
pub use types::{Finding, InsightType};
