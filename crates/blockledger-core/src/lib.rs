//! BlockLedger Core Library
//!
//! Shared functionality for the BlockLedger personal finance tracker:
//! - Ledger store for chests, quests, investments and the adventure log
//! - Aggregation (net worth, quest progress, cash flow)
//! - Rule-based oracle insights
//! - Persistence gateway over pluggable slot storage (SQLite or memory)
//! - CSV import, snapshot export/restore
//! - Activity chronicle, storyteller and trend forecast

pub mod aggregate;
pub mod chronicle;
pub mod config;
pub mod error;
pub mod export;
pub mod forecast;
pub mod import;
pub mod insights;
pub mod models;
pub mod persistence;
pub mod store;
pub mod story;

/// Fixtures shared by unit, integration and CLI tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::{cash_flow, completed_goals, goal_progress, net_worth, CashFlow};
pub use chronicle::Chronicle;
pub use config::{ChronicleConfig, ForecastConfig, LedgerConfig, OracleConfig, StorageConfig};
pub use error::{Error, Result};
pub use forecast::Forecast;
pub use import::ImportStats;
pub use insights::{Finding, InsightEngine, InsightType};
pub use models::{
    Chest, CredentialRecord, Goal, Investment, LedgerSnapshot, NewTransaction, Transaction,
    TransactionType,
};
pub use persistence::{LedgerGateway, MemorySlots, SlotStore, SqliteSlots};
pub use store::LedgerStore;
