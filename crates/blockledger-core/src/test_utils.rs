//! Test utilities for blockledger-core
//!
//! A fixed clock and a few ledgers in well-known states, so tests across
//! crates can assert on oracle output without depending on the wall clock.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::models::TransactionType;
use crate::store::LedgerStore;

/// The instant every fixture is built relative to
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// `days` days before [`fixed_now`]
pub fn days_ago(days: i64) -> DateTime<Utc> {
    fixed_now() - Duration::days(days)
}

/// Append `count` old debits, well outside any trailing window
pub fn log_old_debits(store: &mut LedgerStore, count: usize) {
    for i in 0..count {
        store
            .add_transaction(
                &format!("Old purchase {}", i),
                10.0,
                TransactionType::Debit,
                "Card",
                Some(days_ago(90 + i as i64)),
            )
            .unwrap();
    }
}

/// A ledger past the first three journey steps
///
/// One chest of 1500, one unfinished quest, five old debits and one credit
/// two days before [`fixed_now`]. The oracle reports an income streak and
/// an investment opportunity.
pub fn seasoned_store() -> LedgerStore {
    let mut store = LedgerStore::new();
    store.add_chest("Main Chest", 1500.0).unwrap();
    store
        .add_goal("Netherite Armor", 5000.0, Some(250.0))
        .unwrap();
    log_old_debits(&mut store, 5);
    store
        .add_transaction(
            "SALARY CREDIT",
            900.0,
            TransactionType::Credit,
            "Employer",
            Some(days_ago(2)),
        )
        .unwrap();
    store
}
