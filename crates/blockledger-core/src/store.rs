//! Ledger store - the in-memory owner of the four collections
//!
//! The store is an explicit value: callers construct one (or load one through
//! the persistence gateway) and pass it by reference to the aggregation and
//! insight functions. It performs no locking; hosts that share a store
//! between threads must wrap it themselves.
//!
//! Mutators validate numeric input at the boundary and never store a
//! non-finite number. There is no per-item edit or delete, only append and
//! a full reset.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{
    new_id, Chest, Goal, Investment, LedgerSnapshot, NewTransaction, Transaction, TransactionType,
};

/// In-memory ledger: chests, goals, investments and the adventure log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerStore {
    chests: Vec<Chest>,
    goals: Vec<Goal>,
    investments: Vec<Investment>,
    transactions: Vec<Transaction>,
}

fn require_finite(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::Validation(format!(
            "{} must be a finite number, got {}",
            field, value
        )))
    }
}

fn require_name(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

impl LedgerStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a persisted snapshot, preserving order
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        Self {
            chests: snapshot.chests,
            goals: snapshot.goals,
            investments: snapshot.investments,
            transactions: snapshot.transactions,
        }
    }

    /// Copy the current contents into a snapshot
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            chests: self.chests.clone(),
            goals: self.goals.clone(),
            investments: self.investments.clone(),
            transactions: self.transactions.clone(),
        }
    }

    pub fn chests(&self) -> &[Chest] {
        &self.chests
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn investments(&self) -> &[Investment] {
        &self.investments
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// True when all four collections are empty
    pub fn is_empty(&self) -> bool {
        self.chests.is_empty()
            && self.goals.is_empty()
            && self.investments.is_empty()
            && self.transactions.is_empty()
    }

    /// Add a chest holding `amount`
    pub fn add_chest(&mut self, name: &str, amount: f64) -> Result<Chest> {
        let chest = Chest {
            id: new_id(),
            name: require_name("Chest name", name)?,
            amount: require_finite("Chest amount", amount)?,
        };

        debug!(id = %chest.id, amount = chest.amount, "Added chest");
        self.chests.push(chest.clone());
        Ok(chest)
    }

    /// Add a goal; `current` defaults to zero
    pub fn add_goal(&mut self, name: &str, target: f64, current: Option<f64>) -> Result<Goal> {
        let name = require_name("Quest name", name)?;
        let target = require_finite("Quest target", target)?;
        if target <= 0.0 {
            return Err(Error::Validation(format!(
                "Quest target must be greater than zero, got {}",
                target
            )));
        }
        let current = require_finite("Quest progress", current.unwrap_or(0.0))?;

        let goal = Goal {
            id: new_id(),
            name,
            target,
            current,
        };

        debug!(id = %goal.id, target, current, "Added quest");
        self.goals.push(goal.clone());
        Ok(goal)
    }

    /// Add an investment with an optional external link
    pub fn add_investment(
        &mut self,
        name: &str,
        amount: f64,
        link: Option<String>,
    ) -> Result<Investment> {
        let investment = Investment {
            id: new_id(),
            name: require_name("Investment name", name)?,
            amount: require_finite("Investment amount", amount)?,
            link: link
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty()),
        };

        debug!(id = %investment.id, amount = investment.amount, "Added investment");
        self.investments.push(investment.clone());
        Ok(investment)
    }

    /// Append a transaction to the adventure log
    ///
    /// A negative `amount` is stored as its magnitude; `kind` alone carries
    /// the direction. `timestamp` defaults to the current time.
    pub fn add_transaction(
        &mut self,
        title: &str,
        amount: f64,
        kind: TransactionType,
        source: &str,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<Transaction> {
        let title = require_name("Log title", title)?;
        let amount = require_finite("Log amount", amount)?;
        if amount < 0.0 {
            debug!(amount, "Normalizing signed transaction amount to magnitude");
        }

        let tx = Transaction {
            id: new_id(),
            title,
            amount: amount.abs(),
            kind,
            source: source.trim().to_string(),
            timestamp: timestamp.unwrap_or_else(Utc::now),
        };

        debug!(id = %tx.id, kind = tx.kind.as_str(), amount = tx.amount, "Logged transaction");
        self.transactions.push(tx.clone());
        Ok(tx)
    }

    /// Append a prepared transaction
    pub fn append(&mut self, new_tx: &NewTransaction) -> Result<Transaction> {
        self.add_transaction(
            &new_tx.title,
            new_tx.amount,
            new_tx.kind,
            &new_tx.source,
            new_tx.timestamp,
        )
    }

    /// Empty all four collections at once
    pub fn reset_all(&mut self) {
        let cleared = self.chests.len()
            + self.goals.len()
            + self.investments.len()
            + self.transactions.len();

        self.chests.clear();
        self.goals.clear();
        self.investments.clear();
        self.transactions.clear();

        debug!(cleared, "Ledger reset");
    }
}
