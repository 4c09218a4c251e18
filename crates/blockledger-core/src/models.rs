//! Domain models for BlockLedger
//!
//! Every entity carries an opaque string id generated at creation time.
//! Field names match the persisted ledger document, so these types are
//! serialized as-is by the persistence gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate a fresh opaque identifier
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// A liquid balance ("chest")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chest {
    pub id: String,
    pub name: String,
    pub amount: f64,
}

/// A savings goal ("quest")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target: f64,
    pub current: f64,
}

impl Goal {
    /// A goal is complete once the saved amount reaches the target
    pub fn is_complete(&self) -> bool {
        self.current >= self.target
    }
}

/// An investment holding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investment {
    pub id: String,
    pub name: String,
    pub amount: f64,
    /// Raw external reference, not validated
    pub link: Option<String>,
}

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Credit,
    Debit,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }

    /// +1 for credits, -1 for debits
    pub fn sign(&self) -> f64 {
        match self {
            Self::Credit => 1.0,
            Self::Debit => -1.0,
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An adventure log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub title: String,
    /// Always a non-negative magnitude; direction comes from `kind`
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Amount with the direction applied (credits positive, debits negative)
    pub fn signed_amount(&self) -> f64 {
        self.kind.sign() * self.amount
    }
}

/// A transaction to be appended (before an id is assigned)
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub title: String,
    pub amount: f64,
    pub kind: TransactionType,
    pub source: String,
    pub timestamp: Option<DateTime<Utc>>,
}

/// The credential record kept in its own slot
///
/// Only the username is persisted; login compares usernames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub id: String,
    pub username: String,
}

impl CredentialRecord {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            username: username.into(),
        }
    }
}

/// The persisted shape of a ledger: four ordered collections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub chests: Vec<Chest>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub investments: Vec<Investment>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl LedgerSnapshot {
    pub fn is_empty(&self) -> bool {
        self.chests.is_empty()
            && self.goals.is_empty()
            && self.investments.is_empty()
            && self.transactions.is_empty()
    }
}
