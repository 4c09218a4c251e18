//! Activity chronicle - a summary of the trailing window of the adventure log

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ChronicleConfig;
use crate::models::TransactionType;
use crate::store::LedgerStore;

/// What the log says about recent activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Chronicle {
    /// Nothing has ever been logged
    Blank,
    /// Entries exist, none inside the window
    Quiet { days: i64 },
    /// Activity inside the window
    Active {
        days: i64,
        income: f64,
        expenses: f64,
        /// Debits matching a provision keyword (food, groceries)
        provisions: usize,
        /// Debits matching a trade keyword (shopping)
        trades: usize,
    },
}

/// Whole number with comma thousands separators, e.g. `75,000`
fn grouped(amount: f64) -> String {
    let digits = format!("{:.0}", amount.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if amount < 0.0 && digits != "0" {
        out.insert(0, '-');
    }
    out
}

fn matches_any(title: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| title.contains(k.as_str()))
}

/// Summarize the log over the configured window ending at `now`
pub fn summarize(store: &LedgerStore, now: DateTime<Utc>, config: &ChronicleConfig) -> Chronicle {
    if store.transactions().is_empty() {
        return Chronicle::Blank;
    }

    let window_start = now - Duration::days(config.recent_days);
    let recent: Vec<_> = store
        .transactions()
        .iter()
        .filter(|tx| tx.timestamp > window_start && tx.timestamp <= now)
        .collect();

    if recent.is_empty() {
        return Chronicle::Quiet {
            days: config.recent_days,
        };
    }

    let mut income = 0.0;
    let mut expenses = 0.0;
    let mut provisions = 0;
    let mut trades = 0;

    for tx in recent {
        match tx.kind {
            TransactionType::Credit => income += tx.amount,
            TransactionType::Debit => {
                expenses += tx.amount;
                let title = tx.title.to_lowercase();
                if matches_any(&title, &config.provision_keywords) {
                    provisions += 1;
                }
                if matches_any(&title, &config.trade_keywords) {
                    trades += 1;
                }
            }
        }
    }

    Chronicle::Active {
        days: config.recent_days,
        income,
        expenses,
        provisions,
        trades,
    }
}

impl fmt::Display for Chronicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chronicle::Blank => write!(
                f,
                "The adventurer has not yet begun their journey. The scrolls are blank."
            ),
            Chronicle::Quiet { days } => write!(
                f,
                "No quests have been logged in the past {} days. The path is quiet.",
                days
            ),
            Chronicle::Active {
                days,
                income,
                expenses,
                provisions,
                trades,
            } => {
                writeln!(
                    f,
                    "- Total diamonds gained in last {} days: {}",
                    days,
                    grouped(*income)
                )?;
                write!(
                    f,
                    "- Total diamonds spent in last {} days: {}",
                    days,
                    grouped(*expenses)
                )?;
                if *expenses > 0.0 {
                    write!(
                        f,
                        "\n- Logged {} quests for provisions and {} trades with villagers.",
                        provisions, trades
                    )?;
                }
                Ok(())
            }
        }
    }
}
