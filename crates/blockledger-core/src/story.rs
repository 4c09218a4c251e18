//! Storyteller - turns log entries into themed one-liners

use crate::config::ChronicleConfig;
use crate::models::{Transaction, TransactionType};

/// Format an amount of diamonds, dropping decimals for whole numbers
fn diamonds(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.0}", amount)
    } else {
        format!("{:.2}", amount)
    }
}

/// Narrate a transaction using the chronicle keyword lists
pub fn narrate(tx: &Transaction, config: &ChronicleConfig) -> String {
    let amount = diamonds(tx.amount);
    let title = tx.title.to_lowercase();
    let mentions = |words: &[String]| words.iter().any(|w| title.contains(w.as_str()));

    match tx.kind {
        TransactionType::Credit => format!(
            "A vein of {} diamonds was discovered in the great mine ({}).",
            amount, tx.title
        ),
        TransactionType::Debit if mentions(&config.provision_keywords) => format!(
            "Spent {} diamonds to craft enchanted golden apples for a quick feast ({}).",
            amount, tx.title
        ),
        TransactionType::Debit if mentions(&config.trade_keywords) => format!(
            "Traded {} diamonds with a wandering villager for rare supplies ({}).",
            amount, tx.title
        ),
        TransactionType::Debit => format!(
            "Paid {} diamonds on the road ({}).",
            amount, tx.title
        ),
    }
}
