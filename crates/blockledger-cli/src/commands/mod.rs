//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `account` - Adventurer commands (signup, login, logout, whoami)
//! - `core` - Core commands (init, status, reset) and shared utilities (open_gateway)
//! - `forecast` - Investment trend forecast
//! - `import` - Import/export commands (CSV import, snapshot export and restore)
//! - `insights` - Dashboard, oracle and chronicle
//! - `ledger` - Chest, quest, investment and log commands
//!
//! Every command that touches the ledger takes a `LedgerGateway`, loads the
//! store, mutates it and saves it back.

pub mod account;
pub mod core;
pub mod forecast;
pub mod import;
pub mod insights;
pub mod ledger;

// Re-export command functions for main.rs
pub use account::*;
pub use self::core::*;
pub use forecast::*;
pub use import::*;
pub use insights::*;
pub use ledger::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format an amount of diamonds with thousands separators
pub fn format_diamonds(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}💎 {}.{}", sign, grouped, fraction)
}

/// Render a ten-block progress bar for a percentage in [0, 100]
pub fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 10.0).round() as usize).min(10);
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}
