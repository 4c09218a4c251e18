//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// BlockLedger - Track your treasure like an adventurer
#[derive(Parser)]
#[command(name = "blockledger")]
#[command(about = "Local personal finance tracker with a block-world theme", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "blockledger.db", global = true)]
    pub db: PathBuf,

    /// Config file (defaults to the user override, then built-in settings)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set BLOCKLEDGER_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Show database status (encryption, size, counts)
    Status,

    /// Register an adventurer name
    Signup {
        /// Adventurer name
        username: String,
    },

    /// Log in as the registered adventurer
    Login {
        /// Adventurer name
        username: String,
    },

    /// Forget the registered adventurer (the ledger is kept)
    Logout,

    /// Show the registered adventurer
    Whoami,

    /// Manage chests (liquid balances)
    Chest {
        #[command(subcommand)]
        action: Option<ChestAction>,
    },

    /// Manage quests (savings goals)
    Goal {
        #[command(subcommand)]
        action: Option<GoalAction>,
    },

    /// Manage investments
    Invest {
        #[command(subcommand)]
        action: Option<InvestAction>,
    },

    /// Manage the adventure log (transactions)
    Log {
        #[command(subcommand)]
        action: Option<LogAction>,
    },

    /// Import adventure log entries from CSV
    ///
    /// Required columns: Description, Amount, Type (credit/debit).
    /// Optional columns: Timestamp, Source.
    Import {
        /// CSV file to import
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show net worth, quest progress and oracle insights
    Dashboard,

    /// Consult the oracle for insights
    Oracle,

    /// Summarize recent activity
    Chronicle,

    /// Project an investment price trend
    Forecast {
        /// CSV file with a Close column, oldest row first
        #[arg(short, long)]
        file: PathBuf,

        /// Days past the last close to project (default from config)
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// Export the ledger to a JSON snapshot (gzip if the path ends in .gz)
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Replace the ledger with a snapshot written by `export`
    Restore {
        /// Snapshot file
        #[arg(short, long)]
        file: PathBuf,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Empty every chest, quest, investment and log entry
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ChestAction {
    /// Add a chest
    Add {
        /// Chest name
        name: String,
        /// Amount held
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },
    /// List chests
    List,
}

#[derive(Subcommand)]
pub enum GoalAction {
    /// Add a quest
    Add {
        /// Quest name
        name: String,
        /// Target amount
        target: f64,
        /// Amount already saved
        #[arg(long)]
        current: Option<f64>,
    },
    /// List quests with progress
    List,
}

#[derive(Subcommand)]
pub enum InvestAction {
    /// Add an investment
    Add {
        /// Investment name
        name: String,
        /// Amount invested
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// External link (broker page, ticker, ...)
        #[arg(long)]
        link: Option<String>,
    },
    /// List investments
    List,
}

#[derive(Subcommand)]
pub enum LogAction {
    /// Record a transaction
    Add {
        /// What happened
        title: String,
        /// Amount (a negative value is stored as its magnitude)
        #[arg(allow_negative_numbers = true)]
        amount: f64,
        /// Direction: credit or debit
        #[arg(short = 't', long = "type")]
        kind: String,
        /// Where the money came from or went
        #[arg(short, long, default_value = "manual")]
        source: String,
        /// When it happened (RFC 3339, defaults to now)
        #[arg(long)]
        at: Option<String>,
    },
    /// List recent log entries, newest first
    List {
        /// Maximum entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}
