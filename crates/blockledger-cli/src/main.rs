//! BlockLedger CLI - Personal finance tracker
//!
//! Usage:
//!   blockledger init                      Initialize database
//!   blockledger chest add "Main" 1500     Add a chest
//!   blockledger log add "Pay" 900 -t credit
//!   blockledger dashboard                 Net worth, quests and insights

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref())?;
    let open = || commands::open_gateway(&cli.db, cli.no_encrypt, &config.storage);

    match cli.command {
        Commands::Init => commands::cmd_init(&open()?),
        Commands::Status => commands::cmd_status(&open()?),
        Commands::Signup { username } => commands::cmd_signup(&open()?, &username),
        Commands::Login { username } => commands::cmd_login(&open()?, &username),
        Commands::Logout => commands::cmd_logout(&open()?),
        Commands::Whoami => commands::cmd_whoami(&open()?),
        Commands::Chest { action } => {
            let gateway = open()?;
            match action {
                None | Some(ChestAction::List) => commands::cmd_chest_list(&gateway),
                Some(ChestAction::Add { name, amount }) => {
                    commands::cmd_chest_add(&gateway, &name, amount)
                }
            }
        }
        Commands::Goal { action } => {
            let gateway = open()?;
            match action {
                None | Some(GoalAction::List) => commands::cmd_goal_list(&gateway),
                Some(GoalAction::Add {
                    name,
                    target,
                    current,
                }) => commands::cmd_goal_add(&gateway, &name, target, current),
            }
        }
        Commands::Invest { action } => {
            let gateway = open()?;
            match action {
                None | Some(InvestAction::List) => commands::cmd_invest_list(&gateway),
                Some(InvestAction::Add { name, amount, link }) => {
                    commands::cmd_invest_add(&gateway, &name, amount, link)
                }
            }
        }
        Commands::Log { action } => {
            let gateway = open()?;
            match action {
                None => commands::cmd_log_list(&gateway, 20, &config.chronicle),
                Some(LogAction::List { limit }) => {
                    commands::cmd_log_list(&gateway, limit, &config.chronicle)
                }
                Some(LogAction::Add {
                    title,
                    amount,
                    kind,
                    source,
                    at,
                }) => commands::cmd_log_add(
                    &gateway,
                    &title,
                    amount,
                    &kind,
                    &source,
                    at.as_deref(),
                    &config.chronicle,
                ),
            }
        }
        Commands::Import { file } => commands::cmd_import(&open()?, &file),
        Commands::Dashboard => commands::cmd_dashboard(&open()?, &config),
        Commands::Oracle => commands::cmd_oracle(&open()?, &config.oracle),
        Commands::Chronicle => commands::cmd_chronicle(&open()?, &config.chronicle),
        // Works on a price file and never touches the ledger
        Commands::Forecast { file, days } => commands::cmd_forecast(&file, days, &config.forecast),
        Commands::Export { output } => commands::cmd_export(&open()?, &output),
        Commands::Restore { file, yes } => commands::cmd_restore(&open()?, &file, yes),
        Commands::Reset { yes } => commands::cmd_reset(&open()?, yes),
    }
}
