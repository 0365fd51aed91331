//! Ledgerly CLI - Personal finance backend and budget planner
//!
//! Usage:
//!   ledgerly serve --port 8000                 Start the API server
//!   ledgerly plan --income 5000 --months 12    Generate a budget plan
//!   ledgerly analyze --file plan.json          Analyze a saved plan
//!   ledgerly status                            Check the data store

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
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

    match cli.command {
        Commands::Serve {
            port,
            host,
            no_auth,
        } => commands::cmd_serve(&host, port, no_auth).await,
        Commands::Plan {
            income,
            savings,
            months,
            json,
        } => commands::cmd_plan(income, savings, months, json),
        Commands::Analyze { file, json } => commands::cmd_analyze(&file, json),
        Commands::Status => commands::cmd_status().await,
    }
}
