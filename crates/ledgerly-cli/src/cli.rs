//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

/// Ledgerly - Personal finance backend and budget planner
#[derive(Parser)]
#[command(name = "ledgerly")]
#[command(about = "Personal finance API and budget-allocation engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    ///
    /// Store and auth settings come from the environment:
    /// LEDGERLY_STORE_URL, LEDGERLY_STORE_KEY, LEDGERLY_JWT_SECRET,
    /// LEDGERLY_TOKEN_TTL_MINUTES, LEDGERLY_ALLOWED_ORIGINS.
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// Every request acts as a single local user.
        #[arg(long)]
        no_auth: bool,
    },

    /// Generate a budget plan from income, savings goal, and duration
    Plan {
        /// Monthly income
        #[arg(long, allow_negative_numbers = true)]
        income: Decimal,

        /// Monthly savings goal
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        savings: Decimal,

        /// Plan duration in months
        #[arg(long, allow_negative_numbers = true)]
        months: i64,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Analyze a budget plan JSON file
    ///
    /// Accepts the output of `ledgerly plan --json` or a stored plan record.
    Analyze {
        /// Plan JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show configured data store and whether it is reachable
    Status,
}
