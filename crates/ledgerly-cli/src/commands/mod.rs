//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `plan` - Budget plan generation and analysis
//! - `serve` - Web server command
//! - `status` - Data store and auth configuration report

pub mod plan;
pub mod serve;
pub mod status;

// Re-export command functions for main.rs
pub use plan::*;
pub use serve::*;
pub use status::*;

pub const JWT_SECRET_ENV: &str = "LEDGERLY_JWT_SECRET";
pub const TOKEN_TTL_ENV: &str = "LEDGERLY_TOKEN_TTL_MINUTES";
pub const ALLOWED_ORIGINS_ENV: &str = "LEDGERLY_ALLOWED_ORIGINS";

/// Read an environment variable, treating blank values as unset
pub fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
