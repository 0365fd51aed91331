//! Server command implementation

use anyhow::{bail, Context, Result};
use ledgerly_core::{Ledger, StoreClient};
use ledgerly_server::{JwtConfig, ServerConfig, DEFAULT_TOKEN_TTL_MINUTES};
use tracing::warn;

use super::{env_var, ALLOWED_ORIGINS_ENV, JWT_SECRET_ENV, TOKEN_TTL_ENV};

/// Signing secret used when auth is disabled and none is configured
const LOCAL_DEV_SECRET: &str = "ledgerly-local-dev-secret";

/// Build the server configuration from raw settings
///
/// With auth required a signing secret must be configured.
pub fn build_server_config(
    no_auth: bool,
    jwt_secret: Option<String>,
    token_ttl: Option<String>,
    allowed_origins: Option<String>,
) -> Result<ServerConfig> {
    let ttl_minutes = match token_ttl {
        Some(raw) => {
            let minutes: i64 = raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {}", TOKEN_TTL_ENV, raw))?;
            if minutes <= 0 {
                bail!("{} must be greater than 0", TOKEN_TTL_ENV);
            }
            minutes
        }
        None => DEFAULT_TOKEN_TTL_MINUTES,
    };

    let secret = match (jwt_secret, no_auth) {
        (Some(secret), _) => secret,
        (None, true) => {
            warn!("{} not set - using local development secret", JWT_SECRET_ENV);
            LOCAL_DEV_SECRET.to_string()
        }
        (None, false) => bail!(
            "{} must be set when authentication is enabled (or pass --no-auth for local development)",
            JWT_SECRET_ENV
        ),
    };

    Ok(ServerConfig {
        require_auth: !no_auth,
        allowed_origins: allowed_origins
            .map(|o| ServerConfig::parse_origins(&o))
            .unwrap_or_default(),
        jwt: JwtConfig::new(secret, ttl_minutes),
    })
}

pub async fn cmd_serve(host: &str, port: u16, no_auth: bool) -> Result<()> {
    let config = build_server_config(
        no_auth,
        env_var(JWT_SECRET_ENV),
        env_var(TOKEN_TTL_ENV),
        env_var(ALLOWED_ORIGINS_ENV),
    )?;
    let store = StoreClient::from_env().context("Failed to configure data store")?;

    println!("🚀 Starting Ledgerly API server...");
    println!("   Listening: http://{}:{}", host, port);
    if store.is_persistent() {
        println!("   Store: REST (LEDGERLY_STORE_URL)");
    } else {
        println!("   Store: in-memory (set LEDGERLY_STORE_URL to persist data)");
    }

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
    } else {
        println!(
            "   🔐 Authentication: bearer tokens ({} min lifetime)",
            config.jwt.ttl_minutes
        );
    }
    if !config.allowed_origins.is_empty() {
        println!(
            "   🌐 Allowed origins: {} ({})",
            config.allowed_origins.join(", "),
            ALLOWED_ORIGINS_ENV
        );
    }
    println!();
    println!("   Press Ctrl+C to stop");

    ledgerly_server::serve_with_config(Ledger::new(store), host, port, config).await?;

    Ok(())
}
