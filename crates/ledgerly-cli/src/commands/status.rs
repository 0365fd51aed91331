//! Status command implementation

use anyhow::Result;
use ledgerly_core::{DataStore, StoreClient, StoreConfig};

use super::{env_var, JWT_SECRET_ENV, TOKEN_TTL_ENV};

/// Store URL with any credentials or query string stripped for display
pub fn redact_url(url: &str) -> String {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    match without_query.split_once("://") {
        Some((scheme, rest)) => match rest.rsplit_once('@') {
            Some((_, host)) => format!("{}://***@{}", scheme, host),
            None => without_query.to_string(),
        },
        None => without_query.to_string(),
    }
}

pub async fn cmd_status() -> Result<()> {
    println!();
    println!("📊 Ledgerly Status");
    println!("   ─────────────────────────────────────────────────────────────");

    match StoreConfig::from_env() {
        Ok(config) => {
            match &config {
                StoreConfig::Rest { base_url, .. } => {
                    println!("   Store: REST at {}", redact_url(base_url));
                    println!("   🔑 Service key: set (LEDGERLY_STORE_KEY=***)");
                }
                StoreConfig::Memory => {
                    println!("   Store: in-memory (LEDGERLY_STORE_URL not set)");
                }
            }

            let store = StoreClient::from_config(&config);
            if store.health_check().await {
                println!("   ✅ Reachable");
            } else {
                println!("   ❌ Not reachable");
            }
        }
        Err(e) => {
            println!("   ❌ Store configuration error: {}", e);
        }
    }

    println!();
    if env_var(JWT_SECRET_ENV).is_some() {
        println!("   🔒 Token signing: configured ({}=***)", JWT_SECRET_ENV);
    } else {
        println!(
            "   ⚠️  Token signing: {} not set (serve requires it unless --no-auth)",
            JWT_SECRET_ENV
        );
    }
    if let Some(ttl) = env_var(TOKEN_TTL_ENV) {
        println!("   Token lifetime: {} min", ttl);
    }

    println!();
    Ok(())
}
