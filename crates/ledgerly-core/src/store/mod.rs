//! Data store abstraction
//!
//! All persistence goes through a hosted relational store exposed over a
//! PostgREST-style REST layer. The rest of the crate only sees the
//! [`DataStore`] trait: insert, select, update, and delete on named tables
//! with equality and range filters.
//!
//! # Architecture
//!
//! - `DataStore` trait: the operations every store supports
//! - `StoreClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Implementations: `RestStore` (remote) and `MemoryStore` (process-local)
//!
//! # Configuration
//!
//! Environment variables:
//! - `LEDGERLY_STORE_URL`: base URL of the REST store. Unset selects the
//!   in-memory store.
//! - `LEDGERLY_STORE_KEY`: service key, required with `LEDGERLY_STORE_URL`

mod memory;
mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// A row as the store returns it
pub type Record = Map<String, Value>;

/// Comparison applied by a [`Filter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gte,
    Lte,
}

impl FilterOp {
    /// Operator name in the PostgREST query string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Gte => "gte",
            Self::Lte => "lte",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
    pub value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

/// Table plus row filters and an optional ordering
///
/// ```rust,ignore
/// let query = Query::table("incomes")
///     .eq("user_id", user_id)
///     .gte("date", "2025-01-01")
///     .order_by("date", Direction::Descending);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub table: String,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
}

impl Query {
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            filters: Vec::new(),
            order: None,
        }
    }

    fn filter(mut self, column: &str, op: FilterOp, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            column: column.to_string(),
            op,
            value: value.into(),
        });
        self
    }

    pub fn eq(self, column: &str, value: impl Into<Value>) -> Self {
        self.filter(column, FilterOp::Eq, value)
    }

    pub fn gte(self, column: &str, value: impl Into<Value>) -> Self {
        self.filter(column, FilterOp::Gte, value)
    }

    pub fn lte(self, column: &str, value: impl Into<Value>) -> Self {
        self.filter(column, FilterOp::Lte, value)
    }

    pub fn order_by(mut self, column: &str, direction: Direction) -> Self {
        self.order = Some(Order {
            column: column.to_string(),
            direction,
        });
        self
    }
}

/// Operations every data store supports
///
/// All calls may fail remotely. An empty result is not an error: callers
/// decide whether "no rows" means not found.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Insert a row and return it as stored (with any assigned columns)
    async fn insert(&self, table: &str, row: Record) -> Result<Record>;

    /// Rows matching the query, in the query's order
    async fn select(&self, query: &Query) -> Result<Vec<Record>>;

    /// Apply `patch` to matching rows and return them after the update
    async fn update(&self, query: &Query, patch: Record) -> Result<Vec<Record>>;

    /// Delete matching rows and return what was removed
    async fn delete(&self, query: &Query) -> Result<Vec<Record>>;

    /// Check if the store is reachable
    async fn health_check(&self) -> bool;

    /// Short description for logs and status output
    fn describe(&self) -> String;
}

/// Store connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Rest { base_url: String, api_key: String },
    Memory,
}

impl StoreConfig {
    /// Read `LEDGERLY_STORE_URL` / `LEDGERLY_STORE_KEY`
    ///
    /// No URL selects the in-memory store. A URL without a key is a
    /// configuration error.
    pub fn from_env() -> Result<Self> {
        Self::from_values(
            std::env::var("LEDGERLY_STORE_URL").ok(),
            std::env::var("LEDGERLY_STORE_KEY").ok(),
        )
    }

    pub fn from_values(url: Option<String>, key: Option<String>) -> Result<Self> {
        let url = url.filter(|u| !u.trim().is_empty());
        let key = key.filter(|k| !k.trim().is_empty());
        match (url, key) {
            (None, _) => Ok(Self::Memory),
            (Some(base_url), Some(api_key)) => Ok(Self::Rest { base_url, api_key }),
            (Some(_), None) => Err(Error::Configuration(
                "LEDGERLY_STORE_KEY is required when LEDGERLY_STORE_URL is set".to_string(),
            )),
        }
    }
}

/// Concrete store client
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum StoreClient {
    Rest(RestStore),
    Memory(MemoryStore),
}

impl StoreClient {
    pub fn from_config(config: &StoreConfig) -> Self {
        match config {
            StoreConfig::Rest { base_url, api_key } => {
                StoreClient::Rest(RestStore::new(base_url, api_key))
            }
            StoreConfig::Memory => StoreClient::Memory(MemoryStore::new()),
        }
    }

    pub fn from_env() -> Result<Self> {
        StoreConfig::from_env().map(|config| Self::from_config(&config))
    }

    pub fn memory() -> Self {
        StoreClient::Memory(MemoryStore::new())
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self, StoreClient::Rest(_))
    }
}

// Implement DataStore for StoreClient by delegating to the inner store
#[async_trait]
impl DataStore for StoreClient {
    async fn insert(&self, table: &str, row: Record) -> Result<Record> {
        match self {
            StoreClient::Rest(s) => s.insert(table, row).await,
            StoreClient::Memory(s) => s.insert(table, row).await,
        }
    }

    async fn select(&self, query: &Query) -> Result<Vec<Record>> {
        match self {
            StoreClient::Rest(s) => s.select(query).await,
            StoreClient::Memory(s) => s.select(query).await,
        }
    }

    async fn update(&self, query: &Query, patch: Record) -> Result<Vec<Record>> {
        match self {
            StoreClient::Rest(s) => s.update(query, patch).await,
            StoreClient::Memory(s) => s.update(query, patch).await,
        }
    }

    async fn delete(&self, query: &Query) -> Result<Vec<Record>> {
        match self {
            StoreClient::Rest(s) => s.delete(query).await,
            StoreClient::Memory(s) => s.delete(query).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            StoreClient::Rest(s) => s.health_check().await,
            StoreClient::Memory(s) => s.health_check().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            StoreClient::Rest(s) => s.describe(),
            StoreClient::Memory(s) => s.describe(),
        }
    }
}
