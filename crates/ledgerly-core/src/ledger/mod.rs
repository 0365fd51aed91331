//! Typed, user-scoped access to the data store
//!
//! This module is organized by table:
//! - `users` - registration, lookup, profile changes
//! - `incomes` - income entries
//! - `expenses` - expense entries
//! - `savings_plans` - savings targets
//! - `budget_plans` - stored allocator output
//! - `reports` - range reports over incomes and expenses
//!
//! Every entry operation takes the owning user id. A record owned by someone
//! else is indistinguishable from a missing one: `get_*` and `update_*`
//! return `None`, `delete_*` returns `false`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::store::{DataStore, Query, Record, StoreClient};

mod budget_plans;
mod expenses;
mod incomes;
mod reports;
mod savings_plans;
mod users;

pub const USERS_TABLE: &str = "users";
pub const INCOMES_TABLE: &str = "incomes";
pub const EXPENSES_TABLE: &str = "expenses";
pub const SAVINGS_PLANS_TABLE: &str = "savings_plans";
pub const BUDGET_PLANS_TABLE: &str = "budget_plans";

/// Repository over a [`StoreClient`]
#[derive(Clone)]
pub struct Ledger {
    store: StoreClient,
}

impl Ledger {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    /// Ledger over a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(StoreClient::memory())
    }

    pub fn store(&self) -> &StoreClient {
        &self.store
    }

    pub async fn health_check(&self) -> bool {
        self.store.health_check().await
    }

    async fn insert_as<T: DeserializeOwned>(&self, table: &str, row: Record) -> Result<T> {
        let stored = self.store.insert(table, row).await?;
        from_record(stored)
    }

    async fn select_as<T: DeserializeOwned>(&self, query: &Query) -> Result<Vec<T>> {
        self.store
            .select(query)
            .await?
            .into_iter()
            .map(from_record)
            .collect()
    }

    async fn first_as<T: DeserializeOwned>(&self, query: &Query) -> Result<Option<T>> {
        match self.store.select(query).await?.into_iter().next() {
            Some(record) => from_record(record).map(Some),
            None => Ok(None),
        }
    }

    async fn get_owned<T: DeserializeOwned>(
        &self,
        table: &str,
        user_id: &str,
        id: &str,
    ) -> Result<Option<T>> {
        self.first_as(&owned(table, user_id, id)).await
    }

    async fn update_owned<T: DeserializeOwned>(
        &self,
        table: &str,
        user_id: &str,
        id: &str,
        patch: Record,
    ) -> Result<Option<T>> {
        match self
            .store
            .update(&owned(table, user_id, id), patch)
            .await?
            .into_iter()
            .next()
        {
            Some(record) => from_record(record).map(Some),
            None => Ok(None),
        }
    }

    async fn delete_owned(&self, table: &str, user_id: &str, id: &str) -> Result<bool> {
        let deleted = self.store.delete(&owned(table, user_id, id)).await?;
        Ok(!deleted.is_empty())
    }
}

/// Query for one record belonging to one user
fn owned(table: &str, user_id: &str, id: &str) -> Query {
    Query::table(table).eq("id", id).eq("user_id", user_id)
}

pub(crate) fn to_record<T: Serialize>(value: &T) -> Result<Record> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(Error::InvalidData(format!(
            "expected a JSON object for a store row, got {}",
            other
        ))),
    }
}

pub(crate) fn from_record<T: DeserializeOwned>(record: Record) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(record))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_record_requires_object() {
        assert!(to_record(&json!({"a": 1})).is_ok());
        assert!(matches!(to_record(&json!([1, 2])), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_owned_query_scopes_to_user() {
        let query = owned("incomes", "u1", "abc");
        assert_eq!(query.filters.len(), 2);
        assert_eq!(query.filters[0].column, "id");
        assert_eq!(query.filters[1].column, "user_id");
        assert_eq!(query.filters[1].value, json!("u1"));
    }
}
