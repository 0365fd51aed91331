//! Process-local store with the same filter and ordering semantics as the
//! REST store. Used when no store URL is configured, and in tests.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::Value;
use uuid::Uuid;

use super::{DataStore, Direction, Filter, FilterOp, Query, Record};
use crate::error::{Error, Result};

type Tables = HashMap<String, Vec<Record>>;

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    /// When set every call fails, to exercise store error paths
    offline: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails
    pub fn offline() -> Self {
        Self {
            tables: Arc::default(),
            offline: true,
        }
    }

    fn ensure_online(&self) -> Result<()> {
        if self.offline {
            return Err(Error::Store("memory store is offline".to_string()));
        }
        Ok(())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>> {
        self.ensure_online()?;
        self.tables
            .read()
            .map_err(|_| Error::Store("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>> {
        self.ensure_online()?;
        self.tables
            .write()
            .map_err(|_| Error::Store("memory store lock poisoned".to_string()))
    }
}

/// Compare numerically when both sides are numbers, otherwise as text
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            match (
                Decimal::from_str(&a.to_string()),
                Decimal::from_str(&b.to_string()),
            ) {
                (Ok(a), Ok(b)) => Some(a.cmp(&b)),
                _ => a.as_f64()?.partial_cmp(&b.as_f64()?),
            }
        }
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Null, _) | (_, Value::Null) => None,
        _ => Some(text(left).cmp(&text(right))),
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn matches_filter(row: &Record, filter: &Filter) -> bool {
    let Some(value) = row.get(&filter.column) else {
        return false;
    };
    match (filter.op, compare(value, &filter.value)) {
        (FilterOp::Eq, Some(Ordering::Equal)) => true,
        (FilterOp::Gte, Some(Ordering::Greater | Ordering::Equal)) => true,
        (FilterOp::Lte, Some(Ordering::Less | Ordering::Equal)) => true,
        _ => false,
    }
}

fn matches(row: &Record, query: &Query) -> bool {
    query.filters.iter().all(|f| matches_filter(row, f))
}

/// Rows missing the order column sort last regardless of direction
fn sort_rows(rows: &mut [Record], query: &Query) {
    let Some(order) = &query.order else {
        return;
    };
    rows.sort_by(|a, b| {
        match (a.get(&order.column), b.get(&order.column)) {
            (Some(x), Some(y)) => {
                let ord = compare(x, y).unwrap_or(Ordering::Equal);
                match order.direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn insert(&self, table: &str, mut row: Record) -> Result<Record> {
        row.entry("id")
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
        row.entry("created_at")
            .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));

        let mut tables = self.write()?;
        tables.entry(table.to_string()).or_default().push(row.clone());
        Ok(row)
    }

    async fn select(&self, query: &Query) -> Result<Vec<Record>> {
        let tables = self.read()?;
        let mut rows: Vec<Record> = tables
            .get(&query.table)
            .map(|rows| rows.iter().filter(|r| matches(r, query)).cloned().collect())
            .unwrap_or_default();
        sort_rows(&mut rows, query);
        Ok(rows)
    }

    async fn update(&self, query: &Query, patch: Record) -> Result<Vec<Record>> {
        let mut tables = self.write()?;
        let mut updated = Vec::new();
        if let Some(rows) = tables.get_mut(&query.table) {
            for row in rows.iter_mut().filter(|r| matches(r, query)) {
                for (key, value) in &patch {
                    row.insert(key.clone(), value.clone());
                }
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }

    async fn delete(&self, query: &Query) -> Result<Vec<Record>> {
        let mut tables = self.write()?;
        let Some(rows) = tables.get_mut(&query.table) else {
            return Ok(Vec::new());
        };
        let (removed, kept): (Vec<Record>, Vec<Record>) =
            rows.drain(..).partition(|r| matches(r, query));
        *rows = kept;
        Ok(removed)
    }

    async fn health_check(&self) -> bool {
        !self.offline
    }

    fn describe(&self) -> String {
        if self.offline {
            "in-memory store (offline)".to_string()
        } else {
            "in-memory store".to_string()
        }
    }
}
