//! PostgREST-compatible REST store
//!
//! Tables live at `{base}/rest/v1/{table}`. Filters travel as query
//! parameters (`user_id=eq.abc`, `date=gte.2025-01-01`), ordering as
//! `order=date.desc`. Every request carries the service key both as `apikey`
//! and as a bearer token.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use tracing::debug;

use super::{DataStore, Query, Record};
use crate::error::{Error, Result};

#[derive(Clone)]
pub struct RestStore {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    /// Same as `authorized`, asking the store to echo affected rows back
    fn returning(&self, builder: RequestBuilder) -> RequestBuilder {
        self.authorized(builder)
            .header("Prefer", "return=representation")
    }

    async fn rows(response: Response, table: &str) -> Result<Vec<Record>> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Store(format!(
                "{} request failed with {}: {}",
                table, status, body
            )));
        }
        Ok(response.json::<Vec<Record>>().await?)
    }
}

/// Query-string pairs for a query's filters and ordering
pub(crate) fn query_params(query: &Query) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = query
        .filters
        .iter()
        .map(|f| {
            (
                f.column.clone(),
                format!("{}.{}", f.op.as_str(), filter_value(&f.value)),
            )
        })
        .collect();

    if let Some(order) = &query.order {
        params.push((
            "order".to_string(),
            format!("{}.{}", order.column, order.direction.as_str()),
        ));
    }
    params
}

fn filter_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

#[async_trait]
impl DataStore for RestStore {
    async fn insert(&self, table: &str, row: Record) -> Result<Record> {
        debug!(table, "Store insert");
        let response = self
            .returning(self.http_client.post(self.table_url(table)))
            .json(&row)
            .send()
            .await?;

        Self::rows(response, table)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Store(format!("insert into {} returned no row", table)))
    }

    async fn select(&self, query: &Query) -> Result<Vec<Record>> {
        debug!(table = %query.table, filters = query.filters.len(), "Store select");
        let response = self
            .authorized(self.http_client.get(self.table_url(&query.table)))
            .query(&[("select", "*")])
            .query(&query_params(query))
            .send()
            .await?;

        Self::rows(response, &query.table).await
    }

    async fn update(&self, query: &Query, patch: Record) -> Result<Vec<Record>> {
        debug!(table = %query.table, "Store update");
        let response = self
            .returning(self.http_client.patch(self.table_url(&query.table)))
            .query(&query_params(query))
            .json(&patch)
            .send()
            .await?;

        Self::rows(response, &query.table).await
    }

    async fn delete(&self, query: &Query) -> Result<Vec<Record>> {
        debug!(table = %query.table, "Store delete");
        let response = self
            .returning(self.http_client.delete(self.table_url(&query.table)))
            .query(&query_params(query))
            .send()
            .await?;

        Self::rows(response, &query.table).await
    }

    async fn health_check(&self) -> bool {
        match self
            .authorized(self.http_client.get(format!("{}/rest/v1/", self.base_url)))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!(error = %e, "Store health check failed");
                false
            }
        }
    }

    fn describe(&self) -> String {
        format!("REST store at {}", self.base_url)
    }
}
