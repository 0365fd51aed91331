//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod auth;
pub mod budget_plans;
pub mod expenses;
pub mod health;
pub mod incomes;
pub mod profile;
pub mod reports;
pub mod savings_plans;

// Re-export all handlers for use in router
pub use auth::*;
pub use budget_plans::*;
pub use expenses::*;
pub use health::*;
pub use incomes::*;
pub use profile::*;
pub use reports::*;
pub use savings_plans::*;

use axum::extract::Request;
use serde::de::DeserializeOwned;

use crate::{AppError, MAX_BODY_SIZE};

/// Read and parse a JSON request body
pub(crate) async fn read_json<T: DeserializeOwned>(request: Request) -> Result<T, AppError> {
    let bytes = axum::body::to_bytes(request.into_body(), MAX_BODY_SIZE)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body"))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| AppError::bad_request(&format!("Invalid JSON: {}", e)))
}
