//! Health check handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use ledgerly_core::DataStore;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub store: StoreHealth,
}

#[derive(Serialize)]
pub struct StoreHealth {
    pub backend: String,
    pub persistent: bool,
    pub reachable: bool,
}

/// GET /health - Liveness plus data store reachability
///
/// The server is up whenever this answers; an unreachable store is reported
/// as `degraded` rather than failing the check.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let store = state.ledger.store();
    let reachable = state.ledger.health_check().await;

    Json(HealthResponse {
        status: if reachable { "ok" } else { "degraded" },
        store: StoreHealth {
            backend: store.describe(),
            persistent: store.is_persistent(),
            reachable,
        },
    })
}
