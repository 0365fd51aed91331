//! Savings plan handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    Json,
};

use super::read_json;
use crate::{current_user, AppError, AppState, SuccessResponse};
use ledgerly_core::models::{NewSavingsPlan, SavingsPlan, SavingsPlanUpdate};

/// GET /api/savings-plans - List savings plans, newest first
pub async fn list_savings_plans(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Vec<SavingsPlan>>, AppError> {
    let caller = current_user(&request)?;
    Ok(Json(state.ledger.list_savings_plans(&caller.id).await?))
}

/// POST /api/savings-plans - Create a savings plan
pub async fn create_savings_plan(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<(StatusCode, Json<SavingsPlan>), AppError> {
    let caller = current_user(&request)?;
    let plan: NewSavingsPlan = read_json(request).await?;
    let created = state.ledger.create_savings_plan(&caller.id, &plan).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/savings-plans/:id - Get a single savings plan
pub async fn get_savings_plan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<SavingsPlan>, AppError> {
    let caller = current_user(&request)?;
    state
        .ledger
        .get_savings_plan(&caller.id, &id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(&format!("Savings plan {} not found", id)))
}

/// PUT /api/savings-plans/:id - Partially update a savings plan
pub async fn update_savings_plan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<SavingsPlan>, AppError> {
    let caller = current_user(&request)?;
    let update: SavingsPlanUpdate = read_json(request).await?;
    state
        .ledger
        .update_savings_plan(&caller.id, &id, &update)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(&format!("Savings plan {} not found", id)))
}

/// DELETE /api/savings-plans/:id - Delete a savings plan
pub async fn delete_savings_plan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<SuccessResponse>, AppError> {
    let caller = current_user(&request)?;
    if !state.ledger.delete_savings_plan(&caller.id, &id).await? {
        return Err(AppError::not_found(&format!(
            "Savings plan {} not found",
            id
        )));
    }
    Ok(Json(SuccessResponse { success: true }))
}
