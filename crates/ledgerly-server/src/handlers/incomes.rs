//! Income entry handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    Json,
};

use super::read_json;
use crate::{current_user, AppError, AppState, SuccessResponse};
use ledgerly_core::models::{Income, IncomeUpdate, NewIncome};

/// GET /api/incomes - List the caller's incomes, most recent first
pub async fn list_incomes(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Vec<Income>>, AppError> {
    let caller = current_user(&request)?;
    let incomes = state.ledger.list_incomes(&caller.id).await?;
    Ok(Json(incomes))
}

/// POST /api/incomes - Record an income
pub async fn create_income(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<(StatusCode, Json<Income>), AppError> {
    let caller = current_user(&request)?;
    let income: NewIncome = read_json(request).await?;
    let created = state.ledger.create_income(&caller.id, &income).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/incomes/:id - Get a single income
pub async fn get_income(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<Income>, AppError> {
    let caller = current_user(&request)?;
    let income = state
        .ledger
        .get_income(&caller.id, &id)
        .await?
        .ok_or_else(|| AppError::not_found(&format!("Income {} not found", id)))?;
    Ok(Json(income))
}

/// PUT /api/incomes/:id - Update any subset of an income's fields
pub async fn update_income(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<Income>, AppError> {
    let caller = current_user(&request)?;
    let update: IncomeUpdate = read_json(request).await?;
    let income = state
        .ledger
        .update_income(&caller.id, &id, &update)
        .await?
        .ok_or_else(|| AppError::not_found(&format!("Income {} not found", id)))?;
    Ok(Json(income))
}

/// DELETE /api/incomes/:id - Delete an income
pub async fn delete_income(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<SuccessResponse>, AppError> {
    let caller = current_user(&request)?;
    if !state.ledger.delete_income(&caller.id, &id).await? {
        return Err(AppError::not_found(&format!("Income {} not found", id)));
    }
    Ok(Json(SuccessResponse { success: true }))
}
