//! Expense entry handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    Json,
};

use super::read_json;
use crate::{current_user, AppError, AppState, SuccessResponse};
use ledgerly_core::models::{Expense, ExpenseUpdate, NewExpense};

/// GET /api/expenses - List the caller's expenses, most recent first
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Vec<Expense>>, AppError> {
    let caller = current_user(&request)?;
    Ok(Json(state.ledger.list_expenses(&caller.id).await?))
}

/// POST /api/expenses - Record an expense
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<(StatusCode, Json<Expense>), AppError> {
    let caller = current_user(&request)?;
    let expense: NewExpense = read_json(request).await?;
    let created = state.ledger.create_expense(&caller.id, &expense).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/expenses/:id - Get a single expense
pub async fn get_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<Expense>, AppError> {
    let caller = current_user(&request)?;
    state
        .ledger
        .get_expense(&caller.id, &id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(&format!("Expense {} not found", id)))
}

/// PUT /api/expenses/:id - Update any subset of an expense's fields
pub async fn update_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<Expense>, AppError> {
    let caller = current_user(&request)?;
    let update: ExpenseUpdate = read_json(request).await?;
    state
        .ledger
        .update_expense(&caller.id, &id, &update)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(&format!("Expense {} not found", id)))
}

/// DELETE /api/expenses/:id - Delete an expense
pub async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<SuccessResponse>, AppError> {
    let caller = current_user(&request)?;
    let deleted = state.ledger.delete_expense(&caller.id, &id).await?;
    if !deleted {
        return Err(AppError::not_found(&format!("Expense {} not found", id)));
    }
    Ok(Json(SuccessResponse { success: true }))
}
