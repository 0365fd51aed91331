//! Budget plan handlers
//!
//! Plans are produced by the allocator from income, savings goal, and
//! duration. Stored plans can be regenerated in place and analyzed.

use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use super::read_json;
use crate::{current_user, AppError, AppState, SuccessResponse};
use ledgerly_core::budget::{AnalysisReport, BudgetPlan};
use ledgerly_core::models::{BudgetPlanRecord, BudgetPlanRequest};

/// Request body for previewing a plan without storing it
#[derive(Debug, Deserialize)]
pub struct PlanPreviewRequest {
    pub income_total: Decimal,
    /// Missing means no savings
    #[serde(default)]
    pub savings_goal: Option<Decimal>,
    pub duration_months: i64,
}

/// POST /api/budget-plans/preview - Run the allocator without persisting
pub async fn preview_budget_plan(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<BudgetPlan>, AppError> {
    let req: PlanPreviewRequest = read_json(request).await?;
    let plan = state.allocator.generate_plan(
        req.income_total,
        req.savings_goal.unwrap_or(Decimal::ZERO),
        req.duration_months,
    )?;
    Ok(Json(plan))
}

/// GET /api/budget-plans - List stored plans, newest first
pub async fn list_budget_plans(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Vec<BudgetPlanRecord>>, AppError> {
    let caller = current_user(&request)?;
    Ok(Json(state.ledger.list_budget_plans(&caller.id).await?))
}

/// POST /api/budget-plans - Generate a plan and store it
pub async fn create_budget_plan(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<(StatusCode, Json<BudgetPlanRecord>), AppError> {
    let caller = current_user(&request)?;
    let req: BudgetPlanRequest = read_json(request).await?;

    let plan = req.generate(&state.allocator)?;
    let record = state
        .ledger
        .create_budget_plan(&caller.id, &req.name, &plan)
        .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/budget-plans/:id - Get a stored plan
pub async fn get_budget_plan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<BudgetPlanRecord>, AppError> {
    let caller = current_user(&request)?;
    state
        .ledger
        .get_budget_plan(&caller.id, &id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(&format!("Budget plan {} not found", id)))
}

/// PUT /api/budget-plans/:id - Regenerate a stored plan from new inputs
pub async fn update_budget_plan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<BudgetPlanRecord>, AppError> {
    let caller = current_user(&request)?;
    let req: BudgetPlanRequest = read_json(request).await?;

    let plan = req.generate(&state.allocator)?;
    state
        .ledger
        .update_budget_plan(&caller.id, &id, &req.name, &plan)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(&format!("Budget plan {} not found", id)))
}

/// DELETE /api/budget-plans/:id - Delete a stored plan
pub async fn delete_budget_plan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<SuccessResponse>, AppError> {
    let caller = current_user(&request)?;
    if !state.ledger.delete_budget_plan(&caller.id, &id).await? {
        return Err(AppError::not_found(&format!("Budget plan {} not found", id)));
    }
    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/budget-plans/:id/analysis - Statistics and recommendations for a
/// stored plan
pub async fn analyze_budget_plan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<AnalysisReport>, AppError> {
    let caller = current_user(&request)?;
    let figures = state
        .ledger
        .get_budget_plan_figures(&caller.id, &id)
        .await?
        .ok_or_else(|| AppError::not_found(&format!("Budget plan {} not found", id)))?;

    let report = state.analyzer.analyze(&figures)?;
    debug!(
        plan_id = %id,
        recommendations = report.recommendations.len(),
        "Analyzed budget plan"
    );
    Ok(Json(report))
}
