//! Report handlers

use std::sync::Arc;

use axum::{
    extract::{Query, Request, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{current_user, AppError, AppState};
use ledgerly_core::models::RangeReport;

/// Query parameters for the range report
#[derive(Debug, Deserialize)]
pub struct RangeReportQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

fn parse_date(value: Option<&str>, name: &str) -> Result<NaiveDate, AppError> {
    let value =
        value.ok_or_else(|| AppError::bad_request(&format!("Missing {} date", name)))?;
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::bad_request(&format!("Invalid {} date format (use YYYY-MM-DD)", name))
    })
}

/// GET /api/reports/range - Income, expense, and savings totals for a period
pub async fn report_range(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RangeReportQuery>,
    request: Request,
) -> Result<Json<RangeReport>, AppError> {
    let caller = current_user(&request)?;

    let from = parse_date(params.from.as_deref(), "from")?;
    let to = parse_date(params.to.as_deref(), "to")?;

    let report = state.ledger.range_report(&caller.id, from, to).await?;
    Ok(Json(report))
}
