//! Stored budget plan operations
//!
//! Plans are generated by the allocator before they reach the ledger; this
//! module only persists and reads them back.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use super::{from_record, to_record, Ledger, BUDGET_PLANS_TABLE};
use crate::budget::{BudgetPlan, CategoryAllocations, PlanFigures, PlanTotals};
use crate::error::Result;
use crate::models::BudgetPlanRecord;
use crate::store::{Direction, Query, Record};

/// Columns produced by the allocator
#[derive(Serialize)]
struct PlanColumns<'a> {
    name: &'a str,
    income_total: Decimal,
    savings_goal: Decimal,
    duration_months: u32,
    category_allocations: &'a CategoryAllocations,
    totals: &'a PlanTotals,
}

impl<'a> PlanColumns<'a> {
    fn new(name: &'a str, plan: &'a BudgetPlan) -> Self {
        Self {
            name: name.trim(),
            income_total: plan.income_total,
            savings_goal: plan.savings_goal,
            duration_months: plan.duration_months,
            category_allocations: &plan.category_allocations,
            totals: &plan.totals,
        }
    }
}

#[derive(Serialize)]
struct BudgetPlanRow<'a> {
    user_id: &'a str,
    #[serde(flatten)]
    columns: PlanColumns<'a>,
    created_at: DateTime<Utc>,
}

impl Ledger {
    pub async fn create_budget_plan(
        &self,
        user_id: &str,
        name: &str,
        plan: &BudgetPlan,
    ) -> Result<BudgetPlanRecord> {
        let row = to_record(&BudgetPlanRow {
            user_id,
            columns: PlanColumns::new(name, plan),
            created_at: plan.created_at,
        })?;
        let record: BudgetPlanRecord = self.insert_as(BUDGET_PLANS_TABLE, row).await?;
        info!(user_id, plan_id = %record.id, months = plan.duration_months, "Stored budget plan");
        Ok(record)
    }

    /// Newest first
    pub async fn list_budget_plans(&self, user_id: &str) -> Result<Vec<BudgetPlanRecord>> {
        self.select_as(
            &Query::table(BUDGET_PLANS_TABLE)
                .eq("user_id", user_id)
                .order_by("created_at", Direction::Descending),
        )
        .await
    }

    pub async fn get_budget_plan(
        &self,
        user_id: &str,
        id: &str,
    ) -> Result<Option<BudgetPlanRecord>> {
        self.get_owned(BUDGET_PLANS_TABLE, user_id, id).await
    }

    /// The analyzer's view of a stored plan. Missing or unreadable columns
    /// come back as `None` rather than failing to parse, so the analyzer
    /// reports the row as incomplete.
    pub async fn get_budget_plan_figures(
        &self,
        user_id: &str,
        id: &str,
    ) -> Result<Option<PlanFigures>> {
        let row: Option<Record> = self.get_owned(BUDGET_PLANS_TABLE, user_id, id).await?;
        let Some(row) = row else {
            return Ok(None);
        };
        match from_record::<PlanFigures>(row) {
            Ok(figures) => Ok(Some(figures)),
            Err(e) => {
                warn!(plan_id = %id, error = %e, "Stored plan has unreadable figures");
                Ok(Some(PlanFigures::default()))
            }
        }
    }

    /// Replace a stored plan with a regenerated one. `created_at` of the
    /// stored record is left as it was.
    pub async fn update_budget_plan(
        &self,
        user_id: &str,
        id: &str,
        name: &str,
        plan: &BudgetPlan,
    ) -> Result<Option<BudgetPlanRecord>> {
        let mut patch = to_record(&PlanColumns::new(name, plan))?;
        patch.insert("updated_at".to_string(), serde_json::to_value(Utc::now())?);
        self.update_owned(BUDGET_PLANS_TABLE, user_id, id, patch)
            .await
    }

    pub async fn delete_budget_plan(&self, user_id: &str, id: &str) -> Result<bool> {
        self.delete_owned(BUDGET_PLANS_TABLE, user_id, id).await
    }
}
