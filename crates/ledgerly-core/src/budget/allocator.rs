//! Budget allocator
//!
//! Splits a monthly income, minus the savings goal, across the categories of
//! an [`AllocationProfile`] and projects the totals over the plan duration.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;

use super::profile::AllocationProfile;
use super::types::{BudgetPlan, CategoryAllocations, PlanTotals};
use crate::error::ValidationError;
use crate::money::round_to;

/// Stateless plan generator; cheap to share across requests
#[derive(Debug, Clone, Default)]
pub struct Allocator {
    profile: AllocationProfile,
}

impl Allocator {
    pub fn new(profile: AllocationProfile) -> Self {
        Self { profile }
    }

    /// Generate a plan from raw user input
    ///
    /// Rules are checked in a fixed order and the first violation is
    /// returned: income, duration, negative savings, savings above income.
    pub fn generate_plan(
        &self,
        income_total: Decimal,
        savings_goal: Decimal,
        duration_months: i64,
    ) -> Result<BudgetPlan, ValidationError> {
        if income_total <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveIncome);
        }
        if duration_months <= 0 {
            return Err(ValidationError::NonPositiveDuration);
        }
        if savings_goal < Decimal::ZERO {
            return Err(ValidationError::NegativeSavingsGoal);
        }
        if savings_goal > income_total {
            return Err(ValidationError::SavingsGoalExceedsIncome);
        }
        let months = u32::try_from(duration_months)
            .map_err(|_| ValidationError::field("duration_months", "is too large"))?;

        let dp = self.profile.precision();
        let income_total = round_to(income_total, dp);
        let savings_goal = round_to(savings_goal, dp);
        let disposable = income_total - savings_goal;

        let category_allocations = self.distribute(disposable)?;
        let totals = project_totals(
            income_total,
            savings_goal,
            category_allocations.total(),
            months,
            dp,
        )?;

        Ok(BudgetPlan {
            income_total,
            savings_goal,
            duration_months: months,
            category_allocations,
            totals,
            created_at: Utc::now(),
        })
    }

    /// Apply the weight table, then push the whole rounding residual onto a
    /// single category so the amounts add up to `disposable` exactly.
    fn distribute(&self, disposable: Decimal) -> Result<CategoryAllocations, ValidationError> {
        let dp = self.profile.precision();
        let mut allocations = CategoryAllocations::new();

        for (category, weight) in self.profile.weights() {
            let share = disposable
                .checked_mul(*weight)
                .ok_or(ValidationError::AmountTooLarge)?;
            allocations.insert(*category, round_to(share, dp));
        }

        let residual = disposable - allocations.total();
        if !residual.is_zero() {
            let target = self.profile.residual_target();
            debug!(%residual, category = %target, "Reconciling allocation rounding");
            let adjusted = round_to(allocations.get(target) + residual, dp);
            allocations.insert(target, adjusted);
        }

        Ok(allocations)
    }
}

fn project_totals(
    income_total: Decimal,
    savings_goal: Decimal,
    monthly_spend: Decimal,
    months: u32,
    dp: u32,
) -> Result<PlanTotals, ValidationError> {
    let months = Decimal::from(months);
    let over_duration = |monthly: Decimal| {
        monthly
            .checked_mul(months)
            .map(|v| round_to(v, dp))
            .ok_or(ValidationError::AmountTooLarge)
    };

    let total_income = over_duration(income_total)?;
    let total_spend = over_duration(monthly_spend)?;
    let total_savings = over_duration(savings_goal)?;
    let balance_final = round_to(total_income - total_spend - total_savings, dp);

    Ok(PlanTotals {
        total_income,
        total_spend,
        total_savings,
        balance_final,
    })
}

/// Generate a plan with the standard profile
pub fn generate_plan(
    income_total: Decimal,
    savings_goal: Decimal,
    duration_months: i64,
) -> Result<BudgetPlan, ValidationError> {
    Allocator::default().generate_plan(income_total, savings_goal, duration_months)
}
