//! Expense entry operations

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use super::{to_record, Ledger, EXPENSES_TABLE};
use crate::error::Result;
use crate::models::{Expense, ExpenseUpdate, NewExpense, Period};
use crate::store::{Direction, Query};

#[derive(Serialize)]
struct ExpenseRow<'a> {
    user_id: &'a str,
    #[serde(flatten)]
    entry: &'a NewExpense,
    created_at: DateTime<Utc>,
}

impl Ledger {
    pub async fn create_expense(&self, user_id: &str, expense: &NewExpense) -> Result<Expense> {
        expense.validate()?;
        let row = to_record(&ExpenseRow {
            user_id,
            entry: expense,
            created_at: Utc::now(),
        })?;
        let created: Expense = self.insert_as(EXPENSES_TABLE, row).await?;
        debug!(user_id, expense_id = %created.id, "Created expense");
        Ok(created)
    }

    /// All expenses of a user, most recent date first
    pub async fn list_expenses(&self, user_id: &str) -> Result<Vec<Expense>> {
        self.select_as(
            &Query::table(EXPENSES_TABLE)
                .eq("user_id", user_id)
                .order_by("date", Direction::Descending),
        )
        .await
    }

    pub async fn get_expense(&self, user_id: &str, id: &str) -> Result<Option<Expense>> {
        self.get_owned(EXPENSES_TABLE, user_id, id).await
    }

    pub async fn update_expense(
        &self,
        user_id: &str,
        id: &str,
        update: &ExpenseUpdate,
    ) -> Result<Option<Expense>> {
        update.validate()?;
        self.update_owned(EXPENSES_TABLE, user_id, id, to_record(update)?)
            .await
    }

    pub async fn delete_expense(&self, user_id: &str, id: &str) -> Result<bool> {
        self.delete_owned(EXPENSES_TABLE, user_id, id).await
    }

    /// Expenses dated within `period`, both ends included
    pub async fn expenses_between(&self, user_id: &str, period: &Period) -> Result<Vec<Expense>> {
        self.select_as(
            &Query::table(EXPENSES_TABLE)
                .eq("user_id", user_id)
                .gte("date", period.from.to_string())
                .lte("date", period.to.to_string())
                .order_by("date", Direction::Ascending),
        )
        .await
    }
}
