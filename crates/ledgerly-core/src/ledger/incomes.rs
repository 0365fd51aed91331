//! Income entry operations

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use super::{to_record, Ledger, INCOMES_TABLE};
use crate::error::Result;
use crate::models::{Income, IncomeUpdate, NewIncome, Period};
use crate::store::{Direction, Query};

#[derive(Serialize)]
struct IncomeRow<'a> {
    user_id: &'a str,
    #[serde(flatten)]
    entry: &'a NewIncome,
    created_at: DateTime<Utc>,
}

impl Ledger {
    pub async fn create_income(&self, user_id: &str, income: &NewIncome) -> Result<Income> {
        income.validate()?;
        let row = to_record(&IncomeRow {
            user_id,
            entry: income,
            created_at: Utc::now(),
        })?;
        let created: Income = self.insert_as(INCOMES_TABLE, row).await?;
        debug!(user_id, income_id = %created.id, "Created income");
        Ok(created)
    }

    /// All incomes of a user, most recent date first
    pub async fn list_incomes(&self, user_id: &str) -> Result<Vec<Income>> {
        self.select_as(
            &Query::table(INCOMES_TABLE)
                .eq("user_id", user_id)
                .order_by("date", Direction::Descending),
        )
        .await
    }

    pub async fn get_income(&self, user_id: &str, id: &str) -> Result<Option<Income>> {
        self.get_owned(INCOMES_TABLE, user_id, id).await
    }

    pub async fn update_income(
        &self,
        user_id: &str,
        id: &str,
        update: &IncomeUpdate,
    ) -> Result<Option<Income>> {
        update.validate()?;
        self.update_owned(INCOMES_TABLE, user_id, id, to_record(update)?)
            .await
    }

    pub async fn delete_income(&self, user_id: &str, id: &str) -> Result<bool> {
        self.delete_owned(INCOMES_TABLE, user_id, id).await
    }

    /// Incomes dated within `period`, both ends included
    pub async fn incomes_between(&self, user_id: &str, period: &Period) -> Result<Vec<Income>> {
        self.select_as(
            &Query::table(INCOMES_TABLE)
                .eq("user_id", user_id)
                .gte("date", period.from.to_string())
                .lte("date", period.to.to_string())
                .order_by("date", Direction::Ascending),
        )
        .await
    }
}
