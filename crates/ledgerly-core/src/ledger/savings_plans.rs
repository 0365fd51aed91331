//! Savings plan operations

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{to_record, Ledger, SAVINGS_PLANS_TABLE};
use crate::error::Result;
use crate::models::{NewSavingsPlan, SavingsPlan, SavingsPlanUpdate};
use crate::store::{Direction, Query};

#[derive(Serialize)]
struct SavingsPlanRow<'a> {
    user_id: &'a str,
    #[serde(flatten)]
    plan: &'a NewSavingsPlan,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Ledger {
    pub async fn create_savings_plan(
        &self,
        user_id: &str,
        plan: &NewSavingsPlan,
    ) -> Result<SavingsPlan> {
        plan.validate()?;
        let now = Utc::now();
        let row = to_record(&SavingsPlanRow {
            user_id,
            plan,
            created_at: now,
            updated_at: now,
        })?;
        self.insert_as(SAVINGS_PLANS_TABLE, row).await
    }

    /// Newest first
    pub async fn list_savings_plans(&self, user_id: &str) -> Result<Vec<SavingsPlan>> {
        self.select_as(
            &Query::table(SAVINGS_PLANS_TABLE)
                .eq("user_id", user_id)
                .order_by("created_at", Direction::Descending),
        )
        .await
    }

    pub async fn get_savings_plan(&self, user_id: &str, id: &str) -> Result<Option<SavingsPlan>> {
        self.get_owned(SAVINGS_PLANS_TABLE, user_id, id).await
    }

    /// Partial update; the date window is re-checked against the stored plan
    pub async fn update_savings_plan(
        &self,
        user_id: &str,
        id: &str,
        update: &SavingsPlanUpdate,
    ) -> Result<Option<SavingsPlan>> {
        update.validate()?;
        let Some(current) = self.get_savings_plan(user_id, id).await? else {
            return Ok(None);
        };
        update.validate_against(&current)?;

        let mut patch = to_record(update)?;
        patch.insert("updated_at".to_string(), serde_json::to_value(Utc::now())?);
        self.update_owned(SAVINGS_PLANS_TABLE, user_id, id, patch)
            .await
    }

    pub async fn delete_savings_plan(&self, user_id: &str, id: &str) -> Result<bool> {
        self.delete_owned(SAVINGS_PLANS_TABLE, user_id, id).await
    }
}
