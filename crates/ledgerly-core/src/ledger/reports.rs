//! Report queries

use chrono::NaiveDate;

use super::Ledger;
use crate::error::Result;
use crate::models::{Period, RangeReport};
use crate::reports::summarize;

impl Ledger {
    /// Income, expense, savings, and balance totals for `[from, to]`
    pub async fn range_report(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<RangeReport> {
        let period = Period::new(from, to)?;
        let incomes = self.incomes_between(user_id, &period).await?;
        let expenses = self.expenses_between(user_id, &period).await?;

        Ok(summarize(
            period,
            incomes.iter().map(|i| i.amount),
            expenses.iter().map(|e| e.amount),
        ))
    }
}
