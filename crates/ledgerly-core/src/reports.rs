//! Aggregate reports over ledger entries

use rust_decimal::Decimal;

use crate::models::{Period, RangeReport};
use crate::money::round_money;

/// Build a range report from the income and expense amounts already filtered
/// to `period`.
pub fn summarize<I, E>(period: Period, incomes: I, expenses: E) -> RangeReport
where
    I: IntoIterator<Item = Decimal>,
    E: IntoIterator<Item = Decimal>,
{
    let total_income: Decimal = incomes.into_iter().sum();
    let total_expense: Decimal = expenses.into_iter().sum();
    let balance = total_income - total_expense;

    RangeReport {
        period,
        total_income: round_money(total_income),
        total_expense: round_money(total_expense),
        total_savings: round_money(balance.max(Decimal::ZERO)),
        balance: round_money(balance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn january() -> Period {
        Period::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_surplus() {
        let report = summarize(
            january(),
            [dec!(2500), dec!(300.55)],
            [dec!(1200.10), dec!(99.99)],
        );
        assert_eq!(report.total_income, dec!(2800.55));
        assert_eq!(report.total_expense, dec!(1300.09));
        assert_eq!(report.total_savings, dec!(1500.46));
        assert_eq!(report.balance, dec!(1500.46));
    }

    #[test]
    fn test_deficit_clamps_savings_at_zero() {
        let report = summarize(january(), [dec!(100)], [dec!(250.5)]);
        assert_eq!(report.total_savings, dec!(0.00));
        assert_eq!(report.balance, dec!(-150.50));
    }

    #[test]
    fn test_empty_period() {
        let report = summarize(january(), [], []);
        assert_eq!(report.total_income, Decimal::ZERO);
        assert_eq!(report.balance, Decimal::ZERO);
        assert_eq!(report.total_income.to_string(), "0.00");
    }
}
