//! Plan analysis: derived statistics and advisory recommendations

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use super::types::{BudgetPlan, Category, CategoryAllocations};
use crate::error::ValidationError;
use crate::money::round_money;

/// The fields of a plan the analyzer reads.
///
/// Every field is optional so a partially written store row deserializes
/// cleanly and is rejected as incomplete instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanFigures {
    #[serde(default)]
    pub income_total: Option<Decimal>,
    #[serde(default)]
    pub savings_goal: Option<Decimal>,
    #[serde(default)]
    pub category_allocations: Option<CategoryAllocations>,
}

impl From<&BudgetPlan> for PlanFigures {
    fn from(plan: &BudgetPlan) -> Self {
        Self {
            income_total: Some(plan.income_total),
            savings_goal: Some(plan.savings_goal),
            category_allocations: Some(plan.category_allocations.clone()),
        }
    }
}

/// Limits that trigger recommendations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisThresholds {
    /// Savings rate, in percent, below which more saving is advised
    pub min_savings_rate_pct: Decimal,
    /// Share of income entertainment may take
    pub max_entertainment_share: Decimal,
    /// Share of income below which food looks underfunded
    pub min_food_share: Decimal,
    /// Share of income housing may take
    pub max_housing_share: Decimal,
}

impl Default for AnalysisThresholds {
    fn default() -> Self {
        Self {
            min_savings_rate_pct: Decimal::new(10, 0),
            max_entertainment_share: Decimal::new(15, 2),
            min_food_share: Decimal::new(20, 2),
            max_housing_share: Decimal::new(35, 2),
        }
    }
}

/// Advice attached to an analysis. Serialized as its message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation {
    RaiseSavings { min_rate_pct: Decimal },
    ReduceEntertainment,
    IncreaseFood,
    ReduceHousing,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RaiseSavings { min_rate_pct } => write!(
                f,
                "Try to raise your savings to at least {}% of your income.",
                min_rate_pct.normalize()
            ),
            Self::ReduceEntertainment => {
                write!(f, "Cut back on entertainment spending to improve your balance.")
            }
            Self::IncreaseFood => {
                write!(f, "You could set aside a bit more for food if you need it.")
            }
            Self::ReduceHousing => write!(f, "Consider reducing housing costs if possible."),
        }
    }
}

impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Ephemeral result of analyzing a plan; never persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub total_spend: Decimal,
    pub savings_rate_pct: Decimal,
    pub highest_category: Category,
    pub lowest_category: Category,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    thresholds: AnalysisThresholds,
}

impl Analyzer {
    pub fn new(thresholds: AnalysisThresholds) -> Self {
        Self { thresholds }
    }

    pub fn analyze(&self, figures: &PlanFigures) -> Result<AnalysisReport, ValidationError> {
        let income = match figures.income_total {
            Some(income) if !income.is_zero() => income,
            _ => return Err(ValidationError::IncompletePlan),
        };
        let allocations = match &figures.category_allocations {
            Some(allocations) if !allocations.is_empty() => allocations,
            _ => return Err(ValidationError::IncompletePlan),
        };
        let savings = figures.savings_goal.unwrap_or(Decimal::ZERO);

        let (highest_category, lowest_category) =
            match (allocations.highest(), allocations.lowest()) {
                (Some(high), Some(low)) => (high, low),
                _ => return Err(ValidationError::IncompletePlan),
            };

        let savings_rate_pct = savings
            .checked_div(income)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map(round_money)
            .ok_or(ValidationError::AmountTooLarge)?;

        let t = &self.thresholds;
        let mut recommendations = Vec::new();
        if savings_rate_pct < t.min_savings_rate_pct {
            recommendations.push(Recommendation::RaiseSavings {
                min_rate_pct: t.min_savings_rate_pct,
            });
        }
        if allocations.get(Category::Entertainment) > income * t.max_entertainment_share {
            recommendations.push(Recommendation::ReduceEntertainment);
        }
        if allocations.get(Category::Food) < income * t.min_food_share {
            recommendations.push(Recommendation::IncreaseFood);
        }
        if allocations.get(Category::Housing) > income * t.max_housing_share {
            recommendations.push(Recommendation::ReduceHousing);
        }

        Ok(AnalysisReport {
            total_spend: allocations.total(),
            savings_rate_pct,
            highest_category,
            lowest_category,
            recommendations,
        })
    }
}

/// Analyze with the default thresholds
pub fn analyze(figures: &PlanFigures) -> Result<AnalysisReport, ValidationError> {
    Analyzer::default().analyze(figures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::allocator::generate_plan;
    use rust_decimal_macros::dec;

    fn figures(income: Decimal, savings: Decimal, entries: &[(Category, Decimal)]) -> PlanFigures {
        PlanFigures {
            income_total: Some(income),
            savings_goal: Some(savings),
            category_allocations: Some(entries.iter().copied().collect()),
        }
    }

    #[test]
    fn test_all_recommendations_in_order() {
        let report = analyze(&figures(
            dec!(5000),
            dec!(200),
            &[
                (Category::Food, dec!(900)),
                (Category::Entertainment, dec!(900)),
                (Category::Housing, dec!(2000)),
            ],
        ))
        .unwrap();

        assert_eq!(
            report.recommendations,
            vec![
                Recommendation::RaiseSavings {
                    min_rate_pct: dec!(10)
                },
                Recommendation::ReduceEntertainment,
                Recommendation::IncreaseFood,
                Recommendation::ReduceHousing,
            ]
        );
        assert_eq!(report.savings_rate_pct, dec!(4.00));
        assert_eq!(report.total_spend, dec!(3800));
        assert_eq!(report.highest_category, Category::Housing);
        assert_eq!(report.lowest_category, Category::Food);
    }

    #[test]
    fn test_empty_allocations_are_incomplete() {
        let err = analyze(&figures(dec!(5000), dec!(200), &[])).unwrap_err();
        assert_eq!(err, ValidationError::IncompletePlan);
        assert_eq!(err.to_string(), "incomplete plan data");
    }

    #[test]
    fn test_missing_or_zero_income_is_incomplete() {
        let mut f = figures(dec!(0), dec!(0), &[(Category::Food, dec!(1))]);
        assert_eq!(analyze(&f).unwrap_err(), ValidationError::IncompletePlan);

        f.income_total = None;
        assert_eq!(analyze(&f).unwrap_err(), ValidationError::IncompletePlan);

        assert_eq!(
            analyze(&PlanFigures::default()).unwrap_err(),
            ValidationError::IncompletePlan
        );
    }

    #[test]
    fn test_negative_income_is_still_analyzed() {
        let report = analyze(&figures(
            dec!(-1000),
            dec!(100),
            &[(Category::Food, dec!(400)), (Category::Housing, dec!(100))],
        ))
        .unwrap();
        assert_eq!(report.savings_rate_pct, dec!(-10));
        assert_eq!(report.highest_category, Category::Food);
        assert_eq!(report.lowest_category, Category::Housing);
        assert_eq!(
            report.recommendations[0],
            Recommendation::RaiseSavings {
                min_rate_pct: dec!(10)
            }
        );
    }

    #[test]
    fn test_missing_savings_counts_as_zero() {
        let mut f = figures(dec!(1000), dec!(0), &[(Category::Food, dec!(500))]);
        f.savings_goal = None;
        let report = analyze(&f).unwrap();
        assert_eq!(report.savings_rate_pct, dec!(0.00));
        assert_eq!(
            report.recommendations,
            vec![Recommendation::RaiseSavings {
                min_rate_pct: dec!(10)
            }]
        );
    }

    #[test]
    fn test_generated_plan_with_healthy_savings() {
        let plan = generate_plan(dec!(5000), dec!(1000), 12).unwrap();
        let report = analyze(&PlanFigures::from(&plan)).unwrap();

        assert_eq!(report.savings_rate_pct, dec!(20.00));
        assert_eq!(report.total_spend, dec!(4000.00));
        assert_eq!(report.highest_category, Category::Food);
        // entertainment and other tie at 400; entertainment comes first
        assert_eq!(report.lowest_category, Category::Entertainment);
        // food is 1400, above 20% of 5000
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_savings_rate_rounds_to_cents() {
        let report = analyze(&figures(
            dec!(3000),
            dec!(100),
            &[(Category::Food, dec!(1000))],
        ))
        .unwrap();
        // 100 / 3000 * 100 = 3.333...
        assert_eq!(report.savings_rate_pct, dec!(3.33));
    }

    #[test]
    fn test_custom_thresholds() {
        let analyzer = Analyzer::new(AnalysisThresholds {
            min_savings_rate_pct: dec!(25),
            ..AnalysisThresholds::default()
        });
        let report = analyzer
            .analyze(&figures(
                dec!(1000),
                dec!(200),
                &[(Category::Food, dec!(400)), (Category::Housing, dec!(300))],
            ))
            .unwrap();
        assert_eq!(
            report.recommendations,
            vec![Recommendation::RaiseSavings {
                min_rate_pct: dec!(25)
            }]
        );
    }

    #[test]
    fn test_report_serializes_recommendations_as_text() {
        let report = analyze(&figures(
            dec!(1000),
            dec!(0),
            &[(Category::Food, dec!(500))],
        ))
        .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["highest_category"], "food");
        assert_eq!(
            json["recommendations"][0],
            "Try to raise your savings to at least 10% of your income."
        );
    }

    #[test]
    fn test_figures_deserialize_from_partial_row() {
        let row = serde_json::json!({"id": "abc", "income_total": 1200.5});
        let figures: PlanFigures = serde_json::from_value(row).unwrap();
        assert_eq!(figures.income_total, Some(dec!(1200.5)));
        assert!(figures.category_allocations.is_none());
        assert_eq!(analyze(&figures).unwrap_err(), ValidationError::IncompletePlan);
    }
}
