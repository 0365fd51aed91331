//! Budget plan command implementations (plan, analyze)

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use ledgerly_core::{AnalysisReport, Analyzer, Allocator, BudgetPlan, PlanFigures};
use rust_decimal::Decimal;

const RULE: &str = "   ─────────────────────────────────────────────────────────────";

/// A plan formatted as a table
pub struct PlanTable<'a>(pub &'a BudgetPlan);

impl fmt::Display for PlanTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.0;
        writeln!(f)?;
        writeln!(f, "💰 Budget Plan ({} months)", plan.duration_months)?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "   Monthly income:     {:>12.2}", plan.income_total)?;
        writeln!(f, "   Savings goal:       {:>12.2}", plan.savings_goal)?;
        writeln!(f, "   To allocate:        {:>12.2}", plan.disposable())?;
        writeln!(f)?;
        writeln!(f, "   {:<16} {:>12}", "Category", "Monthly")?;
        for (category, amount) in plan.category_allocations.iter() {
            writeln!(f, "   {:<16} {:>12.2}", category.as_str(), amount)?;
        }
        writeln!(f)?;
        writeln!(f, "   Over the full plan:")?;
        writeln!(f, "   Income:             {:>12.2}", plan.totals.total_income)?;
        writeln!(f, "   Spend:              {:>12.2}", plan.totals.total_spend)?;
        writeln!(f, "   Savings:            {:>12.2}", plan.totals.total_savings)?;
        writeln!(f, "   Balance:            {:>12.2}", plan.totals.balance_final)
    }
}

pub struct AnalysisSummary<'a>(pub &'a AnalysisReport);

impl fmt::Display for AnalysisSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f)?;
        writeln!(f, "🔍 Plan Analysis")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "   Monthly spend:      {:>12.2}", report.total_spend)?;
        writeln!(f, "   Savings rate:       {:>11.2}%", report.savings_rate_pct)?;
        writeln!(f, "   Highest category:   {:>12}", report.highest_category.as_str())?;
        writeln!(f, "   Lowest category:    {:>12}", report.lowest_category.as_str())?;
        writeln!(f)?;
        if report.recommendations.is_empty() {
            return writeln!(f, "   ✅ No recommendations - the plan looks balanced.");
        }
        writeln!(f, "   Recommendations:")?;
        for recommendation in &report.recommendations {
            writeln!(f, "   • {}", recommendation)?;
        }
        Ok(())
    }
}

/// Parse the analyzer's view of a plan from a JSON file
///
/// Missing fields stay `None` so the analyzer can report them as incomplete.
pub fn load_plan_figures(path: &Path) -> Result<PlanFigures> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read plan file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse plan file {}", path.display()))
}

pub fn cmd_plan(income: Decimal, savings: Decimal, months: i64, json: bool) -> Result<()> {
    let plan = Allocator::default().generate_plan(income, savings, months)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", PlanTable(&plan));
    }
    Ok(())
}

pub fn cmd_analyze(file: &Path, json: bool) -> Result<()> {
    let figures = load_plan_figures(file)?;
    let report = Analyzer::default().analyze(&figures)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", AnalysisSummary(&report));
    }
    Ok(())
}
