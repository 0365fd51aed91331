//! Budget-allocation engine
//!
//! Two pure components: the [`Allocator`] turns income, savings goal, and
//! duration into a [`BudgetPlan`], and the [`Analyzer`] derives statistics and
//! recommendations from a plan. Neither touches the data store.

mod allocator;
mod analyzer;
mod profile;
mod types;

pub use allocator::{generate_plan, Allocator};
pub use analyzer::{
    analyze, AnalysisReport, AnalysisThresholds, Analyzer, PlanFigures, Recommendation,
};
pub use profile::AllocationProfile;
pub use types::{BudgetPlan, Category, CategoryAllocations, PlanTotals};
