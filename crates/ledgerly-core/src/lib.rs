//! Ledgerly Core Library
//!
//! Shared functionality for the Ledgerly personal finance backend:
//! - Budget-allocation engine (allocator and analyzer)
//! - Domain models and their validation rules
//! - Range reports over income and expense entries
//! - Pluggable data store (PostgREST-style REST, in-memory)
//! - User-scoped `Ledger` repository over the store

pub mod budget;
pub mod error;
pub mod ledger;
pub mod models;
pub mod money;
pub mod reports;
pub mod store;

pub use budget::{
    analyze, generate_plan, AllocationProfile, AnalysisReport, AnalysisThresholds, Analyzer,
    Allocator, BudgetPlan, Category, CategoryAllocations, PlanFigures, PlanTotals, Recommendation,
};
pub use error::{Error, Result, ValidationError};
pub use ledger::Ledger;
pub use models::{
    BudgetPlanRecord, BudgetPlanRequest, Expense, ExpenseUpdate, Income, IncomeUpdate, NewExpense,
    NewIncome, NewSavingsPlan, NewUser, Period, Profile, ProfileUpdate, RangeReport, Registration,
    SavingsPlan, SavingsPlanUpdate, User, UserPatch,
};
pub use store::{DataStore, MemoryStore, Query, RestStore, StoreClient, StoreConfig};
