//! Core types for the budget engine

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Spending categories a plan distributes disposable income across.
///
/// Declaration order is the canonical iteration order: it decides which
/// category wins a tie for highest/lowest allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Food,
    Housing,
    Transport,
    Entertainment,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Housing,
        Category::Transport,
        Category::Entertainment,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Housing => "housing",
            Self::Transport => "transport",
            Self::Entertainment => "entertainment",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "housing" => Ok(Self::Housing),
            "transport" => Ok(Self::Transport),
            "entertainment" => Ok(Self::Entertainment),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

/// Monthly amount per category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryAllocations(BTreeMap<Category, Decimal>);

impl CategoryAllocations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: Category, amount: Decimal) {
        self.0.insert(category, amount);
    }

    /// Amount for a category, zero when the category is absent
    pub fn get(&self, category: Category) -> Decimal {
        self.0.get(&category).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn contains(&self, category: Category) -> bool {
        self.0.contains_key(&category)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Entries in canonical category order
    pub fn iter(&self) -> impl Iterator<Item = (Category, Decimal)> + '_ {
        self.0.iter().map(|(c, a)| (*c, *a))
    }

    pub fn total(&self) -> Decimal {
        self.0.values().sum()
    }

    /// Category with the largest amount; the first one wins a tie
    pub fn highest(&self) -> Option<Category> {
        let mut best: Option<(Category, Decimal)> = None;
        for (category, amount) in self.iter() {
            match best {
                Some((_, top)) if amount <= top => {}
                _ => best = Some((category, amount)),
            }
        }
        best.map(|(c, _)| c)
    }

    /// Category with the smallest amount; the first one wins a tie
    pub fn lowest(&self) -> Option<Category> {
        let mut best: Option<(Category, Decimal)> = None;
        for (category, amount) in self.iter() {
            match best {
                Some((_, bottom)) if amount >= bottom => {}
                _ => best = Some((category, amount)),
            }
        }
        best.map(|(c, _)| c)
    }
}

impl FromIterator<(Category, Decimal)> for CategoryAllocations {
    fn from_iter<I: IntoIterator<Item = (Category, Decimal)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Aggregates over the full plan duration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanTotals {
    pub total_income: Decimal,
    pub total_spend: Decimal,
    pub total_savings: Decimal,
    /// Always `total_income - total_spend - total_savings`
    pub balance_final: Decimal,
}

/// Output of the allocator
///
/// `created_at` is stamped at generation time and carried unchanged into the
/// stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetPlan {
    pub income_total: Decimal,
    pub savings_goal: Decimal,
    pub duration_months: u32,
    pub category_allocations: CategoryAllocations,
    pub totals: PlanTotals,
    pub created_at: DateTime<Utc>,
}

impl BudgetPlan {
    /// Income left after the savings goal, the base of the allocation
    pub fn disposable(&self) -> Decimal {
        self.income_total - self.savings_goal
    }
}
