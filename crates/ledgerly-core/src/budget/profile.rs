//! Allocation profiles: category weights plus rounding precision

use rust_decimal::Decimal;

use super::types::Category;
use crate::error::{Error, Result};
use crate::money::MINOR_UNIT_DP;

/// Upper bound on the precision a profile may round to
const MAX_PRECISION_DP: u32 = 8;

/// Immutable weight table owned by an [`Allocator`](super::Allocator).
///
/// A profile can only be built with weights that sum to exactly 1.0, so a
/// plan generated from it never silently drops or invents money.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationProfile {
    weights: Vec<(Category, Decimal)>,
    precision: u32,
}

impl AllocationProfile {
    /// Build a profile, checking the weight table
    ///
    /// Fails with [`Error::Configuration`] when the table is empty, names a
    /// category twice, has a negative weight, does not sum to 1.0, or asks
    /// for an unreasonable precision.
    pub fn new(weights: Vec<(Category, Decimal)>, precision: u32) -> Result<Self> {
        if weights.is_empty() {
            return Err(Error::Configuration(
                "category weight table is empty".to_string(),
            ));
        }

        for (i, (category, weight)) in weights.iter().enumerate() {
            if weight.is_sign_negative() {
                return Err(Error::Configuration(format!(
                    "weight for {} is negative",
                    category
                )));
            }
            if weights[..i].iter().any(|(c, _)| c == category) {
                return Err(Error::Configuration(format!(
                    "category {} appears more than once",
                    category
                )));
            }
        }

        let sum: Decimal = weights.iter().map(|(_, w)| *w).sum();
        if sum != Decimal::ONE {
            return Err(Error::Configuration(format!(
                "category weights sum to {}, expected 1",
                sum
            )));
        }

        if precision > MAX_PRECISION_DP {
            return Err(Error::Configuration(format!(
                "precision of {} decimal places is not supported",
                precision
            )));
        }

        Ok(Self { weights, precision })
    }

    /// Default table: food 35%, housing 30%, transport 15%,
    /// entertainment 10%, other 10%, rounded to cents
    pub fn standard() -> Self {
        Self {
            weights: standard_weights(),
            precision: MINOR_UNIT_DP,
        }
    }

    /// Weights in the table's defined order
    pub fn weights(&self) -> &[(Category, Decimal)] {
        &self.weights
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Category that absorbs the rounding residual: `Other` when the table
    /// has it, otherwise the first entry
    pub fn residual_target(&self) -> Category {
        if self.weights.iter().any(|(c, _)| *c == Category::Other) {
            Category::Other
        } else {
            self.weights[0].0
        }
    }
}

impl Default for AllocationProfile {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_weights() -> Vec<(Category, Decimal)> {
    vec![
        (Category::Food, Decimal::new(35, 2)),
        (Category::Housing, Decimal::new(30, 2)),
        (Category::Transport, Decimal::new(15, 2)),
        (Category::Entertainment, Decimal::new(10, 2)),
        (Category::Other, Decimal::new(10, 2)),
    ]
}
