//! Error types for Ledgerly

use thiserror::Error;

/// Caller-supplied input violates a stated rule.
///
/// The `Display` text is the message surfaced to API clients, so keep it
/// short and specific to the violated rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("income must be greater than 0")]
    NonPositiveIncome,

    #[error("duration must be greater than 0")]
    NonPositiveDuration,

    #[error("savings goal cannot be negative")]
    NegativeSavingsGoal,

    #[error("savings goal cannot exceed income")]
    SavingsGoalExceedsIncome,

    #[error("amount is too large")]
    AmountTooLarge,

    #[error("incomplete plan data")]
    IncompletePlan,

    #[error("amount must be greater than 0")]
    NonPositiveAmount,

    #[error("end date cannot be before start date")]
    EndBeforeStart,

    #[error("no fields to update")]
    EmptyUpdate,

    #[error("{field} {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl ValidationError {
    pub fn field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Data store error: {0}")]
    Store(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Authentication error: {0}")]
    Auth(String),
}

pub type Result<T> = std::result::Result<T, Error>;
