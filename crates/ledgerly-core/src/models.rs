//! Domain models for Ledgerly

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budget::{Allocator, BudgetPlan, CategoryAllocations, PlanTotals};
use crate::error::ValidationError;

/// Longest plan horizon accepted for a stored budget plan (30 years)
pub const MAX_PLAN_MONTHS: i64 = 360;

const MAX_NAME_CHARS: usize = 255;
const MAX_PLAN_DESCRIPTION_CHARS: usize = 500;
const MIN_PERSON_NAME_CHARS: usize = 2;
const MAX_PERSON_NAME_CHARS: usize = 100;
const MIN_AGE: u32 = 18;
const MAX_AGE: u32 = 120;
const MIN_PASSWORD_CHARS: usize = 8;

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::field(field, "must not be empty"));
    }
    Ok(())
}

fn require_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.trim().chars().count();
    if len < min || len > max {
        return Err(ValidationError::field(
            field,
            format!("must be between {} and {} characters", min, max),
        ));
    }
    Ok(())
}

fn require_positive(amount: Decimal) -> Result<(), ValidationError> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    Ok(())
}

fn require_age(age: u32) -> Result<(), ValidationError> {
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        return Err(ValidationError::field(
            "age",
            format!("must be between {} and {}", MIN_AGE, MAX_AGE),
        ));
    }
    Ok(())
}

fn require_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ValidationError::field(
            "password",
            format!("must be at least {} characters", MIN_PASSWORD_CHARS),
        ));
    }
    Ok(())
}

fn require_email(email: &str) -> Result<(), ValidationError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(ValidationError::field("email", "is not a valid address"));
    }
    Ok(())
}

// ----- Income -----

/// A recorded income entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    pub id: String,
    pub user_id: String,
    /// What the money is for (salary, bonus, refund, ...)
    pub concept: String,
    /// Who paid it
    pub source_name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A new income entry as submitted by the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewIncome {
    pub concept: String,
    pub source_name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewIncome {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("concept", &self.concept)?;
        require_text("source_name", &self.source_name)?;
        require_positive(self.amount)
    }
}

/// Partial update of an income entry; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl IncomeUpdate {
    pub fn is_empty(&self) -> bool {
        self.concept.is_none()
            && self.source_name.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.description.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }
        if let Some(concept) = &self.concept {
            require_text("concept", concept)?;
        }
        if let Some(source_name) = &self.source_name {
            require_text("source_name", source_name)?;
        }
        if let Some(amount) = self.amount {
            require_positive(amount)?;
        }
        Ok(())
    }
}

// ----- Expense -----

/// A recorded expense entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub user_id: String,
    /// Free-text category chosen by the user
    pub category: String,
    pub name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub category: String,
    pub name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewExpense {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("category", &self.category)?;
        require_text("name", &self.name)?;
        require_positive(self.amount)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExpenseUpdate {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.name.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.description.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }
        if let Some(category) = &self.category {
            require_text("category", category)?;
        }
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(amount) = self.amount {
            require_positive(amount)?;
        }
        Ok(())
    }
}

// ----- Savings plans -----

/// A savings target over a date window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsPlan {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSavingsPlan {
    pub name: String,
    pub target_amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewSavingsPlan {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_length("name", &self.name, 1, MAX_NAME_CHARS)?;
        require_positive(self.target_amount)?;
        if self.end_date < self.start_date {
            return Err(ValidationError::EndBeforeStart);
        }
        if let Some(description) = &self.description {
            require_length("description", description, 0, MAX_PLAN_DESCRIPTION_CHARS)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SavingsPlanUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SavingsPlanUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.target_amount.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.description.is_none()
    }

    /// Check the supplied fields on their own
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }
        if let Some(name) = &self.name {
            require_length("name", name, 1, MAX_NAME_CHARS)?;
        }
        if let Some(amount) = self.target_amount {
            require_positive(amount)?;
        }
        if let Some(description) = &self.description {
            require_length("description", description, 0, MAX_PLAN_DESCRIPTION_CHARS)?;
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(ValidationError::EndBeforeStart);
            }
        }
        Ok(())
    }

    /// Check the update merged with the stored plan, so moving only one end
    /// of the window cannot invert it
    pub fn validate_against(&self, current: &SavingsPlan) -> Result<(), ValidationError> {
        self.validate()?;
        let start = self.start_date.unwrap_or(current.start_date);
        let end = self.end_date.unwrap_or(current.end_date);
        if end < start {
            return Err(ValidationError::EndBeforeStart);
        }
        Ok(())
    }
}

// ----- Users and profiles -----

/// A stored user row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub email: String,
    /// Argon2 PHC string; never sent to clients
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub registered_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Registration form
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub email: String,
    pub password: String,
}

impl Registration {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_length(
            "first_name",
            &self.first_name,
            MIN_PERSON_NAME_CHARS,
            MAX_PERSON_NAME_CHARS,
        )?;
        require_length(
            "last_name",
            &self.last_name,
            MIN_PERSON_NAME_CHARS,
            MAX_PERSON_NAME_CHARS,
        )?;
        require_age(self.age)?;
        require_email(&self.email)?;
        require_password(&self.password)
    }

    /// Emails are matched case-insensitively
    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// A user ready to be stored, password already hashed
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub email: String,
    pub password_hash: String,
}

/// Public view of a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub email: String,
    pub avatar_url: Option<String>,
    pub registered_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<User> for Profile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            age: user.age,
            email: user.email,
            avatar_url: user.avatar_url,
            registered_at: user.registered_at,
            updated_at: user.updated_at,
        }
    }
}

/// Profile changes submitted by the user
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub password: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.age.is_none()
            && self.password.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }
        if let Some(first_name) = &self.first_name {
            require_length(
                "first_name",
                first_name,
                MIN_PERSON_NAME_CHARS,
                MAX_PERSON_NAME_CHARS,
            )?;
        }
        if let Some(last_name) = &self.last_name {
            require_length(
                "last_name",
                last_name,
                MIN_PERSON_NAME_CHARS,
                MAX_PERSON_NAME_CHARS,
            )?;
        }
        if let Some(age) = self.age {
            require_age(age)?;
        }
        if let Some(password) = &self.password {
            require_password(password)?;
        }
        Ok(())
    }
}

/// Column changes written to the users table
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}

// ----- Stored budget plans -----

/// A generated budget plan persisted under a name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetPlanRecord {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub income_total: Decimal,
    pub savings_goal: Decimal,
    pub duration_months: u32,
    pub category_allocations: CategoryAllocations,
    pub totals: PlanTotals,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Inputs for generating and storing a budget plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetPlanRequest {
    pub name: String,
    pub income_total: Decimal,
    /// Missing means no savings
    #[serde(default)]
    pub savings_goal: Option<Decimal>,
    pub duration_months: i64,
}

impl BudgetPlanRequest {
    /// Validate the name, run the allocator, then apply the storage limit on
    /// the duration
    pub fn generate(&self, allocator: &Allocator) -> Result<BudgetPlan, ValidationError> {
        require_length("name", &self.name, 1, MAX_NAME_CHARS)?;
        let plan = allocator.generate_plan(
            self.income_total,
            self.savings_goal.unwrap_or(Decimal::ZERO),
            self.duration_months,
        )?;
        if self.duration_months > MAX_PLAN_MONTHS {
            return Err(ValidationError::field(
                "duration_months",
                format!("must be at most {}", MAX_PLAN_MONTHS),
            ));
        }
        Ok(plan)
    }
}

// ----- Reports -----

/// Inclusive date window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl Period {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, ValidationError> {
        if to < from {
            return Err(ValidationError::EndBeforeStart);
        }
        Ok(Self { from, to })
    }
}

/// Income and expense totals over a period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeReport {
    pub period: Period,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    /// Never negative: a deficit shows up in `balance` only
    pub total_savings: Decimal,
    pub balance: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn savings_plan() -> SavingsPlan {
        SavingsPlan {
            id: "p1".to_string(),
            user_id: "u1".to_string(),
            name: "Emergency fund".to_string(),
            target_amount: dec!(3000),
            start_date: date("2025-01-01"),
            end_date: date("2025-12-31"),
            description: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_new_income_requires_positive_amount() {
        let mut income = NewIncome {
            concept: "Salary".to_string(),
            source_name: "Acme".to_string(),
            amount: dec!(2500),
            date: date("2025-03-01"),
            description: None,
        };
        assert!(income.validate().is_ok());

        income.amount = dec!(0);
        assert_eq!(income.validate(), Err(ValidationError::NonPositiveAmount));

        income.amount = dec!(10);
        income.concept = "  ".to_string();
        assert!(matches!(
            income.validate(),
            Err(ValidationError::InvalidField { field: "concept", .. })
        ));
    }

    #[test]
    fn test_new_income_deserializes_dates_and_amounts() {
        let json = serde_json::json!({
            "concept": "Salary",
            "source_name": "Acme",
            "amount": 1234.56,
            "date": "2025-02-28"
        });
        let income: NewIncome = serde_json::from_value(json).unwrap();
        assert_eq!(income.amount, dec!(1234.56));
        assert_eq!(income.date, date("2025-02-28"));
        assert!(income.description.is_none());
    }

    #[test]
    fn test_entry_updates_reject_empty_and_bad_amounts() {
        assert_eq!(
            IncomeUpdate::default().validate(),
            Err(ValidationError::EmptyUpdate)
        );
        assert_eq!(
            ExpenseUpdate::default().validate(),
            Err(ValidationError::EmptyUpdate)
        );

        let update = ExpenseUpdate {
            amount: Some(dec!(-3)),
            ..Default::default()
        };
        assert_eq!(update.validate(), Err(ValidationError::NonPositiveAmount));

        let update = ExpenseUpdate {
            name: Some("Groceries".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_update_patch_only_contains_supplied_fields() {
        let update = IncomeUpdate {
            amount: Some(dec!(99.5)),
            ..Default::default()
        };
        let patch = serde_json::to_value(&update).unwrap();
        let keys: Vec<&String> = patch.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["amount"]);
    }

    #[test]
    fn test_new_savings_plan_rules() {
        let mut plan = NewSavingsPlan {
            name: "Trip".to_string(),
            target_amount: dec!(1500),
            start_date: date("2025-01-01"),
            end_date: date("2025-06-30"),
            description: None,
        };
        assert!(plan.validate().is_ok());

        plan.end_date = date("2024-12-31");
        assert_eq!(plan.validate(), Err(ValidationError::EndBeforeStart));
        assert_eq!(
            plan.validate().unwrap_err().to_string(),
            "end date cannot be before start date"
        );

        plan.end_date = date("2025-01-01");
        assert!(plan.validate().is_ok(), "same-day window is allowed");

        plan.target_amount = dec!(0);
        assert_eq!(plan.validate(), Err(ValidationError::NonPositiveAmount));

        plan.target_amount = dec!(1);
        plan.name = "x".repeat(256);
        assert!(plan.validate().is_err());

        plan.name = "ok".to_string();
        plan.description = Some("d".repeat(501));
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_savings_plan_update_checks_merged_dates() {
        let current = savings_plan();

        let update = SavingsPlanUpdate {
            end_date: Some(date("2024-06-01")),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
        assert_eq!(
            update.validate_against(&current),
            Err(ValidationError::EndBeforeStart)
        );

        let update = SavingsPlanUpdate {
            start_date: Some(date("2025-06-01")),
            ..Default::default()
        };
        assert!(update.validate_against(&current).is_ok());

        assert_eq!(
            SavingsPlanUpdate::default().validate_against(&current),
            Err(ValidationError::EmptyUpdate)
        );
    }

    #[test]
    fn test_registration_rules() {
        let mut reg = Registration {
            first_name: "Ana".to_string(),
            last_name: "Lopez".to_string(),
            age: 30,
            email: "Ana@Example.com".to_string(),
            password: "correct horse".to_string(),
        };
        assert!(reg.validate().is_ok());
        assert_eq!(reg.normalized_email(), "ana@example.com");

        reg.age = 17;
        assert!(reg.validate().is_err());
        reg.age = 121;
        assert!(reg.validate().is_err());
        reg.age = 18;

        reg.first_name = "A".to_string();
        assert!(reg.validate().is_err());
        reg.first_name = "Ana".to_string();

        reg.email = "not-an-email".to_string();
        assert!(reg.validate().is_err());
        reg.email = "ana@example".to_string();
        assert!(reg.validate().is_err());
        reg.email = "ana@example.com".to_string();

        reg.password = "short".to_string();
        assert_eq!(
            reg.validate().unwrap_err().to_string(),
            "password must be at least 8 characters"
        );
    }

    #[test]
    fn test_profile_update_rules() {
        assert_eq!(
            ProfileUpdate::default().validate(),
            Err(ValidationError::EmptyUpdate)
        );

        let update = ProfileUpdate {
            age: Some(150),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let update = ProfileUpdate {
            last_name: Some("Perez".to_string()),
            password: Some("longenough".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_user_never_serializes_password_hash() {
        let row = serde_json::json!({
            "id": "u1",
            "first_name": "Ana",
            "last_name": "Lopez",
            "age": 30,
            "email": "ana@example.com",
            "password_hash": "$argon2id$v=19$...",
            "registered_at": "2025-01-01T00:00:00Z"
        });
        let user: User = serde_json::from_value(row).unwrap();
        assert_eq!(user.password_hash, "$argon2id$v=19$...");

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_budget_plan_request_order_of_checks() {
        let allocator = Allocator::default();
        let mut request = BudgetPlanRequest {
            name: String::new(),
            income_total: dec!(-1),
            savings_goal: None,
            duration_months: 400,
        };
        assert!(matches!(
            request.generate(&allocator),
            Err(ValidationError::InvalidField { field: "name", .. })
        ));

        request.name = "Vacation 2025".to_string();
        assert_eq!(
            request.generate(&allocator),
            Err(ValidationError::NonPositiveIncome)
        );

        request.income_total = dec!(5000);
        assert!(matches!(
            request.generate(&allocator),
            Err(ValidationError::InvalidField {
                field: "duration_months",
                ..
            })
        ));

        request.duration_months = 360;
        let plan = request.generate(&allocator).unwrap();
        assert_eq!(plan.savings_goal, dec!(0));
        assert_eq!(plan.category_allocations.total(), dec!(5000));
    }

    #[test]
    fn test_period_rejects_inverted_range() {
        assert_eq!(
            Period::new(date("2025-02-01"), date("2025-01-01")),
            Err(ValidationError::EndBeforeStart)
        );
        let period = Period::new(date("2025-01-31"), date("2025-01-31")).unwrap();
        assert_eq!(period.from, period.to);
    }
}
