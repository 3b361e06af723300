//! Expense model
//!
//! An expense is a single dated spending record. Records are owned by the
//! record store; the client only holds transient copies.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::ExpenseId;
use super::money::Money;

/// A recorded expense
///
/// Deserialization is lenient: a missing amount reads as zero, a missing or
/// unknown category as `Other`, and a full timestamp keeps only its date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Identifier assigned by the record store
    pub id: ExpenseId,

    /// Free-text label
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,

    #[serde(default)]
    pub category: Category,

    #[serde(default)]
    pub amount: Money,

    /// Day the money was spent
    #[serde(default = "epoch_day", deserialize_with = "lenient_date")]
    pub date: NaiveDate,

    /// When the store created the record, if it reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Expense {
    /// Create an expense with all common fields
    pub fn new(
        id: ExpenseId,
        description: impl Into<String>,
        category: Category,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            category,
            amount,
            date,
            created_at: None,
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}) {}",
            self.date, self.description, self.category, self.amount
        )
    }
}

/// Input for creating a new expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewExpense {
    pub description: String,
    pub category: Category,
    pub amount: Money,
    pub date: NaiveDate,
}

impl NewExpense {
    /// Create an input with the default category, dated today
    pub fn new(description: impl Into<String>, amount: Money) -> Self {
        Self {
            description: description.into(),
            category: Category::NEW_EXPENSE_DEFAULT,
            amount,
            date: chrono::Local::now().date_naive(),
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Validate the input; the description is trimmed in place
    pub fn validate(&mut self) -> Result<(), ExpenseValidationError> {
        let trimmed = self.description.trim();
        if trimmed.is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }
        if trimmed.len() != self.description.len() {
            self.description = trimmed.to_string();
        }

        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }

        Ok(())
    }
}

/// Validation errors for new expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyDescription,
    NonPositiveAmount(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Description is required"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

fn epoch_day() -> NaiveDate {
    NaiveDate::default()
}

fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept "2024-04-15", "2024-04-15T10:00:00[.fff][Z|+hh:mm]", or null
fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_record_date).unwrap_or_default())
}

/// Parse the date part of a store date or timestamp
pub fn parse_record_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(ts.date_naive());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts.date());
    }
    s.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{"id": 1, "description": "Grocery Shopping", "category": "Food",
                       "amount": 1250, "date": "2024-04-15"}"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.id.as_str(), "1");
        assert_eq!(expense.category, Category::Food);
        assert_eq!(expense.amount, Money::from_units(1250));
        assert_eq!(expense.date, NaiveDate::from_ymd_opt(2024, 4, 15).unwrap());
    }

    #[test]
    fn test_deserialize_malformed_record() {
        let json = r#"{"id": "abc", "description": null, "date": "2024-04-15T09:30:00.123"}"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.description, "");
        assert_eq!(expense.category, Category::Other);
        assert!(expense.amount.is_zero());
        assert_eq!(expense.date, NaiveDate::from_ymd_opt(2024, 4, 15).unwrap());
    }

    #[test]
    fn test_parse_record_date_variants() {
        let expected = NaiveDate::from_ymd_opt(2024, 4, 15);
        assert_eq!(parse_record_date("2024-04-15"), expected);
        assert_eq!(parse_record_date("2024-04-15T10:00:00Z"), expected);
        assert_eq!(parse_record_date("2024-04-15T10:00:00+05:30"), expected);
        assert_eq!(parse_record_date("2024-04-15 10:00"), expected);
        assert_eq!(parse_record_date("yesterday"), None);
    }

    #[test]
    fn test_new_expense_defaults_to_food() {
        let input = NewExpense::new("Lunch", Money::from_units(200));
        assert_eq!(input.category, Category::Food);
    }

    #[test]
    fn test_validate_trims_description() {
        let mut input = NewExpense::new("  Petrol  ", Money::from_units(2000));
        input.validate().unwrap();
        assert_eq!(input.description, "Petrol");
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        let mut blank = NewExpense::new("   ", Money::from_units(10));
        assert_eq!(blank.validate(), Err(ExpenseValidationError::EmptyDescription));

        let mut zero = NewExpense::new("Coffee", Money::zero());
        assert!(matches!(
            zero.validate(),
            Err(ExpenseValidationError::NonPositiveAmount(_))
        ));
    }
}
