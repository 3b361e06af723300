//! Budget model
//!
//! A budget caps spending for one category in one calendar month.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::BudgetId;
use super::money::Money;
use super::period::Period;

/// A monthly spending cap for a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Identifier assigned by the record store
    pub id: BudgetId,

    #[serde(default)]
    pub category: Category,

    /// The cap
    #[serde(default)]
    pub amount: Money,

    /// Calendar month, 1-12
    pub month: u32,

    pub year: i32,
}

impl Budget {
    pub fn new(id: BudgetId, category: Category, amount: Money, month: u32, year: i32) -> Self {
        Self {
            id,
            category,
            amount,
            month,
            year,
        }
    }

    /// The calendar month this budget applies to
    pub fn period(&self) -> Period {
        Period::monthly(self.year, self.month)
    }

    /// Check whether this budget applies to the given month
    pub fn applies_to(&self, year: i32, month: u32) -> bool {
        self.year == year && self.month == month
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.period(), self.category, self.amount)
    }
}

/// Input for creating a new budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBudget {
    pub category: Category,
    pub amount: Money,
    pub month: u32,
    pub year: i32,
}

impl NewBudget {
    pub fn new(category: Category, amount: Money, month: u32, year: i32) -> Self {
        Self {
            category,
            amount,
            month,
            year,
        }
    }

    /// A budget for the given category in the current month
    pub fn for_current_month(category: Category, amount: Money) -> Self {
        let today = chrono::Local::now().date_naive();
        Self::new(category, amount, today.month(), today.year())
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveAmount(self.amount));
        }

        if !(1..=12).contains(&self.month) {
            return Err(BudgetValidationError::InvalidMonth(self.month));
        }

        Ok(())
    }
}

/// Validation errors for new budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveAmount(Money),
    InvalidMonth(u32),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Please enter a valid amount (got {})", amount)
            }
            Self::InvalidMonth(month) => write!(f, "Month must be between 1 and 12 (got {})", month),
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_budget() {
        let json = r#"{"id": 3, "category": "Entertainment", "amount": 1500.5, "month": 12, "year": 2025}"#;
        let budget: Budget = serde_json::from_str(json).unwrap();
        assert_eq!(budget.category, Category::Entertainment);
        assert_eq!(budget.amount.cents(), 150050);
        assert_eq!(budget.period(), Period::monthly(2025, 12));
        assert!(budget.applies_to(2025, 12));
        assert!(!budget.applies_to(2025, 11));
    }

    #[test]
    fn test_validate() {
        assert!(NewBudget::new(Category::Food, Money::from_units(5000), 4, 2024)
            .validate()
            .is_ok());
        assert_eq!(
            NewBudget::new(Category::Food, Money::zero(), 4, 2024).validate(),
            Err(BudgetValidationError::NonPositiveAmount(Money::zero()))
        );
        assert_eq!(
            NewBudget::new(Category::Food, Money::from_units(10), 13, 2024).validate(),
            Err(BudgetValidationError::InvalidMonth(13))
        );
    }

    #[test]
    fn test_new_budget_wire_shape() {
        let input = NewBudget::new(Category::Utilities, Money::from_units(1200), 1, 2025);
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["category"], "Utilities");
        assert_eq!(json["amount"], 1200);
        assert_eq!(json["month"], 1);
    }
}
