//! Expense list filtering (category selector plus free-text search)

use std::fmt;
use std::str::FromStr;

use crate::models::{Category, CategoryParseError, Expense};

/// Category selector: everything, or exactly one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CategoryParseError;

    /// "all" (any case) or a blank value selects everything; anything else
    /// must name a category, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => write!(f, "{}", category),
        }
    }
}

/// Options for filtering expenses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub category: CategoryFilter,
    /// Case-insensitive substring matched against description or category
    pub search: String,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = CategoryFilter::Only(category);
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.category == CategoryFilter::All && self.search.is_empty()
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        if !self.category.matches(expense.category) {
            return false;
        }

        if self.search.is_empty() {
            return true;
        }

        let needle = self.search.to_lowercase();
        expense.description.to_lowercase().contains(&needle)
            || expense.category.name().to_lowercase().contains(&needle)
    }
}

/// Keep the expenses matching both the category and the search text,
/// in their original order
pub fn filter_expenses(expenses: &[Expense], filter: &ExpenseFilter) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|expense| filter.matches(expense))
        .cloned()
        .collect()
}
