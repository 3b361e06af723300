//! Core data models for SpendWise
//!
//! This module contains the data structures of the expense-tracking domain:
//! expenses, budgets, categories, money, calendar periods and the session.

pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod period;
pub mod session;
pub mod summary;

pub use budget::{Budget, BudgetValidationError, NewBudget};
pub use category::{Category, CategoryParseError};
pub use expense::{Expense, ExpenseValidationError, NewExpense};
pub use ids::{BudgetId, ExpenseId};
pub use money::{Money, MoneyParseError};
pub use period::{Bucketing, Period, PeriodParseError};
pub use session::{AccessToken, LoginResponse, Session, UserProfile};
pub use summary::{DashboardSummary, NamedAmounts, SummaryTrendPoint};
