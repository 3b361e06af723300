//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses, budgets and report charts
//! as plain-text tables.

pub mod budget;
pub mod expense;
pub mod report;

pub use budget::format_budget_list;
pub use expense::{format_date, format_expense_details, format_expense_line, format_expense_list};
pub use report::{format_bar, format_category_chart, format_percentage, format_trend_chart, truncate};
