//! Expense display formatting
//!
//! Formats expenses for terminal output in table and detail views.

use chrono::NaiveDate;
use std::fmt::Write;

use super::truncate;
use crate::models::Expense;
use crate::reports::total_spent;

/// Format a list of expenses as a table with a total line
pub fn format_expense_list(expenses: &[Expense], currency: &str, date_format: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let id_width = expenses
        .iter()
        .map(|e| e.id.as_str().len())
        .max()
        .unwrap_or(2)
        .clamp(2, 36);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<id_width$}  {:<12}  {:<30}  {:<13}  {:>14}\n",
        "ID",
        "Date",
        "Description",
        "Category",
        "Amount",
        id_width = id_width,
    ));
    output.push_str(&format!(
        "{:-<id_width$}  {:-<12}  {:-<30}  {:-<13}  {:->14}\n",
        "",
        "",
        "",
        "",
        "",
        id_width = id_width,
    ));

    for expense in expenses {
        output.push_str(&format!(
            "{:<id_width$}  {:<12}  {:<30}  {:<13}  {:>14}\n",
            truncate(expense.id.as_str(), id_width),
            format_date(expense.date, date_format),
            truncate(&expense.description, 30),
            expense.category.name(),
            expense.amount.format_with_symbol(currency),
            id_width = id_width,
        ));
    }

    output.push('\n');
    output.push_str(&format!(
        "{} expense(s), total {}\n",
        expenses.len(),
        total_spent(expenses).format_with_symbol(currency)
    ));

    output
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, currency: &str, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Description: {}\n", expense.description));
    output.push_str(&format!("Category:    {}\n", expense.category));
    output.push_str(&format!(
        "Amount:      {}\n",
        expense.amount.format_with_symbol(currency)
    ));
    output.push_str(&format!("Date:        {}\n", format_date(expense.date, date_format)));
    if let Some(created_at) = &expense.created_at {
        output.push_str(&format!("Created:     {}\n", created_at));
    }

    output
}

/// Format a date with a user-supplied strftime pattern, falling back to
/// ISO 8601 when the pattern is invalid
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", date.format(pattern)) {
        Ok(()) => out,
        Err(_) => date.format("%Y-%m-%d").to_string(),
    }
}

/// One-line summary used in confirmations
pub fn format_expense_line(expense: &Expense, currency: &str) -> String {
    format!(
        "{} ({}, {}, {})",
        expense.description,
        expense.category,
        expense.amount.format_with_symbol(currency),
        expense.date.format("%Y-%m-%d")
    )
}
