//! Budget display formatting

use crate::models::{Budget, Money};

/// Format a list of budgets as a table
pub fn format_budget_list(budgets: &[Budget], currency: &str) -> String {
    if budgets.is_empty() {
        return "No budgets found.\n".to_string();
    }

    let id_width = budgets
        .iter()
        .map(|b| b.id.as_str().len())
        .max()
        .unwrap_or(2)
        .clamp(2, 36);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<id_width$}  {:<8}  {:<13}  {:>14}\n",
        "ID",
        "Month",
        "Category",
        "Amount",
        id_width = id_width,
    ));
    output.push_str(&format!(
        "{:-<id_width$}  {:-<8}  {:-<13}  {:->14}\n",
        "",
        "",
        "",
        "",
        id_width = id_width,
    ));

    for budget in budgets {
        output.push_str(&format!(
            "{:<id_width$}  {:<8}  {:<13}  {:>14}\n",
            budget.id.as_str(),
            budget.period().to_string(),
            budget.category.name(),
            budget.amount.format_with_symbol(currency),
            id_width = id_width,
        ));
    }

    let total: Money = budgets.iter().map(|b| b.amount).sum();
    output.push('\n');
    output.push_str(&format!(
        "{} budget(s), total {}\n",
        budgets.len(),
        total.format_with_symbol(currency)
    ));

    output
}
