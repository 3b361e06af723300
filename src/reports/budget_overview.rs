//! Budget Overview Report
//!
//! Compares each category's monthly budget with what was actually spent in
//! that month.

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Budget, Category, Expense, Money, Period};
use std::io::Write;

use super::aggregate::{percentage_share, spent_in};
use super::breakdown::Breakdown;

/// A row in the overview for a single budgeted category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetOverviewRow {
    pub category: Category,
    /// Sum of every budget set for this category in the month
    pub budgeted: Money,
    /// Spending in this category during the month
    pub spent: Money,
    /// budgeted - spent; negative when overspent
    pub remaining: Money,
    /// How many budgets were combined into this row
    pub budget_count: usize,
}

impl BudgetOverviewRow {
    pub fn is_overspent(&self) -> bool {
        self.remaining.is_negative()
    }

    /// Share of the budget already used, rounded to one decimal
    pub fn percent_used(&self) -> f64 {
        percentage_share(self.spent, self.budgeted)
    }
}

/// Budget Overview Report
#[derive(Debug, Clone)]
pub struct BudgetOverviewReport {
    /// The month this overview covers
    pub period: Period,
    pub rows: Vec<BudgetOverviewRow>,
    pub total_budgeted: Money,
    pub total_spent: Money,
    pub total_remaining: Money,
    /// Spending in the month on categories without any budget
    pub unbudgeted_spending: Money,
}

impl BudgetOverviewReport {
    /// Build the overview for one calendar month
    pub fn generate(budgets: &[Budget], expenses: &[Expense], year: i32, month: u32) -> Self {
        let period = Period::monthly(year, month);

        let mut counts: Vec<(Category, usize)> = Vec::new();
        let caps: Breakdown = budgets
            .iter()
            .filter(|b| b.applies_to(year, month))
            .inspect(|b| match counts.iter_mut().find(|(c, _)| *c == b.category) {
                Some((_, n)) => *n += 1,
                None => counts.push((b.category, 1)),
            })
            .map(|b| (b.category, b.amount))
            .collect();

        let rows: Vec<BudgetOverviewRow> = caps
            .iter()
            .map(|(category, budgeted)| {
                let spent = spent_in(expenses, category, &period);
                BudgetOverviewRow {
                    category,
                    budgeted,
                    spent,
                    remaining: budgeted - spent,
                    budget_count: counts
                        .iter()
                        .find(|(c, _)| *c == category)
                        .map(|(_, n)| *n)
                        .unwrap_or(0),
                }
            })
            .collect();

        let unbudgeted_spending = expenses
            .iter()
            .filter(|e| period.contains(e.date) && caps.get(e.category).is_none())
            .map(|e| e.amount)
            .sum();

        Self {
            period,
            total_budgeted: rows.iter().map(|r| r.budgeted).sum(),
            total_spent: rows.iter().map(|r| r.spent).sum(),
            total_remaining: rows.iter().map(|r| r.remaining).sum(),
            rows,
            unbudgeted_spending,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();
        let money = |amount: Money| amount.format_with_symbol(currency);

        output.push_str(&format!("Budget Overview - {}\n", self.period.label()));
        output.push_str(&"=".repeat(80));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No budgets set for this month.\n");
        } else {
            output.push_str(&format!(
                "{:<20} {:>14} {:>14} {:>14} {:>8}\n",
                "Category", "Budgeted", "Spent", "Remaining", "Used"
            ));
            output.push_str(&"-".repeat(80));
            output.push('\n');

            for row in &self.rows {
                let remaining = if row.is_overspent() {
                    format!("{} *", money(row.remaining))
                } else {
                    money(row.remaining)
                };
                output.push_str(&format!(
                    "{:<20} {:>14} {:>14} {:>14} {:>7.1}%\n",
                    row.category.name(),
                    money(row.budgeted),
                    money(row.spent),
                    remaining,
                    row.percent_used()
                ));
            }

            output.push_str(&"-".repeat(80));
            output.push('\n');
            output.push_str(&format!(
                "{:<20} {:>14} {:>14} {:>14}\n",
                "TOTAL",
                money(self.total_budgeted),
                money(self.total_spent),
                money(self.total_remaining)
            ));
        }

        if !self.unbudgeted_spending.is_zero() {
            output.push_str(&format!(
                "\nUnbudgeted spending: {}\n",
                money(self.unbudgeted_spending)
            ));
        }

        if self.overspent_count() > 0 {
            output.push_str("\n* = Overspent\n");
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> SpendwiseResult<()> {
        writeln!(writer, "Period,Category,Budgeted,Spent,Remaining")
            .map_err(|e| SpendwiseError::Export(e.to_string()))?;

        for row in &self.rows {
            writeln!(
                writer,
                "{},{},{},{},{}",
                self.period,
                row.category,
                row.budgeted.plain(),
                row.spent.plain(),
                row.remaining.plain()
            )
            .map_err(|e| SpendwiseError::Export(e.to_string()))?;
        }

        writeln!(
            writer,
            "{},TOTAL,{},{},{}",
            self.period,
            self.total_budgeted.plain(),
            self.total_spent.plain(),
            self.total_remaining.plain()
        )
        .map_err(|e| SpendwiseError::Export(e.to_string()))?;

        Ok(())
    }

    pub fn overspent_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_overspent()).count()
    }
}
