//! Dashboard Report
//!
//! Combines the headline statistics of the dashboard and reports views:
//! totals, category breakdown, a spending trend and the latest expenses.
//! A report is built either from the record store's summary endpoint or by
//! aggregating raw expense and budget lists locally.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::display::truncate;
use crate::models::{Budget, Bucketing, Category, DashboardSummary, Expense, Money};

use super::aggregate::{
    active_category_count, average_daily, average_per_record, category_breakdown,
    category_shares, max_category, recent_expenses, remaining_budget, total_spent, CategoryShare,
};
use super::breakdown::Breakdown;
use super::trend::{trend, TrendPoint};

/// Number of recent expenses shown on the dashboard
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Where the report's numbers were computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportSource {
    /// The record store's summary endpoint
    Summary,
    /// Aggregated here from raw records
    Local,
}

/// Dashboard Report
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub bucketing: Bucketing,
    pub source: ReportSource,
    pub total_spent: Money,
    pub breakdown: Breakdown,
    pub trend: Vec<TrendPoint>,
    pub recent_expenses: Vec<Expense>,
    /// Number of expenses aggregated; unknown for summary-backed reports
    pub expense_count: Option<usize>,
    pub active_categories: usize,
    pub max_category: Option<Category>,
    /// Unknown for summary-backed reports
    pub average_per_record: Option<Money>,
    pub average_daily: Money,
    /// Budget left per category for the current month, when budgets exist
    pub remaining_budget: Option<Breakdown>,
}

impl DashboardReport {
    /// Build a report from the store's summary payload
    ///
    /// Category keys the store spells differently (e.g. "Transportation")
    /// are folded onto the shared category set.
    pub fn from_summary(summary: DashboardSummary) -> Self {
        let breakdown: Breakdown = summary
            .category_breakdown
            .iter()
            .map(|(name, amount)| (Category::from_lenient(name), amount))
            .collect();

        let trend = summary
            .monthly_trend
            .iter()
            .map(|point| TrendPoint::labelled(point.month.clone(), point.total))
            .collect();

        let remaining_budget = summary.remaining_budget.map(|remaining| {
            remaining
                .iter()
                .map(|(name, amount)| (Category::from_lenient(name), amount))
                .collect()
        });

        Self {
            bucketing: Bucketing::Monthly,
            source: ReportSource::Summary,
            total_spent: summary.total_spent,
            active_categories: active_category_count(&breakdown),
            max_category: max_category(&breakdown),
            breakdown,
            trend,
            recent_expenses: summary.recent_expenses,
            expense_count: None,
            average_per_record: None,
            average_daily: average_daily(summary.total_spent),
            remaining_budget,
        }
    }

    /// Aggregate a report from raw records
    ///
    /// `today` selects the month the remaining budget is computed for. Every
    /// expense is listed as recent, newest first; trim with `limit_recent`.
    pub fn from_records(
        expenses: &[Expense],
        budgets: &[Budget],
        bucketing: Bucketing,
        today: NaiveDate,
    ) -> Self {
        let total = total_spent(expenses);
        let breakdown = category_breakdown(expenses);

        let remaining = remaining_budget(budgets, expenses, today.year(), today.month());

        Self {
            bucketing,
            source: ReportSource::Local,
            total_spent: total,
            active_categories: active_category_count(&breakdown),
            max_category: max_category(&breakdown),
            breakdown,
            trend: trend(expenses, bucketing),
            recent_expenses: recent_expenses(expenses, expenses.len()),
            expense_count: Some(expenses.len()),
            average_per_record: Some(average_per_record(expenses)),
            average_daily: average_daily(total),
            remaining_budget: if remaining.is_empty() {
                None
            } else {
                Some(remaining)
            },
        }
    }

    /// Keep at most `limit` recent expenses
    pub fn limit_recent(mut self, limit: usize) -> Self {
        self.recent_expenses.truncate(limit);
        self
    }

    /// Category rows with their share of the total
    pub fn category_shares(&self) -> Vec<CategoryShare> {
        category_shares(&self.breakdown, self.total_spent)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();
        let money = |amount: Money| amount.format_with_symbol(currency);

        output.push_str(&format!("Spending Report ({})\n", self.bucketing));
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&format!("Total Spent:        {}\n", money(self.total_spent)));
        if let Some(count) = self.expense_count {
            output.push_str(&format!("Expenses:           {}\n", count));
        }
        output.push_str(&format!("Active Categories:  {}\n", self.active_categories));
        output.push_str(&format!(
            "Top Category:       {}\n",
            self.max_category
                .map(|c| c.name().to_string())
                .unwrap_or_else(|| "-".to_string())
        ));
        if let Some(average) = self.average_per_record {
            output.push_str(&format!("Avg. per Expense:   {}\n", money(average)));
        }
        output.push_str(&format!("Avg. Daily:         {}\n\n", money(self.average_daily)));

        // Category details
        output.push_str(&format!("{:<30} {:>15} {:>8}\n", "Category", "Amount", "%"));
        output.push_str(&"-".repeat(80));
        output.push('\n');
        if self.breakdown.is_empty() {
            output.push_str("  No spending recorded.\n");
        }
        for share in self.category_shares() {
            output.push_str(&format!(
                "{:<30} {:>15} {:>7.1}%\n",
                share.name.name(),
                money(share.value),
                share.percentage
            ));
        }

        if !self.trend.is_empty() {
            output.push_str(&format!("\n{:<30} {:>15}\n", "Period", "Total"));
            output.push_str(&"-".repeat(80));
            output.push('\n');
            for point in &self.trend {
                output.push_str(&format!("{:<30} {:>15}\n", point.label, money(point.total)));
            }
        }

        if let Some(remaining) = &self.remaining_budget {
            output.push_str(&format!("\n{:<30} {:>15}\n", "Budget Left", "Amount"));
            output.push_str(&"-".repeat(80));
            output.push('\n');
            for (category, left) in remaining.iter() {
                let marker = if left.is_negative() { "  OVER" } else { "" };
                output.push_str(&format!(
                    "{:<30} {:>15}{}\n",
                    category.name(),
                    money(left),
                    marker
                ));
            }
        }

        if !self.recent_expenses.is_empty() {
            output.push_str("\nRecent Expenses\n");
            output.push_str(&"-".repeat(80));
            output.push('\n');
            for expense in &self.recent_expenses {
                output.push_str(&format!(
                    "{:<12} {:<35} {:<15} {:>15}\n",
                    expense.date.format("%Y-%m-%d"),
                    truncate(&expense.description, 35),
                    expense.category.name(),
                    money(expense.amount)
                ));
            }
        }

        output
    }
}
