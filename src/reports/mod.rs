//! Reports module for SpendWise
//!
//! Pure aggregation over fetched expense and budget records: totals,
//! category breakdowns, percentage shares, time-bucketed trends, filtering
//! and the combined dashboard report.

pub mod aggregate;
pub mod breakdown;
pub mod budget_overview;
pub mod dashboard;
pub mod filter;
pub mod trend;

pub use aggregate::{
    active_category_count, average_daily, average_per_record, category_breakdown,
    category_shares, max_category, percentage_share, recent_expenses, remaining_budget, spent_in,
    total_budget, total_spent, CategoryShare,
};
pub use breakdown::Breakdown;
pub use budget_overview::{BudgetOverviewReport, BudgetOverviewRow};
pub use dashboard::{DashboardReport, ReportSource, DEFAULT_RECENT_LIMIT};
pub use filter::{filter_expenses, CategoryFilter, ExpenseFilter};
pub use trend::{trailing_monthly_trend, trend, TrendPoint};
