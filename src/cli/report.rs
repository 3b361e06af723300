//! CLI commands for the dashboard and the spending report

use chrono::NaiveDate;

use crate::config::Settings;
use crate::display::{format_category_chart, format_trend_chart};
use crate::error::SpendwiseResult;
use crate::models::Bucketing;
use crate::reports::DashboardReport;
use crate::services::{Backend, DashboardService};

/// Show the dashboard
pub fn handle_dashboard_command(
    backend: &mut Backend,
    settings: &Settings,
    bucketing: Bucketing,
    today: NaiveDate,
) -> SpendwiseResult<()> {
    let report = DashboardService::new(backend)
        .with_recent_limit(settings.recent_count)
        .with_trend_months(settings.trend_months)
        .load(bucketing, today)?;

    print!("{}", report.format_terminal(&settings.currency_symbol));
    Ok(())
}

/// Build the spending report from the user's records
///
/// Unlike the dashboard this never uses the store summary, so the chart
/// covers every bucket that has spending.
pub fn build_report(
    backend: &mut Backend,
    settings: &Settings,
    bucketing: Bucketing,
    today: NaiveDate,
) -> SpendwiseResult<DashboardReport> {
    DashboardService::new(backend)
        .with_recent_limit(settings.recent_count)
        .load_local(bucketing, today)
}

/// Show the spending report as text charts
pub fn handle_report_command(
    backend: &mut Backend,
    settings: &Settings,
    bucketing: Bucketing,
    today: NaiveDate,
) -> SpendwiseResult<()> {
    let report = build_report(backend, settings, bucketing, today)?;
    let currency = settings.currency_symbol.as_str();

    println!("Spending Report ({})", bucketing);
    println!("{}", "=".repeat(80));
    println!("Total Spent: {}", report.total_spent.format_with_symbol(currency));
    println!();
    println!("Spending Over Time");
    println!("{}", "-".repeat(80));
    print!("{}", format_trend_chart(&report.trend, currency));
    println!();
    println!("By Category");
    println!("{}", "-".repeat(80));
    print!("{}", format_category_chart(&report.category_shares(), currency));

    Ok(())
}
