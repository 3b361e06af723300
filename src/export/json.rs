//! JSON Export functionality
//!
//! Serializes a dashboard report into the downloadable report document.

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Bucketing, Money};
use crate::reports::{Breakdown, CategoryShare, DashboardReport, TrendPoint};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Report document written by `export report`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportExport {
    /// Export timestamp
    pub generated_at: DateTime<Utc>,

    /// Bucketing of `chart_data` ("daily", "weekly" or "monthly")
    pub time_range: Bucketing,

    pub total_spent: Money,

    /// Category name to amount
    pub category_breakdown: Breakdown,

    /// Trend buckets as `{label, total}`
    pub chart_data: Vec<TrendPoint>,

    /// Category rows as `{name, value, percentage}`
    pub category_data: Vec<CategoryShare>,
}

impl ReportExport {
    pub fn from_report(report: &DashboardReport) -> Self {
        Self::at(report, Utc::now())
    }

    /// Build the document with an explicit timestamp
    pub fn at(report: &DashboardReport, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            time_range: report.bucketing,
            total_spent: report.total_spent,
            category_breakdown: report.breakdown.clone(),
            chart_data: report.trend.clone(),
            category_data: report.category_shares(),
        }
    }
}

/// Write the report as pretty-printed JSON
pub fn export_report_json<W: Write>(report: &ReportExport, writer: &mut W) -> SpendwiseResult<()> {
    serde_json::to_writer_pretty(&mut *writer, report)
        .map_err(|e| SpendwiseError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| SpendwiseError::Export(e.to_string()))?;
    Ok(())
}
