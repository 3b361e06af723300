//! Export module for SpendWise
//!
//! Provides export of fetched data in multiple formats:
//! - CSV: the expense list (spreadsheet-compatible)
//! - JSON: the spending report document
//! - YAML: the same report, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

use chrono::NaiveDate;

pub use csv::{export_expenses_csv, export_rows, read_csv_rows, write_csv, ExportRow, CSV_HEADER};
pub use json::{export_report_json, ReportExport};
pub use yaml::export_report_yaml;

/// Default file name of an expense CSV export made on `date`
pub fn default_expenses_file_name(date: NaiveDate) -> String {
    format!("spendwise_expenses_{}.csv", date.format("%Y-%m-%d"))
}

/// Default file name of a report export made on `date`
pub fn default_report_file_name(date: NaiveDate, extension: &str) -> String {
    format!("spendwise_report_{}.{}", date.format("%Y-%m-%d"), extension)
}
