//! CLI commands for data export
//!
//! Writes the expense list as CSV and the spending report as JSON or YAML.

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::report::build_report;
use crate::config::Settings;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::export::{
    default_expenses_file_name, default_report_file_name, export_expenses_csv, export_report_json,
    export_report_yaml, ReportExport,
};
use crate::models::Bucketing;
use crate::reports::{CategoryFilter, ExpenseFilter};
use crate::services::{Backend, ExpenseService};

/// Report export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// JSON document
    Json,
    /// YAML, human-readable
    Yaml,
}

impl ReportFormat {
    fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export expenses to CSV
    Csv {
        /// Output file path (default: spendwise_expenses_<date>.csv)
        output: Option<PathBuf>,

        /// Only this category ("all" for every category)
        #[arg(short, long)]
        category: Option<CategoryFilter>,

        /// Text matched against description or category
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Export the spending report
    Report {
        /// Output file path (default: spendwise_report_<date>.<format>)
        output: Option<PathBuf>,

        /// Trend bucket size: day, week or month
        #[arg(short, long, default_value = "month")]
        bucket: Bucketing,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ReportFormat,
    },
}

/// Handle export commands
pub fn handle_export_command(
    backend: &mut Backend,
    settings: &Settings,
    cmd: ExportCommands,
    today: NaiveDate,
) -> SpendwiseResult<()> {
    match cmd {
        ExportCommands::Csv {
            output,
            category,
            search,
        } => {
            let output = output.unwrap_or_else(|| PathBuf::from(default_expenses_file_name(today)));
            let filter = ExpenseFilter {
                category: category.unwrap_or_default(),
                search: search.unwrap_or_default(),
            };
            handle_export_csv(backend, &filter, &output)
        }
        ExportCommands::Report {
            output,
            bucket,
            format,
        } => {
            let output = output
                .unwrap_or_else(|| PathBuf::from(default_report_file_name(today, format.extension())));
            handle_export_report(backend, settings, bucket, format, &output, today)
        }
    }
}

/// Handle expense CSV export
fn handle_export_csv(backend: &mut Backend, filter: &ExpenseFilter, output: &Path) -> SpendwiseResult<()> {
    let expenses = ExpenseService::new(backend).list_filtered(filter)?;

    let mut writer = create_output(output)?;
    export_expenses_csv(&expenses, &mut writer)?;
    writer
        .flush()
        .map_err(|e| SpendwiseError::Export(e.to_string()))?;

    println!("Exported {} expenses to: {}", expenses.len(), output.display());
    Ok(())
}

/// Handle report export
fn handle_export_report(
    backend: &mut Backend,
    settings: &Settings,
    bucketing: Bucketing,
    format: ReportFormat,
    output: &Path,
    today: NaiveDate,
) -> SpendwiseResult<()> {
    let report = build_report(backend, settings, bucketing, today)?;
    let document = ReportExport::from_report(&report);

    let mut writer = create_output(output)?;
    match format {
        ReportFormat::Json => export_report_json(&document, &mut writer)?,
        ReportFormat::Yaml => export_report_yaml(&document, &mut writer)?,
    }
    writer
        .flush()
        .map_err(|e| SpendwiseError::Export(e.to_string()))?;

    println!("Report exported to: {}", output.display());
    Ok(())
}

fn create_output(path: &Path) -> SpendwiseResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        SpendwiseError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::{MemoryStore, DEMO_PASSWORD, DEMO_USERNAME};
    use crate::export::read_csv_rows;
    use crate::models::Category;
    use crate::services::AuthService;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 20).unwrap()
    }

    fn setup() -> Backend {
        let store = MemoryStore::seeded(today());
        let mut backend = Backend::new(Box::new(store));
        AuthService::new(&mut backend)
            .login(DEMO_USERNAME, DEMO_PASSWORD)
            .unwrap();
        backend
    }

    #[test]
    fn test_export_filtered_csv() {
        let mut backend = setup();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("food.csv");

        handle_export_command(
            &mut backend,
            &Settings::default(),
            ExportCommands::Csv {
                output: Some(path.clone()),
                category: Some(CategoryFilter::Only(Category::Food)),
                search: None,
            },
            today(),
        )
        .unwrap();

        let rows = read_csv_rows(File::open(&path).unwrap()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "Groceries");
    }

    #[test]
    fn test_export_report_json() {
        let mut backend = setup();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.json");

        handle_export_command(
            &mut backend,
            &Settings::default(),
            ExportCommands::Report {
                output: Some(path.clone()),
                bucket: Bucketing::Weekly,
                format: ReportFormat::Json,
            },
            today(),
        )
        .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["timeRange"], "weekly");
        assert_eq!(value["totalSpent"], 5300);
        assert_eq!(value["categoryData"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_unwritable_output() {
        let mut backend = setup();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("out.csv");

        let err = handle_export_command(
            &mut backend,
            &Settings::default(),
            ExportCommands::Csv {
                output: Some(path),
                category: None,
                search: None,
            },
            today(),
        )
        .unwrap_err();
        assert!(matches!(err, SpendwiseError::Export(_)));
    }
}
