//! CSV Export functionality
//!
//! Writes expenses as `description,category,amount,date` rows with every
//! field quoted, and reads such files back.

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Category, Expense, Money};
use chrono::NaiveDate;
use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use std::io::{Read, Write};

/// Column names of the expense export
pub const CSV_HEADER: [&str; 4] = ["description", "category", "amount", "date"];

/// One flat expense row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub description: String,
    pub category: Category,
    pub amount: Money,
    pub date: NaiveDate,
}

impl From<&Expense> for ExportRow {
    fn from(expense: &Expense) -> Self {
        Self {
            description: expense.description.clone(),
            category: expense.category,
            amount: expense.amount,
            date: expense.date,
        }
    }
}

impl ExportRow {
    fn to_record(&self) -> [String; 4] {
        [
            self.description.clone(),
            self.category.name().to_string(),
            self.amount.plain(),
            self.date.format("%Y-%m-%d").to_string(),
        ]
    }

    fn from_record(record: &StringRecord, line: u64) -> SpendwiseResult<Self> {
        let field = |index: usize| {
            record.get(index).ok_or_else(|| {
                SpendwiseError::Csv(format!(
                    "line {}: expected {} fields, found {}",
                    line,
                    CSV_HEADER.len(),
                    record.len()
                ))
            })
        };

        let category = field(1)?
            .parse::<Category>()
            .map_err(|e| SpendwiseError::Csv(format!("line {}: {}", line, e)))?;
        let amount = Money::parse(field(2)?)
            .map_err(|e| SpendwiseError::Csv(format!("line {}: {}", line, e)))?;
        let date = NaiveDate::parse_from_str(field(3)?, "%Y-%m-%d")
            .map_err(|e| SpendwiseError::Csv(format!("line {}: invalid date: {}", line, e)))?;

        Ok(Self {
            description: field(0)?.to_string(),
            category,
            amount,
            date,
        })
    }
}

/// Flatten expenses into export rows, keeping their order
pub fn export_rows(expenses: &[Expense]) -> Vec<ExportRow> {
    expenses.iter().map(ExportRow::from).collect()
}

/// Write rows as CSV with a header line and every field quoted
pub fn write_csv<W: Write>(rows: &[ExportRow], writer: W) -> SpendwiseResult<()> {
    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;
    for row in rows {
        csv_writer.write_record(row.to_record())?;
    }

    csv_writer
        .flush()
        .map_err(|e| SpendwiseError::Export(e.to_string()))?;
    Ok(())
}

/// Export expenses to CSV
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: W) -> SpendwiseResult<()> {
    write_csv(&export_rows(expenses), writer)
}

/// Parse an expense CSV export back into rows
pub fn read_csv_rows<R: Read>(reader: R) -> SpendwiseResult<Vec<ExportRow>> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let matches_header = headers.len() == CSV_HEADER.len()
        && headers
            .iter()
            .zip(CSV_HEADER)
            .all(|(found, wanted)| found.trim().eq_ignore_ascii_case(wanted));
    if !matches_header {
        return Err(SpendwiseError::Csv(format!(
            "unexpected header {:?}, expected {}",
            headers.iter().collect::<Vec<_>>(),
            CSV_HEADER.join(",")
        )));
    }

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        rows.push(ExportRow::from_record(&record, line)?);
    }
    Ok(rows)
}
