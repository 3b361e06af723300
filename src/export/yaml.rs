//! YAML Export functionality
//!
//! The report document in a human-readable form.

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::export::json::ReportExport;
use std::io::Write;

/// Write the report as YAML, preceded by a comment header
pub fn export_report_yaml<W: Write>(report: &ReportExport, writer: &mut W) -> SpendwiseResult<()> {
    writeln!(writer, "# SpendWise Spending Report")
        .map_err(|e| SpendwiseError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", report.generated_at)
        .map_err(|e| SpendwiseError::Export(e.to_string()))?;
    writeln!(writer, "# Time range: {}", report.time_range)
        .map_err(|e| SpendwiseError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| SpendwiseError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, report).map_err(|e| SpendwiseError::Export(e.to_string()))?;

    Ok(())
}
