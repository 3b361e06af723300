//! Budget CLI commands
//!
//! Implements CLI commands for monthly category budgets and the
//! budget-versus-spending overview.

use chrono::Datelike;
use clap::Subcommand;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use super::{confirm, parse_amount, today};
use crate::config::Settings;
use crate::display::format_budget_list;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{BudgetId, Category, NewBudget, Period};
use crate::services::{Backend, BudgetService};

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// List budgets
    #[command(alias = "ls")]
    List {
        /// Month (1-12)
        #[arg(short, long)]
        month: Option<u32>,

        /// Year (e.g., 2025)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Set a spending cap for a category
    Add {
        /// Category name
        category: Category,

        /// Amount (e.g., "5000" or "5000.00")
        amount: String,

        /// Month (1-12), defaults to the current month
        #[arg(short, long)]
        month: Option<u32>,

        /// Year, defaults to the current year
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Delete a budget
    #[command(alias = "rm")]
    Delete {
        /// Budget ID
        id: BudgetId,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show budgeted, spent and remaining amounts per category
    Overview {
        /// Month to report on (e.g., "2025-01"), defaults to the current month
        #[arg(short, long)]
        period: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    backend: &mut Backend,
    settings: &Settings,
    cmd: BudgetCommands,
) -> SpendwiseResult<()> {
    let currency = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::List { month, year } => {
            let budgets = BudgetService::new(backend).list(month, year)?;
            print!("{}", format_budget_list(&budgets, currency));
        }

        BudgetCommands::Add {
            category,
            amount,
            month,
            year,
        } => {
            let amount = parse_amount(&amount)?;
            let now = today();
            let budget = NewBudget::new(
                category,
                amount,
                month.unwrap_or_else(|| now.month()),
                year.unwrap_or_else(|| now.year()),
            );

            let created = BudgetService::new(backend).create(budget)?;
            println!(
                "Budget {} set: {} {} for {}",
                created.id,
                created.category,
                created.amount.format_with_symbol(currency),
                created.period()
            );
        }

        BudgetCommands::Delete { id, yes } => {
            let mut service = BudgetService::new(backend);
            if !yes && !confirm(&format!("Delete budget {}?", id))? {
                println!("Aborted.");
                return Ok(());
            }

            service.delete(&id)?;
            println!("Deleted budget {}", id);
        }

        BudgetCommands::Overview { period, output } => {
            let (year, month) = parse_month(period.as_deref())?;
            let report = BudgetService::new(backend).overview(year, month)?;

            if let Some(path) = output {
                let file = File::create(&path).map_err(|e| {
                    SpendwiseError::Export(format!(
                        "Failed to create file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                let mut writer = BufWriter::new(file);
                report.export_csv(&mut writer)?;
                println!("Budget report exported to: {}", path.display());
            } else {
                println!("{}", report.format_terminal(currency));
            }
        }
    }

    Ok(())
}

/// Resolve "YYYY-MM" or the current month
fn parse_month(period: Option<&str>) -> SpendwiseResult<(i32, u32)> {
    let Some(period) = period else {
        let now = today();
        return Ok((now.year(), now.month()));
    };

    match Period::parse(period) {
        Ok(Period::Monthly { year, month }) => Ok((year, month)),
        _ => Err(SpendwiseError::Validation(format!(
            "Invalid period format: {}. Use YYYY-MM (e.g., 2025-01)",
            period
        ))),
    }
}
