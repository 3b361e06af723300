//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod expense;
pub mod export;
pub mod report;
pub mod session;

pub use budget::{handle_budget_command, BudgetCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use report::{handle_dashboard_command, handle_report_command};
pub use session::{handle_health_command, handle_login_command};

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::Money;

/// Parse a user-entered amount ("250", "99.50", "₹1,250")
pub fn parse_amount(input: &str) -> SpendwiseResult<Money> {
    Money::parse(input).map_err(|_| {
        SpendwiseError::Validation(format!(
            "Invalid amount: {}. Use a number like 250 or 99.50",
            input
        ))
    })
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Ask a yes/no question on stdin; anything but "y" or "yes" declines
pub fn confirm(prompt: &str) -> SpendwiseResult<bool> {
    print!("{} (y/N): ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("99.50").unwrap(), Money::from_cents(9950));
        assert_eq!(parse_amount("₹1,250").unwrap(), Money::from_units(1250));
        assert!(parse_amount("ten").unwrap_err().is_validation());
        assert!(parse_amount("--5").unwrap_err().is_validation());
        assert!(parse_amount("99999999999999999").unwrap_err().is_validation());
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("nope"));
    }
}
