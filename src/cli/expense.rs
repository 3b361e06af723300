//! Expense CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use super::{confirm, parse_amount, today};
use crate::config::Settings;
use crate::display::{format_expense_line, format_expense_list};
use crate::error::SpendwiseResult;
use crate::models::{Category, ExpenseId, NewExpense};
use crate::reports::{CategoryFilter, ExpenseFilter};
use crate::services::{Backend, ExpenseService};

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// List expenses
    #[command(alias = "ls")]
    List {
        /// Only this category ("all" for every category)
        #[arg(short, long)]
        category: Option<CategoryFilter>,

        /// Text matched against description or category
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Record a new expense
    Add {
        /// What the money was spent on
        description: String,

        /// Amount (e.g., "250" or "99.50")
        amount: String,

        /// Category (Food, Transport, Entertainment, Housing, Healthcare,
        /// Education, Shopping, Utilities, Other)
        #[arg(short, long)]
        category: Option<Category>,

        /// Date of the expense (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID
        id: ExpenseId,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    backend: &mut Backend,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> SpendwiseResult<()> {
    let currency = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::List { category, search } => {
            let filter = ExpenseFilter {
                category: category.unwrap_or_default(),
                search: search.unwrap_or_default(),
            };
            let expenses = ExpenseService::new(backend).list_filtered(&filter)?;
            print!(
                "{}",
                format_expense_list(&expenses, currency, &settings.date_format)
            );
        }

        ExpenseCommands::Add {
            description,
            amount,
            category,
            date,
        } => {
            let amount = parse_amount(&amount)?;
            let expense = NewExpense::new(description, amount)
                .with_category(category.unwrap_or(Category::NEW_EXPENSE_DEFAULT))
                .with_date(date.unwrap_or_else(today));

            let created = ExpenseService::new(backend).create(expense)?;
            println!("Added expense {}: {}", created.id, format_expense_line(&created, currency));
        }

        ExpenseCommands::Delete { id, yes } => {
            let mut service = ExpenseService::new(backend);
            let expense = service.get(&id)?;

            if !yes && !confirm(&format!("Delete {}?", format_expense_line(&expense, currency)))? {
                println!("Aborted.");
                return Ok(());
            }

            service.delete(&id)?;
            println!("Deleted expense {}", id);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::{MemoryStore, DEMO_PASSWORD, DEMO_USERNAME};
    use crate::models::Money;
    use crate::services::AuthService;

    fn setup() -> (MemoryStore, Backend) {
        let store = MemoryStore::seeded(NaiveDate::from_ymd_opt(2024, 4, 20).unwrap());
        let mut backend = Backend::new(Box::new(store.clone()));
        AuthService::new(&mut backend)
            .login(DEMO_USERNAME, DEMO_PASSWORD)
            .unwrap();
        (store, backend)
    }

    #[test]
    fn test_add_and_delete() {
        let (store, mut backend) = setup();
        let settings = Settings::default();

        handle_expense_command(
            &mut backend,
            &settings,
            ExpenseCommands::Add {
                description: "Bus pass".into(),
                amount: "450".into(),
                category: Some(Category::Transport),
                date: None,
            },
        )
        .unwrap();
        assert_eq!(store.expense_count(), 6);

        handle_expense_command(
            &mut backend,
            &settings,
            ExpenseCommands::Delete {
                id: ExpenseId::from("1"),
                yes: true,
            },
        )
        .unwrap();
        assert_eq!(store.expense_count(), 5);
        assert!(backend
            .view()
            .expenses()
            .iter()
            .any(|e| e.amount == Money::from_units(450)));
    }

    #[test]
    fn test_bad_amount_is_rejected() {
        let (store, mut backend) = setup();
        let calls = store.calls();
        let err = handle_expense_command(
            &mut backend,
            &Settings::default(),
            ExpenseCommands::Add {
                description: "Lunch".into(),
                amount: "lots".into(),
                category: None,
                date: None,
            },
        )
        .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(store.calls(), calls);
    }
}
