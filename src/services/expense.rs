//! Expense service
//!
//! Listing, filtering, creating and deleting expenses. Input is validated
//! before the store is contacted, and every successful mutation re-fetches
//! the record view.

use tracing::info;

use super::backend::Backend;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Expense, ExpenseId, NewExpense};
use crate::reports::{filter_expenses, ExpenseFilter};

/// Service for expense management
pub struct ExpenseService<'a> {
    backend: &'a mut Backend,
}

impl<'a> ExpenseService<'a> {
    pub fn new(backend: &'a mut Backend) -> Self {
        Self { backend }
    }

    /// All expenses, freshly fetched, in store order
    pub fn list(&mut self) -> SpendwiseResult<Vec<Expense>> {
        Ok(self.backend.refresh()?.expenses().to_vec())
    }

    /// Expenses matching a category and/or search text
    pub fn list_filtered(&mut self, filter: &ExpenseFilter) -> SpendwiseResult<Vec<Expense>> {
        let view = self.backend.refresh()?;
        Ok(filter_expenses(view.expenses(), filter))
    }

    /// Find an expense by id in the current view
    pub fn get(&mut self, id: &ExpenseId) -> SpendwiseResult<Expense> {
        self.backend
            .fresh_view()?
            .expenses()
            .iter()
            .find(|e| &e.id == id)
            .cloned()
            .ok_or_else(|| SpendwiseError::expense_not_found(id.as_str()))
    }

    /// Record a new expense
    pub fn create(&mut self, mut expense: NewExpense) -> SpendwiseResult<Expense> {
        expense
            .validate()
            .map_err(|e| SpendwiseError::Validation(e.to_string()))?;

        let created = self
            .backend
            .call(|store, session| store.create_expense(session, &expense))?;
        info!(id = %created.id, amount = %created.amount, category = %created.category, "expense created");

        self.backend.records_changed()?;
        Ok(created)
    }

    /// Delete an expense
    pub fn delete(&mut self, id: &ExpenseId) -> SpendwiseResult<()> {
        self.backend
            .call(|store, session| store.delete_expense(session, id))?;
        info!(%id, "expense deleted");

        self.backend.records_changed()
    }
}
