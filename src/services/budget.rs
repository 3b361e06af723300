//! Budget service
//!
//! Monthly category budgets and the budget-versus-spending overview.

use tracing::info;

use super::backend::Backend;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{Budget, BudgetId, NewBudget};
use crate::reports::BudgetOverviewReport;

/// Service for budget management
pub struct BudgetService<'a> {
    backend: &'a mut Backend,
}

impl<'a> BudgetService<'a> {
    pub fn new(backend: &'a mut Backend) -> Self {
        Self { backend }
    }

    /// Budgets, optionally narrowed to a month and/or year
    pub fn list(&mut self, month: Option<u32>, year: Option<i32>) -> SpendwiseResult<Vec<Budget>> {
        if let Some(month) = month {
            if !(1..=12).contains(&month) {
                return Err(SpendwiseError::Validation(format!(
                    "Month must be between 1 and 12, got {}",
                    month
                )));
            }
        }
        self.backend
            .call(|store, session| store.list_budgets(session, month, year))
    }

    /// Set a budget; several budgets for one category and month are allowed
    /// and add up
    pub fn create(&mut self, budget: NewBudget) -> SpendwiseResult<Budget> {
        budget
            .validate()
            .map_err(|e| SpendwiseError::Validation(e.to_string()))?;

        let created = self
            .backend
            .call(|store, session| store.create_budget(session, &budget))?;
        info!(
            id = %created.id,
            category = %created.category,
            month = created.month,
            year = created.year,
            "budget created"
        );

        self.backend.records_changed()?;
        Ok(created)
    }

    pub fn delete(&mut self, id: &BudgetId) -> SpendwiseResult<()> {
        self.backend
            .call(|store, session| store.delete_budget(session, id))?;
        info!(%id, "budget deleted");

        self.backend.records_changed()
    }

    /// Budgeted, spent and remaining amounts per category for one month
    pub fn overview(&mut self, year: i32, month: u32) -> SpendwiseResult<BudgetOverviewReport> {
        let view = self.backend.fresh_view()?;
        Ok(BudgetOverviewReport::generate(
            view.budgets(),
            view.expenses(),
            year,
            month,
        ))
    }
}
