//! Record store access
//!
//! Expenses and budgets live in an external record store. `RecordStore` is
//! the seam between services and that store: `HttpRecordStore` speaks its
//! REST API, `MemoryStore` keeps records in process for demo runs and tests.

pub mod http;
pub mod memory;

use serde::{Deserialize, Serialize};

use crate::error::SpendwiseResult;
use crate::models::{
    Budget, BudgetId, DashboardSummary, Expense, ExpenseId, LoginResponse, NewBudget, NewExpense,
    Session,
};

pub use http::HttpRecordStore;
pub use memory::MemoryStore;

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Operations offered by the record store
///
/// Every call except `login` and `health` needs a session. A rejected
/// credential comes back as `SpendwiseError::Unauthorized`.
pub trait RecordStore {
    /// Exchange credentials for an access token
    fn login(&self, username: &str, password: &str) -> SpendwiseResult<LoginResponse>;

    fn list_expenses(&self, session: &Session) -> SpendwiseResult<Vec<Expense>>;

    /// Store a new expense, returning it with its assigned id
    fn create_expense(&self, session: &Session, expense: &NewExpense) -> SpendwiseResult<Expense>;

    fn delete_expense(&self, session: &Session, id: &ExpenseId) -> SpendwiseResult<()>;

    /// Budgets, optionally narrowed to a month and/or year
    fn list_budgets(
        &self,
        session: &Session,
        month: Option<u32>,
        year: Option<i32>,
    ) -> SpendwiseResult<Vec<Budget>>;

    fn create_budget(&self, session: &Session, budget: &NewBudget) -> SpendwiseResult<Budget>;

    fn delete_budget(&self, session: &Session, id: &BudgetId) -> SpendwiseResult<()>;

    /// The store-computed dashboard summary
    ///
    /// `Ok(None)` means the store offers no usable summary and the caller
    /// should aggregate raw records instead.
    fn dashboard_summary(&self, session: &Session) -> SpendwiseResult<Option<DashboardSummary>>;

    fn health(&self) -> SpendwiseResult<HealthStatus>;
}
