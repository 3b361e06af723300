//! Service layer for SpendWise
//!
//! The service layer sits between the CLI and the record store, handling
//! validation, session lifetime, refresh after mutations and the choice
//! between store-computed and locally aggregated reports.

pub mod auth;
pub mod backend;
pub mod budget;
pub mod dashboard;
pub mod expense;
pub mod snapshot;

pub use auth::AuthService;
pub use backend::Backend;
pub use budget::BudgetService;
pub use dashboard::DashboardService;
pub use expense::ExpenseService;
pub use snapshot::{FetchTicket, RecordView, Snapshot};
