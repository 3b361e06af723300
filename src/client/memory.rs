//! In-process record store
//!
//! Holds expenses and budgets in memory and mimics the REST store's
//! behavior: credential check, bearer tokens, id assignment and the
//! dashboard summary. Used for `--demo` runs and by tests.

use chrono::{Datelike, Duration, Local, NaiveDate};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

use super::{HealthStatus, RecordStore};
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{
    Budget, BudgetId, Category, DashboardSummary, Expense, ExpenseId, LoginResponse, Money,
    NewBudget, NewExpense, Session, SummaryTrendPoint, UserProfile,
};
use crate::reports::{category_breakdown, recent_expenses, total_spent, trailing_monthly_trend};

/// Demo account accepted by a seeded store
pub const DEMO_USERNAME: &str = "demo";
pub const DEMO_PASSWORD: &str = "demo123";
const DEMO_EMAIL: &str = "demo@spendwise.com";

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<(String, String, String)>,
    tokens: Vec<String>,
    expenses: Vec<Expense>,
    budgets: Vec<Budget>,
    next_id: u64,
    summary_available: bool,
    fail_next: Option<SpendwiseError>,
    calls: usize,
}

/// In-memory [`RecordStore`]
///
/// Clones share the same records, so a test can keep a handle while a
/// service owns another.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    state: Rc<RefCell<MemoryState>>,
    today: NaiveDate,
}

impl MemoryStore {
    /// An empty store with no users
    pub fn new(today: NaiveDate) -> Self {
        Self {
            state: Rc::new(RefCell::new(MemoryState {
                next_id: 1,
                summary_available: true,
                ..MemoryState::default()
            })),
            today,
        }
    }

    /// A store with the demo account and a small set of sample records
    /// dated relative to today
    pub fn demo() -> Self {
        Self::seeded(Local::now().date_naive())
    }

    pub fn seeded(today: NaiveDate) -> Self {
        let store = Self::new(today).with_user(DEMO_USERNAME, DEMO_PASSWORD, DEMO_EMAIL);

        let samples = [
            ("Groceries", Category::Food, 850, 0),
            ("Petrol", Category::Transport, 2000, 1),
            ("Movie Tickets", Category::Entertainment, 500, 3),
            ("Internet Bill", Category::Utilities, 1200, 6),
            ("Medicine", Category::Healthcare, 750, 9),
        ];
        for (description, category, amount, days_ago) in samples {
            store.insert_expense(
                description,
                category,
                Money::from_units(amount),
                today - Duration::days(days_ago),
            );
        }

        store.insert_budget(Category::Food, Money::from_units(5000), today.month(), today.year());
        store.insert_budget(Category::Transport, Money::from_units(3000), today.month(), today.year());

        store
    }

    /// Register a user account
    pub fn with_user(self, username: &str, password: &str, email: &str) -> Self {
        self.state.borrow_mut().users.push((
            username.to_string(),
            password.to_string(),
            email.to_string(),
        ));
        self
    }

    /// Add an expense directly, bypassing authentication
    pub fn insert_expense(
        &self,
        description: &str,
        category: Category,
        amount: Money,
        date: NaiveDate,
    ) -> ExpenseId {
        let mut state = self.state.borrow_mut();
        let id = ExpenseId::from(next_id(&mut state).as_str());
        state
            .expenses
            .push(Expense::new(id.clone(), description, category, amount, date));
        id
    }

    /// Add a budget directly, bypassing authentication
    pub fn insert_budget(&self, category: Category, amount: Money, month: u32, year: i32) -> BudgetId {
        let mut state = self.state.borrow_mut();
        let id = BudgetId::from(next_id(&mut state).as_str());
        state
            .budgets
            .push(Budget::new(id.clone(), category, amount, month, year));
        id
    }

    /// Toggle whether the summary endpoint answers
    pub fn set_summary_available(&self, available: bool) {
        self.state.borrow_mut().summary_available = available;
    }

    /// Make the next authenticated call fail with `error`
    pub fn fail_next(&self, error: SpendwiseError) {
        self.state.borrow_mut().fail_next = Some(error);
    }

    /// Invalidate every issued token
    pub fn expire_sessions(&self) {
        self.state.borrow_mut().tokens.clear();
    }

    /// Number of store operations attempted so far
    pub fn calls(&self) -> usize {
        self.state.borrow().calls
    }

    pub fn expense_count(&self) -> usize {
        self.state.borrow().expenses.len()
    }

    /// Count the call, then check the pending failure and the token
    fn authorize(&self, session: &Session) -> SpendwiseResult<()> {
        let mut state = self.state.borrow_mut();
        state.calls += 1;
        if let Some(error) = state.fail_next.take() {
            return Err(error);
        }
        if state.tokens.iter().any(|t| t == session.token().expose()) {
            Ok(())
        } else {
            Err(SpendwiseError::Unauthorized)
        }
    }
}

fn next_id(state: &mut MemoryState) -> String {
    let id = state.next_id;
    state.next_id += 1;
    id.to_string()
}

impl RecordStore for MemoryStore {
    fn login(&self, username: &str, password: &str) -> SpendwiseResult<LoginResponse> {
        let mut state = self.state.borrow_mut();
        state.calls += 1;

        let email = state
            .users
            .iter()
            .find(|(u, p, _)| u == username && p == password)
            .map(|(_, _, email)| email.clone())
            .ok_or(SpendwiseError::Unauthorized)?;

        let token = format!("token-{}", uuid::Uuid::new_v4());
        state.tokens.push(token.clone());
        debug!(username, "memory store issued token");

        Ok(LoginResponse {
            access_token: token,
            token_type: "bearer".to_string(),
            user: Some(UserProfile {
                username: username.to_string(),
                email,
            }),
        })
    }

    fn list_expenses(&self, session: &Session) -> SpendwiseResult<Vec<Expense>> {
        self.authorize(session)?;
        Ok(self.state.borrow().expenses.clone())
    }

    fn create_expense(&self, session: &Session, expense: &NewExpense) -> SpendwiseResult<Expense> {
        self.authorize(session)?;
        let id = self.insert_expense(
            &expense.description,
            expense.category,
            expense.amount,
            expense.date,
        );
        let state = self.state.borrow();
        state
            .expenses
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| SpendwiseError::expense_not_found(id.as_str()))
    }

    fn delete_expense(&self, session: &Session, id: &ExpenseId) -> SpendwiseResult<()> {
        self.authorize(session)?;
        let mut state = self.state.borrow_mut();
        let before = state.expenses.len();
        state.expenses.retain(|e| &e.id != id);
        if state.expenses.len() == before {
            return Err(SpendwiseError::expense_not_found(id.as_str()));
        }
        Ok(())
    }

    fn list_budgets(
        &self,
        session: &Session,
        month: Option<u32>,
        year: Option<i32>,
    ) -> SpendwiseResult<Vec<Budget>> {
        self.authorize(session)?;
        Ok(self
            .state
            .borrow()
            .budgets
            .iter()
            .filter(|b| month.map_or(true, |m| b.month == m))
            .filter(|b| year.map_or(true, |y| b.year == y))
            .cloned()
            .collect())
    }

    fn create_budget(&self, session: &Session, budget: &NewBudget) -> SpendwiseResult<Budget> {
        self.authorize(session)?;
        let id = self.insert_budget(budget.category, budget.amount, budget.month, budget.year);
        Ok(Budget::new(id, budget.category, budget.amount, budget.month, budget.year))
    }

    fn delete_budget(&self, session: &Session, id: &BudgetId) -> SpendwiseResult<()> {
        self.authorize(session)?;
        let mut state = self.state.borrow_mut();
        let before = state.budgets.len();
        state.budgets.retain(|b| &b.id != id);
        if state.budgets.len() == before {
            return Err(SpendwiseError::budget_not_found(id.as_str()));
        }
        Ok(())
    }

    fn dashboard_summary(&self, session: &Session) -> SpendwiseResult<Option<DashboardSummary>> {
        self.authorize(session)?;
        let state = self.state.borrow();
        if !state.summary_available {
            return Ok(None);
        }

        let expenses = &state.expenses;
        let category_breakdown = category_breakdown(expenses)
            .iter()
            .map(|(category, amount)| (category.name().to_string(), amount))
            .collect();
        let monthly_trend = trailing_monthly_trend(expenses, self.today, 6)
            .into_iter()
            .map(|point| SummaryTrendPoint {
                month: point.label,
                total: point.total,
            })
            .collect();

        Ok(Some(DashboardSummary {
            total_spent: total_spent(expenses),
            category_breakdown,
            monthly_trend,
            recent_expenses: recent_expenses(expenses, 5),
            remaining_budget: None,
        }))
    }

    fn health(&self) -> SpendwiseResult<HealthStatus> {
        Ok(HealthStatus {
            status: "healthy".to_string(),
            timestamp: Some(Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S").to_string()),
        })
    }
}
