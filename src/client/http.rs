//! REST client for the record store

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{HealthStatus, RecordStore};
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::{
    Budget, BudgetId, DashboardSummary, Expense, ExpenseId, LoginResponse, NewBudget, NewExpense,
    Session,
};

/// Error body shapes the store may send
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(alias = "error", alias = "message")]
    detail: serde_json::Value,
}

/// The expense list comes either bare or wrapped in an object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExpenseList {
    Bare(Vec<Expense>),
    Wrapped { expenses: Vec<Expense> },
}

impl From<ExpenseList> for Vec<Expense> {
    fn from(list: ExpenseList) -> Self {
        match list {
            ExpenseList::Bare(expenses) | ExpenseList::Wrapped { expenses } => expenses,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BudgetList {
    Bare(Vec<Budget>),
    Wrapped { budgets: Vec<Budget> },
}

impl From<BudgetList> for Vec<Budget> {
    fn from(list: BudgetList) -> Self {
        match list {
            BudgetList::Bare(budgets) | BudgetList::Wrapped { budgets } => budgets,
        }
    }
}

/// Blocking HTTP implementation of [`RecordStore`]
#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    base_url: Url,
    http: Client,
}

impl HttpRecordStore {
    pub fn new(base_url: &str, timeout: Duration) -> SpendwiseResult<Self> {
        let base_url = parse_base_url(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("spendwise/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SpendwiseError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> SpendwiseResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| SpendwiseError::Config(format!("invalid endpoint {}: {}", path, e)))
    }

    fn send(&self, request: RequestBuilder) -> SpendwiseResult<Response> {
        let response = request
            .send()
            .map_err(|e| SpendwiseError::Transport(e.to_string()))?;

        debug!(
            status = response.status().as_u16(),
            url = %response.url(),
            "record store responded"
        );

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().unwrap_or_default();
        Err(status_error(status, &body))
    }

    fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> SpendwiseResult<T> {
        let body = self
            .send(request)?
            .text()
            .map_err(|e| SpendwiseError::Transport(e.to_string()))?;
        serde_json::from_str(&body)
            .map_err(|e| SpendwiseError::Server(format!("unexpected response body: {}", e)))
    }

    fn authorized(&self, request: RequestBuilder, session: &Session) -> RequestBuilder {
        request.header(reqwest::header::AUTHORIZATION, session.authorization())
    }
}

impl RecordStore for HttpRecordStore {
    fn login(&self, username: &str, password: &str) -> SpendwiseResult<LoginResponse> {
        let url = self.endpoint("api/login")?;
        debug!(%url, username, "logging in");
        let request = self
            .http
            .post(url)
            .form(&[("username", username), ("password", password)]);
        self.fetch(request)
    }

    fn list_expenses(&self, session: &Session) -> SpendwiseResult<Vec<Expense>> {
        let url = self.endpoint("api/expenses")?;
        debug!(%url, "listing expenses");
        let list: ExpenseList = self.fetch(self.authorized(self.http.get(url), session))?;
        Ok(list.into())
    }

    fn create_expense(&self, session: &Session, expense: &NewExpense) -> SpendwiseResult<Expense> {
        let url = self.endpoint("api/expenses")?;
        debug!(%url, "creating expense");
        self.fetch(self.authorized(self.http.post(url).json(expense), session))
    }

    fn delete_expense(&self, session: &Session, id: &ExpenseId) -> SpendwiseResult<()> {
        let url = self.endpoint(&format!("api/expenses/{}", id))?;
        debug!(%url, "deleting expense");
        match self.send(self.authorized(self.http.delete(url), session)) {
            Ok(_) => Ok(()),
            Err(SpendwiseError::NotFound { .. }) => Err(SpendwiseError::expense_not_found(id.as_str())),
            Err(e) => Err(e),
        }
    }

    fn list_budgets(
        &self,
        session: &Session,
        month: Option<u32>,
        year: Option<i32>,
    ) -> SpendwiseResult<Vec<Budget>> {
        let url = self.endpoint("api/budgets")?;
        debug!(%url, ?month, ?year, "listing budgets");

        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(month) = month {
            query.push(("month", month.to_string()));
        }
        if let Some(year) = year {
            query.push(("year", year.to_string()));
        }

        let list: BudgetList =
            self.fetch(self.authorized(self.http.get(url).query(&query), session))?;
        Ok(list.into())
    }

    fn create_budget(&self, session: &Session, budget: &NewBudget) -> SpendwiseResult<Budget> {
        let url = self.endpoint("api/budgets")?;
        debug!(%url, "creating budget");
        self.fetch(self.authorized(self.http.post(url).json(budget), session))
    }

    fn delete_budget(&self, session: &Session, id: &BudgetId) -> SpendwiseResult<()> {
        let url = self.endpoint(&format!("api/budgets/{}", id))?;
        debug!(%url, "deleting budget");
        match self.send(self.authorized(self.http.delete(url), session)) {
            Ok(_) => Ok(()),
            Err(SpendwiseError::NotFound { .. }) => Err(SpendwiseError::budget_not_found(id.as_str())),
            Err(e) => Err(e),
        }
    }

    fn dashboard_summary(&self, session: &Session) -> SpendwiseResult<Option<DashboardSummary>> {
        let url = self.endpoint("api/dashboard")?;
        debug!(%url, "fetching dashboard summary");

        let response = match self.send(self.authorized(self.http.get(url), session)) {
            Ok(response) => response,
            Err(SpendwiseError::NotFound { .. }) => return Ok(None),
            Err(SpendwiseError::Server(message)) if summary_unsupported(&message) => {
                return Ok(None)
            }
            Err(e) => return Err(e),
        };

        let body = response
            .text()
            .map_err(|e| SpendwiseError::Transport(e.to_string()))?;
        match serde_json::from_str(&body) {
            Ok(summary) => Ok(Some(summary)),
            Err(e) => {
                debug!(error = %e, "dashboard summary could not be decoded");
                Ok(None)
            }
        }
    }

    fn health(&self) -> SpendwiseResult<HealthStatus> {
        let url = self.endpoint("health")?;
        self.fetch(self.http.get(url))
    }
}

/// Parse the configured base URL so relative joins keep any path prefix
pub fn parse_base_url(base_url: &str) -> SpendwiseResult<Url> {
    let trimmed = base_url.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };

    let url = Url::parse(&with_slash)
        .map_err(|e| SpendwiseError::Config(format!("invalid api_base_url {:?}: {}", base_url, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SpendwiseError::Config(format!(
            "unsupported scheme {:?} in api_base_url",
            other
        ))),
    }
}

/// Map a non-success HTTP status and body to an error
pub fn status_error(status: u16, body: &str) -> SpendwiseError {
    let message = error_message(body);
    match status {
        401 => SpendwiseError::Unauthorized,
        403 => SpendwiseError::Forbidden(message),
        404 => SpendwiseError::NotFound {
            entity_type: "Resource",
            identifier: message,
        },
        409 => SpendwiseError::Conflict(message),
        422 => SpendwiseError::Validation(message),
        _ => SpendwiseError::Server(format!("HTTP {}: {}", status, message)),
    }
}

fn summary_unsupported(message: &str) -> bool {
    message.starts_with("HTTP 405") || message.starts_with("HTTP 501")
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            detail: serde_json::Value::String(s),
        }) => s,
        Ok(ErrorResponse { detail }) => detail.to_string(),
        Err(_) if body.trim().is_empty() => "unknown error".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
