//! Shared service context
//!
//! `Backend` bundles the record store, the current session and the record
//! view. Services borrow it for the duration of one operation.

use tracing::{debug, info, warn};

use super::snapshot::RecordView;
use crate::client::RecordStore;
use crate::error::{SpendwiseError, SpendwiseResult};
use crate::models::Session;

pub struct Backend {
    store: Box<dyn RecordStore>,
    session: Option<Session>,
    view: RecordView,
}

impl Backend {
    pub fn new(store: Box<dyn RecordStore>) -> Self {
        Self {
            store,
            session: None,
            view: RecordView::new(),
        }
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub(crate) fn open_session(&mut self, session: Session) {
        info!(username = %session.user().username, "session started");
        self.session = Some(session);
        self.view = RecordView::new();
    }

    /// Drop the session, wiping its token
    pub fn close_session(&mut self) -> Option<Session> {
        let session = self.session.take();
        if let Some(session) = &session {
            info!(username = %session.user().username, "session ended");
        }
        self.view = RecordView::new();
        session
    }

    /// Run an authenticated store call
    ///
    /// Fails with `Unauthorized` when logged out. If the store rejects the
    /// token the session is discarded.
    pub fn call<T>(
        &mut self,
        op: impl FnOnce(&dyn RecordStore, &Session) -> SpendwiseResult<T>,
    ) -> SpendwiseResult<T> {
        let result = match &self.session {
            Some(session) => op(self.store.as_ref(), session),
            None => return Err(SpendwiseError::Unauthorized),
        };

        if let Err(SpendwiseError::Unauthorized) = &result {
            warn!("record store rejected the session token");
            self.close_session();
        }
        result
    }

    pub fn view(&self) -> &RecordView {
        &self.view
    }

    /// Fetch expenses and budgets into the view
    ///
    /// On failure the previously installed records stay in place.
    pub fn refresh(&mut self) -> SpendwiseResult<&RecordView> {
        let expense_ticket = self.view.expense_set.begin_fetch();
        let budget_ticket = self.view.budget_set.begin_fetch();

        let expenses = self.call(|store, session| store.list_expenses(session))?;
        let budgets = self.call(|store, session| store.list_budgets(session, None, None))?;

        debug!(
            expenses = expenses.len(),
            budgets = budgets.len(),
            "record view refreshed"
        );
        self.view.expense_set.complete(expense_ticket, expenses);
        self.view.budget_set.complete(budget_ticket, budgets);
        Ok(&self.view)
    }

    /// The view, fetched again only if records changed since the last fetch
    pub fn fresh_view(&mut self) -> SpendwiseResult<&RecordView> {
        if self.view.is_consistent() {
            Ok(&self.view)
        } else {
            self.refresh()
        }
    }

    /// Note a successful mutation and re-fetch
    pub(crate) fn records_changed(&mut self) -> SpendwiseResult<()> {
        self.view.mark_stale();
        self.refresh().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::{MemoryStore, DEMO_PASSWORD, DEMO_USERNAME};
    use chrono::NaiveDate;

    fn logged_in() -> (MemoryStore, Backend) {
        let store = MemoryStore::seeded(NaiveDate::from_ymd_opt(2024, 4, 20).unwrap());
        let mut backend = Backend::new(Box::new(store.clone()));
        let response = store.login(DEMO_USERNAME, DEMO_PASSWORD).unwrap();
        backend.open_session(Session::from_login(response, DEMO_USERNAME));
        (store, backend)
    }

    #[test]
    fn test_call_requires_session() {
        let store = MemoryStore::seeded(NaiveDate::from_ymd_opt(2024, 4, 20).unwrap());
        let mut backend = Backend::new(Box::new(store.clone()));
        let err = backend.call(|s, session| s.list_expenses(session)).unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(store.calls(), 0);
    }

    #[test]
    fn test_unauthorized_discards_session() {
        let (store, mut backend) = logged_in();
        store.expire_sessions();

        let err = backend.refresh().unwrap_err();
        assert!(err.is_unauthorized());
        assert!(!backend.is_logged_in());
    }

    #[test]
    fn test_failed_refresh_keeps_previous_records() {
        let (store, mut backend) = logged_in();
        backend.refresh().unwrap();
        assert_eq!(backend.view().expenses().len(), 5);

        store.fail_next(SpendwiseError::Transport("connection reset".into()));
        assert!(backend.refresh().unwrap_err().is_retryable());
        assert_eq!(backend.view().expenses().len(), 5);
        assert!(backend.is_logged_in());
    }

    #[test]
    fn test_fresh_view_fetches_once() {
        let (store, mut backend) = logged_in();
        backend.fresh_view().unwrap();
        let calls = store.calls();
        backend.fresh_view().unwrap();
        assert_eq!(store.calls(), calls);
    }
}
