//! Fetched-record snapshots
//!
//! A view installs the result of a fetch only if that fetch started after
//! the one currently installed, so a slow, older response can never replace
//! newer data. Mutations mark the view stale until the next fetch lands.

use crate::models::{Budget, Expense};

/// Proof that a fetch was started; carries its generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// The last successfully fetched value of a view
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    data: Option<T>,
    issued: u64,
    installed: u64,
    /// Last generation issued before the records changed
    changed_at: u64,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            data: None,
            issued: 0,
            installed: 0,
            changed_at: 0,
        }
    }
}

impl<T> Snapshot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch, taking the next generation
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    /// Install a fetched value unless a newer fetch already landed
    ///
    /// Returns whether the value was installed.
    pub fn complete(&mut self, ticket: FetchTicket, data: T) -> bool {
        if ticket.0 <= self.installed {
            tracing::debug!(
                generation = ticket.0,
                installed = self.installed,
                "discarding stale fetch result"
            );
            return false;
        }
        self.data = Some(data);
        self.installed = ticket.0;
        true
    }

    /// Record that the underlying records changed
    pub fn mark_stale(&mut self) {
        self.changed_at = self.issued;
    }

    /// True until a fetch started after the last change has landed
    pub fn is_stale(&self) -> bool {
        self.installed <= self.changed_at
    }

    pub fn get(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Generation of the installed value; zero before the first fetch
    pub fn generation(&self) -> u64 {
        self.installed
    }
}

/// Expenses and budgets as last fetched from the store
#[derive(Debug, Clone, Default)]
pub struct RecordView {
    pub expense_set: Snapshot<Vec<Expense>>,
    pub budget_set: Snapshot<Vec<Budget>>,
}

impl RecordView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expenses(&self) -> &[Expense] {
        self.expense_set.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn budgets(&self) -> &[Budget] {
        self.budget_set.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn mark_stale(&mut self) {
        self.expense_set.mark_stale();
        self.budget_set.mark_stale();
    }

    /// Both record sets fetched since the last change
    pub fn is_consistent(&self) -> bool {
        !self.expense_set.is_stale() && !self.budget_set.is_stale()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_fetch_wins() {
        let mut snapshot = Snapshot::new();
        let older = snapshot.begin_fetch();
        let newer = snapshot.begin_fetch();

        assert!(snapshot.complete(newer, "new"));
        assert!(!snapshot.complete(older, "old"));
        assert_eq!(snapshot.get(), Some(&"new"));
        assert_eq!(snapshot.generation(), newer.generation());
    }

    #[test]
    fn test_in_order_fetches_all_install() {
        let mut snapshot = Snapshot::new();
        let first = snapshot.begin_fetch();
        assert!(snapshot.complete(first, 1));
        let second = snapshot.begin_fetch();
        assert!(snapshot.complete(second, 2));
        assert_eq!(snapshot.get(), Some(&2));
    }

    #[test]
    fn test_ticket_cannot_install_twice() {
        let mut snapshot = Snapshot::new();
        let ticket = snapshot.begin_fetch();
        assert!(snapshot.complete(ticket, 1));
        assert!(!snapshot.complete(ticket, 2));
        assert_eq!(snapshot.get(), Some(&1));
    }

    #[test]
    fn test_stale_until_a_fetch_lands() {
        let mut snapshot: Snapshot<Vec<u8>> = Snapshot::new();
        assert!(snapshot.is_stale());

        let ticket = snapshot.begin_fetch();
        snapshot.complete(ticket, vec![1]);
        assert!(!snapshot.is_stale());

        snapshot.mark_stale();
        assert!(snapshot.is_stale());
        assert_eq!(snapshot.get(), Some(&vec![1]));

        let ticket = snapshot.begin_fetch();
        snapshot.complete(ticket, vec![1, 2]);
        assert!(!snapshot.is_stale());
    }

    #[test]
    fn test_fetch_started_before_mutation_leaves_view_stale() {
        let mut snapshot = Snapshot::new();
        let before = snapshot.begin_fetch();
        snapshot.mark_stale();
        let after = snapshot.begin_fetch();

        snapshot.complete(before, "pre-mutation");
        assert!(snapshot.is_stale());
        snapshot.complete(after, "post-mutation");
        assert!(!snapshot.is_stale());
        assert_eq!(snapshot.get(), Some(&"post-mutation"));
    }

    #[test]
    fn test_empty_view() {
        let view = RecordView::new();
        assert!(view.expenses().is_empty());
        assert!(view.budgets().is_empty());
        assert!(!view.is_consistent());
    }
}
