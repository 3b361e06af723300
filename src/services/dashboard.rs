//! Dashboard service
//!
//! Monthly dashboards come from the store's summary endpoint when it has
//! one; otherwise, and for daily or weekly views, the report is aggregated
//! from the fetched records. A locally built monthly dashboard carries the
//! same zero-filled trailing trend the summary endpoint returns.

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::backend::Backend;
use crate::error::SpendwiseResult;
use crate::models::Bucketing;
use crate::reports::{trailing_monthly_trend, DashboardReport, DEFAULT_RECENT_LIMIT};

/// Months in the dashboard's monthly trend
pub const DEFAULT_TREND_MONTHS: usize = 6;

/// Service for the dashboard report
pub struct DashboardService<'a> {
    backend: &'a mut Backend,
    recent_limit: usize,
    trend_months: usize,
}

impl<'a> DashboardService<'a> {
    pub fn new(backend: &'a mut Backend) -> Self {
        Self {
            backend,
            recent_limit: DEFAULT_RECENT_LIMIT,
            trend_months: DEFAULT_TREND_MONTHS,
        }
    }

    /// Show at most `limit` recent expenses
    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    /// Length of the trailing trend when the monthly view is built locally
    pub fn with_trend_months(mut self, months: usize) -> Self {
        self.trend_months = months;
        self
    }

    /// Build the report for `bucketing`, as of `today`
    pub fn load(&mut self, bucketing: Bucketing, today: NaiveDate) -> SpendwiseResult<DashboardReport> {
        if bucketing == Bucketing::Monthly {
            match self
                .backend
                .call(|store, session| store.dashboard_summary(session))?
            {
                Some(summary) => {
                    debug!("dashboard built from store summary");
                    return Ok(DashboardReport::from_summary(summary).limit_recent(self.recent_limit));
                }
                None => warn!("summary endpoint unavailable, aggregating locally"),
            }

            let mut report = self.load_local(bucketing, today)?;
            report.trend = trailing_monthly_trend(self.backend.view().expenses(), today, self.trend_months);
            return Ok(report);
        }

        self.load_local(bucketing, today)
    }

    /// Build the report from raw records only
    pub fn load_local(&mut self, bucketing: Bucketing, today: NaiveDate) -> SpendwiseResult<DashboardReport> {
        let view = self.backend.fresh_view()?;
        let report = DashboardReport::from_records(view.expenses(), view.budgets(), bucketing, today);
        Ok(report.limit_recent(self.recent_limit))
    }
}
