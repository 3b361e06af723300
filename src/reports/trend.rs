//! Time-bucketed spending trends

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{Bucketing, Expense, Money, Period};

/// One bucket of a trend series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    /// Bucket label ("Apr 2024", "2024-W15", "2024-04-15")
    pub label: String,
    pub total: Money,
    #[serde(skip)]
    pub period: Option<Period>,
}

impl TrendPoint {
    pub fn new(period: Period, total: Money) -> Self {
        Self {
            label: period.label(),
            total,
            period: Some(period),
        }
    }

    /// A point whose bucket is only known by its label (store-computed trends)
    pub fn labelled(label: impl Into<String>, total: Money) -> Self {
        Self {
            label: label.into(),
            total,
            period: None,
        }
    }
}

/// Group expenses into day, week or month buckets
///
/// Only buckets that contain at least one record appear; they are ordered
/// chronologically regardless of the input order.
pub fn trend(expenses: &[Expense], bucketing: Bucketing) -> Vec<TrendPoint> {
    let mut buckets: BTreeMap<Period, Money> = BTreeMap::new();
    for expense in expenses {
        *buckets
            .entry(Period::containing(bucketing, expense.date))
            .or_default() += expense.amount;
    }

    buckets
        .into_iter()
        .map(|(period, total)| TrendPoint::new(period, total))
        .collect()
}

/// The `months` calendar months before the one containing `today`,
/// oldest first, with empty months reported as zero
pub fn trailing_monthly_trend(expenses: &[Expense], today: NaiveDate, months: usize) -> Vec<TrendPoint> {
    let current = Period::containing(Bucketing::Monthly, today);

    let mut periods = Vec::with_capacity(months);
    let mut period = current;
    for _ in 0..months {
        period = period.prev();
        periods.push(period);
    }
    periods.reverse();

    periods
        .into_iter()
        .map(|period| {
            let total = expenses
                .iter()
                .filter(|e| period.contains(e.date))
                .map(|e| e.amount)
                .sum();
            TrendPoint::new(period, total)
        })
        .collect()
}
