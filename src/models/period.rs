//! Calendar periods used for trend buckets and budget months
//!
//! Supports day, ISO-week and calendar-month periods.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Granularity of trend buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Bucketing {
    Daily,
    Weekly,
    #[default]
    Monthly,
}

impl Bucketing {
    /// The name used in report exports ("daily", "weekly", "monthly")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl FromStr for Bucketing {
    type Err = PeriodParseError;

    /// Accepts "day", "week", "month" and their "-ly" forms, in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daily" => Ok(Self::Daily),
            "week" | "weekly" => Ok(Self::Weekly),
            "month" | "monthly" => Ok(Self::Monthly),
            other => Err(PeriodParseError::InvalidBucketing(other.to_string())),
        }
    }
}

impl fmt::Display for Bucketing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single calendar period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Period {
    /// One calendar day
    Daily { date: NaiveDate },

    /// ISO week (e.g., "2025-W03")
    Weekly { year: i32, week: u32 },

    /// Calendar month (e.g., "2025-01")
    Monthly { year: i32, month: u32 },
}

impl Period {
    pub fn daily(date: NaiveDate) -> Self {
        Self::Daily { date }
    }

    pub fn weekly(year: i32, week: u32) -> Self {
        Self::Weekly { year, week }
    }

    pub fn monthly(year: i32, month: u32) -> Self {
        Self::Monthly { year, month }
    }

    /// The period of the given granularity that contains `date`
    pub fn containing(bucketing: Bucketing, date: NaiveDate) -> Self {
        match bucketing {
            Bucketing::Daily => Self::Daily { date },
            Bucketing::Weekly => {
                let iso = date.iso_week();
                Self::Weekly {
                    year: iso.year(),
                    week: iso.week(),
                }
            }
            Bucketing::Monthly => Self::Monthly {
                year: date.year(),
                month: date.month(),
            },
        }
    }

    /// Get the current monthly period
    pub fn current_month() -> Self {
        Self::containing(Bucketing::Monthly, chrono::Local::now().date_naive())
    }

    /// Get the start date of this period
    pub fn start_date(&self) -> NaiveDate {
        match self {
            Self::Daily { date } => *date,
            Self::Weekly { year, week } => NaiveDate::from_isoywd_opt(*year, *week, Weekday::Mon)
                .unwrap_or(NaiveDate::MIN),
            Self::Monthly { year, month } => {
                NaiveDate::from_ymd_opt(*year, *month, 1).unwrap_or(NaiveDate::MIN)
            }
        }
    }

    /// Get the end date of this period (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        match self {
            Self::Daily { date } => *date,
            Self::Weekly { .. } => self.start_date() + Duration::days(6),
            Self::Monthly { .. } => self.next().start_date() - Duration::days(1),
        }
    }

    /// Check if a date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    /// Get the next period
    pub fn next(&self) -> Self {
        match self {
            Self::Daily { date } => Self::Daily {
                date: *date + Duration::days(1),
            },
            Self::Weekly { .. } => {
                Self::containing(Bucketing::Weekly, self.start_date() + Duration::days(7))
            }
            Self::Monthly { year, month } => {
                if *month == 12 {
                    Self::Monthly {
                        year: *year + 1,
                        month: 1,
                    }
                } else {
                    Self::Monthly {
                        year: *year,
                        month: *month + 1,
                    }
                }
            }
        }
    }

    /// Get the previous period
    pub fn prev(&self) -> Self {
        match self {
            Self::Daily { date } => Self::Daily {
                date: *date - Duration::days(1),
            },
            Self::Weekly { .. } => {
                Self::containing(Bucketing::Weekly, self.start_date() - Duration::days(7))
            }
            Self::Monthly { year, month } => {
                if *month == 1 {
                    Self::Monthly {
                        year: *year - 1,
                        month: 12,
                    }
                } else {
                    Self::Monthly {
                        year: *year,
                        month: *month - 1,
                    }
                }
            }
        }
    }

    /// Chart label: "2024-04-15", "2024-W15" or "Apr 2024"
    pub fn label(&self) -> String {
        match self {
            Self::Daily { date } => date.format("%Y-%m-%d").to_string(),
            Self::Weekly { year, week } => format!("{:04}-W{:02}", year, week),
            Self::Monthly { .. } => self.start_date().format("%b %Y").to_string(),
        }
    }

    /// Parse a period string
    ///
    /// Formats:
    /// - Daily: "2025-01-15"
    /// - Weekly: "2025-W03"
    /// - Monthly: "2025-01"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();

        if let Some((year, week)) = s.split_once("-W") {
            let year: i32 = year
                .parse()
                .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
            let week: u32 = week
                .parse()
                .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
            if NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).is_none() {
                return Err(PeriodParseError::InvalidWeek(week));
            }
            return Ok(Self::Weekly { year, week });
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::Daily { date });
        }

        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() == 2 {
            let year: i32 = parts[0]
                .parse()
                .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
            let month: u32 = parts[1]
                .parse()
                .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

            if !(1..=12).contains(&month) {
                return Err(PeriodParseError::InvalidMonth(month));
            }

            return Ok(Self::Monthly { year, month });
        }

        Err(PeriodParseError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily { date } => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Weekly { year, week } => write!(f, "{:04}-W{:02}", year, week),
            Self::Monthly { year, month } => write!(f, "{:04}-{:02}", year, month),
        }
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.start_date()
            .cmp(&other.start_date())
            .then_with(|| self.end_date().cmp(&other.end_date()))
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    InvalidWeek(u32),
    InvalidBucketing(String),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            PeriodParseError::InvalidWeek(w) => write!(f, "Invalid ISO week: {}", w),
            PeriodParseError::InvalidBucketing(b) => {
                write!(f, "Invalid time range: {} (use day, week or month)", b)
            }
        }
    }
}

impl std::error::Error for PeriodParseError {}
