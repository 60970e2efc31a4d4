//! # Report Windows
//!
//! Resolves the `start` / `end` query parameters of the sales report into
//! an inclusive timestamp window.
//!
//! ```text
//! start=2026-01-30&end=2026-01-31  ──►  [2026-01-30 00:00:00, 2026-01-31 23:59:59]
//! (either side missing or empty)   ──►  [today 00:00:00,      today 23:59:59]
//! ```
//!
//! "Today" is passed in by the caller so this module never reads the clock.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::validation::{parse_report_date, ValidationResult};

/// Inclusive timestamp window used by the report queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ReportWindow {
    /// Window covering the whole of `start_date` through the whole of `end_date`.
    pub fn between(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        ReportWindow {
            start: start_date.and_time(NaiveTime::MIN),
            end: end_date.and_time(end_of_day()),
        }
    }

    /// Window covering a single day.
    pub fn for_day(date: NaiveDate) -> Self {
        ReportWindow::between(date, date)
    }

    /// Builds the window from raw query parameters.
    ///
    /// If either parameter is missing or blank the window falls back to
    /// `today`. Otherwise both must parse as `YYYY-MM-DD`.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use kasir_core::ReportWindow;
    ///
    /// let today = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
    /// let window = ReportWindow::resolve(Some(""), Some("2026-01-01"), today).unwrap();
    /// assert_eq!(window, ReportWindow::for_day(today));
    /// ```
    pub fn resolve(
        start: Option<&str>,
        end: Option<&str>,
        today: NaiveDate,
    ) -> ValidationResult<Self> {
        let start = start.map(str::trim).filter(|s| !s.is_empty());
        let end = end.map(str::trim).filter(|s| !s.is_empty());

        match (start, end) {
            (Some(start), Some(end)) => Ok(ReportWindow::between(
                parse_report_date("start", start)?,
                parse_report_date("end", end)?,
            )),
            _ => Ok(ReportWindow::for_day(today)),
        }
    }
}

/// 23:59:59, the last whole second of a day.
fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}

// =============================================================================
// Unit Tests
// =============================================================================
