//! Date-based flags, countdowns and calendar filters.
//!
//! # Responsibility
//! - Compute day distances and countdown labels against an injected
//!   "today".
//! - Calendar-component month/year filters (not rolling windows).
//!
//! # Invariants
//! - Zero days means "today"; negative means past, and callers render it
//!   distinctly from zero.
//! - `today` is always supplied by the caller; this module never reads
//!   the wall clock.

use chrono::{Datelike, NaiveDate};

/// Whole calendar days from `today` until `target`. Negative when past.
pub fn days_until(today: NaiveDate, target: NaiveDate) -> i64 {
    target.signed_duration_since(today).num_days()
}

/// Human label for a day distance: "Today", "In N days", "N days ago".
pub fn countdown_label(days: i64) -> String {
    match days {
        0 => "Today".to_string(),
        1 => "In 1 day".to_string(),
        -1 => "1 day ago".to_string(),
        n if n > 1 => format!("In {n} days"),
        n => format!("{} days ago", -n),
    }
}

/// True when `date` falls in the same calendar month and year as `today`.
pub fn in_same_month(date: NaiveDate, today: NaiveDate) -> bool {
    date.year() == today.year() && date.month() == today.month()
}

/// True when `date` falls in the same calendar year as `today`.
pub fn in_same_year(date: NaiveDate, today: NaiveDate) -> bool {
    date.year() == today.year()
}
