//! Shared traits, time utilities, and enums for budgeting primitives.

use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for entities stored in the book.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Enumerates time units used by `TimeInterval`.
pub enum TimeUnit {
    Day,
    Week,
    Month,
}

impl TimeUnit {
    pub fn parse(value: &str) -> Option<TimeUnit> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" | "days" => Some(TimeUnit::Day),
            "week" | "weeks" => Some(TimeUnit::Week),
            "month" | "months" => Some(TimeUnit::Month),
            _ => None,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimeUnit::Day => "day",
            TimeUnit::Week => "week",
            TimeUnit::Month => "month",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Represents a time unit and multiplier for recurrence calculations.
pub struct TimeInterval {
    pub every: u32,
    pub unit: TimeUnit,
}

impl TimeInterval {
    pub fn new(every: u32, unit: TimeUnit) -> Self {
        Self { every, unit }
    }

    /// Calculates the date exactly one interval after `from`.
    pub fn next_date(&self, from: NaiveDate) -> NaiveDate {
        self.nth_from(from, 1)
    }

    /// Calculates occurrence `n` counted from `anchor` (occurrence 0 is the
    /// anchor itself). Month stepping always counts whole intervals from the
    /// anchor and clamps the day to the last valid day of the target month,
    /// so a day-31 anchor visits Feb 29 and returns to Mar 31.
    pub fn nth_from(&self, anchor: NaiveDate, n: u32) -> NaiveDate {
        let steps = self.every as i64 * n as i64;
        match self.unit {
            TimeUnit::Day => anchor + Duration::days(steps),
            TimeUnit::Week => anchor + Duration::weeks(steps),
            TimeUnit::Month => shift_month(anchor, steps as i32),
        }
    }

    pub fn label(&self) -> String {
        match (self.every, self.unit) {
            (1, TimeUnit::Day) => "daily".into(),
            (1, TimeUnit::Week) => "weekly".into(),
            (1, TimeUnit::Month) => "monthly".into(),
            (n, unit) => format!("every {n} {unit}s"),
        }
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Shifts a date by whole months, clamping the day-of-month to the last
/// valid day of the target month.
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    use chrono::Datelike;

    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    let day = date.day().min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).expect("clamped day is valid")
}

/// Returns the number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    use chrono::Datelike;

    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).expect("day 28 always valid"));
    (first_next - Duration::days(1)).day()
}

/// Returns the last date of the given month.
pub fn end_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn steps_days_and_weeks() {
        let every_3_days = TimeInterval::new(3, TimeUnit::Day);
        assert_eq!(every_3_days.next_date(date(2025, 1, 1)), date(2025, 1, 4));

        let biweekly = TimeInterval::new(2, TimeUnit::Week);
        assert_eq!(biweekly.next_date(date(2025, 1, 1)), date(2025, 1, 15));
        assert_eq!(biweekly.nth_from(date(2025, 1, 1), 3), date(2025, 2, 12));
    }

    #[test]
    fn month_steps_clamp_but_do_not_drift() {
        let monthly = TimeInterval::new(1, TimeUnit::Month);
        let anchor = date(2024, 1, 31);
        assert_eq!(monthly.nth_from(anchor, 1), date(2024, 2, 29));
        assert_eq!(monthly.nth_from(anchor, 2), date(2024, 3, 31));
        assert_eq!(monthly.nth_from(anchor, 3), date(2024, 4, 30));
        // Non-leap February clamps to the 28th.
        assert_eq!(monthly.nth_from(anchor, 13), date(2025, 2, 28));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2100, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(end_of_month(2025, 12), Some(date(2025, 12, 31)));
    }

    #[test]
    fn shift_month_crosses_year_boundaries() {
        assert_eq!(shift_month(date(2025, 11, 30), 3), date(2026, 2, 28));
        assert_eq!(shift_month(date(2025, 1, 31), -1), date(2024, 12, 31));
    }

    #[test]
    fn labels() {
        assert_eq!(TimeInterval::new(1, TimeUnit::Month).label(), "monthly");
        assert_eq!(TimeInterval::new(2, TimeUnit::Week).label(), "every 2 weeks");
    }

    #[test]
    fn unit_parsing() {
        assert_eq!(TimeUnit::parse("Week"), Some(TimeUnit::Week));
        assert_eq!(TimeUnit::parse("months"), Some(TimeUnit::Month));
        assert_eq!(TimeUnit::parse("fortnight"), None);
    }
}
