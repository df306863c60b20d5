//! Month-view math for the Monday-aligned calendar grid.

use chrono::{Datelike, NaiveDate};

use easybudget_domain::{days_in_month, Book, Money};

use crate::{
    balance_service::{BalanceService, DailyBalance},
    CoreError,
};

/// Column headers for the grid, Monday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone)]
/// Everything a renderer needs to paint one month.
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    /// Blank cells before day 1 so the 1st lands under its weekday
    /// (Mon=0 .. Sun=6).
    pub leading_blanks: usize,
    /// Running balance carried in from before the 1st.
    pub opening: Money,
    pub days: Vec<DailyBalance>,
}

impl MonthView {
    /// "March 2026"-style title.
    pub fn title(&self) -> String {
        first_of_month(self.year, self.month)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_default()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DailyBalance> {
        self.days.iter().find(|d| d.date == date)
    }
}

/// Builds the month view for the given year/month.
pub fn month_view(book: &Book, year: i32, month: u32) -> Result<MonthView, CoreError> {
    let first = first_of_month(year, month)
        .ok_or_else(|| CoreError::Validation(format!("invalid month {year}-{month:02}")))?;
    let last = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))
        .expect("last day of a valid month");

    let opening = BalanceService::opening_balance(book, first);
    let days = BalanceService::daily_balances(book, first, last)?;

    Ok(MonthView {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_monday() as usize,
        opening,
        days,
    })
}

pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Steps a (year, month) pair by `delta` months.
pub fn step_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year as i64 * 12 + month as i64 - 1 + delta as i64;
    (index.div_euclid(12) as i32, index.rem_euclid(12) as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_stepping_wraps_years() {
        assert_eq!(step_month(2025, 1, -1), (2024, 12));
        assert_eq!(step_month(2025, 12, 1), (2026, 1));
        assert_eq!(step_month(2025, 6, 18), (2026, 12));
        assert_eq!(step_month(2025, 6, -18), (2023, 12));
    }

    #[test]
    fn leading_blanks_follow_monday_alignment() {
        let book = Book::new();
        // 2026-03-01 is a Sunday.
        let view = month_view(&book, 2026, 3).unwrap();
        assert_eq!(view.leading_blanks, 6);
        assert_eq!(view.days.len(), 31);
        assert_eq!(view.title(), "March 2026");

        // 2024-07-01 is a Monday.
        let view = month_view(&book, 2024, 7).unwrap();
        assert_eq!(view.leading_blanks, 0);
    }

    #[test]
    fn invalid_month_is_rejected() {
        let book = Book::new();
        assert!(month_view(&book, 2026, 13).is_err());
    }
}
