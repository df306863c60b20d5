//! Folds signed amounts into per-day running ending balances.

use std::collections::HashMap;

use chrono::NaiveDate;

use easybudget_domain::{Book, Money, Transaction};

use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Derived per-day figures for calendar rendering. Never persisted.
pub struct DailyBalance {
    pub date: NaiveDate,
    /// Net sum of the day's transactions (zero on empty days).
    pub net: Money,
    /// Previous day's ending balance plus `net`.
    pub ending: Money,
}

pub struct BalanceService;

impl BalanceService {
    /// Sum of every transaction dated strictly before `start`.
    pub fn opening_balance(book: &Book, start: NaiveDate) -> Money {
        book.transactions
            .iter()
            .filter(|t| t.date < start)
            .map(|t| t.amount)
            .sum()
    }

    /// Sum of every transaction dated at or before `date`.
    pub fn balance_on_or_before(book: &Book, date: NaiveDate) -> Money {
        book.transactions
            .iter()
            .filter(|t| t.date <= date)
            .map(|t| t.amount)
            .sum()
    }

    /// One `DailyBalance` per day in `[start, end]`, in date order, seeded
    /// from the book's opening balance at `start`.
    pub fn daily_balances(
        book: &Book,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBalance>, CoreError> {
        let opening = Self::opening_balance(book, start);
        Self::daily_balances_from(&book.transactions, start, end, opening)
    }

    /// The underlying fold over an arbitrary transaction slice and an
    /// explicit prior running balance.
    pub fn daily_balances_from(
        transactions: &[Transaction],
        start: NaiveDate,
        end: NaiveDate,
        opening: Money,
    ) -> Result<Vec<DailyBalance>, CoreError> {
        if end < start {
            return Err(CoreError::Validation(format!(
                "range end {end} precedes start {start}"
            )));
        }

        let mut day_totals: HashMap<NaiveDate, Money> = HashMap::new();
        for txn in transactions {
            if txn.date >= start && txn.date <= end {
                *day_totals.entry(txn.date).or_insert(Money::ZERO) += txn.amount;
            }
        }

        let mut balances = Vec::new();
        let mut running = opening;
        let mut day = start;
        while day <= end {
            let net = day_totals.get(&day).copied().unwrap_or(Money::ZERO);
            running += net;
            balances.push(DailyBalance {
                date: day,
                net,
                ending: running,
            });
            let Some(next) = day.succ_opt() else { break };
            day = next;
        }
        Ok(balances)
    }
}
