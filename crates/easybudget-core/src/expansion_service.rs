//! Materializes recurring rules into concrete transactions up to a horizon.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use tracing::debug;
use uuid::Uuid;

use easybudget_domain::{end_of_month, Book, Transaction};

use crate::CoreError;

/// Hard cap on occurrences materialized per rule per pass.
pub const MAX_OCCURRENCES_PER_RULE: usize = 1024;

/// Expands recurrence rules into dated transactions.
pub struct ExpansionService;

impl ExpansionService {
    /// Returns the generation horizon: the last day of the month
    /// `months_ahead` months after `today`'s month.
    pub fn horizon(today: NaiveDate, months_ahead: u32) -> NaiveDate {
        let index = today.year() as i64 * 12 + today.month() as i64 - 1 + months_ahead as i64;
        let year = index.div_euclid(12) as i32;
        let month = index.rem_euclid(12) as u32 + 1;
        end_of_month(year, month).expect("month index in range")
    }

    /// Materializes every missing occurrence of one rule at or before
    /// `horizon`. Generation resumes strictly after `last_generated`, so a
    /// deleted occurrence stays deleted, and dates already present for the
    /// same rule are skipped, so re-running is idempotent. Returns the number
    /// of transactions created.
    pub fn expand_rule(
        book: &mut Book,
        rule_id: Uuid,
        horizon: NaiveDate,
    ) -> Result<usize, CoreError> {
        let rule = book
            .rule(rule_id)
            .cloned()
            .ok_or(CoreError::RuleNotFound(rule_id))?;

        let existing: HashSet<NaiveDate> = book
            .transactions
            .iter()
            .filter(|t| t.series_id == Some(rule_id))
            .map(|t| t.date)
            .collect();

        let mut created = 0usize;
        let mut furthest = rule.last_generated;
        for date in rule.occurrences_through(horizon, MAX_OCCURRENCES_PER_RULE) {
            if rule.last_generated.map_or(false, |seen| date <= seen) {
                continue;
            }
            if furthest.map_or(true, |seen| date > seen) {
                furthest = Some(date);
            }
            if existing.contains(&date) {
                continue;
            }
            book.transactions.push(Transaction::occurrence_of(&rule, date));
            created += 1;
        }

        if let Some(stored) = book.rule_mut(rule_id) {
            stored.last_generated = furthest;
        }
        if created > 0 {
            book.touch();
            debug!(rule = %rule_id, created, %horizon, "materialized recurring occurrences");
        }
        Ok(created)
    }

    /// Expands every rule in the book to the same horizon. Returns the total
    /// number of transactions created.
    pub fn expand_all(book: &mut Book, horizon: NaiveDate) -> Result<usize, CoreError> {
        let rule_ids: Vec<Uuid> = book.rules.iter().map(|r| r.id).collect();
        let mut created = 0usize;
        for rule_id in rule_ids {
            created += Self::expand_rule(book, rule_id, horizon)?;
        }
        Ok(created)
    }

    /// Merges a manually entered transaction into a freshly created rule when
    /// both sit on the rule's start date with the same amount and note, so
    /// the first occurrence is not doubled. Returns whether anything changed.
    pub fn adopt_manual_start(book: &mut Book, rule_id: Uuid) -> Result<bool, CoreError> {
        let rule = book
            .rule(rule_id)
            .cloned()
            .ok_or(CoreError::RuleNotFound(rule_id))?;

        let manual_id = book
            .transactions
            .iter()
            .find(|t| {
                t.series_id.is_none()
                    && t.date == rule.start_date
                    && t.amount == rule.amount
                    && t.note_str() == rule.note_str()
            })
            .map(|t| t.id);
        let Some(manual_id) = manual_id else {
            return Ok(false);
        };

        let generated_exists = book
            .transactions
            .iter()
            .any(|t| t.series_id == Some(rule_id) && t.date == rule.start_date);

        if generated_exists {
            book.remove_transaction(manual_id);
        } else if let Some(manual) = book.transaction_mut(manual_id) {
            manual.series_id = Some(rule_id);
            book.touch();
        }
        Ok(true)
    }
}
