//! Create/delete/series-edit operations for recurrence rules.

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use easybudget_domain::{Book, Money, RecurrenceRule, TimeInterval};

use crate::CoreError;

/// Result of a cascading series removal.
#[derive(Debug)]
pub struct SeriesRemoval {
    pub rule: RecurrenceRule,
    pub removed_transactions: usize,
}

pub struct RuleService;

impl RuleService {
    /// Creates a recurrence rule after validating its interval, and returns
    /// the rule id. The caller decides when to materialize occurrences.
    pub fn create(
        book: &mut Book,
        start_date: NaiveDate,
        interval: TimeInterval,
        amount: Money,
        note: Option<String>,
    ) -> Result<Uuid, CoreError> {
        if interval.every < 1 {
            return Err(CoreError::Validation(
                "repeat interval must be at least 1".into(),
            ));
        }
        Ok(book.add_rule(RecurrenceRule::new(start_date, interval, amount, note)))
    }

    pub fn get(book: &Book, rule_id: Uuid) -> Result<&RecurrenceRule, CoreError> {
        book.rule(rule_id).ok_or(CoreError::RuleNotFound(rule_id))
    }

    pub fn list(book: &Book) -> &[RecurrenceRule] {
        &book.rules
    }

    /// Deletes a rule and every transaction in its series.
    pub fn remove(book: &mut Book, rule_id: Uuid) -> Result<SeriesRemoval, CoreError> {
        let rule = book
            .remove_rule(rule_id)
            .ok_or(CoreError::RuleNotFound(rule_id))?;
        let before = book.transactions.len();
        book.transactions.retain(|t| t.series_id != Some(rule_id));
        let removed_transactions = before - book.transactions.len();
        book.touch();
        debug!(rule = %rule_id, removed_transactions, "deleted recurring series");
        Ok(SeriesRemoval {
            rule,
            removed_transactions,
        })
    }

    /// Rewrites amount and note on the rule and every occurrence in its
    /// series. Occurrence dates are left as generated. Returns the number of
    /// occurrences updated.
    pub fn update_series(
        book: &mut Book,
        rule_id: Uuid,
        amount: Money,
        note: Option<String>,
    ) -> Result<usize, CoreError> {
        let note = note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        let rule = book
            .rule_mut(rule_id)
            .ok_or(CoreError::RuleNotFound(rule_id))?;
        rule.amount = amount;
        rule.note = note.clone();

        let mut updated = 0usize;
        for txn in book
            .transactions
            .iter_mut()
            .filter(|t| t.series_id == Some(rule_id))
        {
            txn.amount = amount;
            txn.note = note.clone();
            updated += 1;
        }
        book.touch();
        Ok(updated)
    }
}
