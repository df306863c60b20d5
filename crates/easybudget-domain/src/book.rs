//! The single-profile dataset: every transaction and recurrence rule owned
//! by the local user, plus bookkeeping timestamps.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{rule::RecurrenceRule, transaction::Transaction};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub rules: Vec<RecurrenceRule>,
}

impl Default for Book {
    fn default() -> Self {
        Self::new()
    }
}

impl Book {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            transactions: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Marks the book as modified.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn transaction_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|t| t.id == id)
    }

    pub fn rule(&self, id: Uuid) -> Option<&RecurrenceRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn rule_mut(&mut self, id: Uuid) -> Option<&mut RecurrenceRule> {
        self.rules.iter_mut().find(|r| r.id == id)
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        self.touch();
        id
    }

    pub fn add_rule(&mut self, rule: RecurrenceRule) -> Uuid {
        let id = rule.id;
        self.rules.push(rule);
        self.touch();
        id
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        let index = self.transactions.iter().position(|t| t.id == id)?;
        let removed = self.transactions.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn remove_rule(&mut self, id: Uuid) -> Option<RecurrenceRule> {
        let index = self.rules.iter().position(|r| r.id == id)?;
        let removed = self.rules.remove(index);
        self.touch();
        Some(removed)
    }

    /// Transactions dated exactly `date`, newest entry first.
    pub fn transactions_on(&self, date: NaiveDate) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .rev()
            .filter(|t| t.date == date)
            .collect()
    }

    /// Every materialized occurrence of the given series, oldest first.
    pub fn series_transactions(&self, series_id: Uuid) -> Vec<&Transaction> {
        let mut entries: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|t| t.series_id == Some(series_id))
            .collect();
        entries.sort_by_key(|t| t.date);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Money, TimeInterval, TimeUnit};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn lookup_and_removal() {
        let mut book = Book::new();
        let id = book.add_transaction(Transaction::new(
            date(2025, 3, 1),
            Money::from_cents(-1200),
            Some("coffee".into()),
        ));
        assert!(book.transaction(id).is_some());
        assert_eq!(book.remove_transaction(id).unwrap().id, id);
        assert!(book.transaction(id).is_none());
        assert!(book.remove_transaction(id).is_none());
    }

    #[test]
    fn day_listing_is_newest_first() {
        let mut book = Book::new();
        let first = book.add_transaction(Transaction::new(
            date(2025, 3, 1),
            Money::from_cents(100),
            None,
        ));
        let second = book.add_transaction(Transaction::new(
            date(2025, 3, 1),
            Money::from_cents(200),
            None,
        ));
        book.add_transaction(Transaction::new(
            date(2025, 3, 2),
            Money::from_cents(300),
            None,
        ));

        let listed: Vec<Uuid> = book
            .transactions_on(date(2025, 3, 1))
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(listed, vec![second, first]);
    }

    #[test]
    fn serde_roundtrip_preserves_rows() {
        let mut book = Book::new();
        let rule = RecurrenceRule::new(
            date(2025, 1, 31),
            TimeInterval::new(1, TimeUnit::Month),
            Money::from_cents(-90_000),
            Some("rent".into()),
        );
        let rule_id = rule.id;
        book.add_rule(rule);
        let template = book.rule(rule_id).unwrap().clone();
        book.add_transaction(Transaction::occurrence_of(&template, date(2025, 1, 31)));

        let json = serde_json::to_string(&book).unwrap();
        let loaded: Book = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.transactions, book.transactions);
        assert_eq!(loaded.rules, book.rules);
    }
}
