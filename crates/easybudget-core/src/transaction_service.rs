//! Create/edit/delete operations for individual transactions.

use chrono::NaiveDate;
use uuid::Uuid;

use easybudget_domain::{Book, Money, Transaction};

use crate::CoreError;

pub struct TransactionService;

impl TransactionService {
    /// Records a one-off transaction and returns its id.
    pub fn add(book: &mut Book, date: NaiveDate, amount: Money, note: Option<String>) -> Uuid {
        book.add_transaction(Transaction::new(date, amount, note))
    }

    pub fn get(book: &Book, id: Uuid) -> Result<&Transaction, CoreError> {
        book.transaction(id)
            .ok_or(CoreError::TransactionNotFound(id))
    }

    /// Rewrites date, amount, and note of an existing transaction. An edited
    /// occurrence keeps its series link.
    pub fn update(
        book: &mut Book,
        id: Uuid,
        date: NaiveDate,
        amount: Money,
        note: Option<String>,
    ) -> Result<(), CoreError> {
        let txn = book
            .transaction_mut(id)
            .ok_or(CoreError::TransactionNotFound(id))?;
        txn.date = date;
        txn.amount = amount;
        txn.note = note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        book.touch();
        Ok(())
    }

    /// Removes exactly one transaction, one-off or single occurrence alike.
    pub fn remove(book: &mut Book, id: Uuid) -> Result<Transaction, CoreError> {
        book.remove_transaction(id)
            .ok_or(CoreError::TransactionNotFound(id))
    }

    /// Transactions dated `date`, newest entry first.
    pub fn list_on(book: &Book, date: NaiveDate) -> Vec<&Transaction> {
        book.transactions_on(date)
    }
}
