use std::{collections::HashSet, path::PathBuf};

use easybudget_domain::Book;

use crate::CoreError;

/// Describes a persisted backup artifact for a book.
#[derive(Debug, Clone)]
pub struct BookBackupInfo {
    pub id: String,
    pub created_at: String,
    pub path: PathBuf,
}

/// Reports which path `load_or_init` took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// An existing book file was read.
    Loaded,
    /// No book file existed; a fresh book was initialized.
    Initialized,
    /// The book file could not be parsed; it was moved aside to the given
    /// path and a fresh book was initialized.
    Quarantined(PathBuf),
}

/// Abstraction over persistence backends capable of storing the book and
/// its backups.
pub trait BookStorage: Send + Sync {
    fn save_book(&self, book: &Book) -> Result<(), CoreError>;
    fn load_book(&self) -> Result<Book, CoreError>;
    fn load_or_init(&self) -> Result<(Book, LoadOutcome), CoreError>;
    fn backup_book(&self, book: &Book, note: Option<&str>) -> Result<BookBackupInfo, CoreError>;
    fn list_backups(&self) -> Result<Vec<BookBackupInfo>, CoreError>;
    fn restore_backup(&self, backup: &BookBackupInfo) -> Result<Book, CoreError>;
}

/// Detects dangling references and other anomalies within a book snapshot.
pub fn book_warnings(book: &Book) -> Vec<String> {
    let rule_ids: HashSet<_> = book.rules.iter().map(|r| r.id).collect();
    let mut warnings = Vec::new();

    for txn in &book.transactions {
        if let Some(series_id) = txn.series_id {
            if !rule_ids.contains(&series_id) {
                warnings.push(format!(
                    "transaction {} references missing recurrence rule {}",
                    txn.id, series_id
                ));
            }
        }
    }
    for rule in &book.rules {
        if rule.interval.every == 0 {
            warnings.push(format!("recurrence rule {} has a zero interval", rule.id));
        }
    }
    warnings
}
