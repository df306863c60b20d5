//! Domain model for a single ledger row: one income or expense on one date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::*, money::Money, rule::RecurrenceRule};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Back-reference to the recurrence rule that generated this row, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_id: Option<Uuid>,
}

impl Transaction {
    /// Creates a one-off transaction entered by the user.
    pub fn new(date: NaiveDate, amount: Money, note: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            amount,
            note: normalize_note(note),
            series_id: None,
        }
    }

    /// Creates a concrete occurrence of a recurrence rule for one date.
    pub fn occurrence_of(rule: &RecurrenceRule, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            amount: rule.amount,
            note: rule.note.clone(),
            series_id: Some(rule.id),
        }
    }

    pub fn is_occurrence(&self) -> bool {
        self.series_id.is_some()
    }

    pub fn note_str(&self) -> &str {
        self.note.as_deref().unwrap_or("")
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("{} {} {}", self.date, self.amount, self.note_str())
            .trim_end()
            .to_string()
    }
}

pub(crate) fn normalize_note(note: Option<String>) -> Option<String> {
    note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}
