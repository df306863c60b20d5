//! Domain model for recurrence rules, the recipes behind recurring rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::*, money::Money, transaction::normalize_note};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// A template that repeatedly produces transactions: "-$100 rent, monthly,
/// starting 2025-01-31".
pub struct RecurrenceRule {
    pub id: Uuid,
    pub start_date: NaiveDate,
    pub interval: TimeInterval,
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Furthest occurrence date materialized so far. Bookkeeping only; the
    /// expander still checks existing rows before creating new ones.
    #[serde(default)]
    pub last_generated: Option<NaiveDate>,
}

impl RecurrenceRule {
    pub fn new(
        start_date: NaiveDate,
        interval: TimeInterval,
        amount: Money,
        note: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_date,
            interval,
            amount,
            note: normalize_note(note),
            last_generated: None,
        }
    }

    /// Returns occurrence `index` of this rule. Occurrence 0 is the start
    /// date; later occurrences are counted from the start date, never from a
    /// previously clamped occurrence.
    pub fn occurrence(&self, index: u32) -> NaiveDate {
        self.interval.nth_from(self.start_date, index)
    }

    /// Returns every occurrence date at or before `horizon`, oldest first.
    /// `limit` bounds the walk so degenerate intervals cannot spin forever.
    pub fn occurrences_through(&self, horizon: NaiveDate, limit: usize) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        if self.interval.every == 0 {
            return dates;
        }
        let mut index = 0u32;
        while dates.len() < limit {
            let date = self.occurrence(index);
            if date > horizon {
                break;
            }
            dates.push(date);
            index += 1;
        }
        dates
    }

    pub fn note_str(&self) -> &str {
        self.note.as_deref().unwrap_or("")
    }
}

impl Identifiable for RecurrenceRule {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for RecurrenceRule {
    fn display_label(&self) -> String {
        format!(
            "{} {} from {} {}",
            self.interval.label(),
            self.amount,
            self.start_date,
            self.note_str()
        )
        .trim_end()
        .to_string()
    }
}
