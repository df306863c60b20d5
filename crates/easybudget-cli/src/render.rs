//! Text rendering for the calendar grid, day lists, and the balance banner.

use chrono::{Datelike, NaiveDate};
use colored::Colorize;
use uuid::Uuid;

use easybudget_core::calendar::{MonthView, WEEKDAY_LABELS};
use easybudget_domain::{Money, RecurrenceRule, Transaction};

/// First block of a hyphenated uuid, enough to address rows interactively.
pub fn short_id(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// Renders the Monday-aligned month grid. Every cell shows the day number
/// and that day's ending balance.
pub fn render_month(view: &MonthView, color: bool) -> String {
    #[derive(Clone)]
    struct Cell {
        text: String,
        negative: Option<bool>,
    }

    let blank = Cell {
        text: String::new(),
        negative: None,
    };
    let mut cells = vec![blank; view.leading_blanks];
    for day in &view.days {
        cells.push(Cell {
            text: format!("{:>2} {}", day.date.day(), day.ending),
            negative: Some(day.ending.is_negative()),
        });
    }

    let width = cells
        .iter()
        .map(|c| c.text.len())
        .chain(WEEKDAY_LABELS.iter().map(|l| l.len()))
        .max()
        .unwrap_or(3);

    let mut lines = vec![
        view.title(),
        WEEKDAY_LABELS
            .iter()
            .map(|label| format!("{label:<width$}"))
            .collect::<Vec<_>>()
            .join("  "),
    ];
    for week in cells.chunks(7) {
        let row = week
            .iter()
            .map(|cell| {
                let padded = format!("{:<width$}", cell.text);
                match (color, cell.negative) {
                    (true, Some(true)) => padded.red().to_string(),
                    (true, Some(false)) => padded.green().to_string(),
                    _ => padded,
                }
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(row.trim_end().to_string());
    }
    lines.join("\n")
}

/// Renders the banner line: the ending balance on one day.
pub fn banner(date: NaiveDate, balance: Money, color: bool) -> String {
    let text = format!("Balance on {}: {}", date.format("%b %d"), balance);
    if !color {
        return text;
    }
    if balance.is_negative() {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

/// Renders one day's transactions, newest first. Recurring occurrences are
/// marked `[R]`.
pub fn render_day_list(date: NaiveDate, entries: &[&Transaction], color: bool) -> String {
    if entries.is_empty() {
        return format!("No transactions on {date}.");
    }
    let mut lines = Vec::with_capacity(entries.len());
    for txn in entries {
        let marker = if txn.is_occurrence() { "[R] " } else { "" };
        let amount = format!("{:>12}", txn.amount.to_string());
        let amount = if color {
            if txn.amount.is_negative() {
                amount.red().to_string()
            } else {
                amount.green().to_string()
            }
        } else {
            amount
        };
        lines.push(
            format!("{}  {}  {}{}", short_id(txn.id), amount, marker, txn.note_str())
                .trim_end()
                .to_string(),
        );
    }
    lines.join("\n")
}

/// Renders the rule roster for the `rules` command.
pub fn render_rules(rules: &[RecurrenceRule]) -> String {
    if rules.is_empty() {
        return "No recurrence rules defined.".to_string();
    }
    let mut lines = Vec::with_capacity(rules.len());
    for rule in rules {
        lines.push(
            format!(
                "{}  {:>12}  {} from {}  {}",
                short_id(rule.id),
                rule.amount.to_string(),
                rule.interval.label(),
                rule.start_date,
                rule.note_str()
            )
            .trim_end()
            .to_string(),
        );
    }
    lines.join("\n")
}
