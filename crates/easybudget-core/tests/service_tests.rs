use chrono::NaiveDate;
use easybudget_core::{
    CoreError, ExpansionService, RuleService, TransactionService,
};
use easybudget_domain::{Book, Money, TimeInterval, TimeUnit};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seeded_series(book: &mut Book) -> Uuid {
    let rule_id = RuleService::create(
        book,
        date(2025, 1, 10),
        TimeInterval::new(1, TimeUnit::Month),
        Money::from_cents(-4_500),
        Some("internet".into()),
    )
    .unwrap();
    ExpansionService::expand_rule(book, rule_id, date(2025, 6, 30)).unwrap();
    rule_id
}

#[test]
fn interval_below_one_is_rejected_with_no_state_change() {
    let mut book = Book::new();
    let err = RuleService::create(
        &mut book,
        date(2025, 1, 1),
        TimeInterval::new(0, TimeUnit::Week),
        Money::from_cents(100),
        None,
    );
    assert!(matches!(err, Err(CoreError::Validation(_))));
    assert!(book.rules.is_empty());
}

#[test]
fn deleting_one_occurrence_leaves_rule_and_siblings() {
    let mut book = Book::new();
    let rule_id = seeded_series(&mut book);
    assert_eq!(book.series_transactions(rule_id).len(), 6);

    let victim = book.series_transactions(rule_id)[2].id;
    let removed = TransactionService::remove(&mut book, victim).unwrap();
    assert_eq!(removed.id, victim);
    assert_eq!(book.series_transactions(rule_id).len(), 5);
    assert!(book.rule(rule_id).is_some());
}

#[test]
fn deleting_the_series_removes_rule_and_every_occurrence() {
    let mut book = Book::new();
    let rule_id = seeded_series(&mut book);
    TransactionService::add(&mut book, date(2025, 2, 2), Money::from_cents(999), None);

    let removal = RuleService::remove(&mut book, rule_id).unwrap();
    assert_eq!(removal.removed_transactions, 6);
    assert_eq!(removal.rule.id, rule_id);
    assert!(book.rule(rule_id).is_none());
    assert!(book.series_transactions(rule_id).is_empty());
    // The unrelated one-off survives.
    assert_eq!(book.transactions.len(), 1);
}

#[test]
fn editing_one_occurrence_keeps_its_series_link() {
    let mut book = Book::new();
    let rule_id = seeded_series(&mut book);
    let occurrence = book.series_transactions(rule_id)[0].id;

    TransactionService::update(
        &mut book,
        occurrence,
        date(2025, 1, 12),
        Money::from_cents(-4_800),
        Some("internet (new plan)".into()),
    )
    .unwrap();

    let txn = TransactionService::get(&book, occurrence).unwrap();
    assert_eq!(txn.date, date(2025, 1, 12));
    assert_eq!(txn.amount, Money::from_cents(-4_800));
    assert_eq!(txn.series_id, Some(rule_id));
}

#[test]
fn series_edit_rewrites_rule_and_occurrences() {
    let mut book = Book::new();
    let rule_id = seeded_series(&mut book);

    let updated =
        RuleService::update_series(&mut book, rule_id, Money::from_cents(-5_000), Some("fiber".into()))
            .unwrap();
    assert_eq!(updated, 6);

    let rule = RuleService::get(&book, rule_id).unwrap();
    assert_eq!(rule.amount, Money::from_cents(-5_000));
    assert_eq!(rule.note_str(), "fiber");
    for txn in book.series_transactions(rule_id) {
        assert_eq!(txn.amount, Money::from_cents(-5_000));
        assert_eq!(txn.note_str(), "fiber");
    }
}

#[test]
fn updates_against_missing_rows_fail() {
    let mut book = Book::new();
    assert!(matches!(
        TransactionService::update(&mut book, Uuid::new_v4(), date(2025, 1, 1), Money::ZERO, None),
        Err(CoreError::TransactionNotFound(_))
    ));
    assert!(matches!(
        TransactionService::remove(&mut book, Uuid::new_v4()),
        Err(CoreError::TransactionNotFound(_))
    ));
    assert!(matches!(
        RuleService::remove(&mut book, Uuid::new_v4()),
        Err(CoreError::RuleNotFound(_))
    ));
}

#[test]
fn blank_notes_normalize_to_none() {
    let mut book = Book::new();
    let id = TransactionService::add(
        &mut book,
        date(2025, 4, 1),
        Money::from_cents(100),
        Some("   ".into()),
    );
    assert_eq!(book.transaction(id).unwrap().note, None);

    TransactionService::update(&mut book, id, date(2025, 4, 1), Money::from_cents(100), Some(" x ".into()))
        .unwrap();
    assert_eq!(book.transaction(id).unwrap().note.as_deref(), Some("x"));
}

#[test]
fn dangling_series_references_are_reported() {
    use easybudget_core::storage::book_warnings;

    let mut book = Book::new();
    let rule_id = seeded_series(&mut book);
    assert!(book_warnings(&book).is_empty());

    book.remove_rule(rule_id).unwrap();
    let warnings = book_warnings(&book);
    assert_eq!(warnings.len(), 6);
    assert!(warnings[0].contains("missing recurrence rule"));
}
