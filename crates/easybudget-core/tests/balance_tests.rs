use chrono::NaiveDate;
use easybudget_core::{calendar, BalanceService, CoreError};
use easybudget_domain::{Book, Money, Transaction};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn add(book: &mut Book, d: NaiveDate, cents: i64) {
    book.add_transaction(Transaction::new(d, Money::from_cents(cents), None));
}

#[test]
fn empty_days_carry_the_balance_forward() {
    let mut book = Book::new();
    add(&mut book, date(2025, 3, 2), 10_000);
    add(&mut book, date(2025, 3, 5), -2_500);

    let days = BalanceService::daily_balances(&book, date(2025, 3, 1), date(2025, 3, 6)).unwrap();
    let endings: Vec<i64> = days.iter().map(|d| d.ending.cents()).collect();
    assert_eq!(endings, vec![0, 10_000, 10_000, 10_000, 7_500, 7_500]);
    assert_eq!(days[2].net, Money::ZERO);
}

#[test]
fn same_day_transactions_are_summed() {
    let mut book = Book::new();
    add(&mut book, date(2025, 3, 10), -1_200);
    add(&mut book, date(2025, 3, 10), -800);
    add(&mut book, date(2025, 3, 10), 5_000);

    let days =
        BalanceService::daily_balances(&book, date(2025, 3, 10), date(2025, 3, 10)).unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].net, Money::from_cents(3_000));
    assert_eq!(days[0].ending, Money::from_cents(3_000));
}

#[test]
fn opening_balance_seeds_the_range() {
    let mut book = Book::new();
    add(&mut book, date(2025, 2, 27), 100_000);
    add(&mut book, date(2025, 3, 1), -40_000);

    assert_eq!(
        BalanceService::opening_balance(&book, date(2025, 3, 1)),
        Money::from_cents(100_000)
    );
    let days = BalanceService::daily_balances(&book, date(2025, 3, 1), date(2025, 3, 2)).unwrap();
    assert_eq!(days[0].ending, Money::from_cents(60_000));
    assert_eq!(days[1].ending, Money::from_cents(60_000));
}

#[test]
fn final_ending_is_sum_invariant() {
    let mut book = Book::new();
    add(&mut book, date(2025, 1, 3), 12_345);
    add(&mut book, date(2025, 1, 3), -2_345);
    add(&mut book, date(2025, 1, 17), -7_000);
    add(&mut book, date(2025, 1, 31), 555);
    add(&mut book, date(2024, 12, 31), 1_000_000);
    add(&mut book, date(2025, 2, 1), -999_999);

    let start = date(2025, 1, 1);
    let end = date(2025, 1, 31);
    let days = BalanceService::daily_balances(&book, start, end).unwrap();

    let opening = BalanceService::opening_balance(&book, start);
    let in_range: Money = book
        .transactions
        .iter()
        .filter(|t| t.date >= start && t.date <= end)
        .map(|t| t.amount)
        .sum();
    assert_eq!(days.last().unwrap().ending, opening + in_range);
    assert_eq!(
        days.last().unwrap().ending,
        BalanceService::balance_on_or_before(&book, end)
    );
}

#[test]
fn inverted_range_is_rejected() {
    let book = Book::new();
    let err = BalanceService::daily_balances(&book, date(2025, 3, 2), date(2025, 3, 1));
    assert!(matches!(err, Err(CoreError::Validation(_))));
}

#[test]
fn banner_balance_matches_on_or_before_semantics() {
    let mut book = Book::new();
    add(&mut book, date(2025, 6, 1), 500);
    add(&mut book, date(2025, 6, 15), -200);
    add(&mut book, date(2025, 6, 16), -200);

    assert_eq!(
        BalanceService::balance_on_or_before(&book, date(2025, 6, 15)),
        Money::from_cents(300)
    );
}

#[test]
fn month_view_days_align_with_daily_balances() {
    let mut book = Book::new();
    add(&mut book, date(2025, 1, 31), 700);
    add(&mut book, date(2025, 2, 14), -300);

    let view = calendar::month_view(&book, 2025, 2).unwrap();
    assert_eq!(view.opening, Money::from_cents(700));
    assert_eq!(view.days.len(), 28);
    // 2025-02-01 is a Saturday.
    assert_eq!(view.leading_blanks, 5);
    assert_eq!(
        view.day(date(2025, 2, 14)).unwrap().ending,
        Money::from_cents(400)
    );
    assert_eq!(view.days.last().unwrap().ending, Money::from_cents(400));
}
