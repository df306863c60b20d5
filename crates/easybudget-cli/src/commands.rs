//! Command parsing and dispatch for the shell.

use chrono::{Datelike, NaiveDate};

use easybudget_core::{
    calendar::{self, first_of_month, step_month},
    storage::BookStorage,
    BalanceService, ExpansionService, RuleService, TransactionService,
};
use easybudget_domain::{Money, TimeInterval, TimeUnit};

use crate::{
    context::{usage, CommandError, LoopControl, ShellContext},
    help, output, render,
};

pub fn dispatch(
    context: &mut ShellContext,
    command: &str,
    args: &[&str],
) -> Result<LoopControl, CommandError> {
    match command {
        "cal" | "calendar" => show_calendar(context, args)?,
        "next" => shift_calendar(context, 1)?,
        "prev" => shift_calendar(context, -1)?,
        "select" => select_day(context, args)?,
        "list" => list_day(context, args)?,
        "balance" => show_balance(context, args)?,
        "add" => add_transaction(context, args)?,
        "repeat" => add_rule(context, args)?,
        "rules" => println!("{}", render::render_rules(RuleService::list(&context.book))),
        "edit" => edit_transaction(context, args)?,
        "edit-series" => edit_series(context, args)?,
        "delete" => delete_transaction(context, args)?,
        "delete-series" => delete_series(context, args)?,
        "backup" => backup(context, args)?,
        "backups" => list_backups(context)?,
        "restore" => restore(context, args)?,
        "help" => println!("{}", help::help_text()),
        "exit" | "quit" => return Ok(LoopControl::Exit),
        other => {
            return Err(usage(format!(
                "unknown command `{other}`; try `help`"
            )))
        }
    }
    Ok(LoopControl::Continue)
}

fn show_calendar(context: &mut ShellContext, args: &[&str]) -> Result<(), CommandError> {
    if let Some(token) = args.first() {
        let (year, month) = parse_year_month(token)?;
        context.year = year;
        context.month = month;
    }
    let view = calendar::month_view(&context.book, context.year, context.month)?;
    println!("{}", render::render_month(&view, output::color_enabled()));
    Ok(())
}

fn shift_calendar(context: &mut ShellContext, delta: i32) -> Result<(), CommandError> {
    let (year, month) = step_month(context.year, context.month, delta);
    context.year = year;
    context.month = month;
    context.selected = first_of_month(year, month)
        .ok_or_else(|| usage(format!("invalid month {year}-{month:02}")))?;
    show_calendar(context, &[])
}

fn select_day(context: &mut ShellContext, args: &[&str]) -> Result<(), CommandError> {
    let date = parse_date(args.first().ok_or_else(|| usage("usage: select YYYY-MM-DD"))?)?;
    context.selected = date;
    context.year = date.year();
    context.month = date.month();
    print_banner(context, date);
    print_day_list(context, date);
    Ok(())
}

fn list_day(context: &mut ShellContext, args: &[&str]) -> Result<(), CommandError> {
    let date = match args.first() {
        Some(token) => parse_date(token)?,
        None => context.selected,
    };
    print_day_list(context, date);
    Ok(())
}

fn show_balance(context: &mut ShellContext, args: &[&str]) -> Result<(), CommandError> {
    let date = match args.first() {
        Some(token) => parse_date(token)?,
        None => context.selected,
    };
    print_banner(context, date);
    Ok(())
}

fn add_transaction(context: &mut ShellContext, args: &[&str]) -> Result<(), CommandError> {
    if args.len() < 2 {
        return Err(usage("usage: add YYYY-MM-DD AMOUNT [NOTE..]"));
    }
    let date = parse_date(args[0])?;
    let amount = parse_amount(args[1])?;
    let note = join_note(&args[2..]);

    TransactionService::add(&mut context.book, date, amount, note);
    context.persist()?;
    context.selected = date;
    output::success(format!("Saved {amount} on {date}"));
    Ok(())
}

fn add_rule(context: &mut ShellContext, args: &[&str]) -> Result<(), CommandError> {
    if args.len() < 4 {
        return Err(usage("usage: repeat YYYY-MM-DD AMOUNT EVERY UNIT [NOTE..]"));
    }
    let start = parse_date(args[0])?;
    let amount = parse_amount(args[1])?;
    let every: u32 = args[2]
        .parse()
        .map_err(|_| usage(format!("invalid repeat count `{}`", args[2])))?;
    let unit = TimeUnit::parse(args[3])
        .ok_or_else(|| usage(format!("invalid unit `{}`; use day, week, or month", args[3])))?;
    let note = join_note(&args[4..]);

    let rule_id = RuleService::create(
        &mut context.book,
        start,
        TimeInterval::new(every, unit),
        amount,
        note,
    )?;
    ExpansionService::adopt_manual_start(&mut context.book, rule_id)?;
    let horizon = context.horizon();
    let created = ExpansionService::expand_rule(&mut context.book, rule_id, horizon)?;
    context.persist()?;
    context.selected = start;
    output::success(format!(
        "Recurring rule saved; {created} occurrence(s) scheduled through {horizon}"
    ));
    Ok(())
}

fn edit_transaction(context: &mut ShellContext, args: &[&str]) -> Result<(), CommandError> {
    if args.len() < 3 {
        return Err(usage("usage: edit ID YYYY-MM-DD AMOUNT [NOTE..]"));
    }
    let id = context.resolve_transaction(args[0])?;
    let date = parse_date(args[1])?;
    let amount = parse_amount(args[2])?;
    let note = join_note(&args[3..]);

    TransactionService::update(&mut context.book, id, date, amount, note)?;
    context.persist()?;
    context.selected = date;
    output::success(format!("Updated {} to {amount} on {date}", render::short_id(id)));
    Ok(())
}

fn edit_series(context: &mut ShellContext, args: &[&str]) -> Result<(), CommandError> {
    if args.len() < 2 {
        return Err(usage("usage: edit-series ID AMOUNT [NOTE..]"));
    }
    let rule_id = context.resolve_series(args[0])?;
    let amount = parse_amount(args[1])?;
    let note = join_note(&args[2..]);

    let updated = RuleService::update_series(&mut context.book, rule_id, amount, note)?;
    context.persist()?;
    output::success(format!(
        "Updated series {}: rule and {updated} occurrence(s)",
        render::short_id(rule_id)
    ));
    Ok(())
}

fn delete_transaction(context: &mut ShellContext, args: &[&str]) -> Result<(), CommandError> {
    let token = args.first().ok_or_else(|| usage("usage: delete ID"))?;
    let id = context.resolve_transaction(token)?;
    let removed = TransactionService::remove(&mut context.book, id)?;
    context.persist()?;
    output::success(format!("Deleted {} on {}", removed.amount, removed.date));
    Ok(())
}

fn delete_series(context: &mut ShellContext, args: &[&str]) -> Result<(), CommandError> {
    let token = args
        .first()
        .ok_or_else(|| usage("usage: delete-series ID"))?;
    let rule_id = context.resolve_series(token)?;
    let removal = RuleService::remove(&mut context.book, rule_id)?;
    context.persist()?;
    output::success(format!(
        "Deleted series {}: rule and {} occurrence(s)",
        render::short_id(removal.rule.id),
        removal.removed_transactions
    ));
    Ok(())
}

fn backup(context: &mut ShellContext, args: &[&str]) -> Result<(), CommandError> {
    let note = join_note(args);
    let info = context
        .storage
        .backup_book(&context.book, note.as_deref())?;
    output::success(format!("Backup `{}` written", info.id));
    Ok(())
}

fn list_backups(context: &mut ShellContext) -> Result<(), CommandError> {
    let backups = context.storage.list_backups()?;
    if backups.is_empty() {
        println!("No backups yet.");
        return Ok(());
    }
    for (index, info) in backups.iter().enumerate() {
        println!("{index}) {}", info.id);
    }
    Ok(())
}

fn restore(context: &mut ShellContext, args: &[&str]) -> Result<(), CommandError> {
    let token = args.first().ok_or_else(|| usage("usage: restore INDEX"))?;
    let index: usize = token
        .parse()
        .map_err(|_| usage(format!("invalid backup index `{token}`")))?;
    let backups = context.storage.list_backups()?;
    let backup = backups
        .get(index)
        .ok_or_else(|| usage(format!("no backup at index {index}")))?;
    context.book = context.storage.restore_backup(backup)?;
    output::success(format!("Restored backup `{}`", backup.id));
    Ok(())
}

fn print_banner(context: &ShellContext, date: NaiveDate) {
    let balance = BalanceService::balance_on_or_before(&context.book, date);
    println!("{}", render::banner(date, balance, output::color_enabled()));
}

fn print_day_list(context: &ShellContext, date: NaiveDate) {
    let entries = TransactionService::list_on(&context.book, date);
    println!(
        "{}",
        render::render_day_list(date, &entries, output::color_enabled())
    );
}

fn parse_date(token: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(token, "%Y-%m-%d")
        .map_err(|_| usage(format!("invalid date `{token}`, expected YYYY-MM-DD")))
}

fn parse_year_month(token: &str) -> Result<(i32, u32), CommandError> {
    let invalid = || usage(format!("invalid month `{token}`, expected YYYY-MM"));
    let (year, month) = token.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

fn parse_amount(token: &str) -> Result<Money, CommandError> {
    token
        .parse::<Money>()
        .map_err(|err| usage(err.to_string()))
}

fn join_note(parts: &[&str]) -> Option<String> {
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_and_months_parse_strictly() {
        assert!(parse_date("2025-02-29").is_err());
        assert!(parse_date("2024-02-29").is_ok());
        assert_eq!(parse_year_month("2025-03").unwrap(), (2025, 3));
        assert!(parse_year_month("2025-13").is_err());
        assert!(parse_year_month("march").is_err());
    }

    #[test]
    fn note_joining_skips_empty() {
        assert_eq!(join_note(&[]), None);
        assert_eq!(join_note(&["two", "words"]), Some("two words".into()));
    }
}
