//! Static help text for the shell.

pub fn help_text() -> String {
    [
        "Commands:",
        "  cal [YYYY-MM]                          show the month grid of ending balances",
        "  next | prev                            move the calendar one month",
        "  select YYYY-MM-DD                      pick a day; shows its balance and rows",
        "  list [YYYY-MM-DD]                      list the day's transactions",
        "  balance [YYYY-MM-DD]                   show the ending balance on a day",
        "  add YYYY-MM-DD AMOUNT [NOTE..]         record a one-off transaction",
        "  repeat YYYY-MM-DD AMOUNT EVERY UNIT [NOTE..]",
        "                                         create a recurring rule (unit: day|week|month)",
        "  rules                                  list recurrence rules",
        "  edit ID YYYY-MM-DD AMOUNT [NOTE..]     rewrite one transaction",
        "  edit-series ID AMOUNT [NOTE..]         rewrite a rule and all its occurrences",
        "  delete ID                              delete one transaction",
        "  delete-series ID                       delete a rule and its whole series",
        "  backup [NOTE..]                        write a backup of the book",
        "  backups                                list backups",
        "  restore INDEX                          restore a listed backup",
        "  help                                   show this text",
        "  exit                                   leave the shell",
        "",
        "Amounts are signed: income positive (1700), expenses negative (-15.00).",
        "IDs accept any unambiguous prefix of the ids printed by `list` and `rules`.",
    ]
    .join("\n")
}
