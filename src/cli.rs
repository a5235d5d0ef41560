// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn date_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).value_name("YYYY-MM-DD").help(help)
}

pub fn build_cli() -> Command {
    Command::new("centavo")
        .about("Personal finance ledger: wallets, budgets, savings goals, and investments")
        .version(clap::crate_version!())
        .arg_required_else_help(true)
        .arg(
            Arg::new("user")
                .long("user")
                .short('u')
                .global(true)
                .default_value("default")
                .help("User id that scopes every record (supplied by the auth layer in a server setup)"),
        )
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("wallet")
                .about("Manage wallets")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Add a wallet")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("bank")
                                .help("cash|bank|credit|investment|crypto"),
                        )
                        .arg(Arg::new("currency").long("currency").default_value("USD"))
                        .arg(
                            Arg::new("opening")
                                .long("opening")
                                .help("Opening balance, recorded as an income transaction"),
                        )
                        .arg(date_arg("date", "Date for the opening balance entry (default today)"))
                        .arg(
                            Arg::new("default")
                                .long("default")
                                .action(ArgAction::SetTrue)
                                .help("Make this the default wallet"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List wallets")))
                .subcommand(
                    Command::new("set-default")
                        .about("Make a wallet the default, atomically replacing the old one")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(
                    Command::new("rename")
                        .about("Rename a wallet")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("new-name").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a wallet and its transactions")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and inspect ledger transactions")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction and adjust the wallet balance")
                        .arg(Arg::new("amount").required(true))
                        .arg(Arg::new("wallet").long("wallet").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("expense")
                                .help("income|expense"),
                        )
                        .arg(Arg::new("category").long("category").default_value("other"))
                        .arg(Arg::new("desc").long("desc").required(true))
                        .arg(date_arg("date", "Transaction date (default today)")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, most recent first")
                        .arg(Arg::new("wallet").long("wallet"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("category").long("category"))
                        .arg(date_arg("from", "Earliest date"))
                        .arg(date_arg("to", "Latest date"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Edit a transaction; old effect reversed, new applied atomically")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("desc").long("desc"))
                        .arg(Arg::new("wallet").long("wallet"))
                        .arg(date_arg("date", "New transaction date")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction, reversing its balance effect")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly spending limits per category")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Create a budget for a category (one per category)")
                        .arg(Arg::new("category").required(true))
                        .arg(Arg::new("amount").required(true)),
                )
                .subcommand(
                    Command::new("update")
                        .about("Change the limit of an existing budget")
                        .arg(Arg::new("category").required(true))
                        .arg(Arg::new("amount").required(true)),
                )
                .subcommand(json_flags(Command::new("list").about("List budgets")))
                .subcommand(json_flags(
                    Command::new("status")
                        .about("Limit vs. spend for a month (default: current)")
                        .arg(Arg::new("month").long("month").value_name("YYYY-MM")),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a budget")
                        .arg(Arg::new("category").required(true)),
                ),
        )
        .subcommand(
            Command::new("income")
                .about("Income records and recurring templates")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Add an income (one-time or recurring template)")
                        .arg(Arg::new("amount").required(true))
                        .arg(
                            Arg::new("source")
                                .long("source")
                                .default_value("salary")
                                .help("salary|freelance|investments|rental|side-business|other"),
                        )
                        .arg(Arg::new("desc").long("desc").required(true))
                        .arg(
                            Arg::new("freq")
                                .long("freq")
                                .default_value("one-time")
                                .help("one-time|weekly|bi-weekly|monthly|quarterly|annually"),
                        )
                        .arg(date_arg("date", "First (or only) occurrence date (default today)")),
                )
                .subcommand(json_flags(Command::new("list").about("List income records")))
                .subcommand(
                    Command::new("post")
                        .about("Post due occurrences into a wallet as income transactions")
                        .arg(Arg::new("wallet").long("wallet").required(true))
                        .arg(date_arg("through", "Post occurrences up to this date (default today)")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete an income record")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Add a savings goal")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(
                            date_arg("by", "Target date")
                                .required(true),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List goals with progress"),
                ))
                .subcommand(
                    Command::new("fund")
                        .about("Add funds to a goal (negative amount withdraws)")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("amount").required(true).allow_hyphen_values(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a goal")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("investment")
                .about("Externally valued investments")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Add an investment")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("stock")
                                .help("stock|bond|etf|mutual-fund|real-estate|crypto|other"),
                        )
                        .arg(Arg::new("cost").long("cost").required(true).help("Cost basis"))
                        .arg(Arg::new("value").long("value").help("Current value (default: cost)"))
                        .arg(date_arg("date", "Purchase date (default today)"))
                        .arg(Arg::new("currency").long("currency").default_value("USD"))
                        .arg(Arg::new("notes").long("notes")),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List investments with gain/loss"),
                ))
                .subcommand(
                    Command::new("revalue")
                        .about("Record a new external valuation")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("value").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete an investment")
                        .arg(
                            Arg::new("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Read-time aggregations")
                .subcommand_required(true)
                .subcommand(json_flags(
                    Command::new("summary")
                        .about("Income/expense totals and breakdowns")
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .default_value("month")
                                .help("month|year|all"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("net-worth").about("Wallet balances plus investment values"),
                ))
                .subcommand(json_flags(
                    Command::new("spend-by-category")
                        .about("Expense totals per category for a month")
                        .arg(Arg::new("month").long("month").value_name("YYYY-MM")),
                ))
                .subcommand(json_flags(
                    Command::new("cashflow")
                        .about("Monthly income/expense totals")
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .default_value("12")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand_required(true)
                .subcommand(
                    Command::new("transactions")
                        .about("Export the transaction ledger")
                        .arg(Arg::new("format").long("format").default_value("csv").help("csv|json"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("doctor")
                .about("Audit cached wallet balances against the ledger"),
        )
}
