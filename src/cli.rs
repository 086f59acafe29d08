// Copyright (c) 2025 FinTrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .about("Personal finance tracker: transactions, statistics, reports")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(user_cmd())
        .subcommand(tx_cmd())
        .subcommand(category_cmd())
        .subcommand(stats_cmd())
        .subcommand(report_cmd())
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print output as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print output as JSON lines"),
    )
}

fn filter_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("type")
            .long("type")
            .value_name("KIND")
            .help("income, expense or all"),
    )
    .arg(
        Arg::new("category")
            .long("category")
            .value_name("NAME")
            .help("Category name, or all"),
    )
    .arg(
        Arg::new("start")
            .long("start")
            .value_name("YYYY-MM-DD")
            .help("Range start (inclusive)"),
    )
    .arg(
        Arg::new("end")
            .long("end")
            .value_name("YYYY-MM-DD")
            .help("Range end (inclusive)"),
    )
    .arg(
        Arg::new("search")
            .long("search")
            .value_name("TEXT")
            .help("Case-insensitive match on description or category"),
    )
}

fn user_cmd() -> Command {
    Command::new("user")
        .about("Registration and login sessions")
        .subcommand(
            Command::new("register")
                .about("Create a new account")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").required(true)),
        )
        .subcommand(
            Command::new("login")
                .about("Start a session")
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").required(true)),
        )
        .subcommand(Command::new("logout").about("End the current session"))
        .subcommand(json_flags(
            Command::new("whoami").about("Show the logged-in user"),
        ))
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and browse transactions")
        .subcommand(
            Command::new("add")
                .about("Record a transaction")
                .arg(
                    Arg::new("date")
                        .long("date")
                        .value_name("YYYY-MM-DD")
                        .required(true),
                )
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_name("KIND")
                        .help("income or expense")
                        .required(true),
                )
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("description").long("description").required(true))
                .arg(Arg::new("amount").long("amount").required(true)),
        )
        .subcommand(
            json_flags(filter_args(
                Command::new("list").about("List transactions, newest first"),
            ))
            .arg(
                Arg::new("page")
                    .long("page")
                    .value_parser(value_parser!(usize))
                    .help("1-based page number"),
            )
            .arg(
                Arg::new("limit")
                    .long("limit")
                    .value_parser(value_parser!(usize))
                    .help("Page size"),
            ),
        )
        .subcommand(
            Command::new("edit")
                .about("Update fields of a transaction")
                .arg(Arg::new("id").required(true))
                .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD"))
                .arg(Arg::new("type").long("type").value_name("KIND"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("description").long("description"))
                .arg(Arg::new("amount").long("amount")),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a transaction")
                .arg(Arg::new("id").required(true)),
        )
}

fn category_cmd() -> Command {
    Command::new("category").about("Category reference").subcommand(
        json_flags(Command::new("list").about("List default categories")).arg(
            Arg::new("type")
                .long("type")
                .value_name("KIND")
                .help("income or expense"),
        ),
    )
}

fn stats_cmd() -> Command {
    json_flags(filter_args(
        Command::new("stats").about("Aggregate statistics for a period"),
    ))
    .arg(
        Arg::new("period")
            .long("period")
            .value_name("PERIOD")
            .help("week, month or year (used when no explicit dates are given)"),
    )
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Generate, inspect and export reports")
        .subcommand(
            json_flags(
                Command::new("generate").about("Build and persist a report over a date range"),
            )
            .arg(
                Arg::new("type")
                    .long("type")
                    .value_name("KIND")
                    .help("summary or list")
                    .required(true),
            )
            .arg(
                Arg::new("start")
                    .long("start")
                    .value_name("YYYY-MM-DD")
                    .required(true),
            )
            .arg(
                Arg::new("end")
                    .long("end")
                    .value_name("YYYY-MM-DD")
                    .required(true),
            ),
        )
        .subcommand(json_flags(
            Command::new("list").about("List persisted reports"),
        ))
        .subcommand(
            json_flags(Command::new("show").about("Show a persisted report"))
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(
            Command::new("export")
                .about("Export a persisted report to a file")
                .arg(Arg::new("id").required(true))
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_name("FMT")
                        .default_value("csv")
                        .help("csv or json"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_name("PATH")
                        .required(true),
                ),
        )
}
