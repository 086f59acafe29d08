// Copyright (c) 2025 FinTrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::commands::users;
use crate::error::Error;
use crate::models::{Report, ReportKind, ReportPayload};
use crate::report;
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("generate", sub)) => generate(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("export", sub)) => export(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn generate(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let user = users::current_user(conn)?;
    let kind = sub.get_one::<String>("type").unwrap().parse::<ReportKind>()?;
    let start = parse_date(sub.get_one::<String>("start").unwrap())?;
    let end = parse_date(sub.get_one::<String>("end").unwrap())?;

    let snapshot = store::list_for_user(conn, user.id)?;
    let report = report::build_report(kind, start, end, &snapshot);
    store::insert_report(conn, user.id, &report)?;

    if !maybe_print_json(json_flag, jsonl_flag, &report)? {
        println!(
            "Generated {} report {} for {}",
            report.kind, report.id, report.period
        );
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user = users::current_user(conn)?;
    let metas = store::list_reports(conn, user.id)?;
    if !maybe_print_json(json_flag, jsonl_flag, &metas)? {
        let data: Vec<Vec<String>> = metas
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.kind.to_string(),
                    r.period.clone(),
                    r.generated_at.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Kind", "Period", "Generated"], data)
        );
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user = users::current_user(conn)?;
    let id = sub.get_one::<String>("id").unwrap();
    let report = store::get_report(conn, user.id, id)?;
    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }
    print_report(&report);
    Ok(())
}

fn print_report(report: &Report) {
    println!(
        "{} report {} for {} (generated {})",
        report.kind, report.id, report.period, report.generated_at
    );
    match &report.payload {
        ReportPayload::Summary(summary) => {
            println!(
                "{}",
                pretty_table(
                    &["Income", "Expense", "Balance", "Transactions"],
                    vec![vec![
                        fmt_money(&summary.total_income),
                        fmt_money(&summary.total_expense),
                        fmt_money(&summary.balance),
                        summary.transaction_count.to_string(),
                    ]],
                )
            );
            if !summary.by_category.is_empty() {
                let data: Vec<Vec<String>> = summary
                    .by_category
                    .iter()
                    .map(|c| {
                        vec![
                            c.category.clone(),
                            fmt_money(&c.amount),
                            format!("{}%", c.percentage),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Category", "Spent", "Share"], data));
            }
        }
        ReportPayload::List {
            transactions,
            total_count,
        } => {
            let data: Vec<Vec<String>> = transactions
                .iter()
                .map(|t| {
                    vec![
                        t.date.to_string(),
                        t.description.clone(),
                        t.category.clone(),
                        t.kind.to_string(),
                        fmt_money(&t.amount),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["Date", "Description", "Category", "Type", "Amount"], data)
            );
            println!("{total_count} transactions");
        }
    }
}

fn export(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = users::current_user(conn)?;
    let id = sub.get_one::<String>("id").unwrap();
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let report = store::get_report(conn, user.id, id)?;
    let contents = match fmt.as_str() {
        "csv" => report::to_csv(&report)?,
        "json" => serde_json::to_string_pretty(&report)?,
        // PDF rendering belongs to an external tool
        other => return Err(Error::UnsupportedFormat(other.to_string()).into()),
    };
    std::fs::write(out, contents)?;
    println!("Exported report {id} to {out}");
    Ok(())
}
