// Copyright (c) 2025 FinTrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use rusqlite::Connection;
use serde::Serialize;

use crate::commands::{transactions, users};
use crate::filter;
use crate::models::AggregateResult;
use crate::stats;
use crate::store;
use crate::utils::{fmt_money, maybe_print_json, month_name, period_range, pretty_table};

#[derive(Serialize)]
struct StatsOutput {
    start: String,
    end: String,
    #[serde(flatten)]
    result: AggregateResult,
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let user = users::current_user(conn)?;
    let mut criteria = transactions::criteria_from_matches(sub)?;

    // Explicit dates win; otherwise a period keyword (defaulting to the
    // current month) supplies the range.
    if criteria.start_date.is_none() && criteria.end_date.is_none() {
        let period = sub
            .get_one::<String>("period")
            .map(String::as_str)
            .unwrap_or("month");
        let (start, end) = period_range(period, Utc::now().date_naive())?;
        criteria.start_date = Some(start);
        criteria.end_date = Some(end);
    }

    let snapshot = store::list_for_user(conn, user.id)?;
    let rows = filter::filter(&snapshot, &criteria);
    let result = stats::aggregate(&rows);

    let output = StatsOutput {
        start: criteria
            .start_date
            .map(|d| d.to_string())
            .unwrap_or_default(),
        end: criteria.end_date.map(|d| d.to_string()).unwrap_or_default(),
        result,
    };
    if maybe_print_json(json_flag, jsonl_flag, &output)? {
        return Ok(());
    }

    let result = &output.result;
    println!("Period: {} - {}", output.start, output.end);
    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Balance", "Transactions"],
            vec![vec![
                fmt_money(&result.total_income),
                fmt_money(&result.total_expense),
                fmt_money(&result.balance),
                result.transaction_count.to_string(),
            ]],
        )
    );

    if !result.by_category.is_empty() {
        let data: Vec<Vec<String>> = result
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

    let monthly: Vec<Vec<String>> = result
        .by_month
        .iter()
        .filter(|m| !m.income.is_zero() || !m.expense.is_zero())
        .map(|m| {
            vec![
                month_name(m.month).to_string(),
                fmt_money(&m.income),
                fmt_money(&m.expense),
            ]
        })
        .collect();
    if !monthly.is_empty() {
        println!("{}", pretty_table(&["Month", "Income", "Expense"], monthly));
    }
    Ok(())
}
