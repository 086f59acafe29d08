// Copyright (c) 2025 FinTrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::commands::users;
use crate::filter;
use crate::models::{FilterCriteria, Transaction, TxKind};
use crate::store::{self, TxPatch};
use crate::utils::{
    fmt_money, generate_id, maybe_print_json, now_rfc3339, parse_amount, parse_date, pretty_table,
};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("delete", sub)) => delete(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = users::current_user(conn)?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let kind = sub.get_one::<String>("type").unwrap().parse::<TxKind>()?;
    let category = sub.get_one::<String>("category").unwrap().to_string();
    let description = sub.get_one::<String>("description").unwrap().to_string();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;

    let now = now_rfc3339();
    let tx = Transaction {
        id: generate_id("txn"),
        user_id: user.id,
        kind,
        category,
        description,
        amount,
        date,
        created_at: now.clone(),
        updated_at: now,
    };
    store::insert_tx(conn, &tx)?;
    println!(
        "Recorded {} {} of {} on {} ({})",
        tx.category,
        tx.kind,
        fmt_money(&tx.amount),
        tx.date,
        tx.id
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let rows = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data: Vec<Vec<String>> = rows
            .iter()
            .map(|t| {
                vec![
                    t.id.clone(),
                    t.date.to_string(),
                    t.kind.to_string(),
                    t.category.clone(),
                    t.description.clone(),
                    fmt_money(&t.amount),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Type", "Category", "Description", "Amount"],
                data
            )
        );
    }
    Ok(())
}

/// Snapshot-then-filter listing for the current user; also exercised directly
/// by the integration tests.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let user = users::current_user(conn)?;
    let criteria = criteria_from_matches(sub)?;
    let snapshot = store::list_for_user(conn, user.id)?;
    Ok(filter::filter(&snapshot, &criteria))
}

/// Maps the shared filter flags onto `FilterCriteria`. "all" on type or
/// category means no predicate, matching the original query contract.
pub fn criteria_from_matches(sub: &clap::ArgMatches) -> Result<FilterCriteria> {
    let mut criteria = FilterCriteria::default();
    if let Some(kind) = sub.get_one::<String>("type") {
        if kind != "all" {
            criteria.kind = Some(kind.parse::<TxKind>()?);
        }
    }
    if let Some(category) = sub.get_one::<String>("category") {
        if category != "all" {
            criteria.category = Some(category.to_string());
        }
    }
    if let Some(start) = sub.get_one::<String>("start") {
        criteria.start_date = Some(parse_date(start)?);
    }
    if let Some(end) = sub.get_one::<String>("end") {
        criteria.end_date = Some(parse_date(end)?);
    }
    if let Some(search) = sub.get_one::<String>("search") {
        criteria.search = Some(search.to_string());
    }
    // stats shares these flags but defines no pagination args
    if let Ok(page) = sub.try_get_one::<usize>("page") {
        criteria.page = page.copied();
    }
    if let Ok(limit) = sub.try_get_one::<usize>("limit") {
        criteria.page_size = limit.copied();
    }
    Ok(criteria)
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = users::current_user(conn)?;
    let id = sub.get_one::<String>("id").unwrap();

    let mut patch = TxPatch::default();
    if let Some(kind) = sub.get_one::<String>("type") {
        patch.kind = Some(kind.parse::<TxKind>()?);
    }
    if let Some(category) = sub.get_one::<String>("category") {
        patch.category = Some(category.to_string());
    }
    if let Some(description) = sub.get_one::<String>("description") {
        patch.description = Some(description.to_string());
    }
    if let Some(amount) = sub.get_one::<String>("amount") {
        patch.amount = Some(parse_amount(amount)?);
    }
    if let Some(date) = sub.get_one::<String>("date") {
        patch.date = Some(parse_date(date)?);
    }
    if patch.is_empty() {
        return Err(crate::error::Error::Validation("nothing to update".into()).into());
    }

    let tx = store::update_tx(conn, user.id, id, patch)?;
    println!("Updated {} ({} {})", tx.id, tx.date, fmt_money(&tx.amount));
    Ok(())
}

fn delete(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = users::current_user(conn)?;
    let id = sub.get_one::<String>("id").unwrap();
    store::delete_tx(conn, user.id, id)?;
    println!("Deleted {id}");
    Ok(())
}
