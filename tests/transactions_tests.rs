// Copyright (c) 2025 FinTrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Duration, NaiveDate, Utc};
use fintrack::models::{Transaction, TxKind};
use fintrack::store::{self, TxPatch};
use fintrack::{cli, commands::transactions, db};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> (Connection, i64) {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let user = store::create_user(&conn, "Test User", "test@example.com", "hash", "TU").unwrap();
    store::create_session(&conn, user.id, "sess_test", Utc::now() + Duration::days(1)).unwrap();
    store::set_current_session(&conn, "sess_test").unwrap();
    for (i, (kind, category, description, amount)) in [
        (TxKind::Income, "Salary", "Monthly salary", "4500"),
        (TxKind::Expense, "Food & Dining", "Groceries", "125.75"),
        (TxKind::Expense, "Transportation", "Gas refill", "65.50"),
    ]
    .into_iter()
    .enumerate()
    {
        store::insert_tx(
            &conn,
            &Transaction {
                id: format!("txn_{i}"),
                user_id: user.id,
                kind,
                category: category.to_string(),
                description: description.to_string(),
                amount: amount.parse::<Decimal>().unwrap(),
                date: NaiveDate::from_ymd_opt(2025, 1, (i + 1) as u32).unwrap(),
                created_at: "2025-01-01T00:00:00Z".to_string(),
                updated_at: "2025-01-01T00:00:00Z".to_string(),
            },
        )
        .unwrap();
    }
    (conn, user.id)
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["fintrack", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    list_m.clone()
}

#[test]
fn list_limit_respected() {
    let (conn, _) = setup();
    let rows = transactions::query_rows(&conn, &list_matches(&["--limit", "2"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date.to_string(), "2025-01-03");
}

#[test]
fn list_page_past_end_is_empty() {
    let (conn, _) = setup();
    let rows =
        transactions::query_rows(&conn, &list_matches(&["--page", "3", "--limit", "2"])).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn list_filters_by_type_and_search() {
    let (conn, _) = setup();
    let rows = transactions::query_rows(
        &conn,
        &list_matches(&["--type", "expense", "--search", "gas"]),
    )
    .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "Gas refill");

    let all = transactions::query_rows(&conn, &list_matches(&["--type", "all"])).unwrap();
    assert_eq!(all.len(), 3);
}

#[test]
fn update_merges_patch_and_bumps_updated_at() {
    let (conn, user_id) = setup();
    let updated = store::update_tx(
        &conn,
        user_id,
        "txn_1",
        TxPatch {
            amount: Some("130.00".parse::<Decimal>().unwrap()),
            description: Some("Groceries and snacks".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(updated.amount, "130.00".parse::<Decimal>().unwrap());
    assert_eq!(updated.category, "Food & Dining");
    assert_ne!(updated.updated_at, "2025-01-01T00:00:00Z");

    let reread = store::get_tx(&conn, user_id, "txn_1").unwrap();
    assert_eq!(reread.description, "Groceries and snacks");
}

#[test]
fn delete_removes_and_unknown_id_is_not_found() {
    let (conn, user_id) = setup();
    store::delete_tx(&conn, user_id, "txn_2").unwrap();
    assert!(store::get_tx(&conn, user_id, "txn_2").is_err());
    assert!(store::delete_tx(&conn, user_id, "txn_2").is_err());
    assert_eq!(store::list_for_user(&conn, user_id).unwrap().len(), 2);
}

#[test]
fn snapshot_is_scoped_to_user() {
    let (conn, user_id) = setup();
    let other = store::create_user(&conn, "Other", "other@example.com", "hash", "O").unwrap();
    assert!(store::list_for_user(&conn, other.id).unwrap().is_empty());
    assert!(store::get_tx(&conn, other.id, "txn_0").is_err());
    assert_eq!(store::list_for_user(&conn, user_id).unwrap().len(), 3);
}
