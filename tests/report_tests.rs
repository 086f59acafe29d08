// Copyright (c) 2025 FinTrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::error::Error;
use fintrack::models::{ReportKind, ReportPayload, Transaction, TxKind};
use fintrack::report::{build_report, to_csv};
use rust_decimal::Decimal;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx(id: &str, kind: TxKind, category: &str, description: &str, amount: &str, d: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        user_id: 1,
        kind,
        category: category.to_string(),
        description: description.to_string(),
        amount: amount.parse::<Decimal>().unwrap(),
        date: date(d),
        created_at: "2024-01-01T00:00:00Z".to_string(),
        updated_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

fn fixture() -> Vec<Transaction> {
    vec![
        tx("t1", TxKind::Income, "Salary", "Monthly salary", "1000", "2024-01-05"),
        tx("t2", TxKind::Expense, "Food", "Groceries, \"fancy\" ones", "200", "2024-01-10"),
        tx("t3", TxKind::Expense, "Food", "Lunch\nwith note", "50", "2024-01-15"),
        tx("t4", TxKind::Expense, "Travel", "Out of range trip", "500", "2024-06-01"),
    ]
}

#[test]
fn summary_report_restricts_to_totals_and_categories() {
    let report = build_report(
        ReportKind::Summary,
        date("2024-01-01"),
        date("2024-01-31"),
        &fixture(),
    );
    assert_eq!(report.kind, ReportKind::Summary);
    assert_eq!(report.period, "2024-01-01 - 2024-01-31");
    let ReportPayload::Summary(summary) = &report.payload else {
        panic!("expected summary payload");
    };
    assert_eq!(summary.total_income, "1000".parse::<Decimal>().unwrap());
    assert_eq!(summary.total_expense, "250".parse::<Decimal>().unwrap());
    assert_eq!(summary.balance, "750".parse::<Decimal>().unwrap());
    assert_eq!(summary.transaction_count, 3);
    assert_eq!(summary.by_category.len(), 1);
    assert_eq!(summary.by_category[0].category, "Food");
}

#[test]
fn list_report_carries_matching_transactions_and_count() {
    let report = build_report(
        ReportKind::List,
        date("2024-01-01"),
        date("2024-01-31"),
        &fixture(),
    );
    let ReportPayload::List {
        transactions,
        total_count,
    } = &report.payload
    else {
        panic!("expected list payload");
    };
    assert_eq!(*total_count, 3);
    let ids: Vec<&str> = transactions.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["t3", "t2", "t1"]);
}

#[test]
fn regeneration_produces_distinct_ids() {
    let input = fixture();
    let a = build_report(ReportKind::List, date("2024-01-01"), date("2024-01-31"), &input);
    let b = build_report(ReportKind::List, date("2024-01-01"), date("2024-01-31"), &input);
    assert_ne!(a.id, b.id);
}

#[test]
fn csv_has_header_even_for_zero_rows() {
    let report = build_report(
        ReportKind::List,
        date("2030-01-01"),
        date("2030-01-31"),
        &fixture(),
    );
    let out = to_csv(&report).unwrap();
    assert_eq!(out.trim_end(), "date,description,category,kind,amount");
}

#[test]
fn csv_round_trips_quoted_fields() {
    let report = build_report(
        ReportKind::List,
        date("2024-01-01"),
        date("2024-01-31"),
        &fixture(),
    );
    let out = to_csv(&report).unwrap();

    let mut rdr = csv::Reader::from_reader(out.as_bytes());
    assert_eq!(
        rdr.headers().unwrap(),
        &csv::StringRecord::from(vec!["date", "description", "category", "kind", "amount"])
    );
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    // rows are date-descending
    assert_eq!(&rows[0][1], "Lunch\nwith note");
    assert_eq!(&rows[1][1], "Groceries, \"fancy\" ones");
    assert_eq!(&rows[1][2], "Food");
    assert_eq!(&rows[1][3], "expense");
    assert_eq!(&rows[1][4], "200");
    assert_eq!(&rows[2][3], "income");
}

#[test]
fn csv_rejects_summary_reports() {
    let report = build_report(
        ReportKind::Summary,
        date("2024-01-01"),
        date("2024-01-31"),
        &fixture(),
    );
    match to_csv(&report) {
        Err(Error::UnsupportedFormat(_)) => {}
        other => panic!("expected UnsupportedFormat, got {other:?}"),
    }
}
