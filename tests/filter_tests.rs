// Copyright (c) 2025 FinTrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::filter::filter;
use fintrack::models::{FilterCriteria, Transaction, TxKind};
use rust_decimal::Decimal;

fn tx(id: &str, kind: TxKind, category: &str, description: &str, amount: &str, date: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        user_id: 1,
        kind,
        category: category.to_string(),
        description: description.to_string(),
        amount: amount.parse::<Decimal>().unwrap(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        created_at: "2025-01-01T00:00:00Z".to_string(),
        updated_at: "2025-01-01T00:00:00Z".to_string(),
    }
}

fn fixture() -> Vec<Transaction> {
    vec![
        tx("t1", TxKind::Income, "Salary", "Monthly salary", "4500", "2025-01-31"),
        tx("t2", TxKind::Expense, "Food & Dining", "Grocery run", "125.75", "2025-01-10"),
        tx("t3", TxKind::Expense, "Transportation", "Gas refill", "65.50", "2025-01-10"),
        tx("t4", TxKind::Income, "Freelance", "Web project", "1200", "2025-02-03"),
        tx("t5", TxKind::Expense, "Food & Dining", "Dinner out", "45", "2025-02-14"),
    ]
}

fn ids(rows: &[Transaction]) -> Vec<&str> {
    rows.iter().map(|t| t.id.as_str()).collect()
}

#[test]
fn result_is_subsequence_and_idempotent() {
    let input = fixture();
    let criteria = FilterCriteria {
        kind: Some(TxKind::Expense),
        search: Some("food".to_string()),
        ..Default::default()
    };
    let once = filter(&input, &criteria);
    for t in &once {
        assert!(input.iter().any(|orig| orig.id == t.id));
    }
    let twice = filter(&once, &criteria);
    assert_eq!(ids(&once), ids(&twice));
}

#[test]
fn predicates_are_conjunctive() {
    let rows = filter(
        &fixture(),
        &FilterCriteria {
            kind: Some(TxKind::Expense),
            category: Some("Food & Dining".to_string()),
            start_date: Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
            end_date: Some(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()),
            ..Default::default()
        },
    );
    assert_eq!(ids(&rows), vec!["t2"]);
}

#[test]
fn date_range_bounds_are_inclusive() {
    let rows = filter(
        &fixture(),
        &FilterCriteria {
            start_date: Some(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()),
            end_date: Some(NaiveDate::from_ymd_opt(2025, 2, 3).unwrap()),
            ..Default::default()
        },
    );
    assert_eq!(ids(&rows), vec!["t4", "t1", "t2", "t3"]);
}

#[test]
fn inverted_range_yields_empty_not_error() {
    let rows = filter(
        &fixture(),
        &FilterCriteria {
            start_date: Some(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()),
            end_date: Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
            ..Default::default()
        },
    );
    assert!(rows.is_empty());
}

#[test]
fn search_is_case_insensitive_over_description_and_category() {
    let by_description = filter(
        &fixture(),
        &FilterCriteria {
            search: Some("GROCERY".to_string()),
            ..Default::default()
        },
    );
    assert_eq!(ids(&by_description), vec!["t2"]);

    let by_category = filter(
        &fixture(),
        &FilterCriteria {
            search: Some("dining".to_string()),
            ..Default::default()
        },
    );
    assert_eq!(ids(&by_category), vec!["t5", "t2"]);
}

#[test]
fn sorted_date_descending_with_stable_ties() {
    let rows = filter(&fixture(), &FilterCriteria::default());
    assert_eq!(ids(&rows), vec!["t5", "t4", "t1", "t2", "t3"]);
}

#[test]
fn page_past_available_pages_is_empty() {
    let mut input = Vec::new();
    for i in 0..15 {
        input.push(tx(
            &format!("t{i}"),
            TxKind::Expense,
            "Shopping",
            "Item",
            "10",
            "2025-03-01",
        ));
    }
    let page = |n: usize| {
        filter(
            &input,
            &FilterCriteria {
                page: Some(n),
                page_size: Some(10),
                ..Default::default()
            },
        )
    };
    assert_eq!(page(1).len(), 10);
    assert_eq!(page(2).len(), 5);
    assert!(page(3).is_empty());
}

#[test]
fn extreme_page_values_mean_past_the_end_not_overflow() {
    let input = fixture();
    let page = |page: usize, size: usize| {
        filter(
            &input,
            &FilterCriteria {
                page: Some(page),
                page_size: Some(size),
                ..Default::default()
            },
        )
    };
    assert!(page(usize::MAX, 10).is_empty());
    assert!(page(2, usize::MAX).is_empty());
    // a huge page size on the first page is just "everything"
    assert_eq!(page(1, usize::MAX).len(), input.len());
}

#[test]
fn page_defaults_to_first_when_only_size_given() {
    let rows = filter(
        &fixture(),
        &FilterCriteria {
            page_size: Some(2),
            ..Default::default()
        },
    );
    assert_eq!(ids(&rows), vec!["t5", "t4"]);
}

#[test]
fn input_is_not_mutated() {
    let input = fixture();
    let before = ids(&input).join(",");
    let _ = filter(
        &input,
        &FilterCriteria {
            kind: Some(TxKind::Income),
            ..Default::default()
        },
    );
    assert_eq!(ids(&input).join(","), before);
}
