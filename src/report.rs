// Copyright (c) 2025 FinTrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Report construction and serialization. A report is an immutable snapshot;
//! building one twice over the same input yields two distinct ids.

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::filter;
use crate::models::{
    FilterCriteria, Report, ReportKind, ReportPayload, SummaryPayload, Transaction,
};
use crate::stats;
use crate::utils;

pub const CSV_COLUMNS: [&str; 5] = ["date", "description", "category", "kind", "amount"];

/// Builds a report over the transactions falling inside `[start, end]`
/// (inclusive). Summary reports carry totals and the category breakdown only;
/// list reports carry the matching transactions date-descending plus a count.
pub fn build_report(
    kind: ReportKind,
    start: NaiveDate,
    end: NaiveDate,
    transactions: &[Transaction],
) -> Report {
    let criteria = FilterCriteria {
        start_date: Some(start),
        end_date: Some(end),
        ..Default::default()
    };
    let in_range = filter::filter(transactions, &criteria);

    let payload = match kind {
        ReportKind::Summary => {
            let agg = stats::aggregate(&in_range);
            ReportPayload::Summary(SummaryPayload {
                total_income: agg.total_income,
                total_expense: agg.total_expense,
                balance: agg.balance,
                by_category: agg.by_category,
                transaction_count: agg.transaction_count,
            })
        }
        ReportKind::List => ReportPayload::List {
            total_count: in_range.len(),
            transactions: in_range,
        },
    };

    Report {
        id: utils::generate_id("rpt"),
        kind,
        period: format!("{start} - {end}"),
        generated_at: utils::now_rfc3339(),
        payload,
    }
}

/// Serializes a list report to CSV text: fixed column order, header row even
/// for zero rows, RFC 4180 quoting from the csv writer. Summary reports have
/// no row shape and are rejected.
pub fn to_csv(report: &Report) -> Result<String> {
    let ReportPayload::List { transactions, .. } = &report.payload else {
        return Err(Error::UnsupportedFormat(format!(
            "csv requires a list report, got {}",
            report.kind
        )));
    };

    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(CSV_COLUMNS)?;
    for t in transactions {
        wtr.write_record([
            t.date.to_string(),
            t.description.clone(),
            t.category.clone(),
            t.kind.to_string(),
            t.amount.to_string(),
        ])?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
