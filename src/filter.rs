// Copyright (c) 2025 FinTrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure filtering over an already-materialized transaction snapshot. All
//! predicates are conjunctive; the input is never mutated.

use crate::models::{FilterCriteria, Transaction};

/// Applies `criteria` to `transactions` and returns the matching records
/// sorted date-descending (ties keep input order), then paginated.
///
/// An inverted date range (start after end) yields an empty result rather
/// than an error, as does a page past the last available one.
pub fn filter(transactions: &[Transaction], criteria: &FilterCriteria) -> Vec<Transaction> {
    if let (Some(start), Some(end)) = (criteria.start_date, criteria.end_date) {
        if start > end {
            return Vec::new();
        }
    }

    let mut matched: Vec<Transaction> = transactions
        .iter()
        .filter(|t| matches(t, criteria))
        .cloned()
        .collect();

    // sort_by is stable, so equal dates keep their input order
    matched.sort_by(|a, b| b.date.cmp(&a.date));

    paginate(matched, criteria.page, criteria.page_size)
}

fn matches(t: &Transaction, c: &FilterCriteria) -> bool {
    if let Some(kind) = c.kind {
        if t.kind != kind {
            return false;
        }
    }
    if let Some(category) = &c.category {
        if t.category != *category {
            return false;
        }
    }
    if let Some(start) = c.start_date {
        if t.date < start {
            return false;
        }
    }
    if let Some(end) = c.end_date {
        if t.date > end {
            return false;
        }
    }
    if let Some(needle) = &c.search {
        let needle = needle.to_lowercase();
        if !t.description.to_lowercase().contains(&needle)
            && !t.category.to_lowercase().contains(&needle)
        {
            return false;
        }
    }
    true
}

fn paginate(rows: Vec<Transaction>, page: Option<usize>, page_size: Option<usize>) -> Vec<Transaction> {
    let Some(size) = page_size else {
        return rows;
    };
    if size == 0 {
        return Vec::new();
    }
    let page = page.unwrap_or(1).max(1);
    // page is caller input; an offset that overflows is past the end
    let Some(start) = (page - 1).checked_mul(size) else {
        return Vec::new();
    };
    if start >= rows.len() {
        return Vec::new();
    }
    let end = start.saturating_add(size).min(rows.len());
    rows[start..end].to_vec()
}
