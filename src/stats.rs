// Copyright (c) 2025 FinTrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregate statistics over a transaction sequence. All currency math is
//! `rust_decimal`; sums are exact, percentages rounded to one decimal place.

use std::collections::HashMap;

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::models::{AggregateResult, CategoryTotal, MonthTotal, Transaction, TxKind};

/// Computes totals, the expense-only category breakdown and the fixed 12-slot
/// monthly series. Total on any well-typed input; an empty sequence produces
/// all-zero totals and no category rows.
pub fn aggregate(transactions: &[Transaction]) -> AggregateResult {
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    let mut by_month: Vec<MonthTotal> = (1..=12)
        .map(|month| MonthTotal {
            month,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
        })
        .collect();
    let mut per_category: HashMap<String, Decimal> = HashMap::new();

    for t in transactions {
        // Month slot comes from the transaction's own date, not from any
        // surrounding filter range.
        let slot = &mut by_month[t.date.month0() as usize];
        match t.kind {
            TxKind::Income => {
                total_income += t.amount;
                slot.income += t.amount;
            }
            TxKind::Expense => {
                total_expense += t.amount;
                slot.expense += t.amount;
                *per_category.entry(t.category.clone()).or_insert(Decimal::ZERO) += t.amount;
            }
        }
    }

    let hundred = Decimal::from(100);
    let mut by_category: Vec<CategoryTotal> = per_category
        .into_iter()
        .map(|(category, amount)| {
            let percentage = if total_expense.is_zero() {
                Decimal::ZERO
            } else {
                (amount / total_expense * hundred).round_dp(1)
            };
            CategoryTotal {
                category,
                amount,
                percentage,
            }
        })
        .collect();
    by_category.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });

    AggregateResult {
        total_income,
        total_expense,
        balance: total_income - total_expense,
        by_category,
        by_month,
        transaction_count: transactions.len(),
    }
}
