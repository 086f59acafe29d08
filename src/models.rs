// Copyright (c) 2025 FinTrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }
}

impl FromStr for TxKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            other => Err(Error::Validation(format!(
                "invalid transaction type '{other}', expected income or expense"
            ))),
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recorded income or expense event. Owned by the store; commands
/// mutate it only through `store::` functions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub user_id: i64,
    pub kind: TxKind,
    pub category: String,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub created_at: String,
    pub updated_at: String,
}

/// Optional predicates narrowing which transactions enter a query.
/// Constructed per call, never persisted.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub kind: Option<TxKind>,
    pub category: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub search: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthTotal {
    /// Calendar month, 1-12.
    pub month: u32,
    pub income: Decimal,
    pub expense: Decimal,
}

/// Totals and breakdowns over a transaction sequence. Recomputed on every
/// query, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateResult {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    /// Expense-only category breakdown, amount-descending.
    pub by_category: Vec<CategoryTotal>,
    /// Always 12 entries, indexed by each transaction's own calendar month.
    pub by_month: Vec<MonthTotal>,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Summary,
    List,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Summary => "summary",
            ReportKind::List => "list",
        }
    }
}

impl FromStr for ReportKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "summary" => Ok(ReportKind::Summary),
            "list" => Ok(ReportKind::List),
            other => Err(Error::Validation(format!(
                "invalid report type '{other}', expected summary or list"
            ))),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryPayload {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub by_category: Vec<CategoryTotal>,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReportPayload {
    #[serde(rename = "financial_summary")]
    Summary(SummaryPayload),
    #[serde(rename = "transaction_list")]
    List {
        transactions: Vec<Transaction>,
        total_count: usize,
    },
}

/// A timestamped snapshot of an aggregate or transaction list. Immutable once
/// generated; re-generation produces a new id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub kind: ReportKind,
    pub period: String,
    pub generated_at: String,
    pub payload: ReportPayload,
}

/// Listing row for persisted reports; the payload stays in the store.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub id: String,
    pub kind: ReportKind,
    pub period: String,
    pub generated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub avatar: String,
    pub created_at: String,
}

pub const INCOME_CATEGORIES: &[&str] = &[
    "Salary",
    "Freelance",
    "Investment",
    "Business",
    "Gift",
    "Other",
];

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food & Dining",
    "Shopping",
    "Transportation",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Education",
    "Travel",
    "Other",
];

/// Suggested categories per kind. The category field itself is an open set;
/// these are only what the picker offers.
pub fn default_categories(kind: TxKind) -> &'static [&'static str] {
    match kind {
        TxKind::Income => INCOME_CATEGORIES,
        TxKind::Expense => EXPENSE_CATEGORIES,
    }
}
