// Copyright (c) 2025 FinTrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! SQLite-backed store. Reads materialize full snapshots (copy-on-read) so
//! the pure filter/aggregate/report core always works over a consistent
//! sequence; writes go through here and nowhere else.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::Error;
use crate::models::{Report, ReportKind, ReportMeta, Transaction, TxKind, User};
use crate::utils;

// ---------------------------------------------------------------------------
// Transactions

#[derive(Debug, Default)]
pub struct TxPatch {
    pub kind: Option<TxKind>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount: Option<rust_decimal::Decimal>,
    pub date: Option<chrono::NaiveDate>,
}

impl TxPatch {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.amount.is_none()
            && self.date.is_none()
    }
}

pub fn insert_tx(conn: &Connection, tx: &Transaction) -> Result<()> {
    conn.execute(
        "INSERT INTO transactions(id, user_id, kind, category, description, amount, date, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            tx.id,
            tx.user_id,
            tx.kind.as_str(),
            tx.category,
            tx.description,
            tx.amount.to_string(),
            tx.date.to_string(),
            tx.created_at,
            tx.updated_at
        ],
    )?;
    Ok(())
}

pub fn get_tx(conn: &Connection, user_id: i64, id: &str) -> Result<Transaction> {
    let row = conn
        .query_row(
            "SELECT id, user_id, kind, category, description, amount, date, created_at, updated_at
             FROM transactions WHERE id=?1 AND user_id=?2",
            params![id, user_id],
            raw_tx_row,
        )
        .optional()?
        .ok_or_else(|| Error::NotFound(format!("transaction '{id}'")))?;
    tx_from_raw(row)
}

pub fn update_tx(conn: &Connection, user_id: i64, id: &str, patch: TxPatch) -> Result<Transaction> {
    let mut tx = get_tx(conn, user_id, id)?;
    if let Some(kind) = patch.kind {
        tx.kind = kind;
    }
    if let Some(category) = patch.category {
        tx.category = category;
    }
    if let Some(description) = patch.description {
        tx.description = description;
    }
    if let Some(amount) = patch.amount {
        tx.amount = amount;
    }
    if let Some(date) = patch.date {
        tx.date = date;
    }
    tx.updated_at = utils::now_rfc3339();
    conn.execute(
        "UPDATE transactions
         SET kind=?1, category=?2, description=?3, amount=?4, date=?5, updated_at=?6
         WHERE id=?7 AND user_id=?8",
        params![
            tx.kind.as_str(),
            tx.category,
            tx.description,
            tx.amount.to_string(),
            tx.date.to_string(),
            tx.updated_at,
            tx.id,
            user_id
        ],
    )?;
    Ok(tx)
}

pub fn delete_tx(conn: &Connection, user_id: i64, id: &str) -> Result<()> {
    let n = conn.execute(
        "DELETE FROM transactions WHERE id=?1 AND user_id=?2",
        params![id, user_id],
    )?;
    if n == 0 {
        return Err(Error::NotFound(format!("transaction '{id}'")).into());
    }
    Ok(())
}

/// Full per-user snapshot, newest first (date, then insertion recency).
pub fn list_for_user(conn: &Connection, user_id: i64) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, kind, category, description, amount, date, created_at, updated_at
         FROM transactions WHERE user_id=?1 ORDER BY date DESC, rowid DESC",
    )?;
    let rows = stmt.query_map(params![user_id], raw_tx_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(tx_from_raw(row?)?);
    }
    Ok(out)
}

type RawTxRow = (
    String,
    i64,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
);

fn raw_tx_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<RawTxRow> {
    Ok((
        r.get(0)?,
        r.get(1)?,
        r.get(2)?,
        r.get(3)?,
        r.get(4)?,
        r.get(5)?,
        r.get(6)?,
        r.get(7)?,
        r.get(8)?,
    ))
}

fn tx_from_raw(raw: RawTxRow) -> Result<Transaction> {
    let (id, user_id, kind, category, description, amount, date, created_at, updated_at) = raw;
    Ok(Transaction {
        kind: kind.parse::<TxKind>()?,
        amount: amount
            .parse()
            .with_context(|| format!("invalid stored amount '{amount}' for '{id}'"))?,
        date: chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .with_context(|| format!("invalid stored date '{date}' for '{id}'"))?,
        id,
        user_id,
        category,
        description,
        created_at,
        updated_at,
    })
}

// ---------------------------------------------------------------------------
// Reports

pub fn insert_report(conn: &Connection, user_id: i64, report: &Report) -> Result<()> {
    let payload = serde_json::to_string(&report.payload)?;
    conn.execute(
        "INSERT INTO reports(id, user_id, kind, period, generated_at, payload)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            report.id,
            user_id,
            report.kind.as_str(),
            report.period,
            report.generated_at,
            payload
        ],
    )?;
    Ok(())
}

pub fn get_report(conn: &Connection, user_id: i64, id: &str) -> Result<Report> {
    let row: Option<(String, String, String, String, String)> = conn
        .query_row(
            "SELECT id, kind, period, generated_at, payload
             FROM reports WHERE id=?1 AND user_id=?2",
            params![id, user_id],
            |r| {
                Ok((
                    r.get(0)?,
                    r.get(1)?,
                    r.get(2)?,
                    r.get(3)?,
                    r.get(4)?,
                ))
            },
        )
        .optional()?;
    let (id, kind, period, generated_at, payload) =
        row.ok_or_else(|| Error::NotFound(format!("report '{id}'")))?;
    Ok(Report {
        kind: kind.parse::<ReportKind>()?,
        payload: serde_json::from_str(&payload)
            .with_context(|| format!("invalid stored payload for report '{id}'"))?,
        id,
        period,
        generated_at,
    })
}

pub fn list_reports(conn: &Connection, user_id: i64) -> Result<Vec<ReportMeta>> {
    let mut stmt = conn.prepare(
        "SELECT id, kind, period, generated_at
         FROM reports WHERE user_id=?1 ORDER BY generated_at DESC, rowid DESC",
    )?;
    let rows = stmt.query_map(params![user_id], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, kind, period, generated_at) = row?;
        out.push(ReportMeta {
            kind: kind.parse::<ReportKind>()?,
            id,
            period,
            generated_at,
        });
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Users & sessions

pub fn create_user(
    conn: &Connection,
    name: &str,
    email: &str,
    password_hash: &str,
    avatar: &str,
) -> Result<User> {
    conn.execute(
        "INSERT INTO users(name, email, password_hash, avatar, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![name, email, password_hash, avatar, utils::now_rfc3339()],
    )?;
    let id = conn.last_insert_rowid();
    get_user(conn, id)
}

pub fn get_user(conn: &Connection, id: i64) -> Result<User> {
    conn.query_row(
        "SELECT id, name, email, password_hash, avatar, created_at FROM users WHERE id=?1",
        params![id],
        user_row,
    )
    .optional()?
    .ok_or_else(|| Error::NotFound(format!("user {id}")).into())
}

pub fn find_user_by_email(conn: &Connection, email: &str) -> Result<Option<User>> {
    let user = conn
        .query_row(
            "SELECT id, name, email, password_hash, avatar, created_at FROM users WHERE email=?1",
            params![email],
            user_row,
        )
        .optional()?;
    Ok(user)
}

fn user_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: r.get(0)?,
        name: r.get(1)?,
        email: r.get(2)?,
        password_hash: r.get(3)?,
        avatar: r.get(4)?,
        created_at: r.get(5)?,
    })
}

pub fn create_session(
    conn: &Connection,
    user_id: i64,
    token: &str,
    expires_at: DateTime<Utc>,
) -> Result<()> {
    conn.execute(
        "INSERT INTO sessions(token, user_id, created_at, expires_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            token,
            user_id,
            utils::now_rfc3339(),
            expires_at.to_rfc3339()
        ],
    )?;
    Ok(())
}

/// Resolves a session token to its user, or None when the token is unknown
/// or past its expiry.
pub fn session_user(conn: &Connection, token: &str, now: DateTime<Utc>) -> Result<Option<User>> {
    let row: Option<(i64, String)> = conn
        .query_row(
            "SELECT user_id, expires_at FROM sessions WHERE token=?1",
            params![token],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;
    let Some((user_id, expires_at)) = row else {
        return Ok(None);
    };
    let expires = DateTime::parse_from_rfc3339(&expires_at)
        .with_context(|| format!("invalid stored expiry '{expires_at}'"))?;
    if now >= expires.with_timezone(&Utc) {
        return Ok(None);
    }
    Ok(Some(get_user(conn, user_id)?))
}

pub fn delete_session(conn: &Connection, token: &str) -> Result<()> {
    conn.execute("DELETE FROM sessions WHERE token=?1", params![token])?;
    Ok(())
}

pub fn set_current_session(conn: &Connection, token: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('current_session', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![token],
    )?;
    Ok(())
}

pub fn get_current_session(conn: &Connection) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='current_session'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn clear_current_session(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM settings WHERE key='current_session'", [])?;
    Ok(())
}
