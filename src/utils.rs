// Copyright (c) 2025 FinTrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Duration, NaiveDate, SecondsFormat, Utc};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{Error, Result};

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| Error::Validation(format!("invalid date '{s}', expected YYYY-MM-DD")))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .map_err(|_| Error::Validation(format!("invalid decimal '{s}'")))
}

/// Transaction amounts are magnitudes; the sign lives in the kind.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d.is_sign_negative() && !d.is_zero() {
        return Err(Error::Validation(format!(
            "amount must be non-negative, got '{s}'"
        )));
    }
    Ok(d)
}

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

pub fn validate_email(email: &str) -> Result<()> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(Error::Validation(format!("invalid email '{email}'")))
    }
}

pub fn validate_password(password: &str) -> Result<()> {
    if password.len() < 6 {
        return Err(Error::Validation(
            "password must be at least 6 characters".into(),
        ));
    }
    Ok(())
}

pub fn generate_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn last_day_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    let last = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => {
            return Err(Error::Validation(format!("invalid month number {month}")));
        }
    };
    NaiveDate::from_ymd_opt(year, month, last)
        .ok_or_else(|| Error::Validation(format!("invalid month {year}-{month:02}")))
}

/// Inclusive date range for the stats convenience periods: week is the
/// Mon-Sun week containing `today`, month the current calendar month, year
/// Jan 1 through Dec 31.
pub fn period_range(period: &str, today: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    match period {
        "week" => {
            let offset = today.weekday().num_days_from_monday() as i64;
            let start = today - Duration::days(offset);
            Ok((start, start + Duration::days(6)))
        }
        "month" => {
            let start = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
                .ok_or_else(|| Error::Validation(format!("invalid date {today}")))?;
            Ok((start, last_day_of_month(today.year(), today.month())?))
        }
        "year" => {
            let start = NaiveDate::from_ymd_opt(today.year(), 1, 1)
                .ok_or_else(|| Error::Validation(format!("invalid date {today}")))?;
            let end = NaiveDate::from_ymd_opt(today.year(), 12, 31)
                .ok_or_else(|| Error::Validation(format!("invalid date {today}")))?;
            Ok((start, end))
        }
        other => Err(Error::Validation(format!(
            "invalid period '{other}', expected week, month or year"
        ))),
    }
}

/// "$1,234.56" with thousands separators, two decimal places.
pub fn fmt_money(d: &Decimal) -> String {
    let sign = if d.is_sign_negative() && !d.is_zero() {
        "-"
    } else {
        ""
    };
    let s = format!("{:.2}", d.abs());
    let (int_part, frac_part) = match s.split_once('.') {
        Some(parts) => parts,
        None => (s.as_str(), "00"),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{frac_part}")
}

pub fn month_name(month: u32) -> &'static str {
    const MONTHS: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    MONTHS
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> anyhow::Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
