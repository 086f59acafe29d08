// Copyright (c) 2025 FinTrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{Duration, Utc};
use rusqlite::Connection;

use crate::error::Error;
use crate::models::User;
use crate::store;
use crate::utils::{generate_id, maybe_print_json, pretty_table, validate_email, validate_password};

const BCRYPT_COST: u32 = 10;
const SESSION_DAYS: i64 = 7;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("register", sub)) => register(conn, sub)?,
        Some(("login", sub)) => login(conn, sub)?,
        Some(("logout", _)) => logout(conn)?,
        Some(("whoami", sub)) => whoami(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn register(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let email = sub.get_one::<String>("email").unwrap();
    let password = sub.get_one::<String>("password").unwrap();

    validate_email(email)?;
    validate_password(password)?;
    if store::find_user_by_email(conn, email)?.is_some() {
        return Err(Error::Validation("User already exists".into()).into());
    }

    let hash = bcrypt::hash(password, BCRYPT_COST)?;
    let user = store::create_user(conn, name, email, &hash, &avatar_initials(name))?;
    println!("Registered {} <{}>", user.name, user.email);
    Ok(())
}

fn login(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let email = sub.get_one::<String>("email").unwrap();
    let password = sub.get_one::<String>("password").unwrap();

    let user = store::find_user_by_email(conn, email)?
        .ok_or_else(|| Error::Validation("Invalid credentials".into()))?;
    if !bcrypt::verify(password, &user.password_hash)? {
        return Err(Error::Validation("Invalid credentials".into()).into());
    }

    let token = generate_id("sess");
    store::create_session(conn, user.id, &token, Utc::now() + Duration::days(SESSION_DAYS))?;
    store::set_current_session(conn, &token)?;
    println!("Logged in as {}", user.email);
    Ok(())
}

fn logout(conn: &Connection) -> Result<()> {
    if let Some(token) = store::get_current_session(conn)? {
        store::delete_session(conn, &token)?;
        store::clear_current_session(conn)?;
        println!("Logged out");
    } else {
        println!("No active session");
    }
    Ok(())
}

fn whoami(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user = current_user(conn)?;
    if !maybe_print_json(json_flag, jsonl_flag, &user)? {
        let rows = vec![vec![
            user.name.clone(),
            user.email.clone(),
            user.avatar.clone(),
        ]];
        println!("{}", pretty_table(&["Name", "Email", "Avatar"], rows));
    }
    Ok(())
}

/// Resolves the pinned session to a user; every tx/stats/report command goes
/// through this first.
pub fn current_user(conn: &Connection) -> Result<User> {
    let token = store::get_current_session(conn)?
        .ok_or_else(|| Error::Validation("Not logged in".into()))?;
    store::session_user(conn, &token, Utc::now())?
        .ok_or_else(|| Error::Validation("Session expired, log in again".into()).into())
}

fn avatar_initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect::<String>()
        .to_uppercase()
}
