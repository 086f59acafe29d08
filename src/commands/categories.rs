// Copyright (c) 2025 FinTrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::models::{TxKind, default_categories};
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(sub)?,
        _ => {}
    }
    Ok(())
}

fn list(sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let kinds: Vec<TxKind> = match sub.get_one::<String>("type") {
        Some(kind) if kind != "all" => vec![kind.parse::<TxKind>()?],
        _ => vec![TxKind::Income, TxKind::Expense],
    };

    let rows: Vec<(String, String)> = kinds
        .iter()
        .flat_map(|&kind| {
            default_categories(kind)
                .iter()
                .map(move |name| (kind.to_string(), name.to_string()))
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows.into_iter().map(|(k, n)| vec![k, n]).collect();
        println!("{}", pretty_table(&["Type", "Category"], data));
    }
    Ok(())
}
