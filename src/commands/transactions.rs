// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, Kind, NewTransaction};
use crate::period::{self, PeriodSelector};
use crate::store;
use crate::utils::{
    fmt_money, format_datetime, get_owner, maybe_print_json, parse_datetime, parse_decimal,
    pretty_table,
};
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn arg<'a>(sub: &'a clap::ArgMatches, name: &str) -> Option<&'a str> {
    sub.get_one::<String>(name)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = get_owner(conn)?;
    let kind: Kind = arg(sub, "kind").unwrap_or_default().parse()?;
    let amount = parse_decimal(arg(sub, "amount").unwrap_or_default())?;
    let description = arg(sub, "description").unwrap_or_default().to_string();
    let category = arg(sub, "category").map(str::parse::<Category>).transpose()?;
    let occurred_at = match arg(sub, "date") {
        Some(d) => parse_datetime(d)?,
        None => chrono::Local::now().naive_local(),
    };

    let tx = NewTransaction {
        kind,
        category,
        amount,
        description,
        occurred_at,
    };
    let id = store::insert_transaction(conn, &owner, &tx)?;
    println!(
        "Recorded {} {} on {} '{}' (id: {})",
        tx.kind,
        fmt_money(&tx.amount),
        tx.occurred_at.date(),
        tx.description.trim(),
        id
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = get_owner(conn)?;
    let id = arg(sub, "id").unwrap_or_default();
    let existing = store::get_transaction(conn, &owner, id)?
        .with_context(|| format!("Transaction '{}' not found", id))?;

    let kind = match arg(sub, "kind") {
        Some(k) => k.parse::<Kind>()?,
        None => existing
            .kind
            .context("Stored transaction has no valid kind; pass --kind")?,
    };
    let amount = match arg(sub, "amount") {
        Some(a) => parse_decimal(a)?,
        None => existing.amount,
    };
    let description = arg(sub, "description")
        .map(str::to_string)
        .unwrap_or(existing.description);
    let category = match arg(sub, "category") {
        Some(c) => Some(c.parse::<Category>()?),
        None => existing.category,
    };
    let occurred_at = match arg(sub, "date") {
        Some(d) => parse_datetime(d)?,
        None => existing
            .occurred_at
            .context("Stored transaction has no valid date; pass --date")?,
    };

    let tx = NewTransaction {
        kind,
        category,
        amount,
        description,
        occurred_at,
    };
    store::update_transaction(conn, &owner, id, &tx)?;
    println!("Updated transaction {}", id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = get_owner(conn)?;
    let id = arg(sub, "id").unwrap_or_default();
    store::delete_transaction(conn, &owner, id)?;
    println!("Removed transaction {}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.description.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Kind", "Category", "Amount", "Description", "ID"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub description: String,
}

/// Rows for `tx list`: current owner, newest first, narrowed by `--period`,
/// `--kind` and `--limit`.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let owner = get_owner(conn)?;
    let selector: PeriodSelector = arg(sub, "period").unwrap_or("all").parse()?;
    let kind = match arg(sub, "kind") {
        Some(k) if k.eq_ignore_ascii_case("all") => None,
        Some(k) => Some(k.parse::<Kind>()?),
        None => None,
    };
    let limit = sub.get_one::<usize>("limit").copied();

    let snapshot = store::load_transactions(conn, &owner)?;
    let reference = chrono::Local::now().naive_local();
    let data = period::filter(&snapshot, &selector, reference)
        .into_iter()
        .filter(|t| kind.is_none() || t.kind == kind)
        .take(limit.unwrap_or(usize::MAX))
        .map(|t| TransactionRow {
            date: t
                .occurred_at
                .map(|at| format_datetime(&at))
                .unwrap_or_default(),
            kind: t.kind.map(|k| k.to_string()).unwrap_or_default(),
            category: t.category.map(|c| c.to_string()).unwrap_or_default(),
            amount: fmt_money(&t.amount),
            description: t.description,
            id: t.id,
        })
        .collect();
    Ok(data)
}
