// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use crate::utils::{format_datetime, get_owner};
use anyhow::{Result, bail};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_else(|| "csv".to_string());
    let out = sub
        .get_one::<String>("out")
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let owner = get_owner(conn)?;
    let mut rows = store::load_transactions(conn, &owner)?;
    // oldest first in files
    rows.reverse();

    let fields = |t: &crate::models::Transaction| {
        (
            t.id.clone(),
            t.occurred_at
                .map(|at| format_datetime(&at))
                .unwrap_or_default(),
            t.kind.map(|k| k.to_string()).unwrap_or_default(),
            t.category.map(|c| c.to_string()).unwrap_or_default(),
            t.amount.to_string(),
            t.description.clone(),
        )
    };

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(&out)?;
        wtr.write_record(["id", "date", "kind", "category", "amount", "description"])?;
        for t in &rows {
            let (id, d, k, c, amt, desc) = fields(t);
            wtr.write_record([id, d, k, c, amt, desc])?;
        }
        wtr.flush()?;
    } else {
        let items: Vec<_> = rows
            .iter()
            .map(|t| {
                let (id, d, k, c, amt, desc) = fields(t);
                json!({
                    "id": id, "date": d, "kind": k, "category": c, "amount": amt, "description": desc
                })
            })
            .collect();
        std::fs::write(&out, serde_json::to_string_pretty(&items)?)?;
    }
    tracing::info!(count = rows.len(), format = %fmt, path = %out, "exported transactions");
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}
