// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! SQLite access for transactions and budgets. Every query is scoped to an
//! owner.

use anyhow::{Context, Result, anyhow};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

use crate::models::{Budget, Category, Kind, NewTransaction, Transaction};
use crate::utils::{format_datetime, parse_stored_datetime};

const SELECT_TX: &str = "SELECT id, owner, kind, category, amount, description, occurred_at, created_at, updated_at FROM transactions";

pub fn insert_transaction(conn: &Connection, owner: &str, tx: &NewTransaction) -> Result<String> {
    let category = tx.validate()?;
    let id = uuid::Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO transactions(id, owner, kind, category, amount, description, occurred_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            id,
            owner,
            tx.kind.as_str(),
            category.as_str(),
            tx.amount.to_string(),
            tx.description.trim(),
            format_datetime(&tx.occurred_at)
        ],
    )?;
    tracing::info!(%id, kind = %tx.kind, amount = %tx.amount, "transaction recorded");
    Ok(id)
}

pub fn update_transaction(
    conn: &Connection,
    owner: &str,
    id: &str,
    tx: &NewTransaction,
) -> Result<()> {
    let category = tx.validate()?;
    let n = conn.execute(
        "UPDATE transactions
         SET kind=?3, category=?4, amount=?5, description=?6, occurred_at=?7, updated_at=datetime('now')
         WHERE id=?1 AND owner=?2",
        params![
            id,
            owner,
            tx.kind.as_str(),
            category.as_str(),
            tx.amount.to_string(),
            tx.description.trim(),
            format_datetime(&tx.occurred_at)
        ],
    )?;
    if n == 0 {
        return Err(anyhow!("Transaction '{}' not found", id));
    }
    tracing::info!(%id, "transaction updated");
    Ok(())
}

pub fn delete_transaction(conn: &Connection, owner: &str, id: &str) -> Result<()> {
    let n = conn.execute(
        "DELETE FROM transactions WHERE id=?1 AND owner=?2",
        params![id, owner],
    )?;
    if n == 0 {
        return Err(anyhow!("Transaction '{}' not found", id));
    }
    tracing::info!(%id, "transaction deleted");
    Ok(())
}

pub fn get_transaction(conn: &Connection, owner: &str, id: &str) -> Result<Option<Transaction>> {
    let mut stmt = conn.prepare(&format!("{} WHERE id=?1 AND owner=?2", SELECT_TX))?;
    let row = stmt
        .query_row(params![id, owner], read_transaction)
        .optional()?;
    Ok(row.flatten())
}

/// Snapshot of the owner's records, newest first. Rows whose amount is not
/// a decimal are skipped with a warning; `doctor` lists them.
pub fn load_transactions(conn: &Connection, owner: &str) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE owner=?1 ORDER BY occurred_at DESC, created_at DESC, id",
        SELECT_TX
    ))?;
    let rows = stmt.query_map(params![owner], read_transaction)?;
    let mut out = Vec::new();
    let mut skipped = 0usize;
    for row in rows {
        match row? {
            Some(t) => out.push(t),
            None => skipped += 1,
        }
    }
    tracing::debug!(owner, count = out.len(), skipped, "loaded transactions");
    Ok(out)
}

fn read_transaction(r: &Row<'_>) -> rusqlite::Result<Option<Transaction>> {
    let id: String = r.get(0)?;
    let kind_s: Option<String> = r.get(2)?;
    let category_s: Option<String> = r.get(3)?;
    let amount_s: String = r.get(4)?;
    let occurred_s: Option<String> = r.get(6)?;

    let kind = kind_s.as_deref().and_then(|s| match s.parse::<Kind>() {
        Ok(k) => Some(k),
        Err(err) => {
            tracing::warn!(%id, %err, "unrecognized kind");
            None
        }
    });
    let category = category_s.as_deref().and_then(|s| match s.parse::<Category>() {
        Ok(c) => Some(c),
        Err(err) => {
            tracing::warn!(%id, %err, "unrecognized category");
            None
        }
    });
    let occurred_at = occurred_s.as_deref().and_then(|s| {
        let parsed = parse_stored_datetime(s);
        if parsed.is_none() {
            tracing::warn!(%id, value = s, "unparseable transaction date");
        }
        parsed
    });
    let amount = match amount_s.trim().parse::<Decimal>() {
        Ok(a) => a,
        Err(err) => {
            tracing::warn!(%id, value = %amount_s, %err, "unparseable amount, row skipped");
            return Ok(None);
        }
    };

    Ok(Some(Transaction {
        id,
        owner: r.get(1)?,
        kind,
        category,
        amount,
        description: r.get(5)?,
        occurred_at,
        created_at: r.get(7)?,
        updated_at: r.get(8)?,
    }))
}

pub fn set_budget(conn: &Connection, owner: &str, budget: &Budget) -> Result<()> {
    if budget.amount < Decimal::ZERO {
        return Err(anyhow!("Budget amount must not be negative (got {})", budget.amount));
    }
    conn.execute(
        "INSERT INTO budgets(owner, month, category, amount) VALUES (?1,?2,?3,?4)
         ON CONFLICT(owner, month, category) DO UPDATE SET amount=excluded.amount",
        params![
            owner,
            budget.month,
            budget.category.as_str(),
            budget.amount.to_string()
        ],
    )?;
    Ok(())
}

pub fn list_budgets(conn: &Connection, owner: &str, month: Option<&str>) -> Result<Vec<Budget>> {
    let mut stmt = conn.prepare(
        "SELECT month, category, amount FROM budgets
         WHERE owner=?1 AND (?2 IS NULL OR month=?2)
         ORDER BY month DESC, category",
    )?;
    let mut rows = stmt.query(params![owner, month])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let month: String = r.get(0)?;
        let cat_s: String = r.get(1)?;
        let amt_s: String = r.get(2)?;
        let category = cat_s
            .parse::<Category>()
            .with_context(|| format!("Invalid budget category '{}' for {}", cat_s, month))?;
        let amount = amt_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid budget amount '{}' for {}", amt_s, month))?;
        out.push(Budget {
            month,
            category,
            amount,
        });
    }
    Ok(out)
}
