// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, Kind};
use crate::utils::{get_owner, parse_stored_datetime, pretty_table};
use anyhow::Result;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

/// `(issue, transaction id, detail)` for every stored record of the current
/// owner that reports will not take at face value.
pub fn find_issues(conn: &Connection) -> Result<Vec<(String, String, String)>> {
    let owner = get_owner(conn)?;
    let mut stmt = conn.prepare(
        "SELECT id, kind, category, amount, occurred_at FROM transactions WHERE owner=?1 ORDER BY occurred_at, id",
    )?;
    let mut cur = stmt.query(params![owner])?;
    let mut issues = Vec::new();
    while let Some(r) = cur.next()? {
        let id: String = r.get(0)?;
        let kind: Option<String> = r.get(1)?;
        let category: Option<String> = r.get(2)?;
        let amount: String = r.get(3)?;
        let occurred_at: Option<String> = r.get(4)?;

        // 1) Unknown kind: excluded from every total
        let parsed_kind = kind.as_deref().and_then(|k| k.parse::<Kind>().ok());
        if parsed_kind.is_none() {
            issues.push((
                "unknown_kind".into(),
                id.clone(),
                kind.unwrap_or_else(|| "(missing)".into()),
            ));
        }

        // 2) Expense with unknown category: reported under 'other'
        if parsed_kind == Some(Kind::Expense)
            && category
                .as_deref()
                .and_then(|c| c.parse::<Category>().ok())
                .is_none()
        {
            issues.push((
                "unknown_category".into(),
                id.clone(),
                category.unwrap_or_else(|| "(missing)".into()),
            ));
        }

        // 3) Undated: left out of daily and monthly views
        if occurred_at
            .as_deref()
            .and_then(parse_stored_datetime)
            .is_none()
        {
            issues.push((
                "bad_date".into(),
                id.clone(),
                occurred_at.unwrap_or_else(|| "(missing)".into()),
            ));
        }

        // 4) Amounts must be positive
        match amount.trim().parse::<Decimal>() {
            Ok(a) if a > Decimal::ZERO => {}
            _ => issues.push(("non_positive_amount".into(), id.clone(), amount)),
        }
    }
    Ok(issues)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let rows: Vec<Vec<String>> = find_issues(conn)?
        .into_iter()
        .map(|(issue, id, detail)| vec![issue, id, detail])
        .collect();
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Transaction", "Detail"], rows));
    }
    Ok(())
}
