// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

pub const DEFAULT_OWNER: &str = "local";

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s.trim()))
}

/// Accepts `YYYY-MM-DD` (midnight) or `YYYY-MM-DDTHH:MM[:SS]`.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    parse_stored_datetime(s).with_context(|| {
        format!(
            "Invalid date '{}', expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS",
            s.trim()
        )
    })
}

/// Lenient parser for dates read back from storage. RFC 3339 values with an
/// offset are converted to naive local time.
pub fn parse_stored_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Validates a month and returns it in canonical `YYYY-MM` form.
pub fn parse_month(s: &str) -> Result<String> {
    let s = s.trim();
    let first = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(format!("{:04}-{:02}", first.year(), first.month()))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s.trim()))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
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

// Current owner settings
pub fn get_owner(conn: &Connection) -> Result<String> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key='owner'", [], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v.unwrap_or_else(|| DEFAULT_OWNER.to_string()))
}

pub fn set_owner(conn: &Connection, owner: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('owner', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![owner],
    )?;
    Ok(())
}

pub fn month_start(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let last_day = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, last_day)
}

/// Splits a validated `YYYY-MM` string into its parts.
pub fn month_parts(month: &str) -> Result<(i32, u32)> {
    let (y, m) = month
        .trim()
        .split_once('-')
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", month.trim()))?;
    let year: i32 = y
        .parse()
        .with_context(|| format!("Invalid year in '{}'", month.trim()))?;
    let mon: u32 = m
        .parse()
        .with_context(|| format!("Invalid month in '{}'", month.trim()))?;
    if !(1..=12).contains(&mon) {
        return Err(anyhow::anyhow!("Invalid month number {}", mon));
    }
    Ok((year, mon))
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
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
