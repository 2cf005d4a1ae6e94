// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde_json::json;
use tempfile::tempdir;
use walletlens::models::{Category, Kind, NewTransaction};
use walletlens::{cli, commands::exporter, db, store, utils};

fn base_conn() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn add(
    conn: &Connection,
    kind: Kind,
    category: Option<Category>,
    amount: &str,
    desc: &str,
    day: &str,
) -> String {
    store::insert_transaction(
        conn,
        utils::DEFAULT_OWNER,
        &NewTransaction {
            kind,
            category,
            amount: Decimal::from_str_exact(amount).unwrap(),
            description: desc.into(),
            occurred_at: NaiveDate::parse_from_str(day, "%Y-%m-%d")
                .unwrap()
                .and_hms_opt(8, 30, 0)
                .unwrap(),
        },
    )
    .unwrap()
}

fn run_export(conn: &Connection, format: &str, out: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from([
        "walletlens",
        "export",
        "transactions",
        "--format",
        format,
        "--out",
        out,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(conn, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_transactions_writes_pretty_json_oldest_first() {
    let conn = base_conn();
    let later = add(&conn, Kind::Income, None, "1000", "Salary", "2025-01-31");
    let earlier = add(
        &conn,
        Kind::Expense,
        Some(Category::Food),
        "12.34",
        "Corner Shop",
        "2025-01-02",
    );

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();
    run_export(&conn, "json", &out_str).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "id": earlier,
                "date": "2025-01-02T08:30:00",
                "kind": "expense",
                "category": "food",
                "amount": "12.34",
                "description": "Corner Shop"
            },
            {
                "id": later,
                "date": "2025-01-31T08:30:00",
                "kind": "income",
                "category": "other",
                "amount": "1000",
                "description": "Salary"
            }
        ])
    );
}

#[test]
fn export_transactions_writes_csv_with_header() {
    let conn = base_conn();
    add(&conn, Kind::Debt, None, "75", "Card, partial", "2025-02-14");

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    let out_str = out_path.to_string_lossy().to_string();
    run_export(&conn, " CSV ", &out_str).unwrap();

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["id", "date", "kind", "category", "amount", "description"]
    );
    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 1);
    assert_eq!(&records[0][2], "debt");
    assert_eq!(&records[0][4], "75");
    assert_eq!(&records[0][5], "Card, partial");
}

#[test]
fn export_transactions_rejects_unknown_format() {
    let conn = base_conn();
    add(&conn, Kind::Income, None, "1", "x", "2025-01-01");
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    let err = run_export(&conn, "xml", &out_str).unwrap_err();
    assert!(err.to_string().contains("Unknown format"));
    assert!(!out_path.exists());
}
