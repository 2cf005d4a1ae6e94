// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{self, KindTotals, MonthStat};
use crate::period::PeriodSelector;
use crate::presentation::{self, CalendarMonth, CategoryShare, DaySummary, KindBar, Sign};
use crate::store;
use crate::utils::{
    fmt_money, get_owner, maybe_print_json, month_parts, parse_date, parse_month, pretty_table,
};
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("categories", sub)) => categories(conn, sub)?,
        Some(("calendar", sub)) => calendar(conn, sub)?,
        Some(("day", sub)) => day(conn, sub)?,
        Some(("trend", sub)) => trend(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

fn selector_arg(sub: &clap::ArgMatches) -> Result<PeriodSelector> {
    let raw = sub
        .get_one::<String>("period")
        .map(|s| s.trim())
        .unwrap_or("current");
    Ok(raw.parse::<PeriodSelector>()?)
}

#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub period: String,
    pub window: String,
    pub totals: KindTotals,
    pub balance: Decimal,
    pub kinds: Vec<KindBar>,
    pub categories: Vec<CategoryShare>,
}

pub fn summary_report(
    conn: &Connection,
    selector: &PeriodSelector,
    reference: NaiveDateTime,
) -> Result<SummaryReport> {
    let owner = get_owner(conn)?;
    let snapshot = store::load_transactions(conn, &owner)?;
    let result = aggregate::aggregate_period(&snapshot, selector, reference);
    Ok(SummaryReport {
        period: selector.to_string(),
        window: selector.describe(reference),
        totals: result.totals_by_kind,
        balance: result.balance,
        kinds: presentation::kind_series(&result.totals_by_kind),
        categories: presentation::category_breakdown(
            &result.totals_by_category,
            result.total_expense(),
        ),
    })
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let selector = selector_arg(sub)?;
    let report = summary_report(conn, &selector, now())?;
    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }
    println!("Period: {} ({})", report.period, report.window);
    let mut rows: Vec<Vec<String>> = report
        .kinds
        .iter()
        .map(|k| vec![k.label.to_string(), fmt_money(&k.amount)])
        .collect();
    rows.push(vec!["Balance".into(), fmt_money(&report.balance)]);
    println!("{}", pretty_table(&["", "Amount"], rows));
    if !report.categories.is_empty() {
        println!("{}", category_table(&report.categories));
    }
    Ok(())
}

fn category_table(shares: &[CategoryShare]) -> comfy_table::Table {
    let rows = shares
        .iter()
        .map(|s| {
            vec![
                s.label.to_string(),
                fmt_money(&s.amount),
                format!("{:.2}%", s.percentage),
            ]
        })
        .collect();
    pretty_table(&["Category", "Spent", "Share"], rows)
}

pub fn category_report(
    conn: &Connection,
    selector: &PeriodSelector,
    reference: NaiveDateTime,
) -> Result<Vec<CategoryShare>> {
    let owner = get_owner(conn)?;
    let snapshot = store::load_transactions(conn, &owner)?;
    let result = aggregate::aggregate_period(&snapshot, selector, reference);
    Ok(presentation::category_breakdown(
        &result.totals_by_category,
        result.total_expense(),
    ))
}

fn categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let selector = selector_arg(sub)?;
    let data = category_report(conn, &selector, now())?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No expenses in {}", selector);
        } else {
            println!("{}", category_table(&data));
        }
    }
    Ok(())
}

pub fn calendar_report(conn: &Connection, year: i32, month: u32) -> Result<CalendarMonth> {
    let owner = get_owner(conn)?;
    let snapshot = store::load_transactions(conn, &owner)?;
    let selector = PeriodSelector::NamedMonth { year, month };
    let result = aggregate::aggregate_period(&snapshot, &selector, now());
    presentation::calendar_month(&result, year, month)
        .with_context(|| format!("Invalid month {:04}-{:02}", year, month))
}

fn calendar(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (year, month) = match sub.get_one::<String>("month") {
        Some(m) => month_parts(&parse_month(m)?)?,
        None => {
            let today = now().date();
            (today.year(), today.month())
        }
    };
    let cal = calendar_report(conn, year, month)?;
    if maybe_print_json(json_flag, jsonl_flag, &cal)? {
        return Ok(());
    }
    let rows = cal
        .days
        .iter()
        .filter(|d| d.cell.has_activity)
        .map(|d| {
            let marker = match d.cell.sign {
                Some(Sign::Positive) => "+",
                Some(Sign::Negative) => "-",
                Some(Sign::Neutral) => "=",
                None => "",
            };
            vec![
                d.date.to_string(),
                d.date.format("%a").to_string(),
                fmt_money(&d.income),
                fmt_money(&d.expense),
                format!("{} {}", marker, fmt_money(&d.balance)),
                d.count.to_string(),
            ]
        })
        .collect();
    println!("{:04}-{:02}", cal.year, cal.month);
    println!(
        "{}",
        pretty_table(
            &["Date", "Day", "Income", "Expense", "Balance", "Count"],
            rows
        )
    );
    Ok(())
}

pub fn day_report(conn: &Connection, date: NaiveDate) -> Result<DaySummary> {
    let owner = get_owner(conn)?;
    let snapshot = store::load_transactions(conn, &owner)?;
    Ok(presentation::day_summary(&snapshot, date))
}

fn day(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let date = parse_date(sub.get_one::<String>("date").map(String::as_str).unwrap_or(""))?;
    let summary = day_report(conn, date)?;
    if maybe_print_json(json_flag, jsonl_flag, &summary)? {
        return Ok(());
    }
    println!(
        "{}: income {} / expense {}",
        summary.date,
        fmt_money(&summary.income),
        fmt_money(&summary.expense)
    );
    if summary.transactions.is_empty() {
        println!("No transactions on this day.");
        return Ok(());
    }
    let rows = summary
        .transactions
        .iter()
        .map(|t| {
            vec![
                t.kind.map(|k| k.to_string()).unwrap_or_default(),
                t.category.map(|c| c.label().to_string()).unwrap_or_default(),
                fmt_money(&t.amount),
                t.description.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Kind", "Category", "Amount", "Description"], rows)
    );
    Ok(())
}

pub fn trend_report(
    conn: &Connection,
    months: u32,
    reference: NaiveDateTime,
) -> Result<Vec<MonthStat>> {
    let owner = get_owner(conn)?;
    let snapshot = store::load_transactions(conn, &owner)?;
    let result =
        aggregate::aggregate_period(&snapshot, &PeriodSelector::LastNMonths(months), reference);
    Ok(presentation::month_series(&result.by_month).to_vec())
}

fn trend(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let months: u32 = *sub.get_one::<u32>("months").unwrap_or(&6);
    let data = trend_report(conn, months, now())?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|m| {
                vec![
                    m.label.clone(),
                    fmt_money(&m.income),
                    fmt_money(&m.expense),
                    fmt_money(&aggregate::saturating_sub(m.income, m.expense)),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expense", "Net"], rows)
        );
    }
    Ok(())
}
