// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate;
use crate::models::{Budget, Category};
use crate::period::PeriodSelector;
use crate::store;
use crate::utils::{
    fmt_money, get_owner, maybe_print_json, month_parts, parse_decimal, parse_month, pretty_table,
};
use anyhow::Result;
use chrono::Datelike;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("status", sub)) => status(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = get_owner(conn)?;
    let month = parse_month(sub.get_one::<String>("month").map(String::as_str).unwrap_or(""))?;
    let category: Category = sub
        .get_one::<String>("category")
        .map(String::as_str)
        .unwrap_or("")
        .parse()?;
    let amount = parse_decimal(sub.get_one::<String>("amount").map(String::as_str).unwrap_or(""))?;
    store::set_budget(
        conn,
        &owner,
        &Budget {
            month: month.clone(),
            category,
            amount,
        },
    )?;
    println!(
        "Budget set for {} / {} = {}",
        month,
        category.label(),
        fmt_money(&amount)
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = get_owner(conn)?;
    let month = match sub.get_one::<String>("month") {
        Some(m) => Some(parse_month(m)?),
        None => None,
    };
    let data: Vec<Vec<String>> = store::list_budgets(conn, &owner, month.as_deref())?
        .into_iter()
        .map(|b| vec![b.month, b.category.label().to_string(), fmt_money(&b.amount)])
        .collect();
    println!("{}", pretty_table(&["Month", "Category", "Budget"], data));
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct BudgetStatus {
    pub category: Category,
    pub budget: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
}

/// Budget versus expense totals for every category that has either.
pub fn budget_status(conn: &Connection, month: &str) -> Result<Vec<BudgetStatus>> {
    let owner = get_owner(conn)?;
    let month = parse_month(month)?;
    let (year, mon) = month_parts(&month)?;
    let budgets = store::list_budgets(conn, &owner, Some(&month))?;
    let snapshot = store::load_transactions(conn, &owner)?;
    let result = aggregate::aggregate_period(
        &snapshot,
        &PeriodSelector::NamedMonth { year, month: mon },
        chrono::Local::now().naive_local(),
    );

    let mut out = Vec::new();
    for category in Category::ALL {
        let budget = budgets
            .iter()
            .find(|b| b.category == category)
            .map(|b| b.amount);
        let spent = result
            .totals_by_category
            .get(&category)
            .copied()
            .unwrap_or(Decimal::ZERO);
        if budget.is_none() && spent.is_zero() {
            continue;
        }
        let budget = budget.unwrap_or(Decimal::ZERO);
        out.push(BudgetStatus {
            category,
            budget,
            spent,
            remaining: aggregate::saturating_sub(budget, spent),
        });
    }
    Ok(out)
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => {
            let today = chrono::Local::now().date_naive();
            format!("{:04}-{:02}", today.year(), today.month())
        }
    };
    let data = budget_status(conn, &month)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|s| {
                vec![
                    s.category.label().to_string(),
                    fmt_money(&s.budget),
                    fmt_money(&s.spent),
                    fmt_money(&s.remaining),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Budget", "Spent", "Remaining"], rows)
        );
    }
    Ok(())
}
