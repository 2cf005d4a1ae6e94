// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Display-ready shapes derived from an [`AggregateResult`].

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::aggregate::{AggregateResult, DayStat, KindTotals, MonthStat, saturating_add};
use crate::models::{Category, Kind, Transaction};
use crate::utils::{month_end, month_start};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub label: &'static str,
    pub color: &'static str,
    pub amount: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub has_activity: bool,
    pub sign: Option<Sign>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
    pub count: u64,
    pub cell: CalendarCell,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    /// Empty cells before day 1 in a Sunday-first week grid.
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindBar {
    pub kind: Kind,
    pub label: &'static str,
    pub amount: Decimal,
}

/// Non-zero expense categories, largest first, with their share of
/// `total_expense`. Shares are truncated to two decimals so they never add
/// up to more than 100.
pub fn category_breakdown(
    totals_by_category: &BTreeMap<Category, Decimal>,
    total_expense: Decimal,
) -> Vec<CategoryShare> {
    if total_expense <= Decimal::ZERO {
        return Vec::new();
    }
    let mut shares: Vec<CategoryShare> = Category::ALL
        .into_iter()
        .filter_map(|category| {
            let amount = totals_by_category.get(&category).copied()?;
            if amount <= Decimal::ZERO {
                return None;
            }
            let percentage = share_percent(amount, total_expense)
                .round_dp_with_strategy(2, RoundingStrategy::ToZero)
                .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
            Some(CategoryShare {
                category,
                label: category.label(),
                color: category.color(),
                amount,
                percentage,
            })
        })
        .collect();
    // stable: ties keep declaration order
    shares.sort_by(|a, b| b.amount.cmp(&a.amount));
    shares
}

// Multiplies first for exact results; divides first when `amount * 100`
// would overflow.
fn share_percent(amount: Decimal, total: Decimal) -> Decimal {
    let percent = match amount.checked_mul(Decimal::ONE_HUNDRED) {
        Some(scaled) => scaled.checked_div(total),
        None => amount
            .checked_div(total)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED)),
    };
    percent.unwrap_or(Decimal::ONE_HUNDRED)
}

pub fn calendar_cell(day: &DayStat) -> CalendarCell {
    let has_activity = day.count > 0;
    let sign = if day.balance > Decimal::ZERO {
        Some(Sign::Positive)
    } else if day.balance < Decimal::ZERO {
        Some(Sign::Negative)
    } else if has_activity {
        Some(Sign::Neutral)
    } else {
        None
    };
    CalendarCell { has_activity, sign }
}

pub fn month_series(by_month: &[MonthStat]) -> &[MonthStat] {
    by_month
}

/// One cell per day of `year-month`, days without records included.
pub fn calendar_month(result: &AggregateResult, year: i32, month: u32) -> Option<CalendarMonth> {
    let first = month_start(year, month)?;
    let last = month_end(year, month)?;
    let days = first
        .iter_days()
        .take_while(|d| *d <= last)
        .map(|date| {
            let stat = result.by_day.get(&date).copied().unwrap_or_default();
            CalendarDay {
                date,
                income: stat.income,
                expense: stat.expense,
                balance: stat.balance,
                count: stat.count,
                cell: calendar_cell(&stat),
            }
        })
        .collect();
    Some(CalendarMonth {
        year,
        month,
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
    })
}

/// Records attributed to `date` with that day's income and expense.
pub fn day_summary(transactions: &[Transaction], date: NaiveDate) -> DaySummary {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    let mut on_day = Vec::new();
    for t in transactions {
        if t.occurred_at.map(|at| at.date()) != Some(date) {
            continue;
        }
        match t.kind {
            Some(Kind::Income) => income = saturating_add(income, t.amount),
            Some(Kind::Expense) => expense = saturating_add(expense, t.amount),
            _ => {}
        }
        on_day.push(t.clone());
    }
    DaySummary {
        date,
        income,
        expense,
        transactions: on_day,
    }
}

/// Income, expense, saving and debt bars in that order.
pub fn kind_series(totals: &KindTotals) -> Vec<KindBar> {
    Kind::ALL
        .into_iter()
        .map(|kind| KindBar {
            kind,
            label: kind.label(),
            amount: totals.get(kind),
        })
        .collect()
}
