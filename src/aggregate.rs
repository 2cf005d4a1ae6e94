// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Folding a transaction snapshot into report totals.
//!
//! Everything here is a pure function of its input. Sums are kept per key,
//! so results computed over disjoint shards can be combined with
//! [`AggregateResult::merge`] and match a single pass over the union.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Category, Kind, Transaction};
use crate::period::{self, PeriodSelector};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindTotals {
    pub income: Decimal,
    pub expense: Decimal,
    pub saving: Decimal,
    pub debt: Decimal,
}

impl KindTotals {
    pub fn add(&mut self, kind: Kind, amount: Decimal) {
        match kind {
            Kind::Income => accumulate(&mut self.income, amount),
            Kind::Expense => accumulate(&mut self.expense, amount),
            Kind::Saving => accumulate(&mut self.saving, amount),
            Kind::Debt => accumulate(&mut self.debt, amount),
        }
    }

    pub fn get(&self, kind: Kind) -> Decimal {
        match kind {
            Kind::Income => self.income,
            Kind::Expense => self.expense,
            Kind::Saving => self.saving,
            Kind::Debt => self.debt,
        }
    }

    /// Income minus every outflow kind.
    pub fn balance(&self) -> Decimal {
        [self.expense, self.saving, self.debt]
            .into_iter()
            .fold(self.income, saturating_sub)
    }

    fn merge(&mut self, other: &KindTotals) {
        for kind in Kind::ALL {
            self.add(kind, other.get(kind));
        }
    }
}

/// Cash flow of a single calendar day. Saving and debt are not part of the
/// daily balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStat {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
    pub count: u64,
}

impl DayStat {
    fn record(&mut self, kind: Option<Kind>, amount: Decimal) {
        match kind {
            Some(Kind::Income) => {
                accumulate(&mut self.income, amount);
                accumulate(&mut self.balance, amount);
            }
            Some(Kind::Expense) => {
                accumulate(&mut self.expense, amount);
                self.balance = saturating_sub(self.balance, amount);
            }
            Some(Kind::Saving) | Some(Kind::Debt) | None => {}
        }
        self.count += 1;
    }

    fn merge(&mut self, other: &DayStat) {
        accumulate(&mut self.income, other.income);
        accumulate(&mut self.expense, other.expense);
        accumulate(&mut self.balance, other.balance);
        self.count = self.count.saturating_add(other.count);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthStat {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub totals_by_kind: KindTotals,
    pub totals_by_category: BTreeMap<Category, Decimal>,
    pub balance: Decimal,
    pub by_day: BTreeMap<NaiveDate, DayStat>,
    pub by_month: Vec<MonthStat>,
}

type MonthBuckets = BTreeMap<(i32, u32), (Decimal, Decimal)>;

impl AggregateResult {
    /// Result of aggregating nothing. Identity element of [`merge`](Self::merge).
    pub fn empty() -> Self {
        AggregateResult {
            totals_by_kind: KindTotals::default(),
            totals_by_category: zeroed_categories(),
            balance: Decimal::ZERO,
            by_day: BTreeMap::new(),
            by_month: Vec::new(),
        }
    }

    /// Sums every per-key total of two results.
    pub fn merge(self, other: AggregateResult) -> AggregateResult {
        let mut totals_by_kind = self.totals_by_kind;
        totals_by_kind.merge(&other.totals_by_kind);

        let mut totals_by_category = self.totals_by_category;
        for (cat, amount) in other.totals_by_category {
            accumulate(totals_by_category.entry(cat).or_insert(Decimal::ZERO), amount);
        }

        let mut by_day = self.by_day;
        for (date, stat) in other.by_day {
            by_day.entry(date).or_default().merge(&stat);
        }

        let mut months = MonthBuckets::new();
        for m in self.by_month.into_iter().chain(other.by_month) {
            let entry = months
                .entry((m.year, m.month))
                .or_insert((Decimal::ZERO, Decimal::ZERO));
            accumulate(&mut entry.0, m.income);
            accumulate(&mut entry.1, m.expense);
        }

        AggregateResult {
            balance: totals_by_kind.balance(),
            totals_by_kind,
            totals_by_category,
            by_day,
            by_month: month_series_from(months),
        }
    }

    pub fn total_expense(&self) -> Decimal {
        self.totals_by_kind.expense
    }
}

/// Folds `transactions` into kind, category, daily and monthly totals.
///
/// Records with an unknown kind add nothing to any total but still count
/// towards their day's `count`. Expenses with an unknown category are filed
/// under [`Category::Other`]. Records without a date contribute to the kind
/// and category totals only.
pub fn aggregate(transactions: &[Transaction]) -> AggregateResult {
    let mut totals_by_kind = KindTotals::default();
    let mut totals_by_category = zeroed_categories();
    let mut by_day: BTreeMap<NaiveDate, DayStat> = BTreeMap::new();
    let mut months = MonthBuckets::new();
    let mut unknown_kind = 0usize;
    let mut undated = 0usize;

    for t in transactions {
        match t.kind {
            Some(kind) => {
                totals_by_kind.add(kind, t.amount);
                if kind == Kind::Expense {
                    let cat = t.category.unwrap_or(Category::Other);
                    accumulate(totals_by_category.entry(cat).or_insert(Decimal::ZERO), t.amount);
                }
            }
            None => unknown_kind += 1,
        }

        let Some(at) = t.occurred_at else {
            undated += 1;
            continue;
        };
        by_day.entry(at.date()).or_default().record(t.kind, t.amount);

        let entry = months
            .entry((at.year(), at.month()))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match t.kind {
            Some(Kind::Income) => accumulate(&mut entry.0, t.amount),
            Some(Kind::Expense) => accumulate(&mut entry.1, t.amount),
            Some(Kind::Saving) | Some(Kind::Debt) | None => {}
        }
    }

    if unknown_kind > 0 || undated > 0 {
        tracing::debug!(unknown_kind, undated, "aggregated records with missing fields");
    }

    AggregateResult {
        balance: totals_by_kind.balance(),
        totals_by_kind,
        totals_by_category,
        by_day,
        by_month: month_series_from(months),
    }
}

/// `aggregate(filter(transactions, selector, reference))`.
pub fn aggregate_period(
    transactions: &[Transaction],
    selector: &PeriodSelector,
    reference: NaiveDateTime,
) -> AggregateResult {
    aggregate(&period::filter(transactions, selector, reference))
}

/// Short chart label for a month, e.g. `Jan 24`.
pub fn month_label(year: i32, month: u32) -> String {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d.format("%b %y").to_string(),
        None => format!("{:04}-{:02}", year, month),
    }
}

/// `a + b`, pinned to `Decimal::MAX` / `Decimal::MIN` instead of overflowing.
pub fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or_else(|| {
        tracing::warn!(%a, %b, "decimal overflow, total clamped");
        if b.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}

/// `a - b`, pinned to `Decimal::MAX` / `Decimal::MIN` instead of overflowing.
pub fn saturating_sub(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b).unwrap_or_else(|| {
        tracing::warn!(%a, %b, "decimal overflow, total clamped");
        if b.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

fn accumulate(total: &mut Decimal, amount: Decimal) {
    *total = saturating_add(*total, amount);
}

fn zeroed_categories() -> BTreeMap<Category, Decimal> {
    Category::ALL
        .into_iter()
        .map(|c| (c, Decimal::ZERO))
        .collect()
}

fn month_series_from(months: MonthBuckets) -> Vec<MonthStat> {
    months
        .into_iter()
        .map(|((year, month), (income, expense))| MonthStat {
            year,
            month,
            label: month_label(year, month),
            income,
            expense,
        })
        .collect()
}
