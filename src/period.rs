// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Narrowing a transaction snapshot to a reporting window.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::Transaction;
use crate::utils::{month_end, month_start};

/// A requested time window over which to aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodSelector {
    CurrentMonth,
    NamedMonth { year: i32, month: u32 },
    LastNMonths(u32),
    AllTime,
}

impl PeriodSelector {
    /// Whether `at` falls inside the window anchored at `reference`.
    pub fn contains(&self, at: NaiveDateTime, reference: NaiveDateTime) -> bool {
        match *self {
            PeriodSelector::CurrentMonth => {
                let start = first_of_month(reference.date()).and_time(NaiveTime::MIN);
                at >= start && at <= reference
            }
            PeriodSelector::NamedMonth { year, month } => {
                match (month_start(year, month), month_end(year, month)) {
                    (Some(first), Some(last)) => at.date() >= first && at.date() <= last,
                    _ => false,
                }
            }
            PeriodSelector::LastNMonths(n) => match last_n_start(reference.date(), n) {
                Some(start) => at.date() >= start,
                None => true,
            },
            PeriodSelector::AllTime => true,
        }
    }

    /// Human readable inclusive window, e.g. `2024-01-01..2024-01-31`.
    pub fn describe(&self, reference: NaiveDateTime) -> String {
        match *self {
            PeriodSelector::CurrentMonth => {
                format!("{}..{}", first_of_month(reference.date()), reference.date())
            }
            PeriodSelector::NamedMonth { year, month } => {
                match (month_start(year, month), month_end(year, month)) {
                    (Some(first), Some(last)) => format!("{}..{}", first, last),
                    _ => format!("invalid month {:04}-{:02}", year, month),
                }
            }
            PeriodSelector::LastNMonths(n) => match last_n_start(reference.date(), n) {
                Some(start) => format!("{}..", start),
                None => "all time".to_string(),
            },
            PeriodSelector::AllTime => "all time".to_string(),
        }
    }
}

impl fmt::Display for PeriodSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodSelector::CurrentMonth => f.write_str("current"),
            PeriodSelector::NamedMonth { year, month } => write!(f, "{:04}-{:02}", year, month),
            PeriodSelector::LastNMonths(n) => write!(f, "last:{}", n),
            PeriodSelector::AllTime => f.write_str("all"),
        }
    }
}

impl FromStr for PeriodSelector {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let lower = raw.to_lowercase();
        match lower.as_str() {
            "current" | "this-month" => return Ok(PeriodSelector::CurrentMonth),
            "all" | "all-time" => return Ok(PeriodSelector::AllTime),
            _ => {}
        }
        if let Some(rest) = lower.strip_prefix("last") {
            let digits = rest.trim_start_matches([':', '-']);
            return digits
                .parse::<u32>()
                .map(PeriodSelector::LastNMonths)
                .map_err(|_| ValidationError::InvalidPeriod(raw.to_string()));
        }
        let first = NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidPeriod(raw.to_string()))?;
        Ok(PeriodSelector::NamedMonth {
            year: first.year(),
            month: first.month(),
        })
    }
}

/// Returns the transactions whose `occurred_at` lies in the selected window.
///
/// `AllTime` returns the input unchanged. Bounded selectors skip records
/// without a usable date. Input order is preserved.
pub fn filter(
    transactions: &[Transaction],
    selector: &PeriodSelector,
    reference: NaiveDateTime,
) -> Vec<Transaction> {
    if *selector == PeriodSelector::AllTime {
        return transactions.to_vec();
    }
    let kept: Vec<Transaction> = transactions
        .iter()
        .filter(|t| {
            t.occurred_at
                .is_some_and(|at| selector.contains(at, reference))
        })
        .cloned()
        .collect();
    tracing::debug!(
        period = %selector,
        total = transactions.len(),
        kept = kept.len(),
        "filtered transactions"
    );
    kept
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

// n == 0 behaves like n == 1. None means the start underflowed chrono's range.
fn last_n_start(reference: NaiveDate, n: u32) -> Option<NaiveDate> {
    first_of_month(reference).checked_sub_months(Months::new(n.max(1) - 1))
}
