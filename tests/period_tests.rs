// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use walletlens::error::ValidationError;
use walletlens::models::{Kind, Transaction};
use walletlens::period::{PeriodSelector, filter};

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn tx(id: &str, when: Option<&str>) -> Transaction {
    Transaction {
        id: id.into(),
        owner: "u1".into(),
        kind: Some(Kind::Expense),
        category: None,
        amount: Decimal::ONE,
        description: id.into(),
        occurred_at: when.map(at),
        created_at: String::new(),
        updated_at: String::new(),
    }
}

fn ids(v: &[Transaction]) -> Vec<&str> {
    v.iter().map(|t| t.id.as_str()).collect()
}

fn sample() -> Vec<Transaction> {
    vec![
        tx("dec-first", Some("2023-12-01 00:00:00")),
        tx("dec-last", Some("2023-12-31 23:59:59")),
        tx("jan-first", Some("2024-01-01 00:00:00")),
        tx("jan-mid", Some("2024-01-15 09:00:00")),
        tx("jan-last", Some("2024-01-31 23:59:59")),
        tx("feb", Some("2024-02-01 00:00:00")),
        tx("undated", None),
    ]
}

#[test]
fn named_month_keeps_only_that_month() {
    let out = filter(
        &sample(),
        &PeriodSelector::NamedMonth {
            year: 2024,
            month: 1,
        },
        at("2024-06-01 10:00:00"),
    );
    assert_eq!(ids(&out), vec!["jan-first", "jan-mid", "jan-last"]);
}

#[test]
fn named_month_handles_leap_february() {
    let input = vec![
        tx("leap", Some("2024-02-29 18:00:00")),
        tx("march", Some("2024-03-01 00:00:00")),
    ];
    let out = filter(
        &input,
        &PeriodSelector::NamedMonth {
            year: 2024,
            month: 2,
        },
        at("2024-06-01 10:00:00"),
    );
    assert_eq!(ids(&out), vec!["leap"]);
}

#[test]
fn impossible_month_keeps_nothing() {
    let out = filter(
        &sample(),
        &PeriodSelector::NamedMonth {
            year: 2024,
            month: 13,
        },
        at("2024-06-01 10:00:00"),
    );
    assert!(out.is_empty());
}

#[test]
fn current_month_is_bounded_by_reference() {
    let out = filter(
        &sample(),
        &PeriodSelector::CurrentMonth,
        at("2024-01-15 09:00:00"),
    );
    assert_eq!(ids(&out), vec!["jan-first", "jan-mid"]);
}

#[test]
fn last_n_months_counts_the_reference_month() {
    let reference = at("2024-02-10 12:00:00");
    let out = filter(&sample(), &PeriodSelector::LastNMonths(2), reference);
    assert_eq!(ids(&out), vec!["jan-first", "jan-mid", "jan-last", "feb"]);

    let one = filter(&sample(), &PeriodSelector::LastNMonths(1), reference);
    assert_eq!(ids(&one), vec!["feb"]);
    let zero = filter(&sample(), &PeriodSelector::LastNMonths(0), reference);
    assert_eq!(ids(&zero), ids(&one));
}

#[test]
fn all_time_is_identity() {
    let input = sample();
    let out = filter(&input, &PeriodSelector::AllTime, at("2024-01-15 09:00:00"));
    assert_eq!(out, input);
}

#[test]
fn empty_input_gives_empty_output() {
    for selector in [
        PeriodSelector::CurrentMonth,
        PeriodSelector::NamedMonth {
            year: 2024,
            month: 1,
        },
        PeriodSelector::LastNMonths(3),
        PeriodSelector::AllTime,
    ] {
        assert!(filter(&[], &selector, at("2024-01-15 09:00:00")).is_empty());
    }
}

#[test]
fn selector_parses_cli_forms() {
    assert_eq!("current".parse::<PeriodSelector>(), Ok(PeriodSelector::CurrentMonth));
    assert_eq!(" ALL ".parse::<PeriodSelector>(), Ok(PeriodSelector::AllTime));
    assert_eq!(
        "2024-01".parse::<PeriodSelector>(),
        Ok(PeriodSelector::NamedMonth {
            year: 2024,
            month: 1
        })
    );
    assert_eq!("last:3".parse::<PeriodSelector>(), Ok(PeriodSelector::LastNMonths(3)));
    assert_eq!("last-12".parse::<PeriodSelector>(), Ok(PeriodSelector::LastNMonths(12)));
    assert_eq!("last6".parse::<PeriodSelector>(), Ok(PeriodSelector::LastNMonths(6)));
    assert_eq!(
        "2024-13".parse::<PeriodSelector>(),
        Err(ValidationError::InvalidPeriod("2024-13".into()))
    );
    assert!("last:x".parse::<PeriodSelector>().is_err());
}

#[test]
fn describe_renders_window() {
    let reference = at("2024-03-20 08:00:00");
    assert_eq!(
        PeriodSelector::NamedMonth {
            year: 2024,
            month: 2
        }
        .describe(reference),
        "2024-02-01..2024-02-29"
    );
    assert_eq!(
        PeriodSelector::CurrentMonth.describe(reference),
        "2024-03-01..2024-03-20"
    );
    assert_eq!(
        PeriodSelector::LastNMonths(3).describe(reference),
        "2024-01-01.."
    );
    assert_eq!(PeriodSelector::AllTime.describe(reference), "all time");
}
