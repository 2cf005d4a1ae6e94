// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use walletlens::aggregate::{AggregateResult, DayStat, aggregate};
use walletlens::models::{Category, Kind, Transaction};

fn dec(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tx(
    kind: Option<Kind>,
    category: Option<Category>,
    amount: &str,
    day: Option<&str>,
) -> Transaction {
    Transaction {
        id: format!("{:?}-{}-{:?}", kind, amount, day),
        owner: "u1".into(),
        kind,
        category,
        amount: dec(amount),
        description: "t".into(),
        occurred_at: day.map(|d| date(d).and_hms_opt(12, 30, 0).unwrap()),
        created_at: String::new(),
        updated_at: String::new(),
    }
}

fn scenario() -> Vec<Transaction> {
    vec![
        tx(Some(Kind::Income), Some(Category::Salary), "1000", Some("2024-01-05")),
        tx(Some(Kind::Expense), Some(Category::Food), "200", Some("2024-01-05")),
        tx(Some(Kind::Expense), Some(Category::Transport), "100", Some("2024-01-10")),
    ]
}

fn mixed() -> Vec<Transaction> {
    vec![
        tx(Some(Kind::Income), Some(Category::Other), "2500.50", Some("2023-12-28")),
        tx(Some(Kind::Expense), Some(Category::Food), "12.30", Some("2023-12-28")),
        tx(Some(Kind::Saving), Some(Category::Other), "300", Some("2024-01-02")),
        tx(Some(Kind::Debt), Some(Category::Other), "150", Some("2024-01-02")),
        tx(Some(Kind::Expense), Some(Category::Health), "45.99", Some("2024-01-15")),
        tx(Some(Kind::Expense), None, "9.01", Some("2024-02-01")),
        tx(None, None, "77", Some("2024-02-01")),
        tx(Some(Kind::Expense), Some(Category::Shopping), "60", None),
        tx(Some(Kind::Income), Some(Category::Salary), "1200", Some("2024-02-20")),
    ]
}

#[test]
fn three_transaction_scenario() {
    let r = aggregate(&scenario());
    assert_eq!(r.totals_by_kind.income, dec("1000"));
    assert_eq!(r.totals_by_kind.expense, dec("300"));
    assert_eq!(r.balance, dec("700"));
    assert_eq!(r.totals_by_category[&Category::Food], dec("200"));
    assert_eq!(r.totals_by_category[&Category::Transport], dec("100"));
    assert_eq!(
        r.by_day[&date("2024-01-05")],
        DayStat {
            income: dec("1000"),
            expense: dec("200"),
            balance: dec("800"),
            count: 2
        }
    );
    assert_eq!(
        r.by_day[&date("2024-01-10")],
        DayStat {
            income: Decimal::ZERO,
            expense: dec("100"),
            balance: dec("-100"),
            count: 1
        }
    );
    assert_eq!(r.by_month.len(), 1);
    assert_eq!(r.by_month[0].label, "Jan 24");
    assert_eq!(r.by_month[0].income, dec("1000"));
    assert_eq!(r.by_month[0].expense, dec("300"));
}

#[test]
fn empty_input_has_zero_totals_and_all_categories() {
    let r = aggregate(&[]);
    assert_eq!(r, AggregateResult::empty());
    assert_eq!(r.totals_by_category.len(), Category::ALL.len());
    for cat in Category::ALL {
        assert_eq!(r.totals_by_category[&cat], Decimal::ZERO);
    }
    for kind in Kind::ALL {
        assert_eq!(r.totals_by_kind.get(kind), Decimal::ZERO);
    }
    assert!(r.by_day.is_empty());
    assert!(r.by_month.is_empty());
    assert_eq!(r.balance, Decimal::ZERO);
}

#[test]
fn aggregate_is_idempotent() {
    let input = mixed();
    assert_eq!(aggregate(&input), aggregate(&input));
}

#[test]
fn balance_identity_holds() {
    let r = aggregate(&mixed());
    let k = r.totals_by_kind;
    assert_eq!(r.balance, k.income - k.expense - k.saving - k.debt);
    assert_eq!(
        r.balance,
        dec("2500.50") + dec("1200")
            - dec("12.30")
            - dec("45.99")
            - dec("9.01")
            - dec("60")
            - dec("300")
            - dec("150")
    );
}

#[test]
fn merge_of_any_split_equals_whole() {
    let input = mixed();
    let whole = aggregate(&input);
    for split in 0..=input.len() {
        let (a, b) = input.split_at(split);
        assert_eq!(aggregate(a).merge(aggregate(b)), whole, "split at {}", split);
        assert_eq!(aggregate(b).merge(aggregate(a)), whole, "reversed split at {}", split);
    }
    // order does not matter either
    let mut reversed = input.clone();
    reversed.reverse();
    assert_eq!(aggregate(&reversed), whole);
}

#[test]
fn merge_with_empty_is_identity() {
    let r = aggregate(&mixed());
    assert_eq!(r.clone().merge(AggregateResult::empty()), r);
}

#[test]
fn unknown_kind_only_counts_towards_day() {
    let input = vec![tx(None, Some(Category::Food), "50", Some("2024-03-01"))];
    let r = aggregate(&input);
    assert_eq!(r.totals_by_kind, Default::default());
    assert!(r.totals_by_category.values().all(|v| v.is_zero()));
    let day = r.by_day[&date("2024-03-01")];
    assert_eq!(day.count, 1);
    assert_eq!(day.balance, Decimal::ZERO);
    assert_eq!(r.by_month.len(), 1);
    assert_eq!(r.by_month[0].income, Decimal::ZERO);
}

#[test]
fn expense_without_category_is_other() {
    let r = aggregate(&[tx(Some(Kind::Expense), None, "9.50", Some("2024-03-01"))]);
    assert_eq!(r.totals_by_category[&Category::Other], dec("9.50"));
}

#[test]
fn non_expense_category_is_ignored_in_category_totals() {
    let r = aggregate(&[tx(Some(Kind::Income), Some(Category::Salary), "10", Some("2024-03-01"))]);
    assert_eq!(r.totals_by_category[&Category::Salary], Decimal::ZERO);
}

#[test]
fn undated_records_skip_day_and_month_grouping() {
    let r = aggregate(&[tx(Some(Kind::Expense), Some(Category::Shopping), "60", None)]);
    assert_eq!(r.totals_by_kind.expense, dec("60"));
    assert_eq!(r.totals_by_category[&Category::Shopping], dec("60"));
    assert!(r.by_day.is_empty());
    assert!(r.by_month.is_empty());
}

#[test]
fn saving_and_debt_stay_out_of_daily_balance() {
    let r = aggregate(&[
        tx(Some(Kind::Saving), None, "300", Some("2024-01-02")),
        tx(Some(Kind::Debt), None, "150", Some("2024-01-02")),
    ]);
    let day = r.by_day[&date("2024-01-02")];
    assert_eq!(day.count, 2);
    assert_eq!(day.balance, Decimal::ZERO);
    assert_eq!(r.balance, dec("-450"));
}

#[test]
fn months_are_sorted_ascending_with_labels() {
    let r = aggregate(&mixed());
    let labels: Vec<&str> = r.by_month.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, vec!["Dec 23", "Jan 24", "Feb 24"]);
    assert_eq!(r.by_month[0].income, dec("2500.50"));
    assert_eq!(r.by_month[2].expense, dec("9.01"));
}

#[test]
fn huge_amounts_clamp_instead_of_overflowing() {
    let mut a = tx(Some(Kind::Expense), Some(Category::Food), "1", Some("2024-03-01"));
    a.amount = Decimal::MAX;
    let mut b = a.clone();
    b.id = "second".into();
    let r = aggregate(&[a, b]);
    assert_eq!(r.totals_by_kind.expense, Decimal::MAX);
    assert_eq!(r.totals_by_category[&Category::Food], Decimal::MAX);
    assert_eq!(r.balance, Decimal::MIN);
    let day = r.by_day[&date("2024-03-01")];
    assert_eq!(day.expense, Decimal::MAX);
    assert_eq!(day.balance, Decimal::MIN);
    assert_eq!(day.count, 2);
    assert_eq!(r.by_month[0].expense, Decimal::MAX);
}
