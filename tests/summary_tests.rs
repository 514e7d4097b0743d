// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pfc::models::{FinancialBook, LineItem, Section};
use pfc::summary::{
    Period, compute_category_totals, compute_category_totals_in, compute_summary,
    compute_summary_in,
};
use rust_decimal::Decimal;

fn d(v: i64) -> Decimal {
    Decimal::from(v)
}

fn day(y: i32, m: u32, dd: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, dd).unwrap()
}

#[test]
fn empty_book_sums_to_zero() {
    let s = compute_summary(&FinancialBook::new(1));
    assert_eq!(s.income, Decimal::ZERO);
    assert_eq!(s.expense, Decimal::ZERO);
    assert_eq!(s.remaining, Decimal::ZERO);
    assert_eq!(s.etc, Decimal::ZERO);
}

#[test]
fn remaining_is_floored_at_zero() {
    let mut book = FinancialBook::new(1);
    book.push(LineItem::new(Section::Income, "Salary", d(1000)));
    book.push(LineItem::new(Section::Expense, "Rent", d(900)));
    book.push(LineItem::new(Section::Expense, "Car", d(600)));
    book.etc = d(40);

    let s = compute_summary(&book);
    assert_eq!(s.income, d(1000));
    assert_eq!(s.expense, d(1500));
    assert_eq!(s.remaining, Decimal::ZERO);
    assert_eq!(s.etc, d(40));
}

#[test]
fn remaining_is_income_minus_expense_when_positive() {
    let mut book = FinancialBook::new(1);
    book.push(LineItem::new(Section::Income, "Salary", "2500.50".parse().unwrap()));
    book.push(LineItem::new(Section::Expense, "Rent", "1200.25".parse().unwrap()));
    let s = compute_summary(&book);
    assert_eq!(s.remaining, "1300.25".parse::<Decimal>().unwrap());
}

#[test]
fn blank_category_rows_are_ignored() {
    let mut book = FinancialBook::new(1);
    book.push(LineItem::new(Section::Income, "Salary", d(100)));
    book.push(LineItem::new(Section::Income, "   ", d(999)));
    assert_eq!(compute_summary(&book).income, d(100));
}

#[test]
fn oversized_totals_cap_at_decimal_max() {
    let mut book = FinancialBook::new(1);
    book.push(LineItem::new(Section::Income, "Salary", Decimal::MAX));
    book.push(LineItem::new(Section::Income, "Bonus", Decimal::MAX));
    book.push(LineItem::new(Section::Expense, "Rent", d(10)));
    let s = compute_summary(&book);
    assert_eq!(s.income, Decimal::MAX);
    assert_eq!(s.remaining, Decimal::MAX - d(10));

    let items = vec![
        LineItem::new(Section::Asset, "A", Decimal::MAX),
        LineItem::new(Section::Asset, "A", Decimal::ONE),
        LineItem::new(Section::Asset, "B", d(5)),
    ];
    let totals = compute_category_totals(&items);
    assert_eq!(totals.get("A"), Some(Decimal::MAX));
    assert_eq!(totals.get("B"), Some(d(5)));
}

#[test]
fn category_totals_drop_zero_groups() {
    let items = vec![
        LineItem::new(Section::Asset, "A", d(10)),
        LineItem::new(Section::Asset, "A", d(5)),
        LineItem::new(Section::Asset, "B", d(0)),
    ];
    let totals = compute_category_totals(&items);
    assert_eq!(totals.len(), 1);
    assert_eq!(totals.get("A"), Some(d(15)));
    assert_eq!(totals.get("B"), None);
}

#[test]
fn category_match_is_trimmed_and_case_sensitive() {
    let items = vec![
        LineItem::new(Section::Liability, "Mortgage", d(200)),
        LineItem::new(Section::Liability, " Mortgage ", d(50)),
        LineItem::new(Section::Liability, "mortgage", d(7)),
        LineItem::new(Section::Liability, "", d(1000)),
    ];
    let totals = compute_category_totals(&items);
    assert_eq!(
        totals.as_slice(),
        &[("Mortgage".to_string(), d(250)), ("mortgage".to_string(), d(7))]
    );
}

#[test]
fn period_filter_excludes_undated_and_out_of_range_items() {
    let mut book = FinancialBook::new(1);
    book.push(LineItem::new(Section::Income, "Salary", d(100)).with_date(day(2025, 1, 1)));
    book.push(LineItem::new(Section::Income, "Salary", d(200)).with_date(day(2025, 1, 31)));
    // end is exclusive
    book.push(LineItem::new(Section::Income, "Salary", d(400)).with_date(day(2025, 2, 1)));
    book.push(LineItem::new(Section::Income, "Bonus", d(800)));
    book.push(LineItem::new(Section::Expense, "Rent", d(50)).with_date(day(2024, 12, 31)));

    let jan = Period::new(day(2025, 1, 1), day(2025, 2, 1));
    let s = compute_summary_in(&book, Some(&jan));
    assert_eq!(s.income, d(300));
    assert_eq!(s.expense, Decimal::ZERO);
    assert_eq!(s.remaining, d(300));

    let all = compute_summary_in(&book, None);
    assert_eq!(all.income, d(1500));
    assert_eq!(all.expense, d(50));
}

#[test]
fn category_totals_respect_period() {
    let items = vec![
        LineItem::new(Section::Asset, "Stock", d(10)).with_date(day(2025, 3, 1)),
        LineItem::new(Section::Asset, "Stock", d(20)).with_date(day(2025, 4, 1)),
        LineItem::new(Section::Asset, "Savings", d(30)),
    ];
    let march = Period::new(day(2025, 3, 1), day(2025, 4, 1));
    let totals = compute_category_totals_in(&items, Some(&march));
    assert_eq!(totals.as_slice(), &[("Stock".to_string(), d(10))]);
}

#[test]
fn chart_values_follow_fixed_label_order() {
    let mut book = FinancialBook::new(1);
    book.push(LineItem::new(Section::Income, "Salary", d(600)));
    book.push(LineItem::new(Section::Expense, "Rent", d(300)));
    let labels: Vec<String> = compute_summary(&book)
        .chart_values()
        .into_iter()
        .map(|(l, _)| l)
        .collect();
    assert_eq!(labels, ["Income", "Expense", "Remaining Balance", "Etc"]);
}
