// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Reduces a client's book into the numbers the summary bar and the pie
//! charts need. Everything here is a pure read of the book.

use crate::models::{FinancialBook, LineItem};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

pub const INCOME_LABEL: &str = "Income";
pub const EXPENSE_LABEL: &str = "Expense";
pub const REMAINING_LABEL: &str = "Remaining Balance";
pub const ETC_LABEL: &str = "Etc";

/// Date window with an inclusive start and exclusive end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryBucket {
    pub income: Decimal,
    pub expense: Decimal,
    pub remaining: Decimal,
    pub etc: Decimal,
}

impl SummaryBucket {
    /// Labelled values in the fixed order the income/expense pie is fed.
    pub fn chart_values(&self) -> Vec<(String, Decimal)> {
        vec![
            (INCOME_LABEL.to_string(), self.income),
            (EXPENSE_LABEL.to_string(), self.expense),
            (REMAINING_LABEL.to_string(), self.remaining),
            (ETC_LABEL.to_string(), self.etc),
        ]
    }
}

/// Per-category sums in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryTotals {
    entries: Vec<(String, Decimal)>,
}

impl CategoryTotals {
    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, amount)| *amount)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[(String, Decimal)] {
        &self.entries
    }

    pub fn into_values(self) -> Vec<(String, Decimal)> {
        self.entries
    }
}

fn in_period(item: &LineItem, period: Option<&Period>) -> bool {
    match (period, item.date) {
        (None, _) => true,
        (Some(p), Some(d)) => p.contains(d),
        (Some(_), None) => false,
    }
}

fn counts(item: &LineItem, period: Option<&Period>) -> bool {
    !item.category.trim().is_empty() && in_period(item, period)
}

/// Adds two amounts, pinning at `Decimal::MAX` instead of overflowing.
fn saturating_add(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or_else(|| {
        tracing::warn!(%total, %amount, "amount total overflowed, capped at maximum");
        Decimal::MAX
    })
}

fn sum_items(items: &[LineItem], period: Option<&Period>) -> Decimal {
    items
        .iter()
        .filter(|item| counts(item, period))
        .fold(Decimal::ZERO, |total, item| saturating_add(total, item.amount))
}

pub fn compute_summary(book: &FinancialBook) -> SummaryBucket {
    compute_summary_in(book, None)
}

/// Same as [`compute_summary`], restricted to items dated inside `period`.
/// `etc` is not dated and is always carried over.
pub fn compute_summary_in(book: &FinancialBook, period: Option<&Period>) -> SummaryBucket {
    let income = sum_items(&book.income, period);
    let expense = sum_items(&book.expense, period);
    let remaining = (income - expense).max(Decimal::ZERO);
    tracing::debug!(
        client_id = book.client_id,
        %income,
        %expense,
        %remaining,
        etc = %book.etc,
        "computed summary"
    );
    SummaryBucket {
        income,
        expense,
        remaining,
        etc: book.etc,
    }
}

pub fn compute_category_totals(items: &[LineItem]) -> CategoryTotals {
    compute_category_totals_in(items, None)
}

pub fn compute_category_totals_in(items: &[LineItem], period: Option<&Period>) -> CategoryTotals {
    let mut entries: Vec<(String, Decimal)> = Vec::new();
    for item in items.iter().filter(|item| counts(item, period)) {
        let category = item.category.trim();
        match entries.iter_mut().find(|(name, _)| name == category) {
            Some((_, total)) => *total = saturating_add(*total, item.amount),
            None => entries.push((category.to_string(), item.amount)),
        }
    }
    entries.retain(|(_, total)| *total > Decimal::ZERO);
    CategoryTotals { entries }
}
