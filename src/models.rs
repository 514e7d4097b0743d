// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub apt: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub notes: String,
}

impl Client {
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn home_address(&self) -> String {
        crate::utils::build_full_address(&self.street, &self.apt, &self.city, &self.state, &self.zip)
    }
}

/// Which list of a book a line item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Income,
    Expense,
    Asset,
    Liability,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Income,
        Section::Expense,
        Section::Asset,
        Section::Liability,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Income => "income",
            Section::Expense => "expense",
            Section::Asset => "asset",
            Section::Liability => "liability",
        }
    }

    pub fn parse(s: &str) -> Result<Section> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Section::Income),
            "expense" => Ok(Section::Expense),
            "asset" | "assets" => Ok(Section::Asset),
            "liability" | "liabilities" | "liab" => Ok(Section::Liability),
            other => Err(anyhow!(
                "Unknown section '{}' (use income|expense|asset|liability)",
                other
            )),
        }
    }

    /// Income and expense rows carry a description; assets and liabilities don't.
    pub fn has_description(&self) -> bool {
        matches!(self, Section::Income | Section::Expense)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub id: i64,
    pub section: Section,
    pub category: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub date: Option<NaiveDate>,
}

impl LineItem {
    /// Convenience constructor for items that have not been stored yet.
    pub fn new(section: Section, category: &str, amount: Decimal) -> Self {
        Self {
            id: 0,
            section,
            category: category.to_string(),
            description: None,
            amount,
            date: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Everything recorded for one client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FinancialBook {
    pub client_id: i64,
    pub income: Vec<LineItem>,
    pub expense: Vec<LineItem>,
    pub assets: Vec<LineItem>,
    pub liabilities: Vec<LineItem>,
    pub etc: Decimal,
}

impl FinancialBook {
    pub fn new(client_id: i64) -> Self {
        Self {
            client_id,
            ..Default::default()
        }
    }

    pub fn section(&self, section: Section) -> &[LineItem] {
        match section {
            Section::Income => &self.income,
            Section::Expense => &self.expense,
            Section::Asset => &self.assets,
            Section::Liability => &self.liabilities,
        }
    }

    pub fn push(&mut self, item: LineItem) {
        match item.section {
            Section::Income => self.income.push(item),
            Section::Expense => self.expense.push(item),
            Section::Asset => self.assets.push(item),
            Section::Liability => self.liabilities.push(item),
        }
    }
}
