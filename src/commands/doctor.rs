// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::utils::{phone_digits, pretty_table, valid_email};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let rows = find_issues(conn)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    if m.get_flag("fix") {
        let removed = remove_blank_categories(conn)?;
        println!("Removed {} line items with a blank category", removed);
    }
    Ok(())
}

pub fn find_issues(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Rows that aggregation skips or coerces
    let mut stmt = conn.prepare(
        "SELECT id, client_id, section, category, amount, date FROM line_items ORDER BY id",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let client_id: i64 = r.get(1)?;
        let section: String = r.get(2)?;
        let category: String = r.get(3)?;
        let amount: String = r.get(4)?;
        let date: Option<String> = r.get(5)?;
        let at = format!("item {} (client {}, {})", id, client_id, section);
        if category.trim().is_empty() {
            rows.push(vec!["blank_category".into(), at.clone()]);
        }
        match amount.trim().parse::<Decimal>() {
            Ok(d) if d < Decimal::ZERO => {
                rows.push(vec!["negative_amount".into(), format!("{} = {}", at, amount)])
            }
            Ok(_) => {}
            Err(_) => rows.push(vec!["bad_amount".into(), format!("{} = '{}'", at, amount)]),
        }
        if let Some(raw) = date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            if NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_err() {
                rows.push(vec!["bad_date".into(), format!("{} = '{}'", at, raw)]);
            }
        }
    }

    // 2) Etc amounts
    let mut stmt = conn.prepare("SELECT client_id, etc FROM books ORDER BY client_id")?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let client_id: i64 = r.get(0)?;
        let etc: String = r.get(1)?;
        match etc.trim().parse::<Decimal>() {
            Ok(d) if d < Decimal::ZERO => rows.push(vec![
                "negative_etc".into(),
                format!("client {} = {}", client_id, etc),
            ]),
            Ok(_) => {}
            Err(_) => rows.push(vec![
                "bad_etc".into(),
                format!("client {} = '{}'", client_id, etc),
            ]),
        }
    }

    // 3) Client contact details the entry form would reject
    for c in db::list_clients(conn)? {
        if !valid_email(&c.email) {
            rows.push(vec!["bad_email".into(), format!("client {}: {}", c.id, c.email)]);
        }
        if phone_digits(&c.phone).len() != 10 {
            rows.push(vec!["bad_phone".into(), format!("client {}: {}", c.id, c.phone)]);
        }
    }
    Ok(rows)
}

pub fn remove_blank_categories(conn: &Connection) -> Result<usize> {
    let n = conn.execute("DELETE FROM line_items WHERE trim(category) = ''", [])?;
    tracing::info!(removed = n, "blank-category line items removed");
    Ok(n)
}
