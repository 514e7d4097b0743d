// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::{LineItem, Section};
use crate::utils::{
    fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table, resolve_client,
};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let client_id = resolve_client(conn, sub)?;
            let id = *sub.get_one::<i64>("id").unwrap();
            if !db::delete_item(conn, client_id, id)? {
                return Err(anyhow!("Line item {} not found for client {}", id, client_id));
            }
            println!("Removed line item {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let client_id = resolve_client(conn, sub)?;
    let section = Section::parse(sub.get_one::<String>("section").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    if category.is_empty() {
        return Err(anyhow!("Category is required"));
    }
    if amount <= Decimal::ZERO {
        return Err(anyhow!("Amount must be greater than 0, got {}", amount));
    }
    let mut item = LineItem::new(section, &category, amount);
    if section.has_description() {
        if let Some(desc) = sub
            .get_one::<String>("description")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
        {
            item = item.with_description(desc);
        }
    }
    if let Some(d) = sub.get_one::<String>("date") {
        item = item.with_date(parse_date(d)?);
    }
    let id = db::insert_item(conn, client_id, &item)?;
    tracing::info!(client_id, item_id = id, %section, %amount, "line item added");
    println!("Added {} '{}' = {} (item {})", section, category, fmt_money(&amount), id);
    Ok(())
}

#[derive(Serialize)]
pub struct ItemRow {
    pub id: i64,
    pub section: Section,
    pub category: String,
    pub description: String,
    pub amount: Decimal,
    pub date: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<ItemRow>> {
    let client_id = resolve_client(conn, sub)?;
    let only = match sub.get_one::<String>("section") {
        Some(s) => Some(Section::parse(s)?),
        None => None,
    };
    let book = db::load_book(conn, client_id)?;
    let mut data = Vec::new();
    for section in Section::ALL {
        if only.is_some_and(|o| o != section) {
            continue;
        }
        for item in book.section(section) {
            data.push(ItemRow {
                id: item.id,
                section,
                category: item.category.clone(),
                description: item.description.clone().unwrap_or_default(),
                amount: item.amount,
                date: item.date.map(|d| d.to_string()).unwrap_or_default(),
            });
        }
    }
    Ok(data)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        if data.is_empty() {
            println!("No line items.");
            return Ok(());
        }
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.section.to_string(),
                    r.category.clone(),
                    r.description.clone(),
                    fmt_money(&r.amount),
                    r.date.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Section", "Category", "Description", "Amount", "Date"],
                rows
            )
        );
    }
    Ok(())
}
