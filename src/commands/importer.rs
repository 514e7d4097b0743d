// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::exporter::HEADER;
use crate::db;
use crate::models::Section;
use crate::utils::{get_active_client, parse_date, parse_decimal, set_active_client};
use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use std::collections::HashSet;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let path = m.get_one::<String>("path").unwrap().trim();
    let (clients, items) = import_csv(conn, path)?;
    println!(
        "Imported {} clients and {} line items from {}",
        clients, items, path
    );
    Ok(())
}

fn column(rec: &csv::StringRecord, name: &str) -> String {
    HEADER
        .iter()
        .position(|h| *h == name)
        .and_then(|i| rec.get(i))
        .unwrap_or("")
        .trim()
        .to_string()
}

/// Replaces every client and book with the contents of an exported CSV.
/// Nothing is changed if any row fails.
pub fn import_csv(conn: &mut Connection, path: &str) -> Result<(usize, usize)> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let tx = conn.transaction()?;
    tx.execute("DELETE FROM clients", [])?;

    let mut seen: HashSet<i64> = HashSet::new();
    let mut items = 0usize;
    for (line, result) in rdr.records().enumerate() {
        let rec = result?;
        let kind = column(&rec, "type").to_lowercase();
        let id_raw = column(&rec, "client_id");
        let client_id: i64 = id_raw
            .parse()
            .with_context(|| format!("Invalid client_id '{}' on row {}", id_raw, line + 1))?;

        if kind == "client" {
            tx.execute(
                "INSERT INTO clients(id, first_name, last_name, email, phone, street, apt, city, state, zip, notes)
                 VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11)",
                params![
                    client_id,
                    column(&rec, "first_name"),
                    column(&rec, "last_name"),
                    column(&rec, "email"),
                    column(&rec, "phone"),
                    column(&rec, "street"),
                    column(&rec, "apt"),
                    column(&rec, "city"),
                    column(&rec, "state"),
                    column(&rec, "zip"),
                    column(&rec, "notes")
                ],
            )
            .with_context(|| format!("Insert client {} on row {}", client_id, line + 1))?;
            db::ensure_book(&tx, client_id)?;
            seen.insert(client_id);
            continue;
        }

        if !seen.contains(&client_id) {
            return Err(anyhow!(
                "Row {} references client {} before it is defined",
                line + 1,
                client_id
            ));
        }
        let amount_raw = column(&rec, "amount");
        let amount = parse_decimal(&amount_raw)
            .with_context(|| format!("Invalid amount on row {}", line + 1))?;
        if amount < Decimal::ZERO {
            return Err(anyhow!("Negative amount {} on row {}", amount, line + 1));
        }
        if kind == "etc" {
            db::set_etc(&tx, client_id, amount)?;
            continue;
        }

        let section = Section::parse(&kind)?;
        let description = Some(column(&rec, "description")).filter(|d| !d.is_empty());
        let date_raw = column(&rec, "date");
        let date = if date_raw.is_empty() {
            None
        } else {
            Some(parse_date(&date_raw)?)
        };
        tx.execute(
            "INSERT INTO line_items(client_id, section, category, description, amount, date)
             VALUES (?1,?2,?3,?4,?5,?6)",
            params![
                client_id,
                section.as_str(),
                column(&rec, "category"),
                description,
                amount.to_string(),
                date.map(|d| d.to_string())
            ],
        )?;
        items += 1;
    }

    if let Some(active) = get_active_client(&tx)? {
        if !seen.contains(&active) {
            set_active_client(&tx, None)?;
        }
    }
    tx.commit()?;
    tracing::info!(clients = seen.len(), items, path, "imported");
    Ok((seen.len(), items))
}
