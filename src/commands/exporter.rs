// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::Section;
use crate::utils::write_atomic;
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use std::path::Path;

/// Column layout shared with the importer. `type` is `client`, a section
/// name, or `etc`.
pub const HEADER: [&str; 16] = [
    "type",
    "client_id",
    "first_name",
    "last_name",
    "email",
    "phone",
    "street",
    "apt",
    "city",
    "state",
    "zip",
    "notes",
    "category",
    "description",
    "amount",
    "date",
];

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let out = m.get_one::<String>("out").unwrap().trim();
    let count = export_csv(conn, Path::new(out))?;
    println!("Exported {} rows to {}", count, out);
    Ok(())
}

/// Serialises every client and book into one CSV and writes it atomically.
/// Returns the number of data rows written.
pub fn export_csv(conn: &Connection, out: &Path) -> Result<usize> {
    let is_csv = out
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(anyhow!(
            "Unsupported export format for {} (use a .csv path)",
            out.display()
        ));
    }

    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(HEADER)?;
    let mut count = 0usize;
    for c in db::list_clients(conn)? {
        let id = c.id.to_string();
        let row: [&str; 16] = [
            "client", &id, &c.first_name, &c.last_name, &c.email, &c.phone, &c.street, &c.apt,
            &c.city, &c.state, &c.zip, &c.notes, "", "", "", "",
        ];
        wtr.write_record(row)?;
        count += 1;

        let book = db::load_book(conn, c.id)?;
        for section in Section::ALL {
            for item in book.section(section) {
                let amount = item.amount.to_string();
                let date = item.date.map(|d| d.to_string()).unwrap_or_default();
                let row: [&str; 16] = [
                    section.as_str(),
                    &id,
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    "",
                    &item.category,
                    item.description.as_deref().unwrap_or(""),
                    &amount,
                    &date,
                ];
                wtr.write_record(row)?;
                count += 1;
            }
        }
        let etc = book.etc.to_string();
        let row: [&str; 16] = [
            "etc", &id, "", "", "", "", "", "", "", "", "", "", "Etc", "", &etc, "",
        ];
        wtr.write_record(row)?;
        count += 1;
    }
    let bytes = wtr.into_inner().map_err(|e| anyhow!("CSV flush failed: {}", e))?;
    write_atomic(out, &bytes)?;
    tracing::info!(rows = count, path = %out.display(), "exported");
    Ok(count)
}
