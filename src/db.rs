// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Client, FinancialBook, LineItem, Section};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.financecheckup", "FinanceCheckup", "pfc"));

pub fn db_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os("PFC_DB") {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("pfc.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    tracing::debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS clients(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL,
        phone TEXT NOT NULL,
        street TEXT NOT NULL,
        apt TEXT NOT NULL DEFAULT '',
        city TEXT NOT NULL,
        state TEXT NOT NULL,
        zip TEXT NOT NULL,
        notes TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    -- one row per client, created lazily on first access
    CREATE TABLE IF NOT EXISTS books(
        client_id INTEGER PRIMARY KEY,
        etc TEXT NOT NULL DEFAULT '0',
        FOREIGN KEY(client_id) REFERENCES clients(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS line_items(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        client_id INTEGER NOT NULL,
        section TEXT NOT NULL CHECK(section IN ('income','expense','asset','liability')),
        category TEXT NOT NULL,
        description TEXT,
        amount TEXT NOT NULL,
        date TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(client_id) REFERENCES clients(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_line_items_client ON line_items(client_id, section);
    "#,
    )?;
    Ok(())
}

/// Stored amounts that don't parse, or are negative, count as zero rather
/// than failing a render.
pub fn stored_amount(raw: &str, context: &str) -> Decimal {
    match raw.trim().parse::<Decimal>() {
        Ok(d) if d >= Decimal::ZERO => d,
        Ok(_) => {
            tracing::warn!(raw, context, "negative stored amount coerced to 0");
            Decimal::ZERO
        }
        Err(_) => {
            tracing::warn!(raw, context, "unparsable stored amount coerced to 0");
            Decimal::ZERO
        }
    }
}

/// Stored dates that don't parse are dropped, leaving the item undated.
pub fn stored_date(raw: Option<&str>, item_id: i64) -> Option<NaiveDate> {
    match raw.map(str::trim) {
        None | Some("") => None,
        Some(d) => match NaiveDate::parse_from_str(d, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                tracing::warn!(raw = d, item_id, "unparsable stored date dropped");
                None
            }
        },
    }
}

pub fn insert_client(conn: &Connection, c: &Client) -> Result<i64> {
    conn.execute(
        "INSERT INTO clients(first_name, last_name, email, phone, street, apt, city, state, zip, notes)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10)",
        params![
            c.first_name,
            c.last_name,
            c.email,
            c.phone,
            c.street,
            c.apt,
            c.city,
            c.state,
            c.zip,
            c.notes
        ],
    )?;
    let id = conn.last_insert_rowid();
    ensure_book(conn, id)?;
    Ok(id)
}

pub fn update_client(conn: &Connection, c: &Client) -> Result<()> {
    let n = conn.execute(
        "UPDATE clients SET first_name=?1, last_name=?2, email=?3, phone=?4, street=?5,
         apt=?6, city=?7, state=?8, zip=?9, notes=?10 WHERE id=?11",
        params![
            c.first_name,
            c.last_name,
            c.email,
            c.phone,
            c.street,
            c.apt,
            c.city,
            c.state,
            c.zip,
            c.notes,
            c.id
        ],
    )?;
    if n == 0 {
        return Err(anyhow!("Client {} not found", c.id));
    }
    Ok(())
}

fn client_from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<Client> {
    Ok(Client {
        id: r.get(0)?,
        first_name: r.get(1)?,
        last_name: r.get(2)?,
        email: r.get(3)?,
        phone: r.get(4)?,
        street: r.get(5)?,
        apt: r.get(6)?,
        city: r.get(7)?,
        state: r.get(8)?,
        zip: r.get(9)?,
        notes: r.get(10)?,
    })
}

const CLIENT_COLUMNS: &str =
    "id, first_name, last_name, email, phone, street, apt, city, state, zip, notes";

pub fn get_client(conn: &Connection, id: i64) -> Result<Option<Client>> {
    let sql = format!("SELECT {} FROM clients WHERE id=?1", CLIENT_COLUMNS);
    Ok(conn.query_row(&sql, params![id], client_from_row).optional()?)
}

pub fn list_clients(conn: &Connection) -> Result<Vec<Client>> {
    let sql = format!("SELECT {} FROM clients ORDER BY id", CLIENT_COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], client_from_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Removes the client; its book and line items go with it.
pub fn delete_client(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM clients WHERE id=?1", params![id])?;
    Ok(n > 0)
}

pub fn ensure_book(conn: &Connection, client_id: i64) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO books(client_id, etc) VALUES (?1, '0')",
        params![client_id],
    )?;
    Ok(())
}

pub fn set_etc(conn: &Connection, client_id: i64, etc: Decimal) -> Result<()> {
    ensure_book(conn, client_id)?;
    conn.execute(
        "UPDATE books SET etc=?1 WHERE client_id=?2",
        params![etc.to_string(), client_id],
    )?;
    Ok(())
}

pub fn insert_item(conn: &Connection, client_id: i64, item: &LineItem) -> Result<i64> {
    ensure_book(conn, client_id)?;
    conn.execute(
        "INSERT INTO line_items(client_id, section, category, description, amount, date)
         VALUES (?1,?2,?3,?4,?5,?6)",
        params![
            client_id,
            item.section.as_str(),
            item.category,
            item.description,
            item.amount.to_string(),
            item.date.map(|d| d.to_string())
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_item(conn: &Connection, client_id: i64, item_id: i64) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM line_items WHERE id=?1 AND client_id=?2",
        params![item_id, client_id],
    )?;
    Ok(n > 0)
}

/// Loads a client's book, creating the empty book row on first access.
pub fn load_book(conn: &Connection, client_id: i64) -> Result<FinancialBook> {
    ensure_book(conn, client_id)?;
    let etc_raw: String = conn.query_row(
        "SELECT etc FROM books WHERE client_id=?1",
        params![client_id],
        |r| r.get(0),
    )?;
    let mut book = FinancialBook::new(client_id);
    book.etc = stored_amount(&etc_raw, "etc");

    let mut stmt = conn.prepare(
        "SELECT id, section, category, description, amount, date FROM line_items
         WHERE client_id=?1 ORDER BY id",
    )?;
    let mut rows = stmt.query(params![client_id])?;
    while let Some(r) = rows.next()? {
        let id: i64 = r.get(0)?;
        let section_raw: String = r.get(1)?;
        let section = Section::parse(&section_raw)?;
        let amount_raw: String = r.get(4)?;
        let date_raw: Option<String> = r.get(5)?;
        let date = stored_date(date_raw.as_deref(), id);
        book.push(LineItem {
            id,
            section,
            category: r.get(2)?,
            description: r.get(3)?,
            amount: stored_amount(&amount_raw, "line item"),
            date,
        });
    }
    Ok(book)
}
