// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs the global subscriber once. Logs go to stderr so tables and JSON
/// on stdout stay clean; `RUST_LOG` overrides the default `pfc=warn`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pfc=warn"));
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .replace(',', "")
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// `1234.5` -> `1,234.50`
pub fn fmt_money(d: &Decimal) -> String {
    let s = format!("{:.2}", d.round_dp(2));
    let (sign, s) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (int, frac) = s.split_once('.').unwrap_or((s, "00"));
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}.{}", sign, grouped, frac)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

// Active client settings
pub fn get_active_client(conn: &Connection) -> Result<Option<i64>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='active_client'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v.and_then(|s| s.parse::<i64>().ok()))
}

pub fn set_active_client(conn: &Connection, client_id: Option<i64>) -> Result<()> {
    match client_id {
        Some(id) => {
            conn.execute(
                "INSERT INTO settings(key, value) VALUES('active_client', ?1)
                 ON CONFLICT(key) DO UPDATE SET value=excluded.value",
                params![id.to_string()],
            )?;
        }
        None => {
            conn.execute("DELETE FROM settings WHERE key='active_client'", [])?;
        }
    }
    Ok(())
}

/// `--client` when given, otherwise the active client.
pub fn resolve_client(conn: &Connection, sub: &clap::ArgMatches) -> Result<i64> {
    let id = match sub.get_one::<i64>("client") {
        Some(id) => *id,
        None => get_active_client(conn)?
            .ok_or_else(|| anyhow!("No client selected; pass --client or run `pfc client use`"))?,
    };
    let exists: Option<i64> = conn
        .query_row("SELECT id FROM clients WHERE id=?1", params![id], |r| r.get(0))
        .optional()?;
    exists.ok_or_else(|| anyhow!("Client {} not found", id))
}

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").expect("static email regex")
});

pub fn valid_email(s: &str) -> bool {
    EMAIL_RE.is_match(s.trim())
}

pub fn phone_digits(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Keeps at most 10 digits and formats them as `000-000-0000` while typing.
pub fn fmt_phone(s: &str) -> String {
    let digits: String = phone_digits(s).chars().take(10).collect();
    if digits.len() >= 7 {
        format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else if digits.len() >= 4 {
        format!("{}-{}", &digits[..3], &digits[3..])
    } else {
        digits
    }
}

pub fn build_full_address(street: &str, apt: &str, city: &str, state: &str, zip: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    for p in [street.trim(), apt.trim()] {
        if !p.is_empty() {
            parts.push(p.to_string());
        }
    }
    let loc = [city.trim(), state.trim()]
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if !loc.is_empty() {
        parts.push(loc);
    }
    if !zip.trim().is_empty() {
        parts.push(zip.trim().to_string());
    }
    parts.join(", ")
}

/// Writes `data` next to `path` first and renames it into place, so readers
/// never observe a half-written file.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::env::current_dir()?,
    };
    fs::create_dir_all(&parent)
        .with_context(|| format!("Failed to create {}", parent.display()))?;
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("Invalid output path {}", path.display()))?;
    let tmp = parent.join(format!(".{}.tmp", file_name.to_string_lossy()));
    {
        let mut file =
            File::create(&tmp).with_context(|| format!("Create {}", tmp.display()))?;
        file.write_all(data)?;
        file.sync_all()?;
    }
    if let Err(err) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(err).with_context(|| format!("Move into place at {}", path.display()));
    }
    Ok(())
}
