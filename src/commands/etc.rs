// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::utils::{fmt_money, parse_decimal, resolve_client};
use anyhow::{Result, anyhow};
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("set", sub)) = m.subcommand() {
        let client_id = resolve_client(conn, sub)?;
        let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
        if amount < Decimal::ZERO {
            return Err(anyhow!("Etc cannot be negative, got {}", amount));
        }
        db::set_etc(conn, client_id, amount)?;
        tracing::info!(client_id, %amount, "etc updated");
        println!("Etc for client {} = {}", client_id, fmt_money(&amount));
    }
    Ok(())
}
