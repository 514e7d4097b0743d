// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{ChartConfig, KEYS};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let cfg = ChartConfig::load(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cfg)? {
                let mut rows = Vec::new();
                for key in KEYS {
                    rows.push(vec![key.to_string(), cfg.get(key)?]);
                }
                println!("{}", pretty_table(&["Key", "Value"], rows));
            }
        }
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            let value = sub.get_one::<String>("value").unwrap();
            let cfg = ChartConfig::set(conn, key, value)?;
            println!("{} = {}", key, cfg.get(key)?);
        }
        Some(("reset", _)) => {
            ChartConfig::reset(conn)?;
            println!("Chart settings reset to defaults");
        }
        _ => {}
    }
    Ok(())
}
