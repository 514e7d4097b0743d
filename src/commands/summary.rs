// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::summary::{Period, SummaryBucket, compute_summary_in};
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table, resolve_client};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

/// Reads `--from/--to` into a period; both or neither are present.
pub fn period_arg(sub: &clap::ArgMatches) -> Result<Option<Period>> {
    match (sub.get_one::<String>("from"), sub.get_one::<String>("to")) {
        (Some(from), Some(to)) => {
            let period = Period::new(parse_date(from)?, parse_date(to)?);
            if period.end <= period.start {
                return Err(anyhow!("--to {} must be after --from {}", to, from));
            }
            Ok(Some(period))
        }
        _ => Ok(None),
    }
}

pub fn summary_for(conn: &Connection, sub: &clap::ArgMatches) -> Result<SummaryBucket> {
    let client_id = resolve_client(conn, sub)?;
    let period = period_arg(sub)?;
    let book = db::load_book(conn, client_id)?;
    Ok(compute_summary_in(&book, period.as_ref()))
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let bucket = summary_for(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &bucket)? {
        println!(
            "{}",
            pretty_table(
                &["Income", "Expense", "Remaining", "Etc"],
                vec![vec![
                    fmt_money(&bucket.income),
                    fmt_money(&bucket.expense),
                    fmt_money(&bucket.remaining),
                    fmt_money(&bucket.etc),
                ]],
            )
        );
    }
    Ok(())
}
