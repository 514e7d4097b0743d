// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::summary::period_arg;
use crate::config::ChartConfig;
use crate::db;
use crate::pie::{Palette, PieLayout, layout};
use crate::summary::{compute_category_totals_in, compute_summary_in};
use crate::utils::{fmt_money, maybe_print_json, pretty_table, resolve_client};
use anyhow::Result;
use rusqlite::Connection;

pub const NO_DATA: &str = "No data to display.";

pub fn chart_title(kind: &str) -> &'static str {
    match kind {
        "assets" => "ASSET",
        "liabilities" => "LIABILITY",
        _ => "INCOME / EXPENSE",
    }
}

/// Aggregates the client's book for `kind` and lays it out with the stored config.
pub fn build_layout(conn: &Connection, sub: &clap::ArgMatches) -> Result<PieLayout> {
    let client_id = resolve_client(conn, sub)?;
    let period = period_arg(sub)?;
    let kind = sub
        .get_one::<String>("kind")
        .map(String::as_str)
        .unwrap_or("summary");
    let cfg = ChartConfig::load(conn)?;
    let book = db::load_book(conn, client_id)?;
    let values = match kind {
        "assets" => compute_category_totals_in(&book.assets, period.as_ref()).into_values(),
        "liabilities" => {
            compute_category_totals_in(&book.liabilities, period.as_ref()).into_values()
        }
        _ => compute_summary_in(&book, period.as_ref()).chart_values(),
    };
    Ok(layout(&values, &cfg, &Palette::default()))
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let pie = build_layout(conn, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &pie)? {
        return Ok(());
    }
    let kind = sub
        .get_one::<String>("kind")
        .map(String::as_str)
        .unwrap_or("summary");
    println!("{}", chart_title(kind));
    if pie.is_empty() {
        println!("{}", NO_DATA);
        return Ok(());
    }
    let rows = pie
        .slices
        .iter()
        .map(|s| {
            vec![
                s.label.clone(),
                fmt_money(&s.value),
                s.label_text.replace('\n', " "),
                format!("{:.1}°", s.angle_start),
                format!("{:.1}°", s.angle_end),
                format!("{:.1}", s.font_size),
                format!("({:.2}, {:.2})", s.label_x, s.label_y),
                s.color.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Wedge", "Value", "Label", "Start", "End", "Font", "Anchor", "Color"],
            rows
        )
    );
    for entry in &pie.legend {
        println!("  {}", entry.text);
    }
    Ok(())
}
