// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pfc::commands::{charts, etc, items, summary};
use pfc::models::{Client, Section};
use pfc::{cli, db, utils};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = db::open_in_memory().unwrap();
    let client = Client {
        id: 0,
        first_name: "Min".into(),
        last_name: "Park".into(),
        email: "min@example.com".into(),
        phone: "312-555-0100".into(),
        street: "9 Lake Shore Dr".into(),
        apt: String::new(),
        city: "Chicago".into(),
        state: "IL".into(),
        zip: "60611".into(),
        notes: String::new(),
    };
    let id = db::insert_client(&conn, &client).unwrap();
    utils::set_active_client(&conn, Some(id)).unwrap();
    conn
}

fn item(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut full = vec!["pfc", "item"];
    full.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(full);
    if let Some(("item", m)) = matches.subcommand() {
        items::handle(conn, m)
    } else {
        panic!("item command not parsed");
    }
}

fn d(v: i64) -> Decimal {
    Decimal::from(v)
}

#[test]
fn add_uses_active_client_and_drops_asset_descriptions() {
    let conn = setup();
    item(
        &conn,
        &["add", "-s", "income", "--category", " Salary ", "--amount", "6,000", "--description", "Base pay"],
    )
    .unwrap();
    item(
        &conn,
        &["add", "-s", "assets", "--category", "Stock", "--amount", "1200.50", "--description", "ignored"],
    )
    .unwrap();

    let book = db::load_book(&conn, 1).unwrap();
    assert_eq!(book.income.len(), 1);
    assert_eq!(book.income[0].category, "Salary");
    assert_eq!(book.income[0].amount, d(6000));
    assert_eq!(book.income[0].description.as_deref(), Some("Base pay"));
    assert_eq!(book.assets[0].amount, "1200.50".parse::<Decimal>().unwrap());
    assert_eq!(book.assets[0].description, None);
}

#[test]
fn add_rejects_zero_amount_and_blank_category() {
    let conn = setup();
    assert!(item(&conn, &["add", "-s", "expense", "--category", "Rent", "--amount", "0"]).is_err());
    assert!(item(&conn, &["add", "-s", "expense", "--category", "  ", "--amount", "10"]).is_err());
    assert!(item(&conn, &["add", "-s", "savings", "--category", "X", "--amount", "10"]).is_err());
    assert!(db::load_book(&conn, 1).unwrap().expense.is_empty());
}

#[test]
fn list_filters_by_section() {
    let conn = setup();
    item(&conn, &["add", "-s", "income", "--category", "Salary", "--amount", "100"]).unwrap();
    item(&conn, &["add", "-s", "liability", "--category", "Mortgage", "--amount", "900"]).unwrap();

    let matches = cli::build_cli().get_matches_from(["pfc", "item", "list", "--section", "liability"]);
    let Some(("item", m)) = matches.subcommand() else {
        panic!("item command not parsed");
    };
    let Some(("list", list_m)) = m.subcommand() else {
        panic!("list subcommand not parsed");
    };
    let rows = items::query_rows(&conn, list_m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category, "Mortgage");
    assert_eq!(rows[0].section, Section::Liability);
}

#[test]
fn rm_only_touches_the_clients_own_items() {
    let conn = setup();
    item(&conn, &["add", "-s", "income", "--category", "Salary", "--amount", "100"]).unwrap();
    assert!(item(&conn, &["rm", "--client", "1", "--id", "99"]).is_err());
    item(&conn, &["rm", "--id", "1"]).unwrap();
    assert!(db::load_book(&conn, 1).unwrap().income.is_empty());
}

#[test]
fn malformed_stored_amounts_count_as_zero() {
    let conn = setup();
    conn.execute(
        "INSERT INTO line_items(client_id, section, category, amount) VALUES (1,'income','Salary','abc')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO line_items(client_id, section, category, amount) VALUES (1,'income','Salary',?1)",
        params!["250"],
    )
    .unwrap();
    conn.execute("UPDATE books SET etc='n/a' WHERE client_id=1", [])
        .unwrap();

    let book = db::load_book(&conn, 1).unwrap();
    assert_eq!(book.income[0].amount, Decimal::ZERO);
    let s = pfc::summary::compute_summary(&book);
    assert_eq!(s.income, d(250));
    assert_eq!(s.etc, Decimal::ZERO);
}

#[test]
fn malformed_stored_dates_leave_items_undated() {
    let conn = setup();
    item(&conn, &["add", "-s", "income", "--category", "Salary", "--amount", "500"]).unwrap();
    conn.execute(
        "INSERT INTO line_items(client_id, section, category, amount, date) VALUES (1,'expense','Rent','200','2025/01/01')",
        [],
    )
    .unwrap();

    let book = db::load_book(&conn, 1).unwrap();
    assert_eq!(book.expense[0].date, None);

    let matches = cli::build_cli().get_matches_from(["pfc", "chart"]);
    let Some(("chart", m)) = matches.subcommand() else {
        panic!("chart command not parsed");
    };
    let pie = charts::build_layout(&conn, m).unwrap();
    let labels: Vec<&str> = pie.slices.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, ["Income", "Remaining Balance", "Expense"]);
}

#[test]
fn summary_and_chart_commands_read_the_book() {
    let conn = setup();
    item(&conn, &["add", "-s", "income", "--category", "Salary", "--amount", "600", "--date", "2025-05-01"]).unwrap();
    item(&conn, &["add", "-s", "expense", "--category", "Rent", "--amount", "300", "--date", "2025-05-03"]).unwrap();
    item(&conn, &["add", "-s", "expense", "--category", "Trip", "--amount", "900", "--date", "2025-06-10"]).unwrap();

    let matches = cli::build_cli().get_matches_from(["pfc", "etc", "set", "--amount", "0"]);
    if let Some(("etc", m)) = matches.subcommand() {
        etc::handle(&conn, m).unwrap();
    }

    let matches = cli::build_cli().get_matches_from([
        "pfc", "summary", "--from", "2025-05-01", "--to", "2025-06-01",
    ]);
    let Some(("summary", m)) = matches.subcommand() else {
        panic!("summary command not parsed");
    };
    let bucket = summary::summary_for(&conn, m).unwrap();
    assert_eq!(bucket.income, d(600));
    assert_eq!(bucket.expense, d(300));
    assert_eq!(bucket.remaining, d(300));

    let matches = cli::build_cli().get_matches_from([
        "pfc", "chart", "--kind", "summary", "--from", "2025-05-01", "--to", "2025-06-01",
    ]);
    let Some(("chart", m)) = matches.subcommand() else {
        panic!("chart command not parsed");
    };
    let pie = charts::build_layout(&conn, m).unwrap();
    let labels: Vec<&str> = pie.slices.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, ["Income", "Expense", "Remaining Balance"]);

    // whole history: expense exceeds income, remaining drops out
    let matches = cli::build_cli().get_matches_from(["pfc", "chart"]);
    let Some(("chart", m)) = matches.subcommand() else {
        panic!("chart command not parsed");
    };
    let pie = charts::build_layout(&conn, m).unwrap();
    let labels: Vec<&str> = pie.slices.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, ["Expense", "Income"]);
}

#[test]
fn asset_chart_without_assets_is_empty() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from(["pfc", "chart", "--kind", "assets"]);
    let Some(("chart", m)) = matches.subcommand() else {
        panic!("chart command not parsed");
    };
    assert!(charts::build_layout(&conn, m).unwrap().is_empty());
}
