// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::errors::ClientError;
use crate::models::Client;
use crate::utils::{
    fmt_phone, maybe_print_json, phone_digits, pretty_table, resolve_client, set_active_client,
    valid_email,
};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let id = add(conn, sub)?;
            println!("Registered client {}", id);
        }
        Some(("list", sub)) => list(conn, sub)?,
        Some(("show", sub)) => show(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            if !db::delete_client(conn, id)? {
                return Err(ClientError::NotFound(id).into());
            }
            if crate::utils::get_active_client(conn)? == Some(id) {
                set_active_client(conn, None)?;
            }
            tracing::info!(client_id = id, "client deleted");
            println!("Removed client {}", id);
        }
        Some(("use", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let client = db::get_client(conn, id)?.ok_or(ClientError::NotFound(id))?;
            set_active_client(conn, Some(id))?;
            println!("Active client: {} - {}", client.id, client.name());
        }
        _ => {}
    }
    Ok(())
}

/// Checks the fields an advisor must fill in before a client can be saved.
pub fn validate_client(c: &Client) -> Result<(), ClientError> {
    let required = [
        ("first name", &c.first_name),
        ("last name", &c.last_name),
        ("street address", &c.street),
        ("city", &c.city),
        ("state", &c.state),
        ("zip code", &c.zip),
    ];
    for (name, value) in required {
        if value.trim().is_empty() {
            return Err(ClientError::Missing(name));
        }
    }
    if !valid_email(&c.email) {
        return Err(ClientError::Email(c.email.clone()));
    }
    if phone_digits(&c.phone).len() != 10 {
        return Err(ClientError::Phone(c.phone.clone()));
    }
    if c.state.trim().chars().count() != 2 {
        return Err(ClientError::State(c.state.clone()));
    }
    Ok(())
}

fn arg(sub: &clap::ArgMatches, id: &str) -> Option<String> {
    sub.get_one::<String>(id).map(|s| s.trim().to_string())
}

/// Overwrites the fields given on the command line, normalising as it goes.
fn apply_fields(c: &mut Client, sub: &clap::ArgMatches) {
    if let Some(v) = arg(sub, "first") {
        c.first_name = v;
    }
    if let Some(v) = arg(sub, "last") {
        c.last_name = v;
    }
    if let Some(v) = arg(sub, "email") {
        c.email = v;
    }
    if let Some(v) = arg(sub, "phone") {
        c.phone = fmt_phone(&v);
    }
    if let Some(v) = arg(sub, "street") {
        c.street = v;
    }
    if let Some(v) = arg(sub, "apt") {
        c.apt = v;
    }
    if let Some(v) = arg(sub, "city") {
        c.city = v;
    }
    if let Some(v) = arg(sub, "state") {
        c.state = v.to_uppercase();
    }
    if let Some(v) = arg(sub, "zip") {
        c.zip = v;
    }
    if let Some(v) = arg(sub, "notes") {
        c.notes = v;
    }
}

pub fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<i64> {
    let mut client = Client {
        id: 0,
        first_name: String::new(),
        last_name: String::new(),
        email: String::new(),
        phone: String::new(),
        street: String::new(),
        apt: String::new(),
        city: String::new(),
        state: String::new(),
        zip: String::new(),
        notes: String::new(),
    };
    apply_fields(&mut client, sub);
    validate_client(&client)?;
    let id = db::insert_client(conn, &client)?;
    tracing::info!(client_id = id, "client registered");
    Ok(id)
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = resolve_client(conn, sub)?;
    let mut client = db::get_client(conn, id)?.ok_or(ClientError::NotFound(id))?;
    apply_fields(&mut client, sub);
    validate_client(&client)?;
    db::update_client(conn, &client)?;
    tracing::info!(client_id = id, "client updated");
    println!("Updated client {} - {}", client.id, client.name());
    Ok(())
}

#[derive(Serialize)]
pub struct ClientRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub home_address: String,
}

impl From<&Client> for ClientRow {
    fn from(c: &Client) -> Self {
        ClientRow {
            id: c.id,
            name: c.name(),
            email: c.email.clone(),
            phone: c.phone.clone(),
            home_address: c.home_address(),
        }
    }
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data: Vec<ClientRow> = db::list_clients(conn)?.iter().map(ClientRow::from).collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let active = crate::utils::get_active_client(conn)?;
        let rows = data
            .into_iter()
            .map(|r| {
                let marker = if Some(r.id) == active { "*" } else { "" };
                vec![
                    format!("{}{}", r.id, marker),
                    r.name,
                    r.email,
                    r.phone,
                    r.home_address,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Name", "Email", "Phone", "Home Address"], rows)
        );
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = resolve_client(conn, sub)?;
    let client = db::get_client(conn, id)?.ok_or(ClientError::NotFound(id))?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &client)? {
        let rows = vec![
            vec!["ID".into(), client.id.to_string()],
            vec!["Name".into(), client.name()],
            vec!["Email".into(), client.email.clone()],
            vec!["Phone".into(), client.phone.clone()],
            vec!["Home Address".into(), client.home_address()],
            vec!["Notes".into(), client.notes.clone()],
        ];
        println!("{}", pretty_table(&["Field", "Value"], rows));
    }
    Ok(())
}
