// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::company_of;
use crate::utils::{load_clients, maybe_print_json, parse_date, pretty_table};
use anyhow::Result;
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let company_id = company_of(conn, sub)?;
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let email = sub.get_one::<String>("email").map(|s| s.trim().to_string());
    let phone = sub.get_one::<String>("phone").map(|s| s.trim().to_string());
    let tax_id = sub.get_one::<String>("tax-id").map(|s| s.trim().to_string());
    let first_purchase = sub
        .get_one::<String>("first-purchase")
        .map(|s| parse_date(s.trim()))
        .transpose()?;

    conn.execute(
        "INSERT INTO clients(company_id, name, email, phone, tax_id, first_purchase_date)
         VALUES (?1,?2,?3,?4,?5,?6)",
        params![
            company_id,
            name,
            email,
            phone,
            tax_id,
            first_purchase.map(|d| d.to_string())
        ],
    )?;
    println!("Added client '{}'", name);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let company_id = company_of(conn, sub)?;
    let clients = load_clients(conn, company_id)?;
    if maybe_print_json(json_flag, jsonl_flag, &clients)? {
        return Ok(());
    }
    let rows = clients
        .iter()
        .map(|c| {
            vec![
                c.name.clone(),
                c.email.clone().unwrap_or_default(),
                c.phone.clone().unwrap_or_default(),
                c.first_purchase_date
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
                if c.is_active { "yes" } else { "no" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Client", "Email", "Phone", "First purchase", "Active"],
            rows
        )
    );
    Ok(())
}
