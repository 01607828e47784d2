// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::company_of;
use crate::ledger;
use crate::models::VaultType;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("deposit", sub)) => deposit(conn, sub)?,
        Some(("withdraw", sub)) => withdraw(conn, sub)?,
        Some(("transfer", sub)) => transfer(conn, sub)?,
        Some(("balances", sub)) => balances(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("delete", sub)) => delete(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn tags_of(sub: &clap::ArgMatches) -> Vec<String> {
    sub.get_many::<String>("tag")
        .map(|vals| vals.map(|s| s.trim().to_string()).collect())
        .unwrap_or_default()
}

fn deposit(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let company_id = company_of(conn, sub)?;
    let vault = VaultType::parse(sub.get_one::<String>("vault").unwrap().trim())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;
    let description = sub.get_one::<String>("description").unwrap();
    ledger::deposit(conn, company_id, vault, amount, description, &tags_of(sub))?;
    println!("Deposited {} into {}", amount, vault.as_str());
    Ok(())
}

fn withdraw(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let company_id = company_of(conn, sub)?;
    let vault = VaultType::parse(sub.get_one::<String>("vault").unwrap().trim())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;
    let description = sub.get_one::<String>("description").unwrap();
    ledger::withdraw(conn, company_id, vault, amount, description, &tags_of(sub))?;
    println!("Withdrew {} from {}", amount, vault.as_str());
    Ok(())
}

fn transfer(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let company_id = company_of(conn, sub)?;
    let from = VaultType::parse(sub.get_one::<String>("from").unwrap().trim())?;
    let to = VaultType::parse(sub.get_one::<String>("to").unwrap().trim())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;
    let description = sub.get_one::<String>("description").unwrap();
    let group = ledger::transfer(
        conn,
        company_id,
        from,
        to,
        amount,
        description,
        &tags_of(sub),
    )?;
    println!(
        "Transferred {} from {} to {} (group {})",
        amount,
        from.as_str(),
        to.as_str(),
        group
    );
    Ok(())
}

fn balances(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let company_id = company_of(conn, sub)?;
    let b = ledger::get_balances(conn, company_id)?;
    if maybe_print_json(json_flag, jsonl_flag, &b)? {
        return Ok(());
    }
    let rows = vec![
        vec!["Main balance".into(), format!("{:.2}", b.main_balance)],
        vec![
            "Emergency reserve".into(),
            format!("{:.2}", b.emergency_reserve),
        ],
        vec!["Working capital".into(), format!("{:.2}", b.working_capital)],
        vec!["Investments".into(), format!("{:.2}", b.investments)],
        vec!["Withdrawals".into(), format!("{:.2}", b.withdrawals)],
        vec!["Net balance".into(), format!("{:.2}", b.net_balance)],
        vec![
            "Available balance".into(),
            format!("{:.2}", b.available_balance),
        ],
    ];
    println!("{}", pretty_table(&["Vault", "Balance"], rows));
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let company_id = company_of(conn, sub)?;
    let vault = sub
        .get_one::<String>("vault")
        .map(|v| VaultType::parse(v.trim()))
        .transpose()?;
    let entries = ledger::list_cash_transactions(conn, company_id, vault, sub.get_flag("all"))?;
    if maybe_print_json(json_flag, jsonl_flag, &entries)? {
        return Ok(());
    }
    let rows = entries
        .iter()
        .map(|e| {
            vec![
                e.id.to_string(),
                e.created_at.clone(),
                e.vault.as_str().to_string(),
                e.entry.as_str().to_string(),
                format!("{:.2}", e.amount),
                e.description.clone(),
                e.related_vault
                    .map(|v| v.as_str().to_string())
                    .unwrap_or_default(),
                e.tags.join(","),
                if e.reversed { "yes" } else { "" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &[
                "ID", "Created", "Vault", "Entry", "Amount", "Description", "Related", "Tags",
                "Reversed"
            ],
            rows
        )
    );
    Ok(())
}

fn delete(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let company_id = company_of(conn, sub)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    ledger::delete_cash_transaction(conn, company_id, id)?;
    println!("Reversed cash transaction {}", id);
    Ok(())
}
