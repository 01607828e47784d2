// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{company_of, period_of};
use crate::models::TransactionKind;
use crate::utils::{
    id_for_category, id_for_client, maybe_print_json, parse_date, parse_decimal, pretty_table,
};
use anyhow::{Result, bail};
use chrono::Datelike;
use rusqlite::{Connection, params};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("delete", sub)) => delete(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let company_id = company_of(conn, sub)?;
    let date = parse_date(sub.get_one::<String>("date").unwrap().trim())?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;
    if amount <= rust_decimal::Decimal::ZERO {
        bail!("Amount must be positive, got {}", amount);
    }
    let description = sub.get_one::<String>("description").unwrap();
    let kind = TransactionKind::parse(sub.get_one::<String>("kind").unwrap().trim())?;
    let category_id = sub
        .get_one::<String>("category")
        .map(|c| id_for_category(conn, company_id, c.trim()))
        .transpose()?;
    let client_id = sub
        .get_one::<String>("client")
        .map(|c| id_for_client(conn, company_id, c.trim()))
        .transpose()?;

    conn.execute(
        "INSERT INTO transactions(company_id, date, month, year, amount, description,
            category_id, client_id, transaction_kind, is_new_client, is_marketing_cost, is_sales_cost)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12)",
        params![
            company_id,
            date.to_string(),
            date.month(),
            date.year(),
            amount.to_string(),
            description,
            category_id,
            client_id,
            kind.as_str(),
            sub.get_flag("new-client"),
            sub.get_flag("marketing"),
            sub.get_flag("sales"),
        ],
    )?;
    println!("Recorded {} on {} ({})", amount, date, description);
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub amount: String,
    pub description: String,
    pub category: String,
    pub client: String,
    pub kind: String,
    pub flags: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let company_id = company_of(conn, sub)?;
    let period = period_of(sub)?;

    let mut sql = String::from(
        "SELECT t.id, t.date, t.amount, t.description, c.name, cl.name, t.transaction_kind,
                t.is_new_client, t.is_marketing_cost, t.is_sales_cost
         FROM transactions t
         LEFT JOIN dre_categories c ON t.category_id=c.id
         LEFT JOIN clients cl ON t.client_id=cl.id
         WHERE t.company_id=?1 AND t.month=?2 AND t.year=?3",
    );
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![
        Box::new(company_id),
        Box::new(period.month),
        Box::new(period.year),
    ];
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND c.name=?4");
        params_vec.push(Box::new(cat.trim().to_string()));
    }
    sql.push_str(" ORDER BY t.date DESC, t.id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(&format!(" LIMIT {}", limit));
    }

    let mut stmt = conn.prepare(&sql)?;
    let refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(refs))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let mut flags = Vec::new();
        if r.get::<_, bool>(7)? {
            flags.push("new-client");
        }
        if r.get::<_, bool>(8)? {
            flags.push("marketing");
        }
        if r.get::<_, bool>(9)? {
            flags.push("sales");
        }
        data.push(TransactionRow {
            id: r.get(0)?,
            date: r.get(1)?,
            amount: r.get(2)?,
            description: r.get(3)?,
            category: r.get::<_, Option<String>>(4)?.unwrap_or_default(),
            client: r.get::<_, Option<String>>(5)?.unwrap_or_default(),
            kind: r.get(6)?,
            flags: flags.join(","),
        });
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.amount.clone(),
                    r.description.clone(),
                    r.category.clone(),
                    r.client.clone(),
                    r.kind.clone(),
                    r.flags.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Amount", "Description", "Category", "Client", "Kind", "Flags"],
                rows,
            )
        );
    }
    Ok(())
}

fn delete(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let company_id = company_of(conn, sub)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute(
        "DELETE FROM transactions WHERE company_id=?1 AND id=?2",
        params![company_id, id],
    )?;
    if n == 0 {
        bail!("Transaction {} not found", id);
    }
    println!("Deleted transaction {}", id);
    Ok(())
}
