// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{company_of, compute_period, period_of};
use anyhow::{Context, Result};
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => transactions(conn, sub)?,
        Some(("dre", sub)) => dre(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let company_id = company_of(conn, sub)?;
    let out = sub.get_one::<String>("out").unwrap();
    let mut w = csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
    w.write_record([
        "date",
        "amount",
        "description",
        "category",
        "category_type",
        "client",
        "kind",
        "new_client",
        "marketing",
        "sales",
    ])?;

    let mut stmt = conn.prepare(
        "SELECT t.date, t.amount, t.description, c.name, c.category_type, cl.name,
                t.transaction_kind, t.is_new_client, t.is_marketing_cost, t.is_sales_cost
         FROM transactions t
         LEFT JOIN dre_categories c ON t.category_id=c.id
         LEFT JOIN clients cl ON t.client_id=cl.id
         WHERE t.company_id=?1 ORDER BY t.date, t.id",
    )?;
    let mut cur = stmt.query(params![company_id])?;
    let mut count = 0usize;
    while let Some(r) = cur.next()? {
        w.write_record([
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, Option<String>>(3)?.unwrap_or_default(),
            r.get::<_, Option<String>>(4)?.unwrap_or_default(),
            r.get::<_, Option<String>>(5)?.unwrap_or_default(),
            r.get::<_, String>(6)?,
            bool_cell(r.get(7)?),
            bool_cell(r.get(8)?),
            bool_cell(r.get(9)?),
        ])?;
        count += 1;
    }
    w.flush()?;
    println!("Exported {} transactions to {}", count, out);
    Ok(())
}

fn bool_cell(v: bool) -> String {
    if v { "1" } else { "0" }.to_string()
}

fn dre(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let company_id = company_of(conn, sub)?;
    let period = period_of(sub)?;
    let out = sub.get_one::<String>("out").unwrap();
    let figures = compute_period(conn, company_id, period)?;

    let mut w = csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
    w.write_record(["line", "amount", "pct_of_net"])?;
    for row in super::reports::statement_rows(&figures.stmt) {
        w.write_record(&row)?;
    }
    w.flush()?;
    println!("Exported DRE {:02}/{} to {}", period.month, period.year, out);
    Ok(())
}
