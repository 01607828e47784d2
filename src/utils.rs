// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{
    Category, CategoryType, Client, CostClassification, MarkupType, TaxConfiguration, TaxRegime,
    Transaction, TransactionKind,
};
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn parse_month(s: &str) -> Result<u32> {
    let m: u32 = s
        .parse()
        .with_context(|| format!("Invalid month '{}'", s))?;
    if !(1..=12).contains(&m) {
        anyhow::bail!("Month {} out of range 1-12", m);
    }
    Ok(m)
}

pub fn parse_year(s: &str) -> Result<i32> {
    s.parse::<i32>()
        .with_context(|| format!("Invalid year '{}'", s))
}

pub fn current_period() -> (u32, i32) {
    let today = chrono::Utc::now().date_naive();
    (today.month(), today.year())
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

pub fn id_for_company(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM companies WHERE name=?1")?;
    let id: i64 = stmt
        .query_row(params![name], |r| r.get(0))
        .with_context(|| format!("Company '{}' not found", name))?;
    Ok(id)
}

pub fn id_for_category(conn: &Connection, company_id: i64, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM dre_categories WHERE company_id=?1 AND name=?2")?;
    let id: i64 = stmt
        .query_row(params![company_id, name], |r| r.get(0))
        .with_context(|| format!("Category '{}' not found", name))?;
    Ok(id)
}

pub fn id_for_client(conn: &Connection, company_id: i64, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM clients WHERE company_id=?1 AND name=?2")?;
    let id: i64 = stmt
        .query_row(params![company_id, name], |r| r.get(0))
        .with_context(|| format!("Client '{}' not found", name))?;
    Ok(id)
}

fn opt_decimal(v: Option<String>, what: &str) -> Result<Option<Decimal>> {
    match v {
        Some(s) => Ok(Some(
            s.parse::<Decimal>()
                .with_context(|| format!("Invalid {} '{}'", what, s))?,
        )),
        None => Ok(None),
    }
}

pub fn load_tax_config(conn: &Connection, company_id: i64) -> Result<TaxConfiguration> {
    let mut stmt = conn.prepare(
        "SELECT icms_rate, ipi_rate, pis_rate, cofins_rate, iss_rate, das_rate, use_das,
                irpj_rate, irpj_additional_rate, irpj_additional_threshold, csll_rate, regime_type
         FROM tax_configurations WHERE company_id=?1",
    )?;
    let row = stmt
        .query_row(params![company_id], |r| {
            Ok((
                r.get::<_, Option<String>>(0)?,
                r.get::<_, Option<String>>(1)?,
                r.get::<_, Option<String>>(2)?,
                r.get::<_, Option<String>>(3)?,
                r.get::<_, Option<String>>(4)?,
                r.get::<_, Option<String>>(5)?,
                r.get::<_, bool>(6)?,
                r.get::<_, Option<String>>(7)?,
                r.get::<_, Option<String>>(8)?,
                r.get::<_, Option<String>>(9)?,
                r.get::<_, Option<String>>(10)?,
                r.get::<_, String>(11)?,
            ))
        })
        .with_context(|| format!("Tax configuration for company {} not found", company_id))?;
    Ok(TaxConfiguration {
        company_id,
        icms_rate: opt_decimal(row.0, "icms_rate")?,
        ipi_rate: opt_decimal(row.1, "ipi_rate")?,
        pis_rate: opt_decimal(row.2, "pis_rate")?,
        cofins_rate: opt_decimal(row.3, "cofins_rate")?,
        iss_rate: opt_decimal(row.4, "iss_rate")?,
        das_rate: opt_decimal(row.5, "das_rate")?,
        use_das: row.6,
        irpj_rate: opt_decimal(row.7, "irpj_rate")?,
        irpj_additional_rate: opt_decimal(row.8, "irpj_additional_rate")?,
        irpj_additional_threshold: opt_decimal(row.9, "irpj_additional_threshold")?,
        csll_rate: opt_decimal(row.10, "csll_rate")?,
        regime_type: TaxRegime::parse(&row.11)?,
    })
}

pub fn load_categories(conn: &Connection, company_id: i64) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, category_type, cost_classification, markup_type, parent_id, is_active
         FROM dre_categories WHERE company_id=?1 ORDER BY name",
    )?;
    let mut cur = stmt.query(params![company_id])?;
    let mut out = Vec::new();
    while let Some(r) = cur.next()? {
        let category_type: String = r.get(2)?;
        let classification: Option<String> = r.get(3)?;
        let markup: Option<String> = r.get(4)?;
        out.push(Category {
            id: r.get(0)?,
            company_id,
            name: r.get(1)?,
            category_type: CategoryType::parse(&category_type)?,
            cost_classification: classification
                .map(|s| CostClassification::parse(&s))
                .transpose()?,
            markup_type: markup.map(|s| MarkupType::parse(&s)).transpose()?,
            parent_id: r.get(5)?,
            is_active: r.get(6)?,
        });
    }
    Ok(out)
}

pub fn load_clients(conn: &Connection, company_id: i64) -> Result<Vec<Client>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, email, phone, tax_id, first_purchase_date, is_active
         FROM clients WHERE company_id=?1 ORDER BY name",
    )?;
    let mut cur = stmt.query(params![company_id])?;
    let mut out = Vec::new();
    while let Some(r) = cur.next()? {
        let first_purchase: Option<String> = r.get(5)?;
        out.push(Client {
            id: r.get(0)?,
            company_id,
            name: r.get(1)?,
            email: r.get(2)?,
            phone: r.get(3)?,
            tax_id: r.get(4)?,
            first_purchase_date: first_purchase.map(|s| parse_date(&s)).transpose()?,
            is_active: r.get(6)?,
        });
    }
    Ok(out)
}

pub fn load_transactions(conn: &Connection, company_id: i64) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, month, year, amount, description, category_id, client_id,
                transaction_kind, is_new_client, is_marketing_cost, is_sales_cost
         FROM transactions WHERE company_id=?1 ORDER BY date, id",
    )?;
    let mut cur = stmt.query(params![company_id])?;
    let mut out = Vec::new();
    while let Some(r) = cur.next()? {
        let date: String = r.get(1)?;
        let amount: String = r.get(4)?;
        let kind: String = r.get(8)?;
        out.push(Transaction {
            id: r.get(0)?,
            company_id,
            date: parse_date(&date)?,
            month: r.get::<_, i64>(2)? as u32,
            year: r.get::<_, i64>(3)? as i32,
            amount: amount
                .parse::<Decimal>()
                .with_context(|| format!("Invalid amount '{}' in transactions", amount))?,
            description: r.get(5)?,
            category_id: r.get(6)?,
            client_id: r.get(7)?,
            kind: TransactionKind::parse(&kind)?,
            is_new_client: r.get(9)?,
            is_marketing_cost: r.get(10)?,
            is_sales_cost: r.get(11)?,
        });
    }
    Ok(out)
}

/// Look up an active goal target for a metric, if one was set.
pub fn goal_target(
    conn: &Connection,
    company_id: i64,
    metric: &str,
    month: u32,
    year: i32,
) -> Result<Option<Decimal>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT target_value FROM goals
             WHERE company_id=?1 AND metric_name=?2 AND period_month=?3 AND period_year=?4",
            params![company_id, metric, month, year],
            |r| r.get(0),
        )
        .optional()?;
    match v {
        Some(s) => Ok(Some(parse_decimal(&s)?)),
        None => Ok(None),
    }
}
