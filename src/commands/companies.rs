// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TaxRegime;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::{Connection, params};
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let regime = TaxRegime::parse(sub.get_one::<String>("regime").unwrap().trim())?;
    let tax_id = sub.get_one::<String>("tax-id").map(|s| s.trim().to_string());
    let business_category = sub
        .get_one::<String>("business-category")
        .map(|s| s.trim().to_string());
    let fiscal_period = sub.get_one::<String>("fiscal-period").unwrap();

    conn.execute(
        "INSERT INTO companies(name, tax_id, tax_regime, fiscal_period, business_category)
         VALUES (?1,?2,?3,?4,?5)",
        params![name, tax_id, regime.as_str(), fiscal_period, business_category],
    )?;
    let company_id = conn.last_insert_rowid();
    insert_default_tax_config(conn, company_id, regime)?;
    println!("Created company '{}' ({})", name, regime.as_str());
    Ok(())
}

/// Regime-appropriate starting rates: the unified DAS for the simplified
/// regime, the standard profit-tax rates otherwise. All editable later via
/// `taxes set`.
fn insert_default_tax_config(conn: &Connection, company_id: i64, regime: TaxRegime) -> Result<()> {
    match regime {
        TaxRegime::SimplesNacional => {
            conn.execute(
                "INSERT INTO tax_configurations(company_id, use_das, das_rate, regime_type)
                 VALUES (?1, 1, '6', ?2)",
                params![company_id, regime.as_str()],
            )?;
        }
        TaxRegime::LucroPresumido | TaxRegime::LucroReal => {
            conn.execute(
                "INSERT INTO tax_configurations(company_id, use_das, irpj_rate,
                    irpj_additional_rate, irpj_additional_threshold, csll_rate, regime_type)
                 VALUES (?1, 0, '15', '10', '20000', '9', ?2)",
                params![company_id, regime.as_str()],
            )?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct CompanyRow {
    name: String,
    tax_regime: String,
    tax_id: String,
    business_category: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut stmt = conn.prepare(
        "SELECT name, tax_regime, tax_id, business_category FROM companies ORDER BY name",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(CompanyRow {
            name: r.get(0)?,
            tax_regime: r.get(1)?,
            tax_id: r.get::<_, Option<String>>(2)?.unwrap_or_default(),
            business_category: r.get::<_, Option<String>>(3)?.unwrap_or_default(),
        })
    })?;
    let data: Vec<CompanyRow> = rows.collect::<std::result::Result<_, _>>()?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .into_iter()
            .map(|c| vec![c.name, c.tax_regime, c.tax_id, c.business_category])
            .collect();
        println!(
            "{}",
            pretty_table(&["Company", "Regime", "Tax ID", "Category"], rows)
        );
    }
    Ok(())
}
