// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::company_of;
use crate::utils::{load_tax_config, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Result, bail};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, sub)?,
        Some(("set", sub)) => set(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn fmt_rate(v: Option<Decimal>) -> String {
    match v {
        Some(d) => format!("{}%", d),
        None => "-".to_string(),
    }
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let company_id = company_of(conn, sub)?;
    let cfg = load_tax_config(conn, company_id)?;
    if maybe_print_json(json_flag, jsonl_flag, &cfg)? {
        return Ok(());
    }
    let rows = vec![
        vec!["Regime".into(), cfg.regime_type.as_str().to_string()],
        vec!["Use DAS".into(), cfg.use_das.to_string()],
        vec!["DAS".into(), fmt_rate(cfg.das_rate)],
        vec!["ICMS".into(), fmt_rate(cfg.icms_rate)],
        vec!["IPI".into(), fmt_rate(cfg.ipi_rate)],
        vec!["PIS".into(), fmt_rate(cfg.pis_rate)],
        vec!["COFINS".into(), fmt_rate(cfg.cofins_rate)],
        vec!["ISS".into(), fmt_rate(cfg.iss_rate)],
        vec!["IRPJ".into(), fmt_rate(cfg.irpj_rate)],
        vec!["IRPJ surtax".into(), fmt_rate(cfg.irpj_additional_rate)],
        vec![
            "IRPJ surtax threshold".into(),
            cfg.irpj_additional_threshold
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".into()),
        ],
        vec!["CSLL".into(), fmt_rate(cfg.csll_rate)],
    ];
    println!("{}", pretty_table(&["Tax", "Rate"], rows));
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let company_id = company_of(conn, sub)?;
    // Existence check before piecemeal updates
    load_tax_config(conn, company_id)?;

    let mut updated = 0usize;
    let rate_cols = [
        ("icms", "icms_rate"),
        ("ipi", "ipi_rate"),
        ("pis", "pis_rate"),
        ("cofins", "cofins_rate"),
        ("iss", "iss_rate"),
        ("das", "das_rate"),
        ("irpj", "irpj_rate"),
        ("irpj-additional", "irpj_additional_rate"),
        ("irpj-threshold", "irpj_additional_threshold"),
        ("csll", "csll_rate"),
    ];
    for (arg, col) in rate_cols {
        if let Some(raw) = sub.get_one::<String>(arg) {
            let value = parse_decimal(raw.trim())?;
            if value < Decimal::ZERO {
                bail!("Rate --{} must not be negative, got {}", arg, value);
            }
            conn.execute(
                &format!(
                    "UPDATE tax_configurations SET {}=?1, updated_at=datetime('now') WHERE company_id=?2",
                    col
                ),
                params![value.to_string(), company_id],
            )?;
            updated += 1;
        }
    }
    if let Some(raw) = sub.get_one::<String>("use-das") {
        let flag = match raw.trim() {
            "true" => true,
            "false" => false,
            other => bail!("--use-das expects true or false, got '{}'", other),
        };
        conn.execute(
            "UPDATE tax_configurations SET use_das=?1, updated_at=datetime('now') WHERE company_id=?2",
            params![flag, company_id],
        )?;
        updated += 1;
    }
    if updated == 0 {
        bail!("No rates given; nothing to update");
    }
    println!("Updated {} tax setting(s)", updated);
    Ok(())
}
