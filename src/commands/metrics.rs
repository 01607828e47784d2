// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::cache;
use crate::commands::{company_of, period_of};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, sub)?,
        Some(("recalc", sub)) => recalc(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let company_id = company_of(conn, sub)?;
    let period = period_of(sub)?;
    let Some(snap) = cache::read_snapshot(conn, company_id, period.month, period.year)? else {
        println!(
            "No metrics snapshot for {:02}/{}. Run `metrics recalc` first.",
            period.month, period.year
        );
        return Ok(());
    };
    if maybe_print_json(json_flag, jsonl_flag, &snap)? {
        return Ok(());
    }
    let rows = vec![
        vec!["Total revenue".into(), format!("{:.2}", snap.total_revenue)],
        vec!["Tax deductions".into(), format!("{:.2}", snap.tax_deductions)],
        vec!["Net revenue".into(), format!("{:.2}", snap.net_revenue)],
        vec!["Fixed costs".into(), format!("{:.2}", snap.fixed_costs)],
        vec!["Variable costs".into(), format!("{:.2}", snap.variable_costs)],
        vec![
            "Contribution margin".into(),
            format!("{:.2}", snap.contribution_margin),
        ],
        vec![
            "Break-even point".into(),
            format!("{:.2}", snap.break_even_point),
        ],
        vec!["Safety margin".into(), format!("{:.2}", snap.safety_margin)],
        vec![
            "Marketing costs".into(),
            format!("{:.2}", snap.marketing_costs),
        ],
        vec!["Sales costs".into(), format!("{:.2}", snap.sales_costs)],
        vec!["New clients".into(), snap.new_clients_count.to_string()],
        vec![
            "Active clients".into(),
            snap.total_active_clients.to_string(),
        ],
        vec!["Sales count".into(), snap.total_sales_count.to_string()],
        vec!["CAC".into(), format!("{:.2}", snap.cac)],
        vec!["Average ticket".into(), format!("{:.2}", snap.average_ticket)],
        vec!["LTV".into(), format!("{:.2}", snap.ltv)],
        vec!["LTV/CAC".into(), format!("{:.2}", snap.ltv_cac_ratio)],
        vec!["ROI".into(), format!("{:.1}%", snap.roi)],
        vec!["Calculated at".into(), snap.last_calculated_at.clone()],
    ];
    println!("Metrics {:02}/{}", period.month, period.year);
    println!("{}", pretty_table(&["Metric", "Value"], rows));
    Ok(())
}

fn recalc(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let company_id = company_of(conn, sub)?;
    let period = period_of(sub)?;
    let (_, m) = cache::recalculate_and_cache(conn, company_id, period.month, period.year)?;
    if !m.break_even_computable {
        println!(
            "Warning: contribution margin rate is not positive for {:02}/{}; \
             break-even is not reachable at current figures.",
            period.month, period.year
        );
    }
    println!(
        "Recalculated metrics for {:02}/{} (break-even {:.2})",
        period.month, period.year, m.break_even_point
    );
    Ok(())
}
