// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::cache::{self, MetricsSnapshot};
use crate::commands::{company_of, period_of};
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Result, bail};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use serde::Serialize;

const KNOWN_METRICS: [&str; 12] = [
    "total_revenue",
    "net_revenue",
    "fixed_costs",
    "variable_costs",
    "contribution_margin",
    "break_even_point",
    "safety_margin",
    "cac",
    "average_ticket",
    "ltv",
    "ltv_cac_ratio",
    "roi",
];

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let company_id = company_of(conn, sub)?;
    let period = period_of(sub)?;
    let metric = sub.get_one::<String>("metric").unwrap().trim().to_string();
    if !KNOWN_METRICS.contains(&metric.as_str()) {
        bail!(
            "Unknown metric '{}'. Known metrics: {}",
            metric,
            KNOWN_METRICS.join(", ")
        );
    }
    let target = parse_decimal(sub.get_one::<String>("target").unwrap().trim())?;
    conn.execute(
        "INSERT INTO goals(company_id, metric_name, period_month, period_year, target_value)
         VALUES (?1,?2,?3,?4,?5)
         ON CONFLICT(company_id, metric_name, period_month, period_year)
         DO UPDATE SET target_value=excluded.target_value",
        params![
            company_id,
            metric,
            period.month,
            period.year,
            target.to_string()
        ],
    )?;
    println!(
        "Goal set: {} = {} for {:02}/{}",
        metric, target, period.month, period.year
    );
    Ok(())
}

fn snapshot_value(snap: &MetricsSnapshot, metric: &str) -> Option<Decimal> {
    match metric {
        "total_revenue" => Some(snap.total_revenue),
        "net_revenue" => Some(snap.net_revenue),
        "fixed_costs" => Some(snap.fixed_costs),
        "variable_costs" => Some(snap.variable_costs),
        "contribution_margin" => Some(snap.contribution_margin),
        "break_even_point" => Some(snap.break_even_point),
        "safety_margin" => Some(snap.safety_margin),
        "cac" => Some(snap.cac),
        "average_ticket" => Some(snap.average_ticket),
        "ltv" => Some(snap.ltv),
        "ltv_cac_ratio" => Some(snap.ltv_cac_ratio),
        "roi" => Some(snap.roi),
        _ => None,
    }
}

#[derive(Serialize)]
struct GoalRow {
    metric: String,
    target: Decimal,
    actual: Option<Decimal>,
    attainment_pct: Option<Decimal>,
}

fn attainment(target: Decimal, actual: Option<Decimal>) -> Option<Decimal> {
    match actual {
        Some(a) if target > Decimal::ZERO => Some(a / target * Decimal::ONE_HUNDRED),
        _ => None,
    }
}

/// Targets for the period against the latest cached actuals. Goals with no
/// snapshot yet show a blank actual.
fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let company_id = company_of(conn, sub)?;
    let period = period_of(sub)?;
    let snap = cache::read_snapshot(conn, company_id, period.month, period.year)?;

    let mut stmt = conn.prepare(
        "SELECT metric_name, target_value FROM goals
         WHERE company_id=?1 AND period_month=?2 AND period_year=?3 ORDER BY metric_name",
    )?;
    let mut cur = stmt.query(params![company_id, period.month, period.year])?;
    let mut data = Vec::new();
    while let Some(r) = cur.next()? {
        let metric: String = r.get(0)?;
        let target: String = r.get(1)?;
        let target = parse_decimal(&target)?;
        let actual = snap.as_ref().and_then(|s| snapshot_value(s, &metric));
        data.push(GoalRow {
            metric,
            target,
            actual,
            attainment_pct: attainment(target, actual),
        });
    }
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    let rows = data
        .iter()
        .map(|g| {
            vec![
                g.metric.clone(),
                format!("{:.2}", g.target),
                g.actual.map(|a| format!("{:.2}", a)).unwrap_or_default(),
                g.attainment_pct
                    .map(|p| format!("{:.1}%", p))
                    .unwrap_or_default(),
            ]
        })
        .collect();
    println!("Goals {:02}/{}", period.month, period.year);
    println!(
        "{}",
        pretty_table(&["Metric", "Target", "Actual", "Attainment"], rows)
    );
    Ok(())
}
