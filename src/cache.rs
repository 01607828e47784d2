// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::core::aggregate::{self, Period};
use crate::core::metrics::{self, Metrics};
use crate::core::statement::{self, Statement};
use crate::core::taxes::{self, ProfitTaxRates};
use crate::utils::{self, parse_decimal};
use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use serde::Serialize;

/// One row of the metrics cache, as read back for display. A materialized
/// snapshot only; safe to delete and regenerate at any time.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub period_month: u32,
    pub period_year: i32,
    pub total_revenue: Decimal,
    pub tax_deductions: Decimal,
    pub net_revenue: Decimal,
    pub fixed_costs: Decimal,
    pub variable_costs: Decimal,
    pub contribution_margin: Decimal,
    pub break_even_point: Decimal,
    pub safety_margin: Decimal,
    pub marketing_costs: Decimal,
    pub sales_costs: Decimal,
    pub new_clients_count: u32,
    pub total_active_clients: u32,
    pub total_sales_count: u32,
    pub cac: Decimal,
    pub average_ticket: Decimal,
    pub ltv: Decimal,
    pub ltv_cac_ratio: Decimal,
    pub roi: Decimal,
    pub last_calculated_at: String,
}

/// Aggregates the period, computes the statement and metrics, and
/// overwrites the cache snapshot. Re-running with unchanged transactions
/// converges to the same stored values, so no extra locking beyond the
/// upsert is needed.
pub fn recalculate_and_cache(
    conn: &Connection,
    company_id: i64,
    month: u32,
    year: i32,
) -> Result<(Statement, Metrics)> {
    let cfg = utils::load_tax_config(conn, company_id)?;
    let categories = utils::load_categories(conn, company_id)?;
    let clients = utils::load_clients(conn, company_id)?;
    let transactions = utils::load_transactions(conn, company_id)?;

    let agg = aggregate::aggregate(&transactions, &categories, &clients, Period { month, year });
    let deductions = taxes::resolve_deductions(&cfg, agg.revenue);
    let stmt = statement::compute_statement(&agg, &deductions, &ProfitTaxRates::from_config(&cfg));
    let m = metrics::compute_metrics(&stmt, &agg);

    conn.execute(
        "INSERT INTO metrics_cache(company_id, period_month, period_year,
            total_revenue, tax_deductions, net_revenue, fixed_costs, variable_costs,
            contribution_margin, break_even_point, safety_margin, marketing_costs, sales_costs,
            new_clients_count, total_active_clients, total_sales_count,
            cac, average_ticket, ltv, ltv_cac_ratio, roi, last_calculated_at)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16,?17,?18,?19,?20,?21,datetime('now'))
         ON CONFLICT(company_id, period_month, period_year) DO UPDATE SET
            total_revenue=excluded.total_revenue,
            tax_deductions=excluded.tax_deductions,
            net_revenue=excluded.net_revenue,
            fixed_costs=excluded.fixed_costs,
            variable_costs=excluded.variable_costs,
            contribution_margin=excluded.contribution_margin,
            break_even_point=excluded.break_even_point,
            safety_margin=excluded.safety_margin,
            marketing_costs=excluded.marketing_costs,
            sales_costs=excluded.sales_costs,
            new_clients_count=excluded.new_clients_count,
            total_active_clients=excluded.total_active_clients,
            total_sales_count=excluded.total_sales_count,
            cac=excluded.cac,
            average_ticket=excluded.average_ticket,
            ltv=excluded.ltv,
            ltv_cac_ratio=excluded.ltv_cac_ratio,
            roi=excluded.roi,
            last_calculated_at=excluded.last_calculated_at",
        params![
            company_id,
            month,
            year,
            stmt.gross_revenue.to_string(),
            stmt.deductions_total.to_string(),
            stmt.net_revenue.to_string(),
            m.fixed_costs.to_string(),
            m.variable_costs.to_string(),
            m.contribution_margin.to_string(),
            m.break_even_point.to_string(),
            m.safety_margin.to_string(),
            agg.marketing_costs.to_string(),
            agg.sales_costs.to_string(),
            agg.new_clients_count,
            agg.total_active_clients,
            agg.sales_count,
            m.cac.to_string(),
            m.average_ticket.to_string(),
            m.ltv.to_string(),
            m.ltv_cac_ratio.to_string(),
            m.roi.to_string(),
        ],
    )?;
    Ok((stmt, m))
}

pub fn read_snapshot(
    conn: &Connection,
    company_id: i64,
    month: u32,
    year: i32,
) -> Result<Option<MetricsSnapshot>> {
    let mut stmt = conn.prepare(
        "SELECT total_revenue, tax_deductions, net_revenue, fixed_costs, variable_costs,
                contribution_margin, break_even_point, safety_margin, marketing_costs, sales_costs,
                new_clients_count, total_active_clients, total_sales_count,
                cac, average_ticket, ltv, ltv_cac_ratio, roi, last_calculated_at
         FROM metrics_cache WHERE company_id=?1 AND period_month=?2 AND period_year=?3",
    )?;
    let row = stmt
        .query_row(params![company_id, month, year], |r| {
            let mut text = Vec::with_capacity(10);
            for i in 0..10 {
                text.push(r.get::<_, String>(i)?);
            }
            Ok((
                text,
                r.get::<_, i64>(10)?,
                r.get::<_, i64>(11)?,
                r.get::<_, i64>(12)?,
                r.get::<_, String>(13)?,
                r.get::<_, String>(14)?,
                r.get::<_, String>(15)?,
                r.get::<_, String>(16)?,
                r.get::<_, String>(17)?,
                r.get::<_, String>(18)?,
            ))
        })
        .optional()?;
    let Some((text, new_clients, active_clients, sales, cac, ticket, ltv, ratio, roi, at)) = row
    else {
        return Ok(None);
    };
    Ok(Some(MetricsSnapshot {
        period_month: month,
        period_year: year,
        total_revenue: parse_decimal(&text[0])?,
        tax_deductions: parse_decimal(&text[1])?,
        net_revenue: parse_decimal(&text[2])?,
        fixed_costs: parse_decimal(&text[3])?,
        variable_costs: parse_decimal(&text[4])?,
        contribution_margin: parse_decimal(&text[5])?,
        break_even_point: parse_decimal(&text[6])?,
        safety_margin: parse_decimal(&text[7])?,
        marketing_costs: parse_decimal(&text[8])?,
        sales_costs: parse_decimal(&text[9])?,
        new_clients_count: new_clients as u32,
        total_active_clients: active_clients as u32,
        total_sales_count: sales as u32,
        cac: parse_decimal(&cac)?,
        average_ticket: parse_decimal(&ticket)?,
        ltv: parse_decimal(&ltv)?,
        ltv_cac_ratio: parse_decimal(&ratio)?,
        roi: parse_decimal(&roi)?,
        last_calculated_at: at,
    }))
}
