// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{company_of, compute_period, period_of};
use crate::core::scenario::{self, Adjustments};
use crate::core::statement::Statement;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Serialize)]
struct ScenarioReport {
    adjustments: Adjustments,
    baseline: Statement,
    simulated: Statement,
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let company_id = company_of(conn, sub)?;
    let period = period_of(sub)?;
    let adj = Adjustments {
        revenue_pct: parse_decimal(sub.get_one::<String>("revenue").unwrap().trim())?,
        cogs_pct: parse_decimal(sub.get_one::<String>("cogs").unwrap().trim())?,
        opex_pct: parse_decimal(sub.get_one::<String>("opex").unwrap().trim())?,
        financial_expense_pct: parse_decimal(sub.get_one::<String>("financial").unwrap().trim())?,
    };

    let figures = compute_period(conn, company_id, period)?;
    let simulated = scenario::simulate(&figures.stmt, &adj, &figures.taxes);
    let report = ScenarioReport {
        adjustments: adj,
        baseline: figures.stmt,
        simulated,
    };
    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }

    println!(
        "Scenario {:02}/{}: revenue {:+}%, cogs {:+}%, opex {:+}%, financial {:+}%",
        period.month, period.year, adj.revenue_pct, adj.cogs_pct, adj.opex_pct,
        adj.financial_expense_pct
    );
    let line = |label: &str, base: Decimal, sim: Decimal| {
        vec![
            label.to_string(),
            format!("{:.2}", base),
            format!("{:.2}", sim),
            format!("{:+.2}", sim - base),
        ]
    };
    let b = &report.baseline;
    let s = &report.simulated;
    let rows = vec![
        line("Gross revenue", b.gross_revenue, s.gross_revenue),
        line("Deductions", b.deductions_total, s.deductions_total),
        line("Net revenue", b.net_revenue, s.net_revenue),
        line("COGS", b.cogs, s.cogs),
        line("Gross profit", b.gross_profit, s.gross_profit),
        line("Operating expenses", b.operating_expenses, s.operating_expenses),
        line("Operating profit", b.operating_profit, s.operating_profit),
        line("Financial expenses", b.financial_expenses, s.financial_expenses),
        line("Pre-tax profit", b.pre_tax_profit, s.pre_tax_profit),
        line("Income taxes", b.income_taxes_total, s.income_taxes_total),
        line("Net profit", b.net_profit, s.net_profit),
    ];
    println!(
        "{}",
        pretty_table(&["Line", "Baseline", "Simulated", "Delta"], rows)
    );
    println!(
        "Net margin: {:.1}% -> {:.1}%",
        b.net_margin, s.net_margin
    );
    Ok(())
}
