// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{company_of, compute_period, period_of};
use crate::core::statement::Statement;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let company_id = company_of(conn, sub)?;
    let period = period_of(sub)?;
    let figures = compute_period(conn, company_id, period)?;
    if maybe_print_json(json_flag, jsonl_flag, &figures.stmt)? {
        return Ok(());
    }
    println!("DRE {:02}/{}", period.month, period.year);
    println!("{}", statement_table(&figures.stmt));
    Ok(())
}

fn money(v: Decimal) -> String {
    format!("{:.2}", v)
}

fn pct(v: Decimal) -> String {
    format!("{:.1}%", v)
}

pub(crate) fn statement_rows(s: &Statement) -> Vec<Vec<String>> {
    vec![
        vec!["Gross revenue".into(), money(s.gross_revenue), String::new()],
        vec![
            "(-) Deductions".into(),
            money(s.deductions_total),
            pct(s.av_deductions),
        ],
        vec!["= Net revenue".into(), money(s.net_revenue), pct(Decimal::ONE_HUNDRED)],
        vec!["(-) COGS".into(), money(s.cogs), pct(s.av_cogs)],
        vec![
            "= Gross profit".into(),
            money(s.gross_profit),
            pct(s.gross_margin),
        ],
        vec![
            "(-) Operating expenses".into(),
            money(s.operating_expenses),
            pct(s.av_operating_expenses),
        ],
        vec![
            "= Operating profit".into(),
            money(s.operating_profit),
            pct(s.operating_margin),
        ],
        vec![
            "(-) Financial expenses".into(),
            money(s.financial_expenses),
            pct(s.av_financial_expenses),
        ],
        vec![
            "(+) Financial income".into(),
            money(s.financial_income),
            pct(s.av_financial_income),
        ],
        vec!["= Pre-tax profit".into(), money(s.pre_tax_profit), String::new()],
        vec!["(-) IRPJ".into(), money(s.income_tax), String::new()],
        vec![
            "(-) IRPJ surtax".into(),
            money(s.income_tax_surtax),
            String::new(),
        ],
        vec![
            "(-) CSLL".into(),
            money(s.social_contribution),
            pct(s.av_income_taxes),
        ],
        vec!["= Net profit".into(), money(s.net_profit), pct(s.net_margin)],
    ]
}

pub(crate) fn statement_table(s: &Statement) -> comfy_table::Table {
    pretty_table(&["Line", "Amount", "% of net"], statement_rows(s))
}
