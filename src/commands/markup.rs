// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{company_of, compute_period, period_of};
use crate::core::aggregate;
use crate::core::metrics;
use crate::utils::{self, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Serialize)]
struct MarkupReport {
    direct_cost_total: Decimal,
    variable_expense_pct: Decimal,
    fixed_expense_pct: Decimal,
    desired_margin_pct: Decimal,
    markup_index: Decimal,
    suggested_price: Decimal,
}

/// Markup from the period's CD/DV/DF-tagged spending. DV% and DF% are
/// expense shares of net revenue; a zero-revenue period yields zero shares
/// rather than an error.
pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let company_id = company_of(conn, sub)?;
    let period = period_of(sub)?;
    let margin = parse_decimal(sub.get_one::<String>("margin").unwrap().trim())?;

    let categories = utils::load_categories(conn, company_id)?;
    let transactions = utils::load_transactions(conn, company_id)?;
    let fig = aggregate::aggregate_markup(&transactions, &categories, period);
    let net_revenue = compute_period(conn, company_id, period)?.stmt.net_revenue;

    let share = |amount: Decimal| {
        if net_revenue > Decimal::ZERO {
            amount / net_revenue * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    };
    let dv_pct = share(fig.variable_expenses);
    let df_pct = share(fig.fixed_expenses);
    let m = metrics::markup(fig.direct_cost_total, dv_pct, df_pct, margin);

    let report = MarkupReport {
        direct_cost_total: fig.direct_cost_total,
        variable_expense_pct: dv_pct,
        fixed_expense_pct: df_pct,
        desired_margin_pct: margin,
        markup_index: m.index,
        suggested_price: m.suggested_price,
    };
    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }
    if m.index.is_zero() {
        println!(
            "Margin {}% is not attainable: DV {:.1}% + DF {:.1}% + margin leave no room in the price.",
            margin, dv_pct, df_pct
        );
        return Ok(());
    }
    let rows = vec![
        vec![
            "Direct costs (CD)".into(),
            format!("{:.2}", report.direct_cost_total),
        ],
        vec!["Variable expenses (DV)".into(), format!("{:.1}%", dv_pct)],
        vec!["Fixed expenses (DF)".into(), format!("{:.1}%", df_pct)],
        vec!["Desired margin".into(), format!("{:.1}%", margin)],
        vec!["Markup index".into(), format!("{:.4}", m.index)],
        vec![
            "Suggested price".into(),
            format!("{:.2}", m.suggested_price),
        ],
    ];
    println!("{}", pretty_table(&["Markup", "Value"], rows));
    Ok(())
}
