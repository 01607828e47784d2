// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod companies;
pub mod taxes;
pub mod categories;
pub mod clients;
pub mod transactions;
pub mod reports;
pub mod metrics;
pub mod markup;
pub mod scenarios;
pub mod vaults;
pub mod goals;
pub mod exporter;
pub mod doctor;

use crate::core::aggregate::{self, Period};
use crate::core::statement::{self, Statement};
use crate::core::taxes::{self as core_taxes, ProfitTaxRates};
use crate::utils;
use anyhow::Result;
use rusqlite::Connection;

/// Month/year from `--month`/`--year`, defaulting to the current period.
pub(crate) fn period_of(sub: &clap::ArgMatches) -> Result<Period> {
    let (current_month, current_year) = crate::utils::current_period();
    let month = match sub.get_one::<String>("month") {
        Some(s) => crate::utils::parse_month(s.trim())?,
        None => current_month,
    };
    let year = match sub.get_one::<String>("year") {
        Some(s) => crate::utils::parse_year(s.trim())?,
        None => current_year,
    };
    Ok(Period { month, year })
}

pub(crate) fn company_of(conn: &rusqlite::Connection, sub: &clap::ArgMatches) -> Result<i64> {
    let name = sub.get_one::<String>("company").unwrap();
    crate::utils::id_for_company(conn, name.trim())
}

pub(crate) struct PeriodFigures {
    pub stmt: Statement,
    pub taxes: ProfitTaxRates,
}

/// Loads a company's data and runs the statement cascade for one period,
/// without touching the metrics cache.
pub(crate) fn compute_period(
    conn: &Connection,
    company_id: i64,
    period: Period,
) -> Result<PeriodFigures> {
    let cfg = utils::load_tax_config(conn, company_id)?;
    let categories = utils::load_categories(conn, company_id)?;
    let clients = utils::load_clients(conn, company_id)?;
    let transactions = utils::load_transactions(conn, company_id)?;

    let agg = aggregate::aggregate(&transactions, &categories, &clients, period);
    let deductions = core_taxes::resolve_deductions(&cfg, agg.revenue);
    let rates = ProfitTaxRates::from_config(&cfg);
    let stmt = statement::compute_statement(&agg, &deductions, &rates);
    Ok(PeriodFigures { stmt, taxes: rates })
}
