// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Drecalc", "drecalc"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("drecalc.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS companies(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        tax_id TEXT,
        tax_regime TEXT NOT NULL
            CHECK(tax_regime IN ('simples_nacional','lucro_presumido','lucro_real')),
        fiscal_period TEXT NOT NULL DEFAULT 'monthly',
        business_category TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS tax_configurations(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        company_id INTEGER NOT NULL UNIQUE,
        icms_rate TEXT,
        ipi_rate TEXT,
        pis_rate TEXT,
        cofins_rate TEXT,
        iss_rate TEXT,
        das_rate TEXT,
        use_das INTEGER NOT NULL DEFAULT 0,
        irpj_rate TEXT,
        irpj_additional_rate TEXT,
        irpj_additional_threshold TEXT,
        csll_rate TEXT,
        regime_type TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(company_id) REFERENCES companies(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS dre_categories(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        company_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        category_type TEXT NOT NULL
            CHECK(category_type IN ('revenue','cost','expense','financial_expense','financial_income')),
        cost_classification TEXT
            CHECK(cost_classification IN ('fixed','variable')),
        markup_type TEXT CHECK(markup_type IN ('CD','DV','DF')),
        parent_id INTEGER,
        is_active INTEGER NOT NULL DEFAULT 1,
        UNIQUE(company_id, name),
        FOREIGN KEY(company_id) REFERENCES companies(id) ON DELETE CASCADE,
        FOREIGN KEY(parent_id) REFERENCES dre_categories(id) ON DELETE SET NULL
    );

    CREATE TABLE IF NOT EXISTS clients(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        company_id INTEGER NOT NULL,
        name TEXT NOT NULL,
        email TEXT,
        phone TEXT,
        tax_id TEXT,
        first_purchase_date TEXT,
        is_active INTEGER NOT NULL DEFAULT 1,
        UNIQUE(company_id, name),
        FOREIGN KEY(company_id) REFERENCES companies(id) ON DELETE CASCADE
    );

    -- month/year are denormalized from date so period scans stay indexable
    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        company_id INTEGER NOT NULL,
        date TEXT NOT NULL,
        month INTEGER NOT NULL,
        year INTEGER NOT NULL,
        amount TEXT NOT NULL,
        description TEXT NOT NULL,
        category_id INTEGER,
        client_id INTEGER,
        transaction_kind TEXT NOT NULL DEFAULT 'administrative'
            CHECK(transaction_kind IN ('administrative','operational')),
        is_new_client INTEGER NOT NULL DEFAULT 0,
        is_marketing_cost INTEGER NOT NULL DEFAULT 0,
        is_sales_cost INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(company_id) REFERENCES companies(id) ON DELETE CASCADE,
        FOREIGN KEY(category_id) REFERENCES dre_categories(id) ON DELETE SET NULL,
        FOREIGN KEY(client_id) REFERENCES clients(id) ON DELETE SET NULL
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_period ON transactions(company_id, year, month);

    CREATE TABLE IF NOT EXISTS cash_transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        company_id INTEGER NOT NULL,
        vault_type TEXT NOT NULL
            CHECK(vault_type IN ('main_balance','emergency_reserve','working_capital','investments','withdrawals')),
        transaction_type TEXT NOT NULL CHECK(transaction_type IN ('transfer_in','transfer_out')),
        amount TEXT NOT NULL,
        description TEXT NOT NULL,
        related_vault_type TEXT
            CHECK(related_vault_type IN ('main_balance','emergency_reserve','working_capital','investments','withdrawals')),
        tags TEXT NOT NULL DEFAULT '[]',
        transfer_group INTEGER NOT NULL,
        reversed INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(company_id) REFERENCES companies(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_cash_transactions_vault ON cash_transactions(company_id, vault_type);

    CREATE TABLE IF NOT EXISTS goals(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        company_id INTEGER NOT NULL,
        metric_name TEXT NOT NULL,
        period_month INTEGER NOT NULL,
        period_year INTEGER NOT NULL,
        target_value TEXT NOT NULL DEFAULT '0',
        UNIQUE(company_id, metric_name, period_month, period_year),
        FOREIGN KEY(company_id) REFERENCES companies(id) ON DELETE CASCADE
    );

    -- Materialized snapshot of the derived metrics; overwritten by an
    -- explicit recalculation, never a source of truth.
    CREATE TABLE IF NOT EXISTS metrics_cache(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        company_id INTEGER NOT NULL,
        period_month INTEGER NOT NULL,
        period_year INTEGER NOT NULL,
        total_revenue TEXT NOT NULL DEFAULT '0',
        tax_deductions TEXT NOT NULL DEFAULT '0',
        net_revenue TEXT NOT NULL DEFAULT '0',
        fixed_costs TEXT NOT NULL DEFAULT '0',
        variable_costs TEXT NOT NULL DEFAULT '0',
        contribution_margin TEXT NOT NULL DEFAULT '0',
        break_even_point TEXT NOT NULL DEFAULT '0',
        safety_margin TEXT NOT NULL DEFAULT '0',
        marketing_costs TEXT NOT NULL DEFAULT '0',
        sales_costs TEXT NOT NULL DEFAULT '0',
        new_clients_count INTEGER NOT NULL DEFAULT 0,
        total_active_clients INTEGER NOT NULL DEFAULT 0,
        total_sales_count INTEGER NOT NULL DEFAULT 0,
        cac TEXT NOT NULL DEFAULT '0',
        average_ticket TEXT NOT NULL DEFAULT '0',
        ltv TEXT NOT NULL DEFAULT '0',
        ltv_cac_ratio TEXT NOT NULL DEFAULT '0',
        roi TEXT NOT NULL DEFAULT '0',
        last_calculated_at TEXT NOT NULL DEFAULT (datetime('now')),
        UNIQUE(company_id, period_month, period_year),
        FOREIGN KEY(company_id) REFERENCES companies(id) ON DELETE CASCADE
    );
    "#,
    )?;
    Ok(())
}
