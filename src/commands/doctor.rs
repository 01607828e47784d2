// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::company_of;
use crate::ledger;
use crate::models::VaultType;
use crate::utils::load_categories;
use anyhow::Result;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Consistency checks: categories that silently fall back to "fixed",
/// transactions the statement cannot place, unbalanced transfer groups and
/// vaults driven negative by out-of-band writes.
pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let company_id = company_of(conn, sub)?;
    let mut issues = 0usize;

    for cat in load_categories(conn, company_id)? {
        use crate::models::CategoryType::{Cost, Expense};
        if matches!(cat.category_type, Cost | Expense) && cat.cost_classification.is_none() {
            println!(
                "- Category '{}' ({}) has no fixed/variable classification; it counts as fixed",
                cat.name,
                cat.category_type.as_str()
            );
            issues += 1;
        }
    }

    let uncategorized: i64 = conn.query_row(
        "SELECT COUNT(*) FROM transactions WHERE company_id=?1 AND category_id IS NULL",
        params![company_id],
        |r| r.get(0),
    )?;
    if uncategorized > 0 {
        println!(
            "- {} transaction(s) have no category and are excluded from the statement",
            uncategorized
        );
        issues += 1;
    }

    issues += unbalanced_transfers(conn, company_id)?;

    for vault in VaultType::ALL {
        let balance = ledger::vault_balance(conn, company_id, vault)?;
        if balance < Decimal::ZERO {
            println!("- Vault {} has negative balance {}", vault.as_str(), balance);
            issues += 1;
        }
    }

    if issues == 0 {
        println!("No issues found.");
    } else {
        println!("{} issue(s) found.", issues);
    }
    Ok(())
}

/// Transfer groups with a counterpart vault must debit and credit the same
/// total. Deposits and withdrawals (no related vault) are one-sided and
/// skipped. Amounts are stored as text, so the sums run over parsed
/// decimals instead of SQL aggregates.
fn unbalanced_transfers(conn: &Connection, company_id: i64) -> Result<usize> {
    let mut stmt = conn.prepare(
        "SELECT transfer_group, transaction_type, amount FROM cash_transactions
         WHERE company_id=?1 AND related_vault_type IS NOT NULL
         ORDER BY transfer_group",
    )?;
    let mut cur = stmt.query(params![company_id])?;
    let mut groups: BTreeMap<i64, (Decimal, Decimal)> = BTreeMap::new();
    while let Some(r) = cur.next()? {
        let group: i64 = r.get(0)?;
        let entry: String = r.get(1)?;
        let amount: String = r.get(2)?;
        let amount = crate::utils::parse_decimal(&amount)?;
        let sums = groups.entry(group).or_default();
        if entry == "transfer_in" {
            sums.0 += amount;
        } else {
            sums.1 += amount;
        }
    }
    let mut issues = 0usize;
    for (group, (inflow, outflow)) in groups {
        if inflow != outflow {
            println!(
                "- Transfer group {} is unbalanced: in {} vs out {}",
                group, inflow, outflow
            );
            issues += 1;
        }
    }
    Ok(issues)
}
