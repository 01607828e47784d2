// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{CashTransaction, EntryKind, VaultType};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid transfer: {0}")]
    Validation(String),
    #[error("insufficient balance in {vault}: available {available}, requested {requested}")]
    InsufficientBalance {
        vault: &'static str,
        available: Decimal,
        requested: Decimal,
    },
    #[error("cash transaction {0} not found")]
    NotFound(i64),
    #[error("invalid amount '{0}' stored in ledger")]
    Corrupt(String),
    #[error(transparent)]
    Db(#[from] rusqlite::Error),
    #[error(transparent)]
    Tags(#[from] serde_json::Error),
}

/// Per-vault balances plus the company-level cash position.
/// `available_balance` tracks the net result of all recorded transactions
/// (the statement's net-balance concept); the main vault's ledger sum is
/// informational, not the authoritative cash position.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VaultBalances {
    pub main_balance: Decimal,
    pub emergency_reserve: Decimal,
    pub working_capital: Decimal,
    pub investments: Decimal,
    pub withdrawals: Decimal,
    pub net_balance: Decimal,
    pub available_balance: Decimal,
}

fn parse_amount(s: &str) -> Result<Decimal, LedgerError> {
    s.parse::<Decimal>()
        .map_err(|_| LedgerError::Corrupt(s.to_string()))
}

/// Running sum of a vault's entries: transfer_in minus transfer_out.
/// Reversed rows stay in the sum; a reversal nets out by its compensating
/// rows, never by dropping history.
pub fn vault_balance(
    conn: &Connection,
    company_id: i64,
    vault: VaultType,
) -> Result<Decimal, LedgerError> {
    let mut stmt = conn.prepare(
        "SELECT transaction_type, amount FROM cash_transactions
         WHERE company_id=?1 AND vault_type=?2",
    )?;
    let mut cur = stmt.query(params![company_id, vault.as_str()])?;
    let mut total = Decimal::ZERO;
    while let Some(r) = cur.next()? {
        let entry: String = r.get(0)?;
        let amount: String = r.get(1)?;
        let amount = parse_amount(&amount)?;
        if entry == "transfer_in" {
            total += amount;
        } else {
            total -= amount;
        }
    }
    Ok(total)
}

fn next_transfer_group(conn: &Connection, company_id: i64) -> Result<i64, LedgerError> {
    let next: i64 = conn.query_row(
        "SELECT IFNULL(MAX(transfer_group),0)+1 FROM cash_transactions WHERE company_id=?1",
        params![company_id],
        |r| r.get(0),
    )?;
    Ok(next)
}

#[allow(clippy::too_many_arguments)]
fn insert_entry(
    conn: &Connection,
    company_id: i64,
    vault: VaultType,
    entry: EntryKind,
    amount: Decimal,
    description: &str,
    related: Option<VaultType>,
    tags_json: &str,
    group: i64,
    reversed: bool,
) -> Result<(), LedgerError> {
    conn.execute(
        "INSERT INTO cash_transactions(company_id, vault_type, transaction_type, amount,
            description, related_vault_type, tags, transfer_group, reversed)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9)",
        params![
            company_id,
            vault.as_str(),
            entry.as_str(),
            amount.to_string(),
            description,
            related.map(|v| v.as_str()),
            tags_json,
            group,
            reversed,
        ],
    )?;
    Ok(())
}

/// Moves `amount` between two vaults, writing the debit and credit entries
/// in one database transaction. The sufficiency check runs inside that
/// transaction so two concurrent transfers cannot both pass it against a
/// stale balance.
pub fn transfer(
    conn: &mut Connection,
    company_id: i64,
    from: VaultType,
    to: VaultType,
    amount: Decimal,
    description: &str,
    tags: &[String],
) -> Result<i64, LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::Validation(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    if from == to {
        return Err(LedgerError::Validation(format!(
            "source and destination vault are both {}",
            from.as_str()
        )));
    }
    let tags_json = serde_json::to_string(tags)?;
    let tx = conn.transaction()?;
    let available = vault_balance(&tx, company_id, from)?;
    if available < amount {
        return Err(LedgerError::InsufficientBalance {
            vault: from.as_str(),
            available,
            requested: amount,
        });
    }
    let group = next_transfer_group(&tx, company_id)?;
    insert_entry(
        &tx, company_id, from, EntryKind::TransferOut, amount, description, Some(to), &tags_json,
        group, false,
    )?;
    insert_entry(
        &tx, company_id, to, EntryKind::TransferIn, amount, description, Some(from), &tags_json,
        group, false,
    )?;
    tx.commit()?;
    Ok(group)
}

/// Records money entering the vault system from outside (no counterpart
/// vault).
pub fn deposit(
    conn: &mut Connection,
    company_id: i64,
    vault: VaultType,
    amount: Decimal,
    description: &str,
    tags: &[String],
) -> Result<i64, LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::Validation(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    let tags_json = serde_json::to_string(tags)?;
    let tx = conn.transaction()?;
    let group = next_transfer_group(&tx, company_id)?;
    insert_entry(
        &tx, company_id, vault, EntryKind::TransferIn, amount, description, None, &tags_json,
        group, false,
    )?;
    tx.commit()?;
    Ok(group)
}

/// Records money leaving the vault system, subject to the same sufficiency
/// check as transfers.
pub fn withdraw(
    conn: &mut Connection,
    company_id: i64,
    vault: VaultType,
    amount: Decimal,
    description: &str,
    tags: &[String],
) -> Result<i64, LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::Validation(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    let tags_json = serde_json::to_string(tags)?;
    let tx = conn.transaction()?;
    let available = vault_balance(&tx, company_id, vault)?;
    if available < amount {
        return Err(LedgerError::InsufficientBalance {
            vault: vault.as_str(),
            available,
            requested: amount,
        });
    }
    let group = next_transfer_group(&tx, company_id)?;
    insert_entry(
        &tx, company_id, vault, EntryKind::TransferOut, amount, description, None, &tags_json,
        group, false,
    )?;
    tx.commit()?;
    Ok(group)
}

fn load_group(
    conn: &Connection,
    company_id: i64,
    group: i64,
) -> Result<Vec<CashTransaction>, LedgerError> {
    let mut stmt = conn.prepare(
        "SELECT id, vault_type, transaction_type, amount, description, related_vault_type,
                tags, transfer_group, reversed, created_at
         FROM cash_transactions WHERE company_id=?1 AND transfer_group=?2 ORDER BY id",
    )?;
    let mut cur = stmt.query(params![company_id, group])?;
    let mut rows = Vec::new();
    while let Some(r) = cur.next()? {
        rows.push(row_to_cash_transaction(company_id, r)?);
    }
    Ok(rows)
}

fn row_to_cash_transaction(
    company_id: i64,
    r: &rusqlite::Row<'_>,
) -> Result<CashTransaction, LedgerError> {
    let vault: String = r.get(1)?;
    let entry: String = r.get(2)?;
    let amount: String = r.get(3)?;
    let related: Option<String> = r.get(5)?;
    let tags_json: String = r.get(6)?;
    let corrupt = |s: &str| LedgerError::Corrupt(s.to_string());
    Ok(CashTransaction {
        id: r.get(0)?,
        company_id,
        vault: VaultType::parse(&vault).map_err(|_| corrupt(&vault))?,
        entry: EntryKind::parse(&entry).map_err(|_| corrupt(&entry))?,
        amount: parse_amount(&amount)?,
        description: r.get(4)?,
        related_vault: match related {
            Some(v) => Some(VaultType::parse(&v).map_err(|_| corrupt(&v))?),
            None => None,
        },
        tags: serde_json::from_str(&tags_json)?,
        transfer_group: r.get(7)?,
        reversed: r.get(8)?,
        created_at: r.get(9)?,
    })
}

/// Deletes a cash transaction by reversal: the whole transfer group the row
/// belongs to is compensated with mirror entries and flagged reversed.
/// History is never rewritten, so vault balances stay consistent with the
/// counterpart vault's remaining entries.
pub fn delete_cash_transaction(
    conn: &mut Connection,
    company_id: i64,
    id: i64,
) -> Result<(), LedgerError> {
    let tx = conn.transaction()?;

    let group: Option<i64> = tx
        .query_row(
            "SELECT transfer_group FROM cash_transactions WHERE company_id=?1 AND id=?2",
            params![company_id, id],
            |r| r.get(0),
        )
        .optional()?;
    let group = group.ok_or(LedgerError::NotFound(id))?;
    let rows = load_group(&tx, company_id, group)?;
    if rows.iter().any(|r| r.reversed) {
        return Err(LedgerError::Validation(format!(
            "cash transaction {} was already reversed",
            id
        )));
    }

    // A compensating transfer debits every vault the original credited, so
    // that vault must still hold the amount.
    for row in &rows {
        if row.entry == EntryKind::TransferIn {
            let available = vault_balance(&tx, company_id, row.vault)?;
            if available < row.amount {
                return Err(LedgerError::InsufficientBalance {
                    vault: row.vault.as_str(),
                    available,
                    requested: row.amount,
                });
            }
        }
    }

    let reversal_group = next_transfer_group(&tx, company_id)?;
    for row in &rows {
        let mirrored = match row.entry {
            EntryKind::TransferIn => EntryKind::TransferOut,
            EntryKind::TransferOut => EntryKind::TransferIn,
        };
        let tags_json = serde_json::to_string(&row.tags)?;
        insert_entry(
            &tx,
            company_id,
            row.vault,
            mirrored,
            row.amount,
            &format!("Reversal: {}", row.description),
            row.related_vault,
            &tags_json,
            reversal_group,
            true,
        )?;
    }
    tx.execute(
        "UPDATE cash_transactions SET reversed=1 WHERE company_id=?1 AND transfer_group=?2",
        params![company_id, group],
    )?;
    tx.commit()?;
    Ok(())
}

pub fn list_cash_transactions(
    conn: &Connection,
    company_id: i64,
    vault: Option<VaultType>,
    include_reversed: bool,
) -> Result<Vec<CashTransaction>, LedgerError> {
    let mut sql = String::from(
        "SELECT id, vault_type, transaction_type, amount, description, related_vault_type,
                tags, transfer_group, reversed, created_at
         FROM cash_transactions WHERE company_id=?1",
    );
    if vault.is_some() {
        sql.push_str(" AND vault_type=?2");
    }
    if !include_reversed {
        sql.push_str(" AND reversed=0");
    }
    sql.push_str(" ORDER BY created_at DESC, id DESC");
    let mut stmt = conn.prepare(&sql)?;
    let mut cur = match vault {
        Some(v) => stmt.query(params![company_id, v.as_str()])?,
        None => stmt.query(params![company_id])?,
    };
    let mut rows = Vec::new();
    while let Some(r) = cur.next()? {
        rows.push(row_to_cash_transaction(company_id, r)?);
    }
    Ok(rows)
}

/// Per-vault sums plus the company cash position. Net balance is the net
/// result of all recorded transactions: revenue and financial income minus
/// costs, expenses and financial expenses.
pub fn get_balances(conn: &Connection, company_id: i64) -> Result<VaultBalances, LedgerError> {
    let mut balances = VaultBalances::default();
    for vault in VaultType::ALL {
        let total = vault_balance(conn, company_id, vault)?;
        match vault {
            VaultType::MainBalance => balances.main_balance = total,
            VaultType::EmergencyReserve => balances.emergency_reserve = total,
            VaultType::WorkingCapital => balances.working_capital = total,
            VaultType::Investments => balances.investments = total,
            VaultType::Withdrawals => balances.withdrawals = total,
        }
    }

    let mut stmt = conn.prepare(
        "SELECT t.amount, c.category_type FROM transactions t
         JOIN dre_categories c ON t.category_id=c.id
         WHERE t.company_id=?1",
    )?;
    let mut cur = stmt.query(params![company_id])?;
    let mut net = Decimal::ZERO;
    while let Some(r) = cur.next()? {
        let amount: String = r.get(0)?;
        let category_type: String = r.get(1)?;
        let amount = parse_amount(&amount)?;
        match category_type.as_str() {
            "revenue" | "financial_income" => net += amount,
            _ => net -= amount,
        }
    }
    balances.net_balance = net;
    balances.available_balance = net;
    Ok(balances)
}
