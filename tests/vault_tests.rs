// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use drecalc::ledger::{self, LedgerError};
use drecalc::models::VaultType;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn setup() -> (Connection, i64) {
    let mut conn = Connection::open_in_memory().unwrap();
    drecalc::db::init_schema(&mut conn).unwrap();
    conn.execute(
        "INSERT INTO companies(name, tax_regime) VALUES('Acme', 'simples_nacional')",
        [],
    )
    .unwrap();
    let company_id = conn.last_insert_rowid();
    (conn, company_id)
}

fn seed_vaults(conn: &mut Connection, company_id: i64) {
    ledger::deposit(
        conn,
        company_id,
        VaultType::MainBalance,
        dec("5000"),
        "Opening balance",
        &[],
    )
    .unwrap();
    ledger::deposit(
        conn,
        company_id,
        VaultType::EmergencyReserve,
        dec("2000"),
        "Opening reserve",
        &[],
    )
    .unwrap();
}

#[test]
fn transfer_moves_exactly_once_between_vaults() {
    let (mut conn, company_id) = setup();
    seed_vaults(&mut conn, company_id);

    ledger::transfer(
        &mut conn,
        company_id,
        VaultType::MainBalance,
        VaultType::EmergencyReserve,
        dec("1000"),
        "Monthly reserve top-up",
        &["reserve".to_string()],
    )
    .unwrap();

    let b = ledger::get_balances(&conn, company_id).unwrap();
    assert_eq!(b.main_balance, dec("4000"));
    assert_eq!(b.emergency_reserve, dec("3000"));
    // Transfers only move money around; the total is conserved
    assert_eq!(b.main_balance + b.emergency_reserve, dec("7000"));
}

#[test]
fn insufficient_balance_rejects_and_leaves_vaults_untouched() {
    let (mut conn, company_id) = setup();
    seed_vaults(&mut conn, company_id);

    let err = ledger::transfer(
        &mut conn,
        company_id,
        VaultType::MainBalance,
        VaultType::Investments,
        dec("9000"),
        "Too large",
        &[],
    )
    .unwrap_err();
    match err {
        LedgerError::InsufficientBalance {
            vault,
            available,
            requested,
        } => {
            assert_eq!(vault, "main_balance");
            assert_eq!(available, dec("5000"));
            assert_eq!(requested, dec("9000"));
        }
        other => panic!("expected InsufficientBalance, got {other:?}"),
    }

    let b = ledger::get_balances(&conn, company_id).unwrap();
    assert_eq!(b.main_balance, dec("5000"));
    assert_eq!(b.investments, Decimal::ZERO);
}

#[test]
fn zero_amount_and_same_vault_transfers_are_invalid() {
    let (mut conn, company_id) = setup();
    seed_vaults(&mut conn, company_id);

    let err = ledger::transfer(
        &mut conn,
        company_id,
        VaultType::MainBalance,
        VaultType::Investments,
        Decimal::ZERO,
        "Nothing",
        &[],
    )
    .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));

    let err = ledger::transfer(
        &mut conn,
        company_id,
        VaultType::MainBalance,
        VaultType::MainBalance,
        dec("10"),
        "Self",
        &[],
    )
    .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
}

#[test]
fn deleting_a_transfer_reverses_it_and_keeps_history() {
    let (mut conn, company_id) = setup();
    seed_vaults(&mut conn, company_id);
    ledger::transfer(
        &mut conn,
        company_id,
        VaultType::MainBalance,
        VaultType::EmergencyReserve,
        dec("1000"),
        "Top-up",
        &[],
    )
    .unwrap();

    let entries = ledger::list_cash_transactions(&conn, company_id, None, true).unwrap();
    let transfer_row = entries
        .iter()
        .find(|e| e.description == "Top-up")
        .unwrap();
    ledger::delete_cash_transaction(&mut conn, company_id, transfer_row.id).unwrap();

    let b = ledger::get_balances(&conn, company_id).unwrap();
    assert_eq!(b.main_balance, dec("5000"));
    assert_eq!(b.emergency_reserve, dec("2000"));

    // Nothing was physically deleted: originals plus compensating rows
    let all = ledger::list_cash_transactions(&conn, company_id, None, true).unwrap();
    assert_eq!(all.len(), 6);
    assert!(all.iter().any(|e| e.description == "Reversal: Top-up"));
    let active = ledger::list_cash_transactions(&conn, company_id, None, false).unwrap();
    assert_eq!(active.len(), 2);
}

#[test]
fn a_group_cannot_be_reversed_twice() {
    let (mut conn, company_id) = setup();
    seed_vaults(&mut conn, company_id);
    let group = ledger::transfer(
        &mut conn,
        company_id,
        VaultType::MainBalance,
        VaultType::WorkingCapital,
        dec("500"),
        "Float",
        &[],
    )
    .unwrap();
    let entries = ledger::list_cash_transactions(&conn, company_id, None, true).unwrap();
    let row = entries.iter().find(|e| e.transfer_group == group).unwrap();

    ledger::delete_cash_transaction(&mut conn, company_id, row.id).unwrap();
    let err = ledger::delete_cash_transaction(&mut conn, company_id, row.id).unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
}

#[test]
fn reversal_requires_the_credited_vault_to_still_hold_the_amount() {
    let (mut conn, company_id) = setup();
    seed_vaults(&mut conn, company_id);
    ledger::transfer(
        &mut conn,
        company_id,
        VaultType::MainBalance,
        VaultType::Investments,
        dec("1000"),
        "Into investments",
        &[],
    )
    .unwrap();
    // Spend the credited amount so the reversal has nothing to claw back
    ledger::withdraw(
        &mut conn,
        company_id,
        VaultType::Investments,
        dec("800"),
        "Bought equipment",
        &[],
    )
    .unwrap();

    let entries = ledger::list_cash_transactions(&conn, company_id, None, true).unwrap();
    let row = entries
        .iter()
        .find(|e| e.description == "Into investments")
        .unwrap();
    let err = ledger::delete_cash_transaction(&mut conn, company_id, row.id).unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
}

#[test]
fn withdraw_checks_the_vault_balance() {
    let (mut conn, company_id) = setup();
    seed_vaults(&mut conn, company_id);
    let err = ledger::withdraw(
        &mut conn,
        company_id,
        VaultType::EmergencyReserve,
        dec("2500"),
        "Too much",
        &[],
    )
    .unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientBalance { .. }));

    ledger::withdraw(
        &mut conn,
        company_id,
        VaultType::EmergencyReserve,
        dec("2000"),
        "Drain",
        &[],
    )
    .unwrap();
    let b = ledger::get_balances(&conn, company_id).unwrap();
    assert_eq!(b.emergency_reserve, Decimal::ZERO);
}

#[test]
fn deleting_a_deposit_reverses_the_single_row() {
    let (mut conn, company_id) = setup();
    ledger::deposit(
        &mut conn,
        company_id,
        VaultType::MainBalance,
        dec("100"),
        "Seed",
        &[],
    )
    .unwrap();
    let entries = ledger::list_cash_transactions(&conn, company_id, None, true).unwrap();
    ledger::delete_cash_transaction(&mut conn, company_id, entries[0].id).unwrap();

    let b = ledger::get_balances(&conn, company_id).unwrap();
    assert_eq!(b.main_balance, Decimal::ZERO);
}

#[test]
fn missing_transaction_reports_not_found() {
    let (mut conn, company_id) = setup();
    let err = ledger::delete_cash_transaction(&mut conn, company_id, 42).unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(42)));
}

#[test]
fn tags_round_trip_through_the_ledger() {
    let (mut conn, company_id) = setup();
    ledger::deposit(
        &mut conn,
        company_id,
        VaultType::MainBalance,
        dec("50"),
        "Tagged",
        &["payroll".to_string(), "august".to_string()],
    )
    .unwrap();
    let entries = ledger::list_cash_transactions(&conn, company_id, None, false).unwrap();
    assert_eq!(entries[0].tags, vec!["payroll", "august"]);
}
