// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use drecalc::core::aggregate::{Period, aggregate, aggregate_markup};
use drecalc::models::{
    Category, CategoryType, Client, CostClassification, MarkupType, Transaction, TransactionKind,
};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn cat(
    id: i64,
    name: &str,
    ty: CategoryType,
    classification: Option<CostClassification>,
    markup: Option<MarkupType>,
) -> Category {
    Category {
        id,
        company_id: 1,
        name: name.into(),
        category_type: ty,
        cost_classification: classification,
        markup_type: markup,
        parent_id: None,
        is_active: true,
    }
}

fn tx(id: i64, day: u32, amount: &str, category_id: Option<i64>) -> Transaction {
    Transaction {
        id,
        company_id: 1,
        date: NaiveDate::from_ymd_opt(2026, 8, day).unwrap(),
        month: 8,
        year: 2026,
        amount: dec(amount),
        description: format!("tx {}", id),
        category_id,
        client_id: None,
        kind: TransactionKind::Operational,
        is_new_client: false,
        is_marketing_cost: false,
        is_sales_cost: false,
    }
}

fn client(id: i64, active: bool) -> Client {
    Client {
        id,
        company_id: 1,
        name: format!("client {}", id),
        email: None,
        phone: None,
        tax_id: None,
        first_purchase_date: None,
        is_active: active,
    }
}

const PERIOD: Period = Period {
    month: 8,
    year: 2026,
};

#[test]
fn sums_by_category_type_and_classification() {
    let categories = vec![
        cat(1, "Sales", CategoryType::Revenue, None, None),
        cat(2, "Materials", CategoryType::Cost, Some(CostClassification::Variable), None),
        cat(3, "Machinery", CategoryType::Cost, Some(CostClassification::Fixed), None),
        cat(4, "Rent", CategoryType::Expense, Some(CostClassification::Fixed), None),
        cat(5, "Commissions", CategoryType::Expense, Some(CostClassification::Variable), None),
        cat(6, "Interest", CategoryType::FinancialExpense, None, None),
        cat(7, "Yield", CategoryType::FinancialIncome, None, None),
    ];
    let transactions = vec![
        tx(1, 1, "60000", Some(1)),
        tx(2, 2, "40000", Some(1)),
        tx(3, 3, "25000", Some(2)),
        tx(4, 4, "5000", Some(3)),
        tx(5, 5, "20000", Some(4)),
        tx(6, 6, "3000", Some(5)),
        tx(7, 7, "800", Some(6)),
        tx(8, 8, "150", Some(7)),
    ];
    let agg = aggregate(&transactions, &categories, &[], PERIOD);

    assert_eq!(agg.revenue, dec("100000"));
    assert_eq!(agg.sales_count, 2);
    assert_eq!(agg.direct_costs, dec("30000"));
    assert_eq!(agg.direct_variable_costs, dec("25000"));
    assert_eq!(agg.direct_fixed_costs, dec("5000"));
    assert_eq!(agg.fixed_expenses, dec("20000"));
    assert_eq!(agg.variable_expenses, dec("3000"));
    assert_eq!(agg.financial_expenses, dec("800"));
    assert_eq!(agg.financial_income, dec("150"));
}

#[test]
fn unclassified_cost_and_expense_count_as_fixed() {
    let categories = vec![
        cat(1, "Misc cost", CategoryType::Cost, None, None),
        cat(2, "Misc expense", CategoryType::Expense, None, None),
    ];
    let transactions = vec![tx(1, 1, "100", Some(1)), tx(2, 2, "40", Some(2))];
    let agg = aggregate(&transactions, &categories, &[], PERIOD);
    assert_eq!(agg.direct_fixed_costs, dec("100"));
    assert_eq!(agg.direct_variable_costs, Decimal::ZERO);
    assert_eq!(agg.fixed_expenses, dec("40"));
}

#[test]
fn other_periods_and_uncategorized_rows_are_skipped() {
    let categories = vec![cat(1, "Sales", CategoryType::Revenue, None, None)];
    let mut off_month = tx(1, 1, "500", Some(1));
    off_month.month = 7;
    let transactions = vec![off_month, tx(2, 2, "250", None), tx(3, 3, "1000", Some(1))];
    let agg = aggregate(&transactions, &categories, &[], PERIOD);
    assert_eq!(agg.revenue, dec("1000"));
    assert_eq!(agg.sales_count, 1);
}

#[test]
fn new_clients_dedup_by_client_and_count_unattributed_rows() {
    let categories = vec![cat(1, "Sales", CategoryType::Revenue, None, None)];
    let clients = vec![client(10, true), client(11, true), client(12, false)];
    let mut t1 = tx(1, 1, "100", Some(1));
    t1.is_new_client = true;
    t1.client_id = Some(10);
    let mut t2 = tx(2, 2, "100", Some(1));
    t2.is_new_client = true;
    t2.client_id = Some(10); // same client twice, counts once
    let mut t3 = tx(3, 3, "100", Some(1));
    t3.is_new_client = true; // no client attached, still a new client
    let agg = aggregate(&[t1, t2, t3], &categories, &clients, PERIOD);
    assert_eq!(agg.new_clients_count, 2);
    assert_eq!(agg.total_active_clients, 2);
}

#[test]
fn marketing_and_sales_flags_sum_independently_of_category() {
    let mut t1 = tx(1, 1, "900", None);
    t1.is_marketing_cost = true;
    let mut t2 = tx(2, 2, "300", None);
    t2.is_sales_cost = true;
    let agg = aggregate(&[t1, t2], &[], &[], PERIOD);
    assert_eq!(agg.marketing_costs, dec("900"));
    assert_eq!(agg.sales_costs, dec("300"));
}

#[test]
fn markup_figures_follow_category_tags() {
    let categories = vec![
        cat(1, "Raw material", CategoryType::Cost, None, Some(MarkupType::DirectCost)),
        cat(2, "Freight", CategoryType::Expense, None, Some(MarkupType::VariableExpense)),
        cat(3, "Rent", CategoryType::Expense, None, Some(MarkupType::FixedExpense)),
        cat(4, "Untagged", CategoryType::Expense, None, None),
    ];
    let transactions = vec![
        tx(1, 1, "100", Some(1)),
        tx(2, 2, "10", Some(2)),
        tx(3, 3, "20", Some(3)),
        tx(4, 4, "999", Some(4)),
    ];
    let fig = aggregate_markup(&transactions, &categories, PERIOD);
    assert_eq!(fig.direct_cost_total, dec("100"));
    assert_eq!(fig.variable_expenses, dec("10"));
    assert_eq!(fig.fixed_expenses, dec("20"));
}
