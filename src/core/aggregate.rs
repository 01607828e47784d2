// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, CategoryType, Client, CostClassification, MarkupType, Transaction};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    pub month: u32,
    pub year: i32,
}

/// Raw sums an income statement is computed from. No rounding here;
/// presentation owns formatting.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregatedFigures {
    pub revenue: Decimal,
    pub direct_costs: Decimal,
    pub direct_fixed_costs: Decimal,
    pub direct_variable_costs: Decimal,
    pub fixed_expenses: Decimal,
    pub variable_expenses: Decimal,
    pub financial_expenses: Decimal,
    pub financial_income: Decimal,
    pub marketing_costs: Decimal,
    pub sales_costs: Decimal,
    pub new_clients_count: u32,
    pub total_active_clients: u32,
    pub sales_count: u32,
}

/// Sums one period's transactions into the figures the statement needs.
///
/// A cost or expense category with no fixed/variable classification counts
/// as fixed, so unclassified spending still reaches the break-even math
/// instead of silently dropping out. `doctor` reports such categories.
pub fn aggregate(
    transactions: &[Transaction],
    categories: &[Category],
    clients: &[Client],
    period: Period,
) -> AggregatedFigures {
    let by_id: HashMap<i64, &Category> = categories.iter().map(|c| (c.id, c)).collect();
    let mut agg = AggregatedFigures {
        total_active_clients: clients.iter().filter(|c| c.is_active).count() as u32,
        ..AggregatedFigures::default()
    };
    let mut new_client_ids: HashSet<i64> = HashSet::new();
    let mut unattributed_new_clients = 0u32;

    for tx in transactions {
        if tx.month != period.month || tx.year != period.year {
            continue;
        }
        if tx.is_marketing_cost {
            agg.marketing_costs += tx.amount;
        }
        if tx.is_sales_cost {
            agg.sales_costs += tx.amount;
        }
        if tx.is_new_client {
            match tx.client_id {
                Some(id) => {
                    new_client_ids.insert(id);
                }
                None => unattributed_new_clients += 1,
            }
        }
        let Some(cat) = tx.category_id.and_then(|id| by_id.get(&id)) else {
            continue;
        };
        match cat.category_type {
            CategoryType::Revenue => {
                agg.revenue += tx.amount;
                agg.sales_count += 1;
            }
            CategoryType::Cost => {
                agg.direct_costs += tx.amount;
                match cat.cost_classification {
                    Some(CostClassification::Variable) => agg.direct_variable_costs += tx.amount,
                    _ => agg.direct_fixed_costs += tx.amount,
                }
            }
            CategoryType::Expense => match cat.cost_classification {
                Some(CostClassification::Variable) => agg.variable_expenses += tx.amount,
                _ => agg.fixed_expenses += tx.amount,
            },
            CategoryType::FinancialExpense => agg.financial_expenses += tx.amount,
            CategoryType::FinancialIncome => agg.financial_income += tx.amount,
        }
    }

    agg.new_clients_count = new_client_ids.len() as u32 + unattributed_new_clients;
    agg
}

/// Per-period sums of the categories tagged for the markup calculator.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MarkupFigures {
    pub direct_cost_total: Decimal,
    pub variable_expenses: Decimal,
    pub fixed_expenses: Decimal,
}

pub fn aggregate_markup(
    transactions: &[Transaction],
    categories: &[Category],
    period: Period,
) -> MarkupFigures {
    let by_id: HashMap<i64, &Category> = categories.iter().map(|c| (c.id, c)).collect();
    let mut fig = MarkupFigures::default();
    for tx in transactions {
        if tx.month != period.month || tx.year != period.year {
            continue;
        }
        let Some(cat) = tx.category_id.and_then(|id| by_id.get(&id)) else {
            continue;
        };
        match cat.markup_type {
            Some(MarkupType::DirectCost) => fig.direct_cost_total += tx.amount,
            Some(MarkupType::VariableExpense) => fig.variable_expenses += tx.amount,
            Some(MarkupType::FixedExpense) => fig.fixed_expenses += tx.amount,
            None => {}
        }
    }
    fig
}
