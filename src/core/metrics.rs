// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::core::aggregate::AggregatedFigures;
use crate::core::statement::Statement;
use rust_decimal::Decimal;
use serde::Serialize;

/// Derived business metrics. Every division is guarded: a zero or negative
/// denominator yields zero, never NaN/Infinity. `break_even_computable`
/// distinguishes a true zero from "contribution margin rate not positive",
/// which callers surface as a business-risk condition.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Metrics {
    pub fixed_costs: Decimal,
    pub variable_costs: Decimal,
    pub contribution_margin: Decimal,
    pub contribution_margin_rate: Decimal,
    pub break_even_point: Decimal,
    pub break_even_computable: bool,
    pub safety_margin: Decimal,
    pub safety_margin_percent: Decimal,
    pub cac: Decimal,
    pub average_ticket: Decimal,
    pub ltv: Decimal,
    pub ltv_cac_ratio: Decimal,
    pub roi: Decimal,
}

fn div_guarded(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator > Decimal::ZERO {
        numerator / denominator
    } else {
        Decimal::ZERO
    }
}

pub fn compute_metrics(stmt: &Statement, agg: &AggregatedFigures) -> Metrics {
    let fixed_costs = agg.fixed_expenses + agg.direct_fixed_costs;
    let variable_costs = agg.variable_expenses + agg.direct_variable_costs;
    let net_revenue = stmt.net_revenue;

    let contribution_margin = net_revenue - variable_costs;
    let contribution_margin_rate = div_guarded(contribution_margin, net_revenue);
    let break_even_computable = contribution_margin_rate > Decimal::ZERO;
    let break_even_point = if break_even_computable {
        fixed_costs / contribution_margin_rate
    } else {
        Decimal::ZERO
    };
    let safety_margin = net_revenue - break_even_point;
    let safety_margin_percent =
        div_guarded(safety_margin, net_revenue) * Decimal::ONE_HUNDRED;

    // When no transaction flagged a new client, attribute acquisition cost
    // across all active clients rather than reporting an undefined CAC.
    let acquisition_costs = agg.marketing_costs + agg.sales_costs;
    let clients_for_cac = if agg.new_clients_count > 0 {
        agg.new_clients_count
    } else {
        agg.total_active_clients
    };
    let cac = if clients_for_cac > 0 {
        acquisition_costs / Decimal::from(clients_for_cac)
    } else {
        acquisition_costs
    };

    let average_ticket = if agg.sales_count > 0 {
        agg.revenue / Decimal::from(agg.sales_count)
    } else {
        Decimal::ZERO
    };
    // Fixed 12-month retention assumption, not a cohort model
    let ltv = average_ticket * Decimal::from(12);
    let ltv_cac_ratio = div_guarded(ltv, cac);

    let costs_total = stmt.cogs + stmt.operating_expenses + stmt.financial_expenses;
    let roi = div_guarded(net_revenue - costs_total, costs_total) * Decimal::ONE_HUNDRED;

    Metrics {
        fixed_costs,
        variable_costs,
        contribution_margin,
        contribution_margin_rate,
        break_even_point,
        break_even_computable,
        safety_margin,
        safety_margin_percent,
        cac,
        average_ticket,
        ltv,
        ltv_cac_ratio,
        roi,
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Markup {
    pub index: Decimal,
    pub suggested_price: Decimal,
}

/// Divisor markup: `100 / (100 - (DV% + DF% + desired margin%))`, zero when
/// the requested margin exceeds what the cost percentages leave room for.
pub fn markup(
    direct_cost_total: Decimal,
    variable_expense_pct: Decimal,
    fixed_expense_pct: Decimal,
    desired_margin_pct: Decimal,
) -> Markup {
    let denominator =
        Decimal::ONE_HUNDRED - (variable_expense_pct + fixed_expense_pct + desired_margin_pct);
    if denominator <= Decimal::ZERO {
        return Markup::default();
    }
    let index = Decimal::ONE_HUNDRED / denominator;
    Markup {
        index,
        suggested_price: direct_cost_total * index,
    }
}
