// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use drecalc::core::aggregate::AggregatedFigures;
use drecalc::core::metrics::{compute_metrics, markup};
use drecalc::core::statement::{self, StatementInputs};
use drecalc::core::taxes::ProfitTaxRates;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn baseline_agg() -> AggregatedFigures {
    AggregatedFigures {
        revenue: dec("100000"),
        direct_costs: dec("30000"),
        direct_variable_costs: dec("30000"),
        fixed_expenses: dec("20000"),
        sales_count: 2,
        ..AggregatedFigures::default()
    }
}

fn baseline_statement(agg: &AggregatedFigures) -> drecalc::core::statement::Statement {
    let inputs = StatementInputs {
        gross_revenue: agg.revenue,
        deductions_total: agg.revenue * dec("0.06"),
        cogs: agg.direct_costs,
        operating_expenses: agg.fixed_expenses + agg.variable_expenses,
        financial_expenses: agg.financial_expenses,
        financial_income: agg.financial_income,
    };
    statement::compute(&inputs, &ProfitTaxRates::default())
}

#[test]
fn break_even_from_fixed_costs_and_contribution_rate() {
    let agg = baseline_agg();
    let m = compute_metrics(&baseline_statement(&agg), &agg);

    assert_eq!(m.fixed_costs, dec("20000"));
    assert_eq!(m.variable_costs, dec("30000"));
    assert_eq!(m.contribution_margin, dec("64000"));
    assert!(m.break_even_computable);
    // 20000 / (64000/94000)
    assert_eq!(m.break_even_point.round_dp(2), dec("29375.00"));
    assert_eq!(m.safety_margin.round_dp(2), dec("64625.00"));
}

#[test]
fn break_even_guarded_when_variable_costs_eat_revenue() {
    let agg = AggregatedFigures {
        revenue: dec("1000"),
        fixed_expenses: dec("500"),
        variable_expenses: dec("1500"),
        ..AggregatedFigures::default()
    };
    let m = compute_metrics(&baseline_statement(&agg), &agg);
    assert!(!m.break_even_computable);
    assert_eq!(m.break_even_point, Decimal::ZERO);
}

#[test]
fn cac_prefers_new_clients_then_active_clients() {
    let mut agg = baseline_agg();
    agg.marketing_costs = dec("900");
    agg.sales_costs = dec("300");
    agg.new_clients_count = 4;
    agg.total_active_clients = 40;
    let m = compute_metrics(&baseline_statement(&agg), &agg);
    assert_eq!(m.cac, dec("300"));

    agg.new_clients_count = 0;
    let m = compute_metrics(&baseline_statement(&agg), &agg);
    assert_eq!(m.cac, dec("30"));

    // No client base at all: report the raw acquisition spend
    agg.total_active_clients = 0;
    let m = compute_metrics(&baseline_statement(&agg), &agg);
    assert_eq!(m.cac, dec("1200"));
}

#[test]
fn ticket_ltv_and_ratio() {
    let mut agg = baseline_agg();
    agg.marketing_costs = dec("10000");
    agg.new_clients_count = 1;
    let m = compute_metrics(&baseline_statement(&agg), &agg);
    assert_eq!(m.average_ticket, dec("50000"));
    assert_eq!(m.ltv, dec("600000"));
    assert_eq!(m.ltv_cac_ratio, dec("60"));
}

#[test]
fn ltv_cac_ratio_guarded_when_cac_is_zero() {
    let agg = baseline_agg();
    let m = compute_metrics(&baseline_statement(&agg), &agg);
    assert_eq!(m.cac, Decimal::ZERO);
    assert_eq!(m.ltv_cac_ratio, Decimal::ZERO);
}

#[test]
fn roi_over_total_costs() {
    let agg = baseline_agg();
    let m = compute_metrics(&baseline_statement(&agg), &agg);
    // (94000 - 50000) / 50000 * 100
    assert_eq!(m.roi, dec("88"));
}

#[test]
fn roi_guarded_with_no_costs() {
    let agg = AggregatedFigures {
        revenue: dec("1000"),
        sales_count: 1,
        ..AggregatedFigures::default()
    };
    let m = compute_metrics(&baseline_statement(&agg), &agg);
    assert_eq!(m.roi, Decimal::ZERO);
}

#[test]
fn markup_divisor_formula() {
    let m = markup(dec("100"), dec("10"), dec("20"), dec("30"));
    assert_eq!(m.index, dec("2.5"));
    assert_eq!(m.suggested_price, dec("250.0"));
}

#[test]
fn markup_unattainable_margin_yields_zero() {
    let m = markup(dec("100"), dec("40"), dec("35"), dec("30"));
    assert_eq!(m.index, Decimal::ZERO);
    assert_eq!(m.suggested_price, Decimal::ZERO);

    let exactly_hundred = markup(dec("100"), dec("50"), dec("20"), dec("30"));
    assert_eq!(exactly_hundred.index, Decimal::ZERO);
}
