// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use drecalc::core::scenario::{Adjustments, simulate};
use drecalc::core::statement::{self, StatementInputs};
use drecalc::core::taxes::ProfitTaxRates;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn rates() -> ProfitTaxRates {
    ProfitTaxRates {
        irpj_rate: dec("15"),
        surtax_rate: dec("10"),
        surtax_threshold: dec("20000"),
        csll_rate: dec("9"),
    }
}

fn baseline() -> drecalc::core::statement::Statement {
    let inputs = StatementInputs {
        gross_revenue: dec("100000"),
        deductions_total: dec("6000"),
        cogs: dec("30000"),
        operating_expenses: dec("20000"),
        financial_expenses: dec("2000"),
        financial_income: dec("500"),
    };
    statement::compute(&inputs, &rates())
}

#[test]
fn revenue_growth_scales_deductions_proportionally() {
    let base = baseline();
    let adj = Adjustments {
        revenue_pct: dec("10"),
        ..Adjustments::default()
    };
    let sim = simulate(&base, &adj, &rates());
    assert_eq!(sim.gross_revenue, dec("110000"));
    assert_eq!(sim.deductions_total, dec("6600"));
    assert_eq!(sim.net_revenue, dec("103400"));
    // Cost lines stay put
    assert_eq!(sim.cogs, base.cogs);
    assert_eq!(sim.operating_expenses, base.operating_expenses);
    assert_eq!(sim.financial_income, base.financial_income);
}

#[test]
fn cost_cuts_flow_through_to_net_profit() {
    let base = baseline();
    let adj = Adjustments {
        cogs_pct: dec("-20"),
        opex_pct: dec("-10"),
        ..Adjustments::default()
    };
    let sim = simulate(&base, &adj, &rates());
    assert_eq!(sim.cogs, dec("24000.0"));
    assert_eq!(sim.operating_expenses, dec("18000.0"));
    assert!(sim.net_profit > base.net_profit);
    assert_eq!(sim.gross_revenue, base.gross_revenue);
}

#[test]
fn simulated_taxes_use_the_configured_rates() {
    let base = baseline();
    let adj = Adjustments {
        revenue_pct: dec("50"),
        ..Adjustments::default()
    };
    let sim = simulate(&base, &adj, &rates());
    // gross 150000, deductions 9000 -> pre-tax 89500... recompute:
    // net 141000, cogs 30000, opex 20000, fin -2000 +500 => 89500
    assert_eq!(sim.pre_tax_profit, dec("89500.0"));
    assert_eq!(sim.income_tax, dec("13425.000"));
    // surtax on the 69500 above the 20000 threshold
    assert_eq!(sim.income_tax_surtax, dec("6950.00"));
}

#[test]
fn identity_adjustments_reproduce_the_baseline() {
    let base = baseline();
    let sim = simulate(&base, &Adjustments::default(), &rates());
    assert_eq!(sim.net_profit, base.net_profit);
    assert_eq!(sim.net_margin, base.net_margin);
}

#[test]
fn a_deep_revenue_drop_can_push_the_result_into_a_loss() {
    let base = baseline();
    let adj = Adjustments {
        revenue_pct: dec("-60"),
        ..Adjustments::default()
    };
    let sim = simulate(&base, &adj, &rates());
    // net 37600 - 30000 - 20000 - 2000 + 500 < 0
    assert!(sim.pre_tax_profit < Decimal::ZERO);
    assert_eq!(sim.income_taxes_total, Decimal::ZERO);
    assert_eq!(sim.net_profit, sim.pre_tax_profit);
}
