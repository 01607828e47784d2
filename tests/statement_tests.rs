// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use drecalc::core::statement::{self, StatementInputs};
use drecalc::core::taxes::{DeductionLines, ProfitTaxRates, resolve_deductions};
use drecalc::models::{TaxConfiguration, TaxRegime};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn simples_config() -> TaxConfiguration {
    TaxConfiguration {
        company_id: 1,
        icms_rate: None,
        ipi_rate: None,
        pis_rate: None,
        cofins_rate: None,
        iss_rate: None,
        das_rate: Some(dec("6")),
        use_das: true,
        irpj_rate: Some(dec("15")),
        irpj_additional_rate: None,
        irpj_additional_threshold: None,
        csll_rate: Some(dec("9")),
        regime_type: TaxRegime::SimplesNacional,
    }
}

#[test]
fn das_cascade_matches_hand_computed_figures() {
    let cfg = simples_config();
    let deductions = resolve_deductions(&cfg, dec("100000"));
    assert_eq!(deductions.total(), dec("6000"));

    let inputs = StatementInputs {
        gross_revenue: dec("100000"),
        deductions_total: deductions.total(),
        cogs: dec("30000"),
        operating_expenses: dec("20000"),
        financial_expenses: Decimal::ZERO,
        financial_income: Decimal::ZERO,
    };
    let s = statement::compute(&inputs, &ProfitTaxRates::from_config(&cfg));

    assert_eq!(s.net_revenue, dec("94000"));
    assert_eq!(s.gross_profit, dec("64000"));
    assert_eq!(s.operating_profit, dec("44000"));
    assert_eq!(s.pre_tax_profit, dec("44000"));
    assert_eq!(s.income_tax, dec("6600"));
    assert_eq!(s.income_tax_surtax, Decimal::ZERO);
    assert_eq!(s.social_contribution, dec("3960"));
    assert_eq!(s.net_profit, dec("33440"));
}

#[test]
fn itemized_deductions_sum_each_configured_rate() {
    let cfg = TaxConfiguration {
        use_das: false,
        icms_rate: Some(dec("18")),
        pis_rate: Some(dec("0.65")),
        cofins_rate: Some(dec("3")),
        regime_type: TaxRegime::LucroPresumido,
        ..simples_config()
    };
    let d = resolve_deductions(&cfg, dec("10000"));
    assert_eq!(d.das, Decimal::ZERO);
    assert_eq!(d.icms, dec("1800"));
    assert_eq!(d.pis, dec("65"));
    assert_eq!(d.cofins, dec("300"));
    // IPI and ISS are unset, so they contribute nothing
    assert_eq!(d.total(), dec("2165"));
}

#[test]
fn das_mode_ignores_itemized_rates_even_when_present() {
    let cfg = TaxConfiguration {
        icms_rate: Some(dec("18")),
        iss_rate: Some(dec("5")),
        ..simples_config()
    };
    let d = resolve_deductions(&cfg, dec("1000"));
    assert_eq!(d.das, dec("60"));
    assert_eq!(d.icms, Decimal::ZERO);
    assert_eq!(d.iss, Decimal::ZERO);
    assert_eq!(d.total(), dec("60"));
}

#[test]
fn surtax_applies_only_above_a_positive_threshold() {
    let rates = ProfitTaxRates {
        irpj_rate: dec("15"),
        surtax_rate: dec("10"),
        surtax_threshold: dec("20000"),
        csll_rate: dec("9"),
    };
    let inputs = StatementInputs {
        gross_revenue: dec("50000"),
        cogs: dec("6000"),
        ..StatementInputs::default()
    };
    let s = statement::compute(&inputs, &rates);
    assert_eq!(s.pre_tax_profit, dec("44000"));
    // 10% of the 24000 above the threshold
    assert_eq!(s.income_tax_surtax, dec("2400"));

    let below = StatementInputs {
        gross_revenue: dec("15000"),
        ..StatementInputs::default()
    };
    let s = statement::compute(&below, &rates);
    assert_eq!(s.income_tax_surtax, Decimal::ZERO);
}

#[test]
fn unset_threshold_means_no_surtax() {
    let rates = ProfitTaxRates {
        irpj_rate: dec("15"),
        surtax_rate: dec("10"),
        surtax_threshold: Decimal::ZERO,
        csll_rate: dec("9"),
    };
    let inputs = StatementInputs {
        gross_revenue: dec("44000"),
        ..StatementInputs::default()
    };
    let s = statement::compute(&inputs, &rates);
    assert_eq!(s.income_tax_surtax, Decimal::ZERO);
}

#[test]
fn no_profit_taxes_on_a_loss() {
    let rates = ProfitTaxRates {
        irpj_rate: dec("15"),
        surtax_rate: dec("10"),
        surtax_threshold: dec("20000"),
        csll_rate: dec("9"),
    };
    let inputs = StatementInputs {
        gross_revenue: dec("10000"),
        deductions_total: dec("600"),
        cogs: dec("12000"),
        operating_expenses: dec("3000"),
        financial_expenses: dec("500"),
        financial_income: Decimal::ZERO,
    };
    let s = statement::compute(&inputs, &rates);
    assert!(s.pre_tax_profit < Decimal::ZERO);
    assert_eq!(s.income_tax, Decimal::ZERO);
    assert_eq!(s.income_tax_surtax, Decimal::ZERO);
    assert_eq!(s.social_contribution, Decimal::ZERO);
    // The loss flows through undiminished
    assert_eq!(s.net_profit, s.pre_tax_profit);
}

#[test]
fn zero_net_revenue_yields_zero_percentages() {
    let inputs = StatementInputs {
        operating_expenses: dec("5000"),
        ..StatementInputs::default()
    };
    let s = statement::compute(&inputs, &ProfitTaxRates::default());
    assert_eq!(s.net_revenue, Decimal::ZERO);
    assert_eq!(s.gross_margin, Decimal::ZERO);
    assert_eq!(s.operating_margin, Decimal::ZERO);
    assert_eq!(s.net_margin, Decimal::ZERO);
    assert_eq!(s.av_operating_expenses, Decimal::ZERO);
}

#[test]
fn financial_income_raises_pre_tax_profit() {
    let inputs = StatementInputs {
        gross_revenue: dec("1000"),
        financial_expenses: dec("200"),
        financial_income: dec("50"),
        ..StatementInputs::default()
    };
    let s = statement::compute(&inputs, &ProfitTaxRates::default());
    assert_eq!(s.pre_tax_profit, dec("850"));
}

#[test]
fn deduction_lines_default_to_zero_total() {
    assert_eq!(DeductionLines::default().total(), Decimal::ZERO);
}
