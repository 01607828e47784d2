// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::core::aggregate::AggregatedFigures;
use crate::core::taxes::{DeductionLines, ProfitTaxRates};
use rust_decimal::Decimal;
use serde::Serialize;

/// The raw lines a statement cascades from. The scenario simulator scales
/// these and re-runs the same cascade.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatementInputs {
    pub gross_revenue: Decimal,
    pub deductions_total: Decimal,
    pub cogs: Decimal,
    pub operating_expenses: Decimal,
    pub financial_expenses: Decimal,
    pub financial_income: Decimal,
}

/// Full income statement: the top-down cascade plus margins and
/// vertical-analysis percentages over net revenue.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Statement {
    pub gross_revenue: Decimal,
    pub deductions_total: Decimal,
    pub net_revenue: Decimal,
    pub cogs: Decimal,
    pub gross_profit: Decimal,
    pub operating_expenses: Decimal,
    pub operating_profit: Decimal,
    pub financial_expenses: Decimal,
    pub financial_income: Decimal,
    pub pre_tax_profit: Decimal,
    pub income_tax: Decimal,
    pub income_tax_surtax: Decimal,
    pub social_contribution: Decimal,
    pub income_taxes_total: Decimal,
    pub net_profit: Decimal,
    pub gross_margin: Decimal,
    pub operating_margin: Decimal,
    pub net_margin: Decimal,
    pub av_deductions: Decimal,
    pub av_cogs: Decimal,
    pub av_operating_expenses: Decimal,
    pub av_financial_expenses: Decimal,
    pub av_financial_income: Decimal,
    pub av_income_taxes: Decimal,
}

impl Statement {
    pub fn inputs(&self) -> StatementInputs {
        StatementInputs {
            gross_revenue: self.gross_revenue,
            deductions_total: self.deductions_total,
            cogs: self.cogs,
            operating_expenses: self.operating_expenses,
            financial_expenses: self.financial_expenses,
            financial_income: self.financial_income,
        }
    }
}

/// Percentage of `base`, or zero when the base is zero. Dashboards must
/// never see NaN/Infinity on an empty period.
fn pct_of(part: Decimal, base: Decimal) -> Decimal {
    if base.is_zero() {
        Decimal::ZERO
    } else {
        part / base * Decimal::ONE_HUNDRED
    }
}

/// Runs the statement cascade. Taxes on profit apply only when pre-tax
/// profit is positive; no tax refund is modeled on a loss.
pub fn compute(inputs: &StatementInputs, taxes: &ProfitTaxRates) -> Statement {
    let net_revenue = inputs.gross_revenue - inputs.deductions_total;
    let gross_profit = net_revenue - inputs.cogs;
    let operating_profit = gross_profit - inputs.operating_expenses;
    let pre_tax_profit = operating_profit - inputs.financial_expenses + inputs.financial_income;

    let income_tax = if pre_tax_profit > Decimal::ZERO {
        pre_tax_profit * taxes.irpj_rate / Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    let income_tax_surtax = if pre_tax_profit > taxes.surtax_threshold
        && taxes.surtax_threshold > Decimal::ZERO
    {
        (pre_tax_profit - taxes.surtax_threshold) * taxes.surtax_rate / Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    let social_contribution = if pre_tax_profit > Decimal::ZERO {
        pre_tax_profit * taxes.csll_rate / Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    let income_taxes_total = income_tax + income_tax_surtax + social_contribution;
    let net_profit = pre_tax_profit - income_taxes_total;

    Statement {
        gross_revenue: inputs.gross_revenue,
        deductions_total: inputs.deductions_total,
        net_revenue,
        cogs: inputs.cogs,
        gross_profit,
        operating_expenses: inputs.operating_expenses,
        operating_profit,
        financial_expenses: inputs.financial_expenses,
        financial_income: inputs.financial_income,
        pre_tax_profit,
        income_tax,
        income_tax_surtax,
        social_contribution,
        income_taxes_total,
        net_profit,
        gross_margin: pct_of(gross_profit, net_revenue),
        operating_margin: pct_of(operating_profit, net_revenue),
        net_margin: pct_of(net_profit, net_revenue),
        av_deductions: pct_of(inputs.deductions_total, net_revenue),
        av_cogs: pct_of(inputs.cogs, net_revenue),
        av_operating_expenses: pct_of(inputs.operating_expenses, net_revenue),
        av_financial_expenses: pct_of(inputs.financial_expenses, net_revenue),
        av_financial_income: pct_of(inputs.financial_income, net_revenue),
        av_income_taxes: pct_of(income_taxes_total, net_revenue),
    }
}

pub fn compute_statement(
    agg: &AggregatedFigures,
    deductions: &DeductionLines,
    taxes: &ProfitTaxRates,
) -> Statement {
    let inputs = StatementInputs {
        gross_revenue: agg.revenue,
        deductions_total: deductions.total(),
        cogs: agg.direct_costs,
        operating_expenses: agg.fixed_expenses + agg.variable_expenses,
        financial_expenses: agg.financial_expenses,
        financial_income: agg.financial_income,
    };
    compute(&inputs, taxes)
}
