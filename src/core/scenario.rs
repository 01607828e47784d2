// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::core::statement::{self, Statement};
use crate::core::taxes::ProfitTaxRates;
use rust_decimal::Decimal;
use serde::Serialize;

/// What-if percentage adjustments. 10 means +10%, -25 means -25%.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Adjustments {
    pub revenue_pct: Decimal,
    pub cogs_pct: Decimal,
    pub opex_pct: Decimal,
    pub financial_expense_pct: Decimal,
}

fn factor(pct: Decimal) -> Decimal {
    Decimal::ONE + pct / Decimal::ONE_HUNDRED
}

/// Re-runs the statement cascade over perturbed inputs. Deductions scale
/// with revenue since they are rate-based on it; financial income is left
/// untouched. Never persists anything.
pub fn simulate(baseline: &Statement, adj: &Adjustments, taxes: &ProfitTaxRates) -> Statement {
    let mut inputs = baseline.inputs();
    inputs.gross_revenue *= factor(adj.revenue_pct);
    inputs.deductions_total *= factor(adj.revenue_pct);
    inputs.cogs *= factor(adj.cogs_pct);
    inputs.operating_expenses *= factor(adj.opex_pct);
    inputs.financial_expenses *= factor(adj.financial_expense_pct);
    statement::compute(&inputs, taxes)
}
