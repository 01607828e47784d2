// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TaxConfiguration;
use rust_decimal::Decimal;
use serde::Serialize;

/// Revenue deduction lines resolved from a company's tax configuration.
/// When `use_das` is set the unified DAS line is the only one populated;
/// the itemized rates are ignored even if present in storage.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeductionLines {
    pub use_das: bool,
    pub das: Decimal,
    pub icms: Decimal,
    pub ipi: Decimal,
    pub pis: Decimal,
    pub cofins: Decimal,
    pub iss: Decimal,
}

impl DeductionLines {
    pub fn total(&self) -> Decimal {
        self.das + self.icms + self.ipi + self.pis + self.cofins + self.iss
    }
}

fn line(gross_revenue: Decimal, rate: Option<Decimal>) -> Decimal {
    // Missing rate means the tax does not apply
    match rate {
        Some(r) => gross_revenue * r / Decimal::ONE_HUNDRED,
        None => Decimal::ZERO,
    }
}

pub fn resolve_deductions(cfg: &TaxConfiguration, gross_revenue: Decimal) -> DeductionLines {
    if cfg.use_das {
        return DeductionLines {
            use_das: true,
            das: line(gross_revenue, cfg.das_rate),
            ..DeductionLines::default()
        };
    }
    DeductionLines {
        use_das: false,
        das: Decimal::ZERO,
        icms: line(gross_revenue, cfg.icms_rate),
        ipi: line(gross_revenue, cfg.ipi_rate),
        pis: line(gross_revenue, cfg.pis_rate),
        cofins: line(gross_revenue, cfg.cofins_rate),
        iss: line(gross_revenue, cfg.iss_rate),
    }
}

/// Rates applied to pre-tax profit. Missing rates resolve to zero.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfitTaxRates {
    pub irpj_rate: Decimal,
    pub surtax_rate: Decimal,
    pub surtax_threshold: Decimal,
    pub csll_rate: Decimal,
}

impl ProfitTaxRates {
    pub fn from_config(cfg: &TaxConfiguration) -> Self {
        ProfitTaxRates {
            irpj_rate: cfg.irpj_rate.unwrap_or_default(),
            surtax_rate: cfg.irpj_additional_rate.unwrap_or_default(),
            surtax_threshold: cfg.irpj_additional_threshold.unwrap_or_default(),
            csll_rate: cfg.csll_rate.unwrap_or_default(),
        }
    }
}
