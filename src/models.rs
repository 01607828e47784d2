// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxRegime {
    SimplesNacional,
    LucroPresumido,
    LucroReal,
}

impl TaxRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxRegime::SimplesNacional => "simples_nacional",
            TaxRegime::LucroPresumido => "lucro_presumido",
            TaxRegime::LucroReal => "lucro_real",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Ok(match s {
            "simples_nacional" => TaxRegime::SimplesNacional,
            "lucro_presumido" => TaxRegime::LucroPresumido,
            "lucro_real" => TaxRegime::LucroReal,
            other => bail!("Unknown tax regime '{}'", other),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryType {
    Revenue,
    Cost,
    Expense,
    FinancialExpense,
    FinancialIncome,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Revenue => "revenue",
            CategoryType::Cost => "cost",
            CategoryType::Expense => "expense",
            CategoryType::FinancialExpense => "financial_expense",
            CategoryType::FinancialIncome => "financial_income",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Ok(match s {
            "revenue" => CategoryType::Revenue,
            "cost" => CategoryType::Cost,
            "expense" => CategoryType::Expense,
            "financial_expense" => CategoryType::FinancialExpense,
            "financial_income" => CategoryType::FinancialIncome,
            other => bail!("Unknown category type '{}'", other),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostClassification {
    Fixed,
    Variable,
}

impl CostClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            CostClassification::Fixed => "fixed",
            CostClassification::Variable => "variable",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Ok(match s {
            "fixed" => CostClassification::Fixed,
            "variable" => CostClassification::Variable,
            other => bail!("Unknown cost classification '{}'", other),
        })
    }
}

/// Category tag used only by the markup calculator: direct cost (CD),
/// variable expense (DV) or fixed expense (DF).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkupType {
    DirectCost,
    VariableExpense,
    FixedExpense,
}

impl MarkupType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkupType::DirectCost => "CD",
            MarkupType::VariableExpense => "DV",
            MarkupType::FixedExpense => "DF",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Ok(match s {
            "CD" => MarkupType::DirectCost,
            "DV" => MarkupType::VariableExpense,
            "DF" => MarkupType::FixedExpense,
            other => bail!("Unknown markup type '{}', expected CD, DV or DF", other),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Administrative,
    Operational,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Administrative => "administrative",
            TransactionKind::Operational => "operational",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Ok(match s {
            "administrative" => TransactionKind::Administrative,
            "operational" => TransactionKind::Operational,
            other => bail!("Unknown transaction kind '{}'", other),
        })
    }
}

/// One of the five fixed virtual cash vaults every company owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VaultType {
    MainBalance,
    EmergencyReserve,
    WorkingCapital,
    Investments,
    Withdrawals,
}

impl VaultType {
    pub const ALL: [VaultType; 5] = [
        VaultType::MainBalance,
        VaultType::EmergencyReserve,
        VaultType::WorkingCapital,
        VaultType::Investments,
        VaultType::Withdrawals,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VaultType::MainBalance => "main_balance",
            VaultType::EmergencyReserve => "emergency_reserve",
            VaultType::WorkingCapital => "working_capital",
            VaultType::Investments => "investments",
            VaultType::Withdrawals => "withdrawals",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Ok(match s {
            "main_balance" => VaultType::MainBalance,
            "emergency_reserve" => VaultType::EmergencyReserve,
            "working_capital" => VaultType::WorkingCapital,
            "investments" => VaultType::Investments,
            "withdrawals" => VaultType::Withdrawals,
            other => bail!("Unknown vault '{}'", other),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    TransferIn,
    TransferOut,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::TransferIn => "transfer_in",
            EntryKind::TransferOut => "transfer_out",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Ok(match s {
            "transfer_in" => EntryKind::TransferIn,
            "transfer_out" => EntryKind::TransferOut,
            other => bail!("Unknown entry kind '{}'", other),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub tax_id: Option<String>,
    pub tax_regime: TaxRegime,
    pub fiscal_period: String,
    pub business_category: Option<String>,
}

/// Per-company tax rates. All rates are percentages (6 means 6%); a
/// missing rate is treated as zero by the deduction resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxConfiguration {
    pub company_id: i64,
    pub icms_rate: Option<Decimal>,
    pub ipi_rate: Option<Decimal>,
    pub pis_rate: Option<Decimal>,
    pub cofins_rate: Option<Decimal>,
    pub iss_rate: Option<Decimal>,
    pub das_rate: Option<Decimal>,
    pub use_das: bool,
    pub irpj_rate: Option<Decimal>,
    pub irpj_additional_rate: Option<Decimal>,
    pub irpj_additional_threshold: Option<Decimal>,
    pub csll_rate: Option<Decimal>,
    pub regime_type: TaxRegime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub company_id: i64,
    pub name: String,
    pub category_type: CategoryType,
    pub cost_classification: Option<CostClassification>,
    pub markup_type: Option<MarkupType>,
    pub parent_id: Option<i64>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub company_id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub tax_id: Option<String>,
    pub first_purchase_date: Option<NaiveDate>,
    pub is_active: bool,
}

/// Amounts are always stored positive; direction comes from the category
/// type at aggregation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub company_id: i64,
    pub date: NaiveDate,
    pub month: u32,
    pub year: i32,
    pub amount: Decimal,
    pub description: String,
    pub category_id: Option<i64>,
    pub client_id: Option<i64>,
    pub kind: TransactionKind,
    pub is_new_client: bool,
    pub is_marketing_cost: bool,
    pub is_sales_cost: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashTransaction {
    pub id: i64,
    pub company_id: i64,
    pub vault: VaultType,
    pub entry: EntryKind,
    pub amount: Decimal,
    pub description: String,
    pub related_vault: Option<VaultType>,
    pub tags: Vec<String>,
    pub transfer_group: i64,
    pub reversed: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub company_id: i64,
    pub metric_name: String,
    pub period_month: u32,
    pub period_year: i32,
    pub target_value: Decimal,
}
