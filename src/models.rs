// Copyright (c) 2025 Saldo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How an expense was paid. Meaningless for income entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Crédito")]
    Credito,
    #[serde(rename = "Débito")]
    Debito,
    Boleto,
    #[serde(rename = "PIX")]
    Pix,
    Dinheiro,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credito => "Crédito",
            Self::Debito => "Débito",
            Self::Boleto => "Boleto",
            Self::Pix => "PIX",
            Self::Dinheiro => "Dinheiro",
        }
    }

    /// Lenient parse: accepts the display form, ASCII-folded, any case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "crédito" | "credito" | "credit" => Some(Self::Credito),
            "débito" | "debito" | "debit" => Some(Self::Debito),
            "boleto" => Some(Self::Boleto),
            "pix" => Some(Self::Pix),
            "dinheiro" | "cash" => Some(Self::Dinheiro),
            _ => None,
        }
    }
}

/// A posted financial event. `id` is caller-generated and never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEntry {
    pub id: String,
    pub date: NaiveDate,
    pub r#type: String,
    pub category: String,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    pub is_expense: bool,
    #[serde(default)]
    pub is_recurrent: bool,
}

/// A target ceiling/expectation for one (type, category, isExpense) triple.
/// At most one row exists per triple; `store::save_budget` enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItem {
    pub id: String,
    pub r#type: String,
    pub category: String,
    pub is_expense: bool,
    pub target_amount: Decimal,
}

/// A user-defined classification pair extending the built-in catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryItem {
    pub r#type: String,
    pub category: String,
    pub is_expense: bool,
}

/// Derived, never persisted: one month's total for a classification pair,
/// with the matching budget target attached when one exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub r#type: String,
    pub category: String,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub month: String,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub available: Decimal,
    pub income_categories: Vec<CategorySummary>,
    pub expense_categories: Vec<CategorySummary>,
}

/// Full contents of the three synced collections; only used as the sync
/// wire payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub transactions: Vec<TransactionEntry>,
    pub budgets: Vec<BudgetItem>,
    pub categories: Vec<CategoryItem>,
}

/// A locally registered account identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalUser {
    pub email: String,
    pub password: String,
    pub name: String,
    pub id: String,
    pub security_question: Option<String>,
    pub security_answer: Option<String>,
}

/// Best-effort structured guess returned by the external receipt scanner.
/// Consumed only as a pre-fill suggestion; every field goes through normal
/// validation before it reaches a TransactionEntry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptGuess {
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub is_expense: bool,
    pub r#type: Option<String>,
    pub category: Option<String>,
}
