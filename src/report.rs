// Copyright (c) 2025 Saldo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly aggregation: a pure pass over one month's transactions producing
//! per-category totals with budget targets attached.

use crate::error::LedgerError;
use crate::models::{BudgetItem, CategorySummary, MonthlySummary};
use crate::store;
use crate::utils::month_bounds;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Builds the summary for one `YYYY-MM` month.
///
/// The summary is transaction-driven: a budgeted category with no
/// transactions in the month does not appear at all.
pub fn summarize_month(conn: &Connection, month: &str) -> Result<MonthlySummary, LedgerError> {
    let (start, end) = month_bounds(month);
    let entries = store::transactions_in_range(conn, &start, &end)?;
    let budgets = store::all_budgets(conn)?;

    let mut income: HashMap<(String, String), Decimal> = HashMap::new();
    let mut expense: HashMap<(String, String), Decimal> = HashMap::new();
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;

    for t in &entries {
        let key = (t.r#type.clone(), t.category.clone());
        if t.is_expense {
            total_expense += t.amount;
            *expense.entry(key).or_insert(Decimal::ZERO) += t.amount;
        } else {
            total_income += t.amount;
            *income.entry(key).or_insert(Decimal::ZERO) += t.amount;
        }
    }

    Ok(MonthlySummary {
        month: month.to_string(),
        total_income,
        total_expense,
        available: total_income - total_expense,
        income_categories: into_summaries(income, &budgets, false),
        expense_categories: into_summaries(expense, &budgets, true),
    })
}

fn into_summaries(
    groups: HashMap<(String, String), Decimal>,
    budgets: &[BudgetItem],
    is_expense: bool,
) -> Vec<CategorySummary> {
    let mut list: Vec<CategorySummary> = groups
        .into_iter()
        .map(|((r#type, category), amount)| {
            let target_amount = budgets
                .iter()
                .find(|b| {
                    b.is_expense == is_expense && b.r#type == r#type && b.category == category
                })
                .map(|b| b.target_amount);
            CategorySummary {
                r#type,
                category,
                amount,
                target_amount,
            }
        })
        .collect();
    // Descending by amount; (type, category) breaks ties deterministically.
    list.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.r#type.cmp(&b.r#type))
            .then_with(|| a.category.cmp(&b.category))
    });
    list
}
