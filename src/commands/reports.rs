// Copyright (c) 2025 Saldo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::CategorySummary;
use crate::report;
use crate::utils::{maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(m.get_one::<String>("month").unwrap())?;
    let summary = report::summarize_month(conn, &month)?;
    if maybe_print_json(m.get_flag("json"), &summary)? {
        return Ok(());
    }

    println!(
        "{}: income {}, expense {}, available {}",
        summary.month, summary.total_income, summary.total_expense, summary.available
    );
    print_group("Income", &summary.income_categories);
    print_group("Expenses", &summary.expense_categories);
    Ok(())
}

fn print_group(label: &str, categories: &[CategorySummary]) {
    if categories.is_empty() {
        println!("{}: none", label);
        return;
    }
    let rows: Vec<Vec<String>> = categories
        .iter()
        .map(|c| {
            vec![
                c.r#type.clone(),
                c.category.clone(),
                c.amount.to_string(),
                c.target_amount.map(|t| t.to_string()).unwrap_or_default(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&[label, "Category", "Amount", "Target"], rows));
}
