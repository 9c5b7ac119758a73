// Copyright (c) 2025 Saldo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        Some(("budgets", sub)) => export_budgets(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let mut entries = store::all_transactions(conn)?;
    entries.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id", "date", "type", "category", "amount", "paymentMethod", "isExpense",
                "isRecurrent",
            ])?;
            for t in &entries {
                wtr.write_record([
                    t.id.clone(),
                    t.date.to_string(),
                    t.r#type.clone(),
                    t.category.clone(),
                    t.amount.to_string(),
                    t.payment_method.map(|p| p.as_str().to_string()).unwrap_or_default(),
                    t.is_expense.to_string(),
                    t.is_recurrent.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&entries)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported {} transactions to {}", entries.len(), out);
    Ok(())
}

fn export_budgets(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let mut budgets = store::all_budgets(conn)?;
    budgets.sort_by(|a, b| {
        (a.is_expense, &a.r#type, &a.category).cmp(&(b.is_expense, &b.r#type, &b.category))
    });

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "type", "category", "isExpense", "targetAmount"])?;
            for b in &budgets {
                wtr.write_record([
                    b.id.clone(),
                    b.r#type.clone(),
                    b.category.clone(),
                    b.is_expense.to_string(),
                    b.target_amount.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&budgets)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported {} budgets to {}", budgets.len(), out);
    Ok(())
}
