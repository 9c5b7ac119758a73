// Copyright (c) 2025 Saldo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog;
use crate::models::BudgetItem;
use crate::store;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};
use anyhow::{bail, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;
use uuid::Uuid;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let r#type = sub.get_one::<String>("type").unwrap().clone();
    let category = sub.get_one::<String>("category").unwrap().clone();
    let target = parse_decimal(sub.get_one::<String>("target").unwrap())?;
    let is_expense = sub.get_flag("expense");

    if target <= Decimal::ZERO {
        bail!("Target must be positive, got {}", target);
    }
    if !catalog::is_known_pair(conn, &r#type, &category, is_expense)? {
        bail!(
            "Unknown classification '{}' / '{}' — add it first with `saldo category add`",
            r#type,
            category
        );
    }

    let saved = store::save_budget(
        conn,
        &BudgetItem {
            id: Uuid::new_v4().to_string(),
            r#type,
            category,
            is_expense,
            target_amount: target,
        },
    )?;
    println!(
        "Budget for {} / {} = {} (id {})",
        saved.r#type, saved.category, saved.target_amount, saved.id
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut budgets = store::all_budgets(conn)?;
    budgets.sort_by(|a, b| {
        (a.is_expense, &a.r#type, &a.category).cmp(&(b.is_expense, &b.r#type, &b.category))
    });
    if !maybe_print_json(sub.get_flag("json"), &budgets)? {
        let rows: Vec<Vec<String>> = budgets
            .iter()
            .map(|b| {
                vec![
                    if b.is_expense { "expense".into() } else { "income".into() },
                    b.r#type.clone(),
                    b.category.clone(),
                    b.target_amount.to_string(),
                    b.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Kind", "Type", "Category", "Target", "Id"], rows)
        );
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    store::delete_budget(conn, id)?;
    println!("Deleted budget {} (if it existed)", id);
    Ok(())
}
