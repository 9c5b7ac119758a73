// Copyright (c) 2025 Saldo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog;
use crate::models::{PaymentMethod, ReceiptGuess, TransactionEntry};
use crate::store;
use crate::utils::{maybe_print_json, month_bounds, parse_date, parse_decimal, parse_month, pretty_table};
use anyhow::{bail, Context, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;
use uuid::Uuid;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("prefill", sub)) => prefill(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => chrono::Local::now().date_naive(),
    };
    let r#type = sub.get_one::<String>("type").unwrap().clone();
    let category = sub.get_one::<String>("category").unwrap().clone();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let is_expense = sub.get_flag("expense");
    let is_recurrent = sub.get_flag("recurrent");

    if amount <= Decimal::ZERO {
        bail!("Amount must be positive, got {}", amount);
    }
    if !catalog::is_known_pair(conn, &r#type, &category, is_expense)? {
        bail!(
            "Unknown {} classification '{}' / '{}' — add it first with `saldo category add`",
            if is_expense { "expense" } else { "income" },
            r#type,
            category
        );
    }

    let payment_method = match sub.get_one::<String>("method") {
        Some(s) => {
            if !is_expense {
                bail!("A payment method only applies to expenses");
            }
            Some(
                PaymentMethod::parse(s)
                    .with_context(|| format!("Unknown payment method '{}'", s))?,
            )
        }
        None => None,
    };

    let entry = TransactionEntry {
        id: Uuid::new_v4().to_string(),
        date,
        r#type,
        category,
        amount,
        payment_method,
        is_expense,
        is_recurrent,
    };
    store::put_transaction(conn, &entry)?;
    println!(
        "Recorded {} {} on {} ({} / {}) id {}",
        if entry.is_expense { "expense" } else { "income" },
        entry.amount,
        entry.date,
        entry.r#type,
        entry.category,
        entry.id
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut entries = match sub.get_one::<String>("month") {
        Some(month) => {
            let month = parse_month(month)?;
            let (start, end) = month_bounds(&month);
            store::transactions_in_range(conn, &start, &end)?
        }
        None => store::all_transactions(conn)?,
    };
    entries.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));

    if !maybe_print_json(sub.get_flag("json"), &entries)? {
        let rows: Vec<Vec<String>> = entries
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    if t.is_expense { "expense".into() } else { "income".into() },
                    t.r#type.clone(),
                    t.category.clone(),
                    t.amount.to_string(),
                    t.payment_method.map(|p| p.as_str().to_string()).unwrap_or_default(),
                    if t.is_recurrent { "yes".into() } else { String::new() },
                    t.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Kind", "Type", "Category", "Amount", "Method", "Recurrent", "Id"],
                rows,
            )
        );
    }
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    store::delete_transaction(conn, id)?;
    println!("Deleted entry {} (if it existed)", id);
    Ok(())
}

/// Turns the external scanner's structured guess into a validated draft
/// entry. Nothing is persisted; unusable fields are dropped with a warning.
fn prefill(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("guess").unwrap();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Read scan guess from {}", path))?;
    let guess: ReceiptGuess =
        serde_json::from_str(&raw).with_context(|| format!("Parse scan guess in {}", path))?;

    let amount = match guess.amount {
        Some(a) if a > Decimal::ZERO => Some(a),
        Some(a) => {
            eprintln!("Ignoring non-positive scanned amount {}", a);
            None
        }
        None => None,
    };
    let pair = match (&guess.r#type, &guess.category) {
        (Some(t), Some(c)) if catalog::is_known_pair(conn, t, c, guess.is_expense)? => {
            Some((t.clone(), c.clone()))
        }
        (Some(t), Some(c)) => {
            eprintln!("Ignoring unknown scanned classification '{}' / '{}'", t, c);
            None
        }
        _ => None,
    };

    let draft = TransactionEntry {
        id: Uuid::new_v4().to_string(),
        date: guess.date.unwrap_or_else(|| chrono::Local::now().date_naive()),
        r#type: pair.as_ref().map(|(t, _)| t.clone()).unwrap_or_default(),
        category: pair.map(|(_, c)| c).unwrap_or_default(),
        amount: amount.unwrap_or(Decimal::ZERO),
        payment_method: None,
        is_expense: guess.is_expense,
        is_recurrent: false,
    };
    println!("{}", serde_json::to_string_pretty(&draft)?);
    println!("Review the draft above, then record it with `saldo tx add`.");
    Ok(())
}
