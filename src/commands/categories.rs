// Copyright (c) 2025 Saldo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::catalog;
use crate::models::CategoryItem;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let item = CategoryItem {
                r#type: sub.get_one::<String>("type").unwrap().clone(),
                category: sub.get_one::<String>("category").unwrap().clone(),
                is_expense: sub.get_flag("expense"),
            };
            if catalog::add_custom(conn, &item)? {
                println!("Added category '{}' / '{}'", item.r#type, item.category);
            } else {
                println!(
                    "Category '{}' / '{}' already exists",
                    item.r#type, item.category
                );
            }
        }
        Some(("list", sub)) => {
            let all = catalog::all_categories(conn)?;
            if !maybe_print_json(sub.get_flag("json"), &all)? {
                let rows: Vec<Vec<String>> = all
                    .iter()
                    .map(|c| {
                        vec![
                            if c.is_expense { "expense".into() } else { "income".into() },
                            c.r#type.clone(),
                            c.category.clone(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Kind", "Type", "Category"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}
