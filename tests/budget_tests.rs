// Copyright (c) 2025 Saldo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use rust_decimal::Decimal;
use saldo::models::BudgetItem;
use saldo::store;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    saldo::db::init_schema(&conn).unwrap();
    conn
}

fn budget(id: &str, target: &str) -> BudgetItem {
    BudgetItem {
        id: id.to_string(),
        r#type: "Feira/Supermercado".to_string(),
        category: "Alimentação".to_string(),
        is_expense: true,
        target_amount: target.parse::<Decimal>().unwrap(),
    }
}

#[test]
fn save_keeps_one_record_per_triple_with_latest_target() {
    let conn = setup();
    let first = store::save_budget(&conn, &budget("b1", "500")).unwrap();
    // A save with a fresh id but the same triple must update in place.
    let second = store::save_budget(&conn, &budget("b2", "650")).unwrap();
    let third = store::save_budget(&conn, &budget("b3", "700")).unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(third.id, first.id);

    let all = store::all_budgets(&conn).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].target_amount, Decimal::from(700));
}

#[test]
fn same_pair_opposite_kind_is_a_distinct_budget() {
    let conn = setup();
    store::save_budget(&conn, &budget("b1", "500")).unwrap();
    let mut income = budget("b2", "900");
    income.is_expense = false;
    store::save_budget(&conn, &income).unwrap();
    assert_eq!(store::all_budgets(&conn).unwrap().len(), 2);
}

#[test]
fn find_budget_matches_the_full_triple() {
    let conn = setup();
    store::save_budget(&conn, &budget("b1", "500")).unwrap();
    let hit = store::find_budget(&conn, "Feira/Supermercado", "Alimentação", true).unwrap();
    assert_eq!(hit.unwrap().target_amount, Decimal::from(500));
    let miss = store::find_budget(&conn, "Feira/Supermercado", "Alimentação", false).unwrap();
    assert!(miss.is_none());
}

#[test]
fn delete_budget_by_id() {
    let conn = setup();
    let saved = store::save_budget(&conn, &budget("b1", "500")).unwrap();
    store::delete_budget(&conn, &saved.id).unwrap();
    assert!(store::all_budgets(&conn).unwrap().is_empty());
}
