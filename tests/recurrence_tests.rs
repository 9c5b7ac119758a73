// Copyright (c) 2025 Saldo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use saldo::models::{PaymentMethod, TransactionEntry};
use saldo::recurrence::{run_projection, LAST_PROJECTED_MONTH};
use saldo::store;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    saldo::db::init_schema(&conn).unwrap();
    conn
}

fn recurring(id: &str, date: &str, amount: &str) -> TransactionEntry {
    TransactionEntry {
        id: id.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        r#type: "Aluguel".to_string(),
        category: "Moradia".to_string(),
        amount: amount.parse::<Decimal>().unwrap(),
        payment_method: Some(PaymentMethod::Boleto),
        is_expense: true,
        is_recurrent: true,
    }
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn marker_short_circuits_repeated_runs() {
    let conn = setup();
    store::put_transaction(&conn, &recurring("r1", "2024-01-10", "100")).unwrap();
    store::meta_set(&conn, LAST_PROJECTED_MONTH, "2024-02").unwrap();

    for _ in 0..3 {
        assert_eq!(run_projection(&conn, day("2024-02-15")).unwrap(), 0);
    }
    assert_eq!(store::all_transactions(&conn).unwrap().len(), 1);
}

#[test]
fn copies_previous_month_recurring_entries_with_day_clamped() {
    let conn = setup();
    store::put_transaction(&conn, &recurring("r1", "2024-01-31", "100")).unwrap();
    store::meta_set(&conn, LAST_PROJECTED_MONTH, "2023-12").unwrap();

    let created = run_projection(&conn, day("2024-02-15")).unwrap();
    assert_eq!(created, 1);

    let all = store::all_transactions(&conn).unwrap();
    assert_eq!(all.len(), 2);
    let copy = all.iter().find(|t| t.id != "r1").unwrap();
    // 2024 is a leap year: the 31st clamps to February 29th.
    assert_eq!(copy.date, day("2024-02-29"));
    assert_eq!(copy.amount, Decimal::from(100));
    assert!(copy.is_recurrent);
    assert_eq!(copy.r#type, "Aluguel");
    assert_ne!(copy.id, "r1");
    assert_eq!(
        store::meta_get(&conn, LAST_PROJECTED_MONTH).unwrap().as_deref(),
        Some("2024-02")
    );
}

#[test]
fn january_projects_from_december_of_prior_year() {
    let conn = setup();
    store::put_transaction(&conn, &recurring("r1", "2023-12-05", "80")).unwrap();
    let created = run_projection(&conn, day("2024-01-20")).unwrap();
    assert_eq!(created, 1);
    let all = store::all_transactions(&conn).unwrap();
    let copy = all.iter().find(|t| t.id != "r1").unwrap();
    assert_eq!(copy.date, day("2024-01-05"));
}

#[test]
fn non_recurring_entries_are_not_copied() {
    let conn = setup();
    let mut plain = recurring("p1", "2024-01-12", "55");
    plain.is_recurrent = false;
    store::put_transaction(&conn, &plain).unwrap();

    assert_eq!(run_projection(&conn, day("2024-02-15")).unwrap(), 0);
    assert_eq!(store::all_transactions(&conn).unwrap().len(), 1);
}

#[test]
fn interrupted_run_does_not_duplicate_on_resume() {
    let conn = setup();
    store::put_transaction(&conn, &recurring("r1", "2024-01-31", "100")).unwrap();
    store::put_transaction(&conn, &recurring("r2", "2024-01-10", "40")).unwrap();
    store::meta_set(&conn, LAST_PROJECTED_MONTH, "2023-12").unwrap();

    // First run generated r1's copy, then the process died before the month
    // marker was written.
    let created = run_projection(&conn, day("2024-02-15")).unwrap();
    assert_eq!(created, 2);
    store::meta_set(&conn, LAST_PROJECTED_MONTH, "2023-12").unwrap();

    // The re-run sees the stale marker but the per-source keys skip both.
    assert_eq!(run_projection(&conn, day("2024-02-15")).unwrap(), 0);
    assert_eq!(store::all_transactions(&conn).unwrap().len(), 4);
}

#[test]
fn day_29_clamps_to_28_outside_leap_years() {
    let conn = setup();
    store::put_transaction(&conn, &recurring("r1", "2023-01-29", "100")).unwrap();
    let created = run_projection(&conn, day("2023-02-10")).unwrap();
    assert_eq!(created, 1);
    let all = store::all_transactions(&conn).unwrap();
    let copy = all.iter().find(|t| t.id != "r1").unwrap();
    assert_eq!(copy.date, day("2023-02-28"));
}
