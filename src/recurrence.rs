// Copyright (c) 2025 Saldo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Recurring-entry projection: on each start, entries flagged recurrent in
//! the previous month are copied once into the current month.
//!
//! Two guards make the job safe under repeated or interrupted runs: the
//! `last_projected_month` marker short-circuits whole-month re-runs, and each
//! generated copy carries a `<sourceId>:<month>` idempotency key so a crash
//! between the copy batch and the marker write cannot duplicate entries.

use crate::error::LedgerError;
use crate::models::TransactionEntry;
use crate::store;
use crate::utils::{date_in_month, month_bounds, month_of, prev_month};
use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;
use uuid::Uuid;

pub const LAST_PROJECTED_MONTH: &str = "last_projected_month";

fn month_err(e: anyhow::Error) -> LedgerError {
    LedgerError::validation("month", e.to_string())
}

/// Runs the projection for the month containing `today`. Returns how many
/// entries were generated (0 when the month marker short-circuits).
pub fn run_projection(conn: &Connection, today: NaiveDate) -> Result<usize, LedgerError> {
    let current = month_of(today);
    if store::meta_get(conn, LAST_PROJECTED_MONTH)?.as_deref() == Some(current.as_str()) {
        return Ok(0);
    }

    let previous = prev_month(&current).map_err(month_err)?;
    let (start, end) = month_bounds(&previous);
    let mut created = 0;

    for source in store::transactions_in_range(conn, &start, &end)? {
        if !source.is_recurrent {
            continue;
        }
        let key = format!("{}:{}", source.id, current);
        if store::recurrence_key_exists(conn, &key)? {
            continue;
        }
        let date = date_in_month(&current, source.date.day()).map_err(month_err)?;
        let copy = TransactionEntry {
            id: Uuid::new_v4().to_string(),
            date,
            ..source
        };
        store::put_projected_transaction(conn, &copy, &key)?;
        created += 1;
    }

    store::meta_set(conn, LAST_PROJECTED_MONTH, &current)?;
    Ok(created)
}

/// Best-effort wrapper for application startup: failures are logged and
/// swallowed so they can never block the rest of the launch.
pub fn run_projection_best_effort(conn: &Connection, today: NaiveDate) {
    match run_projection(conn, today) {
        Ok(0) => {}
        Ok(n) => log::info!("projected {} recurring entr{} into {}", n, if n == 1 { "y" } else { "ies" }, month_of(today)),
        Err(e) => log::warn!("recurrence projection failed: {}", e),
    }
}
