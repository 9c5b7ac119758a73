// Copyright (c) 2025 Saldo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The ledger store contract: durable keyed collections for transactions,
//! budgets, and custom categories, plus the single-slot `system_meta` map.
//!
//! All operations are durable before returning. Multi-record operations
//! (`merge_snapshot`, the recurrence batch) are intentionally not wrapped in
//! one transaction across records; a failure mid-batch leaves the store
//! partially updated and callers surface that state as-is.

use crate::error::LedgerError;
use crate::models::{
    BudgetItem, CategoryItem, PaymentMethod, Snapshot, TransactionEntry,
};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

type Result<T> = std::result::Result<T, LedgerError>;

fn bad_column(
    idx: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(err))
}

fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let s: String = row.get(idx)?;
    s.parse::<Decimal>().map_err(|e| bad_column(idx, e))
}

// --- Transactions ---

fn tx_from_row(row: &Row<'_>) -> rusqlite::Result<TransactionEntry> {
    let method: Option<String> = row.get(5)?;
    Ok(TransactionEntry {
        id: row.get(0)?,
        date: row.get::<_, NaiveDate>(1)?,
        r#type: row.get(2)?,
        category: row.get(3)?,
        amount: decimal_column(row, 4)?,
        payment_method: method.as_deref().and_then(PaymentMethod::parse),
        is_expense: row.get(6)?,
        is_recurrent: row.get(7)?,
    })
}

const TX_COLS: &str = "id, date, type, category, amount, payment_method, is_expense, is_recurrent";

pub fn all_transactions(conn: &Connection) -> Result<Vec<TransactionEntry>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM transactions", TX_COLS))?;
    let rows = stmt.query_map([], tx_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Inclusive range over the TEXT `date` column. The comparison is
/// lexicographic, so a non-existent upper bound like `2024-04-31` is fine.
pub fn transactions_in_range(
    conn: &Connection,
    start: &str,
    end: &str,
) -> Result<Vec<TransactionEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM transactions WHERE date BETWEEN ?1 AND ?2",
        TX_COLS
    ))?;
    let rows = stmt.query_map(params![start, end], tx_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Whole-record upsert by id. An update leaves the device-local
/// `recurrence_key` untouched.
pub fn put_transaction(conn: &Connection, t: &TransactionEntry) -> Result<()> {
    conn.execute(
        "INSERT INTO transactions(id, date, type, category, amount, payment_method, is_expense, is_recurrent)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8)
         ON CONFLICT(id) DO UPDATE SET
           date=excluded.date, type=excluded.type, category=excluded.category,
           amount=excluded.amount, payment_method=excluded.payment_method,
           is_expense=excluded.is_expense, is_recurrent=excluded.is_recurrent",
        params![
            t.id,
            t.date.to_string(),
            t.r#type,
            t.category,
            t.amount.to_string(),
            t.payment_method.map(|m| m.as_str()),
            t.is_expense,
            t.is_recurrent,
        ],
    )?;
    Ok(())
}

/// Insert a projector-generated copy together with its idempotency key.
pub fn put_projected_transaction(
    conn: &Connection,
    t: &TransactionEntry,
    recurrence_key: &str,
) -> Result<()> {
    conn.execute(
        "INSERT INTO transactions(id, date, type, category, amount, payment_method, is_expense, is_recurrent, recurrence_key)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9)",
        params![
            t.id,
            t.date.to_string(),
            t.r#type,
            t.category,
            t.amount.to_string(),
            t.payment_method.map(|m| m.as_str()),
            t.is_expense,
            t.is_recurrent,
            recurrence_key,
        ],
    )?;
    Ok(())
}

pub fn recurrence_key_exists(conn: &Connection, key: &str) -> Result<bool> {
    let hit: Option<i32> = conn
        .query_row(
            "SELECT 1 FROM transactions WHERE recurrence_key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(hit.is_some())
}

/// No-op when the id is absent.
pub fn delete_transaction(conn: &Connection, id: &str) -> Result<()> {
    conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    Ok(())
}

// --- Budgets ---

fn budget_from_row(row: &Row<'_>) -> rusqlite::Result<BudgetItem> {
    Ok(BudgetItem {
        id: row.get(0)?,
        r#type: row.get(1)?,
        category: row.get(2)?,
        is_expense: row.get(3)?,
        target_amount: decimal_column(row, 4)?,
    })
}

pub fn all_budgets(conn: &Connection) -> Result<Vec<BudgetItem>> {
    let mut stmt =
        conn.prepare("SELECT id, type, category, is_expense, target_amount FROM budgets")?;
    let rows = stmt.query_map([], budget_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub fn find_budget(
    conn: &Connection,
    r#type: &str,
    category: &str,
    is_expense: bool,
) -> Result<Option<BudgetItem>> {
    let mut stmt = conn.prepare(
        "SELECT id, type, category, is_expense, target_amount FROM budgets
         WHERE type=?1 AND category=?2 AND is_expense=?3",
    )?;
    Ok(stmt
        .query_row(params![r#type, category, is_expense], budget_from_row)
        .optional()?)
}

/// Raw upsert by id, used by the sync merge: the incoming record always
/// replaces a local record with the same id.
pub fn put_budget(conn: &Connection, b: &BudgetItem) -> Result<()> {
    conn.execute(
        "INSERT INTO budgets(id, type, category, is_expense, target_amount)
         VALUES (?1,?2,?3,?4,?5)
         ON CONFLICT(id) DO UPDATE SET
           type=excluded.type, category=excluded.category,
           is_expense=excluded.is_expense, target_amount=excluded.target_amount",
        params![
            b.id,
            b.r#type,
            b.category,
            b.is_expense,
            b.target_amount.to_string(),
        ],
    )?;
    Ok(())
}

/// Uniqueness-enforcing save for the local edit path: when a budget already
/// exists for the (type, category, isExpense) triple, that record is updated
/// in place, keeping its id stable. Returns the record as stored.
pub fn save_budget(conn: &Connection, item: &BudgetItem) -> Result<BudgetItem> {
    let mut item = item.clone();
    if let Some(existing) = find_budget(conn, &item.r#type, &item.category, item.is_expense)? {
        item.id = existing.id;
    }
    put_budget(conn, &item)?;
    Ok(item)
}

pub fn delete_budget(conn: &Connection, id: &str) -> Result<()> {
    conn.execute("DELETE FROM budgets WHERE id=?1", params![id])?;
    Ok(())
}

// --- Custom categories ---

pub fn all_custom_categories(conn: &Connection) -> Result<Vec<CategoryItem>> {
    let mut stmt = conn.prepare("SELECT type, category, is_expense FROM custom_categories")?;
    let rows = stmt.query_map([], |r| {
        Ok(CategoryItem {
            r#type: r.get(0)?,
            category: r.get(1)?,
            is_expense: r.get(2)?,
        })
    })?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub fn custom_category_exists(conn: &Connection, item: &CategoryItem) -> Result<bool> {
    let hit: Option<i32> = conn
        .query_row(
            "SELECT 1 FROM custom_categories WHERE type=?1 AND category=?2 AND is_expense=?3",
            params![item.r#type, item.category, item.is_expense],
            |r| r.get(0),
        )
        .optional()?;
    Ok(hit.is_some())
}

/// Insert only when no record shares the (type, category, isExpense) triple.
/// Returns whether a row was added, so callers can report idempotent calls.
pub fn add_custom_category(conn: &Connection, item: &CategoryItem) -> Result<bool> {
    if custom_category_exists(conn, item)? {
        return Ok(false);
    }
    conn.execute(
        "INSERT INTO custom_categories(type, category, is_expense) VALUES (?1,?2,?3)",
        params![item.r#type, item.category, item.is_expense],
    )?;
    Ok(true)
}

// --- System meta ---

pub fn meta_get(conn: &Connection, key: &str) -> Result<Option<String>> {
    Ok(conn
        .query_row(
            "SELECT value FROM system_meta WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?)
}

pub fn meta_set(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO system_meta(key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

// --- Snapshot & merge ---

/// Counts of records applied by a merge, for status reporting.
#[derive(Debug, Default, Clone, Copy)]
pub struct MergeOutcome {
    pub transactions: usize,
    pub budgets: usize,
    pub categories_added: usize,
}

/// Full in-memory copy of the three synced collections.
pub fn snapshot(conn: &Connection) -> Result<Snapshot> {
    Ok(Snapshot {
        transactions: all_transactions(conn)?,
        budgets: all_budgets(conn)?,
        categories: all_custom_categories(conn)?,
    })
}

/// Applies an incoming snapshot: transactions and budgets are upserted
/// per-record by id (the incoming version always wins on a matching id, and
/// the result is the union of ids); categories are inserted only when their
/// triple is absent. Not atomic across records.
pub fn merge_snapshot(conn: &Connection, snap: &Snapshot) -> Result<MergeOutcome> {
    let mut outcome = MergeOutcome::default();
    for t in &snap.transactions {
        put_transaction(conn, t)?;
        outcome.transactions += 1;
    }
    for b in &snap.budgets {
        put_budget(conn, b)?;
        outcome.budgets += 1;
    }
    for c in &snap.categories {
        if add_custom_category(conn, c)? {
            outcome.categories_added += 1;
        }
    }
    Ok(outcome)
}
