// Copyright (c) 2025 Saldo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("app.saldo", "Saldo", "saldo"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("saldo.sqlite"))
}

/// Opens the ledger database, creating the schema on first run. The returned
/// handle is constructed once at startup and passed by reference to every
/// component; nothing else opens connections.
pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Schema for the four persisted collections plus the single-slot meta map.
///
/// Record ids are caller-generated strings, so every table keys on TEXT.
/// Budgets carry no UNIQUE(type, category, is_expense) constraint: the sync
/// merge overwrites budgets strictly by id, and the triple invariant is
/// enforced by `store::save_budget` on the local write path instead.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS system_meta(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id TEXT PRIMARY KEY,
        date TEXT NOT NULL,
        type TEXT NOT NULL,
        category TEXT NOT NULL,
        amount TEXT NOT NULL,
        payment_method TEXT,
        is_expense INTEGER NOT NULL,
        is_recurrent INTEGER NOT NULL DEFAULT 0,
        recurrence_key TEXT UNIQUE
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);

    CREATE TABLE IF NOT EXISTS budgets(
        id TEXT PRIMARY KEY,
        type TEXT NOT NULL,
        category TEXT NOT NULL,
        is_expense INTEGER NOT NULL,
        target_amount TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS custom_categories(
        type TEXT NOT NULL,
        category TEXT NOT NULL,
        is_expense INTEGER NOT NULL,
        UNIQUE(type, category, is_expense)
    );

    CREATE TABLE IF NOT EXISTS local_users(
        email TEXT PRIMARY KEY,
        password TEXT NOT NULL,
        name TEXT NOT NULL,
        id TEXT NOT NULL,
        security_question TEXT,
        security_answer TEXT
    );
    "#,
    )?;
    Ok(())
}
