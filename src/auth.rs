// Copyright (c) 2025 Saldo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Local account identities: a simple credential check plus a security-answer
//! recovery flow. Anything beyond that (hashing policy, providers) is out of
//! scope for the core.

use crate::error::LedgerError;
use crate::models::LocalUser;
use crate::store;
use rusqlite::{params, Connection, OptionalExtension};

pub const CURRENT_USER: &str = "current_user";

fn get_user(conn: &Connection, email: &str) -> Result<Option<LocalUser>, LedgerError> {
    let mut stmt = conn.prepare(
        "SELECT email, password, name, id, security_question, security_answer
         FROM local_users WHERE email=?1",
    )?;
    Ok(stmt
        .query_row(params![email], |r| {
            Ok(LocalUser {
                email: r.get(0)?,
                password: r.get(1)?,
                name: r.get(2)?,
                id: r.get(3)?,
                security_question: r.get(4)?,
                security_answer: r.get(5)?,
            })
        })
        .optional()?)
}

/// Registers a new local identity; an already-used email is a `Duplicate`.
pub fn register(conn: &Connection, user: &LocalUser) -> Result<(), LedgerError> {
    if get_user(conn, &user.email)?.is_some() {
        return Err(LedgerError::Duplicate(format!(
            "email '{}' is already registered",
            user.email
        )));
    }
    conn.execute(
        "INSERT INTO local_users(email, password, name, id, security_question, security_answer)
         VALUES (?1,?2,?3,?4,?5,?6)",
        params![
            user.email,
            user.password,
            user.name,
            user.id,
            user.security_question,
            user.security_answer,
        ],
    )?;
    Ok(())
}

/// Credential check. On success the current-user marker is stored; the
/// caller decides what to do with a `false`.
pub fn authenticate(conn: &Connection, email: &str, password: &str) -> Result<bool, LedgerError> {
    match get_user(conn, email)? {
        Some(user) if user.password == password => {
            store::meta_set(conn, CURRENT_USER, email)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

pub fn current_user(conn: &Connection) -> Result<Option<String>, LedgerError> {
    store::meta_get(conn, CURRENT_USER)
}

/// Recovery flow: the stored security answer is compared trimmed and
/// case-insensitively; a mismatch (or a missing stored answer) is rejected.
pub fn reset_password(
    conn: &Connection,
    email: &str,
    security_answer: &str,
    new_password: &str,
) -> Result<(), LedgerError> {
    let user = get_user(conn, email)?
        .ok_or_else(|| LedgerError::validation("email", format!("no user '{}'", email)))?;

    let matches = user
        .security_answer
        .as_deref()
        .map(|stored| stored.trim().to_lowercase() == security_answer.trim().to_lowercase())
        .unwrap_or(false);
    if !matches {
        return Err(LedgerError::SecurityAnswerMismatch);
    }

    conn.execute(
        "UPDATE local_users SET password=?1 WHERE email=?2",
        params![new_password, email],
    )?;
    Ok(())
}
