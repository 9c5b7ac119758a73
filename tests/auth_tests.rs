// Copyright (c) 2025 Saldo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;
use saldo::auth;
use saldo::error::LedgerError;
use saldo::models::LocalUser;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    saldo::db::init_schema(&conn).unwrap();
    conn
}

fn user(email: &str) -> LocalUser {
    LocalUser {
        email: email.to_string(),
        password: "hunter2".to_string(),
        name: "Ana".to_string(),
        id: "u1".to_string(),
        security_question: Some("First pet?".to_string()),
        security_answer: Some("Rex".to_string()),
    }
}

#[test]
fn registering_the_same_email_twice_is_a_duplicate() {
    let conn = setup();
    auth::register(&conn, &user("ana@example.com")).unwrap();
    let err = auth::register(&conn, &user("ana@example.com")).unwrap_err();
    assert!(matches!(err, LedgerError::Duplicate(_)));
}

#[test]
fn authenticate_checks_credentials_and_marks_current_user() {
    let conn = setup();
    auth::register(&conn, &user("ana@example.com")).unwrap();

    assert!(!auth::authenticate(&conn, "ana@example.com", "wrong").unwrap());
    assert!(!auth::authenticate(&conn, "nobody@example.com", "hunter2").unwrap());
    assert_eq!(auth::current_user(&conn).unwrap(), None);

    assert!(auth::authenticate(&conn, "ana@example.com", "hunter2").unwrap());
    assert_eq!(
        auth::current_user(&conn).unwrap().as_deref(),
        Some("ana@example.com")
    );
}

#[test]
fn password_reset_requires_the_security_answer() {
    let conn = setup();
    auth::register(&conn, &user("ana@example.com")).unwrap();

    let err = auth::reset_password(&conn, "ana@example.com", "Bolt", "newpass").unwrap_err();
    assert!(matches!(err, LedgerError::SecurityAnswerMismatch));

    // The stored answer is compared trimmed and case-insensitively.
    auth::reset_password(&conn, "ana@example.com", "  rex ", "newpass").unwrap();
    assert!(auth::authenticate(&conn, "ana@example.com", "newpass").unwrap());
    assert!(!auth::authenticate(&conn, "ana@example.com", "hunter2").unwrap());
}

#[test]
fn reset_for_unknown_user_is_a_validation_error() {
    let conn = setup();
    let err = auth::reset_password(&conn, "ghost@example.com", "Rex", "x").unwrap_err();
    assert!(matches!(err, LedgerError::Validation { .. }));
}

#[test]
fn user_without_stored_answer_cannot_reset() {
    let conn = setup();
    let mut u = user("bob@example.com");
    u.security_answer = None;
    auth::register(&conn, &u).unwrap();
    let err = auth::reset_password(&conn, "bob@example.com", "anything", "x").unwrap_err();
    assert!(matches!(err, LedgerError::SecurityAnswerMismatch));
}
