// Copyright (c) 2025 Saldo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::auth;
use crate::models::LocalUser;
use anyhow::Result;
use rusqlite::Connection;
use uuid::Uuid;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("register", sub)) => {
            let user = LocalUser {
                email: sub.get_one::<String>("email").unwrap().clone(),
                password: sub.get_one::<String>("password").unwrap().clone(),
                name: sub.get_one::<String>("name").unwrap().clone(),
                id: Uuid::new_v4().to_string(),
                security_question: sub.get_one::<String>("security-question").cloned(),
                security_answer: sub.get_one::<String>("security-answer").cloned(),
            };
            auth::register(conn, &user)?;
            println!("Registered '{}' ({})", user.name, user.email);
        }
        Some(("login", sub)) => {
            let email = sub.get_one::<String>("email").unwrap();
            let password = sub.get_one::<String>("password").unwrap();
            if auth::authenticate(conn, email, password)? {
                println!("Welcome back, {}", email);
            } else {
                println!("Invalid email or password");
            }
        }
        Some(("reset-password", sub)) => {
            let email = sub.get_one::<String>("email").unwrap();
            let answer = sub.get_one::<String>("answer").unwrap();
            let new_password = sub.get_one::<String>("new-password").unwrap();
            auth::reset_password(conn, email, answer, new_password)?;
            println!("Password updated for {}", email);
        }
        _ => {}
    }
    Ok(())
}
