// Copyright (c) 2025 Saldo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::net;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("host", sub)) => {
            let bind = sub.get_one::<String>("bind").unwrap();
            net::run_host(conn, bind)?;
            println!("Sync completed");
        }
        Some(("join", sub)) => {
            let addr = sub.get_one::<String>("addr").unwrap();
            net::run_join(conn, addr)?;
            println!("Sync completed");
        }
        _ => {}
    }
    Ok(())
}
