// Copyright (c) 2025 Saldo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use saldo::{cli, commands, db, recurrence};

fn main() -> Result<()> {
    env_logger::init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;

    // Recurring entries are projected on every start. Best-effort: a failure
    // here is logged and must never block the command the user asked for.
    recurrence::run_projection_best_effort(&conn, chrono::Local::now().date_naive());

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&conn, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&conn, sub)?,
        Some(("category", sub)) => commands::categories::handle(&conn, sub)?,
        Some(("summary", sub)) => commands::reports::handle(&conn, sub)?,
        Some(("project", _)) => commands::project::handle(&conn)?,
        Some(("sync", sub)) => commands::sync::handle(&conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("user", sub)) => commands::users::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
