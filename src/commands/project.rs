// Copyright (c) 2025 Saldo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::recurrence;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let created = recurrence::run_projection(conn, today)?;
    if created == 0 {
        println!("Nothing to project (already ran this month, or no recurring entries)");
    } else {
        println!("Projected {} recurring entr{}", created, if created == 1 { "y" } else { "ies" });
    }
    Ok(())
}
