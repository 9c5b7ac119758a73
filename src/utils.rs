// Copyright (c) 2025 Saldo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::Decimal;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    chrono::NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

/// Month token for a calendar date.
pub fn month_of(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Inclusive date-range bounds for a month, as TEXT. Day 31 is a valid upper
/// bound for every month because the store compares dates lexicographically.
pub fn month_bounds(month: &str) -> (String, String) {
    (format!("{}-01", month), format!("{}-31", month))
}

/// The month preceding `month`, with year rollover (January -> December).
pub fn prev_month(month: &str) -> Result<String> {
    let (y, m) = split_month(month)?;
    Ok(if m == 1 {
        format!("{:04}-12", y - 1)
    } else {
        format!("{:04}-{:02}", y, m - 1)
    })
}

/// Last valid day number of a month, leap years included.
pub fn last_day_of_month(month: &str) -> Result<u32> {
    let (y, m) = split_month(month)?;
    let last = match m {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(y, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => return Err(anyhow::anyhow!("Invalid month number {}", m)),
    };
    Ok(last)
}

/// A date in `month` on `day`, clamped to the month's last valid day
/// (31 into a 30-day month becomes 30, 29 into a non-leap February 28).
pub fn date_in_month(month: &str, day: u32) -> Result<NaiveDate> {
    let (y, m) = split_month(month)?;
    let day = day.min(last_day_of_month(month)?);
    NaiveDate::from_ymd_opt(y, m, day)
        .ok_or_else(|| anyhow::anyhow!("Invalid month '{}'", month))
}

fn split_month(month: &str) -> Result<(i32, u32)> {
    let parts: Vec<&str> = month.split('-').collect();
    if parts.len() != 2 {
        return Err(anyhow::anyhow!("Invalid month '{}'", month));
    }
    let y: i32 = parts[0].parse()?;
    let m: u32 = parts[1].parse()?;
    if !(1..=12).contains(&m) {
        return Err(anyhow::anyhow!("Invalid month number {}", m));
    }
    Ok((y, m))
}

pub fn maybe_print_json<T: serde::Serialize>(json_flag: bool, v: &T) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    Ok(false)
}
