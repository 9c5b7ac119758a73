// Copyright (c) 2025 Saldo Maintainers.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command};

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of a table")
}

pub fn build_cli() -> Command {
    Command::new("saldo")
        .about("On-device personal finance ledger with budgets, recurring entries, and P2P device sync")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(
            Command::new("tx")
                .about("Manage transaction entries")
                .subcommand(
                    Command::new("add")
                        .about("Record an income or expense entry")
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
                        .arg(Arg::new("type").long("type").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("expense")
                                .long("expense")
                                .action(ArgAction::SetTrue)
                                .help("Record as an expense (default is income)"),
                        )
                        .arg(
                            Arg::new("method")
                                .long("method")
                                .help("Payment method (expenses only): credito|debito|boleto|pix|dinheiro"),
                        )
                        .arg(
                            Arg::new("recurrent")
                                .long("recurrent")
                                .action(ArgAction::SetTrue)
                                .help("Re-create this entry automatically every month"),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .about("List entries")
                        .arg(Arg::new("month").long("month").help("Restrict to YYYY-MM"))
                        .arg(json_flag()),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete an entry by id")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(
                    Command::new("prefill")
                        .about("Turn an external receipt-scan guess (JSON file) into a validated draft entry")
                        .arg(Arg::new("guess").long("guess").required(true).help("Path to the scanner's JSON output")),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Manage budget targets")
                .subcommand(
                    Command::new("set")
                        .about("Set the target for a (type, category) pair")
                        .arg(Arg::new("type").long("type").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(
                            Arg::new("expense")
                                .long("expense")
                                .action(ArgAction::SetTrue)
                                .help("Budget an expense pair (default is income)"),
                        ),
                )
                .subcommand(Command::new("list").about("List budget targets").arg(json_flag()))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a budget by id")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage classification pairs")
                .subcommand(
                    Command::new("add")
                        .about("Add a custom (type, category) pair")
                        .arg(Arg::new("type").long("type").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("expense")
                                .long("expense")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .about("List the built-in catalog plus custom pairs")
                        .arg(json_flag()),
                ),
        )
        .subcommand(
            Command::new("summary")
                .about("Monthly summary: totals and per-category breakdown")
                .arg(Arg::new("month").required(true).help("YYYY-MM"))
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("project")
                .about("Run the recurring-entry projection for the current month"),
        )
        .subcommand(
            Command::new("sync")
                .about("Synchronize this ledger with another device")
                .subcommand(
                    Command::new("host")
                        .about("Wait for the other device to connect")
                        .arg(
                            Arg::new("bind")
                                .long("bind")
                                .default_value("0.0.0.0:0")
                                .help("Address to listen on"),
                        ),
                )
                .subcommand(
                    Command::new("join")
                        .about("Connect to a hosting device")
                        .arg(Arg::new("addr").required(true).help("Address shown by the host")),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export collections to a file")
                .subcommand(export_cmd("transactions"))
                .subcommand(export_cmd("budgets")),
        )
        .subcommand(
            Command::new("user")
                .about("Local account identities")
                .subcommand(
                    Command::new("register")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("password").long("password").required(true))
                        .arg(Arg::new("security-question").long("security-question"))
                        .arg(Arg::new("security-answer").long("security-answer")),
                )
                .subcommand(
                    Command::new("login")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(
                    Command::new("reset-password")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("answer").long("answer").required(true).help("Security answer"))
                        .arg(Arg::new("new-password").long("new-password").required(true)),
                ),
        )
}

fn export_cmd(what: &'static str) -> Command {
    Command::new(what)
        .about(format!("Export {} as CSV or JSON", what))
        .arg(
            Arg::new("format")
                .long("format")
                .default_value("csv")
                .help("csv|json"),
        )
        .arg(Arg::new("out").long("out").required(true).help("Output file path"))
}
