// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("pocketledger")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Local-first personal ledger with receipts and rolling stats")
        .subcommand(Command::new("init").about("Initialize the database and print its location"))
        .subcommand(
            Command::new("tx")
                .about("Record, edit, and list transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction, optionally with receipt files")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, default today"))
                        .arg(
                            Arg::new("income")
                                .long("income")
                                .action(ArgAction::SetTrue)
                                .help("Record income instead of an expense"),
                        )
                        .arg(
                            Arg::new("receipt")
                                .long("receipt")
                                .action(ArgAction::Append)
                                .help("Receipt file to attach; repeatable"),
                        ),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Overwrite a transaction's fields")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("date").long("date"))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .help("expense or income"),
                        )
                        .arg(
                            Arg::new("receipt")
                                .long("receipt")
                                .action(ArgAction::Append)
                                .help("Replacement receipt file; repeatable, replaces all"),
                        ),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete a transaction (its receipts stay stored)")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(Arg::new("kind").long("kind").help("expense or income"))
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(json_flags(
            Command::new("dashboard").about("Balance, period totals, and daily spend chart"),
        ))
        .subcommand(
            Command::new("receipt")
                .about("Inspect and export stored receipts")
                .subcommand(
                    Command::new("list")
                        .about("List stored receipts")
                        .arg(
                            Arg::new("tx")
                                .long("tx")
                                .value_parser(value_parser!(i64))
                                .help("Only receipts referenced by this transaction"),
                        ),
                )
                .subcommand(
                    Command::new("info")
                        .about("Metadata for one receipt")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                )
                .subcommand(
                    Command::new("save")
                        .about("Write a receipt's bytes to a file")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("indicators").about("Market indicators (best effort)"))
        .subcommand(
            Command::new("export")
                .about("Export transactions to a file")
                .arg(Arg::new("out").long("out").required(true))
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .help("csv or json"),
                ),
        )
        .subcommand(Command::new("doctor").about("Integrity report for the stores"))
}
