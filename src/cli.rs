// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn period_arg() -> Arg {
    Arg::new("period")
        .long("period")
        .default_value("current")
        .help("current | all | YYYY-MM | last:N")
}

fn tx_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(
        Arg::new("kind")
            .long("kind")
            .required(required)
            .help("income | expense | saving | debt"),
    )
    .arg(
        Arg::new("amount")
            .long("amount")
            .required(required)
            .help("Positive amount"),
    )
    .arg(
        Arg::new("description")
            .long("description")
            .short('d')
            .required(required),
    )
    .arg(
        Arg::new("category")
            .long("category")
            .help("food | shopping | transport | education | health | debt | salary | other"),
    )
    .arg(
        Arg::new("date")
            .long("date")
            .help("YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS (default: now)"),
    )
}

pub fn build_cli() -> Command {
    Command::new("walletlens")
        .version(clap::crate_version!())
        .about("Track income, expenses, savings and debt; report by month, category and day")
        .subcommand(Command::new("init").about("Create the database if missing"))
        .subcommand(
            Command::new("owner")
                .about("Which user's records commands operate on")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set").arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(tx_fields(Command::new("add"), true))
                .subcommand(tx_fields(
                    Command::new("edit").arg(Arg::new("id").long("id").required(true)),
                    false,
                ))
                .subcommand(Command::new("rm").arg(Arg::new("id").long("id").required(true)))
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("kind").long("kind"))
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .default_value("all")
                                .help("current | all | YYYY-MM | last:N"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregated statistics")
                .subcommand(json_flags(Command::new("summary").arg(period_arg())))
                .subcommand(json_flags(Command::new("categories").arg(period_arg())))
                .subcommand(json_flags(
                    Command::new("calendar")
                        .arg(Arg::new("month").long("month").help("YYYY-MM (default: this month)")),
                ))
                .subcommand(json_flags(
                    Command::new("day").arg(Arg::new("date").long("date").required(true)),
                ))
                .subcommand(json_flags(
                    Command::new("trend").arg(
                        Arg::new("months")
                            .long("months")
                            .default_value("6")
                            .value_parser(value_parser!(u32)),
                    ),
                )),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly spending limits per category")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("month").long("month").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(Command::new("list").arg(Arg::new("month").long("month")))
                .subcommand(json_flags(
                    Command::new("status").arg(Arg::new("month").long("month")),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Write transactions to a file")
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv | json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Report records the reports treat specially"))
}
