// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn client_arg() -> Arg {
    Arg::new("client")
        .long("client")
        .short('c')
        .value_parser(value_parser!(i64))
        .help("Client id (defaults to the active client)")
}

fn period_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("from")
            .long("from")
            .requires("to")
            .help("Period start, inclusive (YYYY-MM-DD)"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .requires("from")
            .help("Period end, exclusive (YYYY-MM-DD)"),
    )
}

fn client_fields(cmd: Command, required: bool) -> Command {
    let field = |id: &'static str, help: &'static str| {
        Arg::new(id).long(id).required(required).help(help)
    };
    cmd.arg(field("first", "First name"))
        .arg(field("last", "Last name"))
        .arg(field("email", "Email address"))
        .arg(field("phone", "Phone number, 10 digits"))
        .arg(field("street", "Street address"))
        .arg(Arg::new("apt").long("apt").help("Ste#/Apt#/Unit#"))
        .arg(field("city", "City"))
        .arg(field("state", "2-letter state"))
        .arg(field("zip", "Zip code"))
        .arg(Arg::new("notes").long("notes").help("Free-form notes"))
}

pub fn build_cli() -> Command {
    Command::new("pfc")
        .about("Personal Finance Checkup: clients, line items, summaries and pie layouts")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("client")
                .about("Register and manage clients")
                .subcommand(client_fields(Command::new("add"), true))
                .subcommand(json_args(Command::new("list")))
                .subcommand(json_args(Command::new("show").arg(client_arg())))
                .subcommand(client_fields(Command::new("edit").arg(client_arg()), false))
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(
                    Command::new("use").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("item")
                .about("Income, expense, asset and liability line items")
                .subcommand(
                    Command::new("add")
                        .arg(client_arg())
                        .arg(Arg::new("section").long("section").short('s').required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("date").long("date")),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .arg(client_arg())
                        .arg(Arg::new("section").long("section").short('s')),
                ))
                .subcommand(
                    Command::new("rm").arg(client_arg()).arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("etc")
                .about("Manually entered catch-all amount")
                .subcommand(
                    Command::new("set")
                        .arg(client_arg())
                        .arg(Arg::new("amount").long("amount").required(true)),
                ),
        )
        .subcommand(json_args(period_args(
            Command::new("summary")
                .about("Income, expense, remaining and etc")
                .arg(client_arg()),
        )))
        .subcommand(json_args(period_args(
            Command::new("chart")
                .about("Lay out a percentage pie")
                .arg(client_arg())
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .short('k')
                        .default_value("summary")
                        .value_parser(["summary", "assets", "liabilities"]),
                ),
        )))
        .subcommand(
            Command::new("config")
                .about("Chart settings")
                .subcommand(json_args(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                )
                .subcommand(Command::new("reset")),
        )
        .subcommand(
            Command::new("export")
                .about("Write clients and books to CSV")
                .arg(Arg::new("out").long("out").required(true)),
        )
        .subcommand(
            Command::new("import")
                .about("Replace clients and books from CSV")
                .arg(Arg::new("path").long("path").required(true)),
        )
        .subcommand(
            Command::new("doctor")
                .about("Report stored rows that aggregation skips or coerces")
                .arg(
                    Arg::new("fix")
                        .long("fix")
                        .action(ArgAction::SetTrue)
                        .help("Delete line items with a blank category"),
                ),
        )
}
