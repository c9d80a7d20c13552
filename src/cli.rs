// Copyright (c) AlphaVelocity.
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
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn yes_flag(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("yes")
            .long("yes")
            .short('y')
            .action(ArgAction::SetTrue)
            .help("Skip the confirmation prompt"),
    )
}

fn card_field_args(cmd: Command, required: bool) -> Command {
    cmd.arg(Arg::new("name").long("name").required(required))
        .arg(
            Arg::new("last-four")
                .long("last-four")
                .required(required)
                .help("Last four digits of the card number"),
        )
        .arg(
            Arg::new("network")
                .long("network")
                .required(required)
                .help("Payment scheme, e.g. Visa or Mastercard"),
        )
        .arg(Arg::new("bank").long("bank").required(required))
        .arg(Arg::new("color").long("color"))
        .arg(Arg::new("image-url").long("image-url"))
        .arg(
            Arg::new("joining-date")
                .long("joining-date")
                .help("YYYY-MM-DD, empty to clear"),
        )
        .arg(
            Arg::new("expiry-date")
                .long("expiry-date")
                .help("YYYY-MM-DD, empty to clear"),
        )
        .arg(
            Arg::new("last-bill-date")
                .long("last-bill-date")
                .help("YYYY-MM-DD, empty to clear"),
        )
        .arg(
            Arg::new("last-due-date")
                .long("last-due-date")
                .help("YYYY-MM-DD, empty to clear"),
        )
        .arg(Arg::new("limit").long("limit").required(required))
        .arg(Arg::new("balance").long("balance"))
        .arg(Arg::new("joining-fee").long("joining-fee"))
        .arg(Arg::new("annual-fee").long("annual-fee"))
}

pub fn build_cli() -> Command {
    Command::new("cardclip")
        .about("Credit card tracking, bill statements, and payment reminders")
        .version(clap::crate_version!())
        .subcommand(
            Command::new("auth")
                .about("Sign in, sign up, and manage the cached session")
                .subcommand(
                    Command::new("login")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(
                    Command::new("signup")
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(Command::new("logout"))
                .subcommand(Command::new("whoami")),
        )
        .subcommand(
            Command::new("card")
                .about("Register and manage credit cards")
                .subcommand(card_field_args(Command::new("add"), true))
                .subcommand(json_flags(Command::new("list")))
                .subcommand(card_field_args(
                    Command::new("edit").arg(Arg::new("id").required(true)),
                    false,
                ))
                .subcommand(yes_flag(
                    Command::new("rm").arg(Arg::new("id").required(true)),
                )),
        )
        .subcommand(
            Command::new("reminder")
                .about("Payment-due reminders")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("card").long("card").required(true).help("Card id"))
                        .arg(
                            Arg::new("due")
                                .long("due")
                                .required(true)
                                .help("Due date, YYYY-MM-DD"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("card").long("card").help("Only for this card id"))
                        .arg(
                            Arg::new("unpaid")
                                .long("unpaid")
                                .action(ArgAction::SetTrue)
                                .help("Only unpaid reminders"),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("due").long("due").help("Due date, YYYY-MM-DD"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(Command::new("paid").arg(Arg::new("id").required(true)))
                .subcommand(Command::new("unpaid").arg(Arg::new("id").required(true)))
                .subcommand(yes_flag(
                    Command::new("rm").arg(Arg::new("id").required(true)),
                )),
        )
        .subcommand(
            Command::new("statement")
                .about("Bill statement uploads")
                .subcommand(
                    Command::new("upload")
                        .arg(Arg::new("card").long("card").required(true).help("Card id"))
                        .arg(
                            Arg::new("file")
                                .long("file")
                                .required(true)
                                .help("Path to the statement file"),
                        )
                        .arg(
                            Arg::new("bill-date")
                                .long("bill-date")
                                .required(true)
                                .help("YYYY-MM-DD"),
                        )
                        .arg(
                            Arg::new("due-date")
                                .long("due-date")
                                .required(true)
                                .help("YYYY-MM-DD"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list").arg(Arg::new("card").required(true).help("Card id")),
                ))
                .subcommand(
                    Command::new("url").arg(Arg::new("id").required(true)).arg(
                        Arg::new("expires")
                            .long("expires")
                            .value_parser(value_parser!(u64))
                            .default_value("3600")
                            .help("Link lifetime in seconds"),
                    ),
                )
                .subcommand(yes_flag(
                    Command::new("rm").arg(Arg::new("id").required(true)),
                )),
        )
        .subcommand(Command::new("dashboard").about("Cards summary and upcoming reminders"))
        .subcommand(Command::new("doctor").about("Check configuration, backend, and session"))
}
