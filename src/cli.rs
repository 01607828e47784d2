// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn company_arg() -> Arg {
    Arg::new("company")
        .long("company")
        .short('c')
        .required(true)
        .help("Company name")
}

fn period_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("month").long("month").help("Month 1-12, defaults to current"))
        .arg(Arg::new("year").long("year").help("Year, defaults to current"))
}

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("drecalc")
        .version(crate_version!())
        .about("DRE income statement, break-even and growth metrics, and cash-vault ledger")
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(
            Command::new("company")
                .about("Manage companies")
                .subcommand(
                    Command::new("add")
                        .about("Create a company with regime-default tax configuration")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("regime")
                                .long("regime")
                                .default_value("simples_nacional")
                                .help("simples_nacional | lucro_presumido | lucro_real"),
                        )
                        .arg(Arg::new("tax-id").long("tax-id"))
                        .arg(Arg::new("business-category").long("business-category"))
                        .arg(
                            Arg::new("fiscal-period")
                                .long("fiscal-period")
                                .default_value("monthly"),
                        ),
                )
                .subcommand(json_args(Command::new("list").about("List companies"))),
        )
        .subcommand(
            Command::new("taxes")
                .about("Show or update a company's tax configuration")
                .subcommand(json_args(
                    Command::new("show").arg(company_arg()).about("Show rates"),
                ))
                .subcommand(
                    Command::new("set")
                        .about("Update rates (percent values)")
                        .arg(company_arg())
                        .arg(Arg::new("icms").long("icms"))
                        .arg(Arg::new("ipi").long("ipi"))
                        .arg(Arg::new("pis").long("pis"))
                        .arg(Arg::new("cofins").long("cofins"))
                        .arg(Arg::new("iss").long("iss"))
                        .arg(Arg::new("das").long("das"))
                        .arg(
                            Arg::new("use-das")
                                .long("use-das")
                                .help("true|false: use the unified DAS rate"),
                        )
                        .arg(Arg::new("irpj").long("irpj"))
                        .arg(Arg::new("irpj-additional").long("irpj-additional"))
                        .arg(
                            Arg::new("irpj-threshold")
                                .long("irpj-threshold")
                                .help("Monthly profit above which the surtax applies"),
                        )
                        .arg(Arg::new("csll").long("csll")),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage DRE categories")
                .subcommand(
                    Command::new("add")
                        .arg(company_arg())
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("revenue | cost | expense | financial_expense | financial_income"),
                        )
                        .arg(
                            Arg::new("classification")
                                .long("classification")
                                .help("fixed | variable (cost/expense only)"),
                        )
                        .arg(
                            Arg::new("markup-type")
                                .long("markup-type")
                                .help("CD | DV | DF markup tag"),
                        )
                        .arg(Arg::new("parent").long("parent").help("Parent category name")),
                )
                .subcommand(json_args(Command::new("list").arg(company_arg()))),
        )
        .subcommand(
            Command::new("client")
                .about("Manage clients")
                .subcommand(
                    Command::new("add")
                        .arg(company_arg())
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("email").long("email"))
                        .arg(Arg::new("phone").long("phone"))
                        .arg(Arg::new("tax-id").long("tax-id"))
                        .arg(
                            Arg::new("first-purchase")
                                .long("first-purchase")
                                .help("YYYY-MM-DD"),
                        ),
                )
                .subcommand(json_args(Command::new("list").arg(company_arg()))),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .arg(company_arg())
                        .arg(Arg::new("date").long("date").required(true).help("YYYY-MM-DD"))
                        .arg(Arg::new("amount").required(true).help("Positive amount"))
                        .arg(Arg::new("description").required(true))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("client").long("client"))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .default_value("administrative")
                                .help("administrative | operational"),
                        )
                        .arg(
                            Arg::new("new-client")
                                .long("new-client")
                                .action(ArgAction::SetTrue)
                                .help("Flag as a new-client sale"),
                        )
                        .arg(
                            Arg::new("marketing")
                                .long("marketing")
                                .action(ArgAction::SetTrue)
                                .help("Flag as a marketing cost"),
                        )
                        .arg(
                            Arg::new("sales")
                                .long("sales")
                                .action(ArgAction::SetTrue)
                                .help("Flag as a sales cost"),
                        ),
                )
                .subcommand(json_args(period_args(
                    Command::new("list")
                        .arg(company_arg())
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(clap::value_parser!(usize)),
                        ),
                )))
                .subcommand(
                    Command::new("delete")
                        .arg(company_arg())
                        .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64))),
                ),
        )
        .subcommand(json_args(period_args(
            Command::new("dre")
                .about("Income statement for a period")
                .arg(company_arg()),
        )))
        .subcommand(
            Command::new("metrics")
                .about("Derived metrics: break-even, CAC, LTV, ROI")
                .subcommand(json_args(period_args(
                    Command::new("show").arg(company_arg()).about("Show cached metrics"),
                )))
                .subcommand(period_args(
                    Command::new("recalc")
                        .arg(company_arg())
                        .about("Recompute and overwrite the metrics snapshot"),
                )),
        )
        .subcommand(json_args(period_args(
            Command::new("markup")
                .about("Markup index and suggested sale price")
                .arg(company_arg())
                .arg(
                    Arg::new("margin")
                        .long("margin")
                        .default_value("30")
                        .help("Desired profit margin percent"),
                ),
        )))
        .subcommand(json_args(period_args(
            Command::new("scenario")
                .about("What-if simulation over the period's statement")
                .arg(company_arg())
                .arg(Arg::new("revenue").long("revenue").default_value("0").help("Revenue adjustment %"))
                .arg(Arg::new("cogs").long("cogs").default_value("0").help("COGS adjustment %"))
                .arg(Arg::new("opex").long("opex").default_value("0").help("Operating expenses adjustment %"))
                .arg(
                    Arg::new("financial")
                        .long("financial")
                        .default_value("0")
                        .help("Financial expenses adjustment %"),
                ),
        )))
        .subcommand(
            Command::new("vault")
                .about("Cash vault ledger")
                .subcommand(
                    Command::new("deposit")
                        .about("Record money entering a vault from outside")
                        .arg(company_arg())
                        .arg(Arg::new("vault").required(true))
                        .arg(Arg::new("amount").required(true))
                        .arg(Arg::new("description").long("description").default_value("Deposit"))
                        .arg(Arg::new("tag").long("tag").action(ArgAction::Append)),
                )
                .subcommand(
                    Command::new("withdraw")
                        .about("Record money leaving a vault")
                        .arg(company_arg())
                        .arg(Arg::new("vault").required(true))
                        .arg(Arg::new("amount").required(true))
                        .arg(Arg::new("description").long("description").default_value("Withdrawal"))
                        .arg(Arg::new("tag").long("tag").action(ArgAction::Append)),
                )
                .subcommand(
                    Command::new("transfer")
                        .about("Move money between two vaults atomically")
                        .arg(company_arg())
                        .arg(Arg::new("from").required(true))
                        .arg(Arg::new("to").required(true))
                        .arg(Arg::new("amount").required(true))
                        .arg(Arg::new("description").long("description").default_value("Transfer"))
                        .arg(Arg::new("tag").long("tag").action(ArgAction::Append)),
                )
                .subcommand(json_args(
                    Command::new("balances").arg(company_arg()).about("Vault balances"),
                ))
                .subcommand(json_args(
                    Command::new("list")
                        .arg(company_arg())
                        .arg(Arg::new("vault").long("vault"))
                        .arg(
                            Arg::new("all")
                                .long("all")
                                .action(ArgAction::SetTrue)
                                .help("Include reversed entries"),
                        ),
                ))
                .subcommand(
                    Command::new("delete")
                        .about("Reverse a cash transaction")
                        .arg(company_arg())
                        .arg(Arg::new("id").required(true).value_parser(clap::value_parser!(i64))),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Per-metric period targets")
                .subcommand(period_args(
                    Command::new("set")
                        .arg(company_arg())
                        .arg(Arg::new("metric").required(true))
                        .arg(Arg::new("target").required(true)),
                ))
                .subcommand(json_args(period_args(
                    Command::new("list").arg(company_arg()),
                ))),
        )
        .subcommand(
            Command::new("export")
                .about("Export data as CSV")
                .subcommand(
                    Command::new("transactions")
                        .arg(company_arg())
                        .arg(Arg::new("out").long("out").required(true)),
                )
                .subcommand(period_args(
                    Command::new("dre")
                        .arg(company_arg())
                        .arg(Arg::new("out").long("out").required(true)),
                )),
        )
        .subcommand(
            Command::new("doctor")
                .about("Consistency checks over categories, references and the vault ledger")
                .arg(company_arg()),
        )
}
