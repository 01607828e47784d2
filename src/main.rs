// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use drecalc::{cli, commands, db};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("company", sub)) => commands::companies::handle(&conn, sub)?,
        Some(("taxes", sub)) => commands::taxes::handle(&conn, sub)?,
        Some(("category", sub)) => commands::categories::handle(&conn, sub)?,
        Some(("client", sub)) => commands::clients::handle(&conn, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&conn, sub)?,
        Some(("dre", sub)) => commands::reports::handle(&conn, sub)?,
        Some(("metrics", sub)) => commands::metrics::handle(&conn, sub)?,
        Some(("markup", sub)) => commands::markup::handle(&conn, sub)?,
        Some(("scenario", sub)) => commands::scenarios::handle(&conn, sub)?,
        Some(("vault", sub)) => commands::vaults::handle(&mut conn, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("doctor", sub)) => commands::doctor::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
