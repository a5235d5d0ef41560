// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use centavo::facade::Facade;
use centavo::{cli, commands, db};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut conn = db::open_or_init()?;
    let user = matches
        .get_one::<String>("user")
        .cloned()
        .unwrap_or_else(|| "default".into());
    let mut facade = Facade::new(&mut conn);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("wallet", sub)) => commands::wallets::handle(&mut facade, &user, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut facade, &user, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut facade, &user, sub)?,
        Some(("income", sub)) => commands::incomes::handle(&mut facade, &user, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&mut facade, &user, sub)?,
        Some(("investment", sub)) => commands::investments::handle(&mut facade, &user, sub)?,
        Some(("report", sub)) => commands::reports::handle(&mut facade, &user, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&mut facade, &user, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&mut facade, &user)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
