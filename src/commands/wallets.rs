// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::facade::Facade;
use crate::models::WalletKind;
use crate::store::wallets::NewWallet;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(facade: &mut Facade, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(facade, user, sub)?,
        Some(("list", sub)) => list(facade, user, sub)?,
        Some(("set-default", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let id = facade.wallet_id(user, name)?;
            facade.set_default_wallet(user, id)?;
            println!("'{}' is now the default wallet", name);
        }
        Some(("rename", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let new_name = sub.get_one::<String>("new-name").unwrap();
            let id = facade.wallet_id(user, name)?;
            facade.rename_wallet(user, id, new_name)?;
            println!("Renamed wallet '{}' to '{}'", name, new_name);
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let id = facade.wallet_id(user, name)?;
            facade.delete_wallet(user, id)?;
            println!("Removed wallet '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

fn add(facade: &mut Facade, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().clone();
    let kind: WalletKind = sub.get_one::<String>("type").unwrap().parse()?;
    let currency = sub.get_one::<String>("currency").unwrap().clone();
    let opening = sub
        .get_one::<String>("opening")
        .map(|s| parse_decimal(s))
        .transpose()?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => chrono::Utc::now().date_naive(),
    };
    let new = NewWallet {
        name,
        kind,
        currency,
        is_default: sub.get_flag("default"),
    };
    let wallet = facade.create_wallet(user, &new, opening, date)?;
    println!(
        "Added wallet '{}' ({}, {} {})",
        wallet.name, wallet.kind, wallet.currency, wallet.balance
    );
    Ok(())
}

fn list(facade: &mut Facade, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let wallets = facade.wallets(user)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &wallets)? {
        let rows = wallets
            .iter()
            .map(|w| {
                vec![
                    w.name.clone(),
                    w.kind.to_string(),
                    w.currency.clone(),
                    format!("{:.2}", w.balance),
                    if w.is_default { "*".into() } else { String::new() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Name", "Type", "CCY", "Balance", "Default"], rows)
        );
    }
    Ok(())
}
