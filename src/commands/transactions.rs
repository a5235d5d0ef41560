// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use anyhow::Result;

use crate::facade::Facade;
use crate::ledger::TxChanges;
use crate::models::{Category, TxKind};
use crate::store::transactions::{NewTransaction, TxFilter};
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(facade: &mut Facade, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(facade, user, sub)?,
        Some(("list", sub)) => list(facade, user, sub)?,
        Some(("edit", sub)) => edit(facade, user, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let tx = facade.delete_transaction(user, id)?;
            let wallet = facade.wallet(user, tx.wallet_id)?;
            println!(
                "Deleted {} {} '{}'; wallet '{}' back to {}",
                tx.kind, tx.amount, tx.description, wallet.name, wallet.balance
            );
        }
        _ => {}
    }
    Ok(())
}

fn add(facade: &mut Facade, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let wallet_name = sub.get_one::<String>("wallet").unwrap();
    let kind: TxKind = sub.get_one::<String>("type").unwrap().parse()?;
    let category: Category = sub.get_one::<String>("category").unwrap().parse()?;
    let description = sub.get_one::<String>("desc").unwrap().clone();
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => chrono::Utc::now().date_naive(),
    };

    let wallet_id = facade.wallet_id(user, wallet_name)?;
    let tx = facade.record_transaction(
        user,
        &NewTransaction {
            wallet_id,
            kind,
            amount,
            category,
            description,
            date,
            source: None,
        },
    )?;
    let wallet = facade.wallet(user, wallet_id)?;
    println!(
        "Recorded {} {} on {} ({}); wallet '{}' now {}",
        tx.kind, tx.amount, tx.date, tx.category, wallet.name, wallet.balance
    );
    Ok(())
}

fn build_filter(facade: &mut Facade, user: &str, sub: &clap::ArgMatches) -> Result<TxFilter> {
    let mut filter = TxFilter::default();
    if let Some(name) = sub.get_one::<String>("wallet") {
        filter.wallet_id = Some(facade.wallet_id(user, name)?);
    }
    if let Some(kind) = sub.get_one::<String>("type") {
        filter.kind = Some(kind.parse()?);
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        filter.category = Some(cat.parse()?);
    }
    if let Some(from) = sub.get_one::<String>("from") {
        filter.from = Some(parse_date(from)?);
    }
    if let Some(to) = sub.get_one::<String>("to") {
        filter.to = Some(parse_date(to)?);
    }
    filter.limit = sub.get_one::<usize>("limit").copied();
    Ok(filter)
}

fn list(facade: &mut Facade, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let filter = build_filter(facade, user, sub)?;
    let txs = facade.transactions(user, &filter)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &txs)? {
        let names: HashMap<i64, String> = facade
            .wallets(user)?
            .into_iter()
            .map(|w| (w.id, w.name))
            .collect();
        let rows = txs
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.date.to_string(),
                    names.get(&t.wallet_id).cloned().unwrap_or_default(),
                    t.kind.to_string(),
                    format!("{:.2}", t.amount),
                    t.category.to_string(),
                    t.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Wallet", "Type", "Amount", "Category", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

fn edit(facade: &mut Facade, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut changes = TxChanges::default();
    if let Some(a) = sub.get_one::<String>("amount") {
        changes.amount = Some(parse_decimal(a)?);
    }
    if let Some(k) = sub.get_one::<String>("type") {
        changes.kind = Some(k.parse()?);
    }
    if let Some(c) = sub.get_one::<String>("category") {
        changes.category = Some(c.parse()?);
    }
    if let Some(d) = sub.get_one::<String>("desc") {
        changes.description = Some(d.clone());
    }
    if let Some(d) = sub.get_one::<String>("date") {
        changes.date = Some(parse_date(d)?);
    }
    if let Some(w) = sub.get_one::<String>("wallet") {
        changes.wallet_id = Some(facade.wallet_id(user, w)?);
    }
    let tx = facade.update_transaction(user, id, &changes)?;
    println!(
        "Updated transaction {}: {} {} ({}) on {}",
        tx.id, tx.kind, tx.amount, tx.category, tx.date
    );
    Ok(())
}
