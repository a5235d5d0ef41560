// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde_json::json;

use crate::facade::Facade;
use crate::store::transactions::TxFilter;

pub fn handle(facade: &mut Facade, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(facade, user, sub),
        _ => Ok(()),
    }
}

fn export_transactions(facade: &mut Facade, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let txs = facade.transactions(user, &TxFilter::default())?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id", "date", "wallet_id", "type", "amount", "category", "description", "source",
            ])?;
            for t in &txs {
                wtr.write_record([
                    t.id.to_string(),
                    t.date.to_string(),
                    t.wallet_id.to_string(),
                    t.kind.to_string(),
                    t.amount.to_string(),
                    t.category.to_string(),
                    t.description.clone(),
                    t.source.map(|s| s.to_string()).unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = txs
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "date": t.date,
                        "wallet_id": t.wallet_id,
                        "type": t.kind,
                        "amount": t.amount,
                        "category": t.category,
                        "description": t.description,
                        "source": t.source,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported {} transaction(s) to {}", txs.len(), out);
    Ok(())
}
