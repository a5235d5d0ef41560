// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::facade::Facade;
use crate::models::InvestmentKind;
use crate::store::investments::NewInvestment;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(facade: &mut Facade, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(facade, user, sub)?,
        Some(("list", sub)) => list(facade, user, sub)?,
        Some(("revalue", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let value = parse_decimal(sub.get_one::<String>("value").unwrap())?;
            let inv = facade.revalue_investment(user, id, value)?;
            println!(
                "'{}' revalued at {} (basis {})",
                inv.name, inv.current_value, inv.amount
            );
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            facade.delete_investment(user, id)?;
            println!("Removed investment {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(facade: &mut Facade, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().clone();
    let kind: InvestmentKind = sub.get_one::<String>("type").unwrap().parse()?;
    let cost = parse_decimal(sub.get_one::<String>("cost").unwrap())?;
    let value = match sub.get_one::<String>("value") {
        Some(v) => parse_decimal(v)?,
        None => cost,
    };
    let purchase_date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => chrono::Utc::now().date_naive(),
    };
    let currency = sub.get_one::<String>("currency").unwrap().clone();
    let notes = sub.get_one::<String>("notes").cloned();

    let inv = facade.add_investment(
        user,
        &NewInvestment {
            name,
            kind,
            amount: cost,
            current_value: value,
            purchase_date,
            currency,
            notes,
        },
    )?;
    println!(
        "Added {} '{}': basis {}, value {}",
        inv.kind, inv.name, inv.amount, inv.current_value
    );
    Ok(())
}

fn list(facade: &mut Facade, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let perf = facade.investment_performance(user)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &perf)? {
        let rows = perf
            .iter()
            .map(|p| {
                vec![
                    p.id.to_string(),
                    p.name.clone(),
                    p.kind.to_string(),
                    format!("{:.2}", p.cost_basis),
                    format!("{:.2}", p.current_value),
                    format!("{:.2}", p.gain),
                    p.gain_pct
                        .map(|r| format!("{:.1}%", r * Decimal::ONE_HUNDRED))
                        .unwrap_or_else(|| "-".into()),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Name", "Type", "Basis", "Value", "Gain", "Return"],
                rows,
            )
        );
    }
    Ok(())
}
