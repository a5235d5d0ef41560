// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::facade::Facade;
use crate::models::{Frequency, IncomeSource};
use crate::store::incomes::NewIncome;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(facade: &mut Facade, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let source: IncomeSource = sub.get_one::<String>("source").unwrap().parse()?;
            let description = sub.get_one::<String>("desc").unwrap().clone();
            let frequency: Frequency = sub.get_one::<String>("freq").unwrap().parse()?;
            let date = match sub.get_one::<String>("date") {
                Some(d) => parse_date(d)?,
                None => chrono::Utc::now().date_naive(),
            };
            let income = facade.add_income(
                user,
                &NewIncome {
                    amount,
                    source,
                    description,
                    frequency,
                    date,
                },
            )?;
            println!(
                "Added {} income {} ({}) starting {}",
                income.frequency, income.amount, income.source, income.date
            );
        }
        Some(("list", sub)) => {
            let incomes = facade.incomes(user)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &incomes)? {
                let rows = incomes
                    .iter()
                    .map(|i| {
                        vec![
                            i.id.to_string(),
                            i.date.to_string(),
                            format!("{:.2}", i.amount),
                            i.source.to_string(),
                            i.frequency.to_string(),
                            i.description.clone(),
                            i.posted_through
                                .map(|d| d.to_string())
                                .unwrap_or_else(|| "-".into()),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["ID", "Date", "Amount", "Source", "Frequency", "Description", "Posted"],
                        rows,
                    )
                );
            }
        }
        Some(("post", sub)) => {
            let wallet_name = sub.get_one::<String>("wallet").unwrap();
            let wallet_id = facade.wallet_id(user, wallet_name)?;
            let through = match sub.get_one::<String>("through") {
                Some(d) => parse_date(d)?,
                None => chrono::Utc::now().date_naive(),
            };
            let posted = facade.post_due_incomes(user, wallet_id, through)?;
            println!(
                "Posted {} occurrence(s) into '{}' through {}",
                posted.len(),
                wallet_name,
                through
            );
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            facade.delete_income(user, id)?;
            println!("Removed income {}", id);
        }
        _ => {}
    }
    Ok(())
}
