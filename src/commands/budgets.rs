// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::facade::Facade;
use crate::models::Category;
use crate::utils::{current_month, maybe_print_json, parse_decimal, parse_month, pretty_table};

pub fn handle(facade: &mut Facade, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let category: Category = sub.get_one::<String>("category").unwrap().parse()?;
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let budget = facade.create_budget(user, category, amount)?;
            println!("Budget set: {} = {} per month", budget.category, budget.amount);
        }
        Some(("update", sub)) => {
            let category: Category = sub.get_one::<String>("category").unwrap().parse()?;
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let budget = facade.update_budget(user, category, amount)?;
            println!("Budget updated: {} = {} per month", budget.category, budget.amount);
        }
        Some(("list", sub)) => {
            let budgets = facade.budgets(user)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &budgets)? {
                let rows = budgets
                    .iter()
                    .map(|b| {
                        vec![
                            b.category.to_string(),
                            format!("{:.2}", b.amount),
                            b.updated_at.clone(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Category", "Limit", "Updated"], rows));
            }
        }
        Some(("status", sub)) => status(facade, user, sub)?,
        Some(("rm", sub)) => {
            let category: Category = sub.get_one::<String>("category").unwrap().parse()?;
            facade.delete_budget(user, category)?;
            println!("Removed budget for {}", category);
        }
        _ => {}
    }
    Ok(())
}

fn status(facade: &mut Facade, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => current_month(chrono::Utc::now().date_naive()),
    };
    let statuses = facade.budget_status(user, &month)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &statuses)? {
        let rows = statuses
            .iter()
            .map(|s| {
                vec![
                    s.category.to_string(),
                    format!("{:.2}", s.limit),
                    format!("{:.2}", s.spent),
                    format!("{:.2}", s.remaining),
                    if s.over_budget { "OVER".into() } else { "ok".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Category", "Limit", "Spent", "Remaining", "Status"],
                rows,
            )
        );
    }
    Ok(())
}
