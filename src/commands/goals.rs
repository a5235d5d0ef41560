// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::facade::Facade;
use crate::utils::{maybe_print_json, parse_date, parse_decimal, pretty_table};

pub fn handle(facade: &mut Facade, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let target = parse_decimal(sub.get_one::<String>("target").unwrap())?;
            let by = parse_date(sub.get_one::<String>("by").unwrap())?;
            let goal = facade.add_goal(user, name, target, by)?;
            println!("Added goal '{}': {} by {}", goal.name, goal.target_amount, goal.target_date);
        }
        Some(("list", sub)) => list(facade, user, sub)?,
        Some(("fund", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let goal = facade.fund_goal(user, id, amount)?;
            println!(
                "Goal '{}' now at {} of {}",
                goal.name, goal.current_amount, goal.target_amount
            );
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            facade.delete_goal(user, id)?;
            println!("Removed goal {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn list(facade: &mut Facade, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let progress = facade.goal_progress(user)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &progress)? {
        let rows = progress
            .iter()
            .map(|g| {
                vec![
                    g.id.to_string(),
                    g.name.clone(),
                    format!("{:.2}", g.current_amount),
                    format!("{:.2}", g.target_amount),
                    g.progress
                        .map(|p| format!("{:.1}%", p * Decimal::ONE_HUNDRED))
                        .unwrap_or_else(|| "-".into()),
                    g.target_date.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Name", "Saved", "Target", "Progress", "By"],
                rows,
            )
        );
    }
    Ok(())
}
