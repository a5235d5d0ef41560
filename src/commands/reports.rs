// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::facade::Facade;
use crate::reports::SummaryPeriod;
use crate::utils::{current_month, maybe_print_json, parse_month, pretty_table};

pub fn handle(facade: &mut Facade, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(facade, user, sub)?,
        Some(("net-worth", sub)) => net_worth(facade, user, sub)?,
        Some(("spend-by-category", sub)) => spend_by_category(facade, user, sub)?,
        Some(("cashflow", sub)) => cashflow(facade, user, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(facade: &mut Facade, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let period: SummaryPeriod = sub.get_one::<String>("period").unwrap().parse()?;
    let today = chrono::Utc::now().date_naive();
    let s = facade.summary(user, period, today)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        println!(
            "Period: {}\nIncome:   {:.2}\nExpenses: {:.2}\nSavings:  {:.2}",
            s.period, s.total_income, s.total_expenses, s.savings
        );
        if !s.expenses_by_category.is_empty() {
            let rows = s
                .expenses_by_category
                .iter()
                .map(|c| vec![c.category.to_string(), format!("{:.2}", c.amount)])
                .collect();
            println!("{}", pretty_table(&["Category", "Spent"], rows));
        }
        if !s.income_by_source.is_empty() {
            let rows = s
                .income_by_source
                .iter()
                .map(|c| vec![c.source.to_string(), format!("{:.2}", c.amount)])
                .collect();
            println!("{}", pretty_table(&["Source", "Income"], rows));
        }
    }
    Ok(())
}

fn net_worth(facade: &mut Facade, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let nw = facade.net_worth(user)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &nw)? {
        let rows = vec![
            vec!["Wallets".into(), format!("{:.2}", nw.wallet_total)],
            vec!["Investments".into(), format!("{:.2}", nw.investment_total)],
            vec!["Net worth".into(), format!("{:.2}", nw.net_worth)],
        ];
        println!("{}", pretty_table(&["", "Total"], rows));
    }
    Ok(())
}

fn spend_by_category(facade: &mut Facade, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => current_month(chrono::Utc::now().date_naive()),
    };
    let items = facade.spend_by_category(user, &month)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        let rows = items
            .iter()
            .map(|c| vec![c.category.to_string(), format!("{:.2}", c.amount)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

fn cashflow(facade: &mut Facade, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let months: usize = *sub.get_one::<usize>("months").unwrap();
    let flows = facade.monthly_cashflow(user, months)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &flows)? {
        let rows = flows
            .iter()
            .map(|f| {
                vec![
                    f.month.clone(),
                    format!("{:.2}", f.income),
                    format!("{:.2}", f.expense),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Income", "Expense"], rows));
    }
    Ok(())
}
