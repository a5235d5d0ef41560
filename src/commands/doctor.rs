// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::facade::Facade;
use crate::utils::pretty_table;

/// Audit every wallet's cached balance against the signed sum of its
/// transactions. Any mismatch means a mutation escaped the ledger engine.
pub fn handle(facade: &mut Facade, user: &str) -> Result<()> {
    let audits = facade.wallet_audit(user)?;
    let mut bad = 0;
    let rows = audits
        .iter()
        .map(|a| {
            if !a.consistent {
                bad += 1;
            }
            vec![
                a.name.clone(),
                format!("{:.2}", a.balance),
                format!("{:.2}", a.ledger_sum),
                if a.consistent { "ok".into() } else { "MISMATCH".into() },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Wallet", "Balance", "Ledger sum", "Status"], rows)
    );
    if bad == 0 {
        println!("All wallet balances match their ledgers.");
    } else {
        println!("{} wallet(s) out of sync with their ledgers.", bad);
    }
    Ok(())
}
