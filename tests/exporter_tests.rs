// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centavo::facade::Facade;
use centavo::models::{Category, TxKind, WalletKind};
use centavo::store::transactions::NewTransaction;
use centavo::store::wallets::NewWallet;
use centavo::{cli, commands, db};
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn seed(f: &mut Facade) {
    let w = f
        .create_wallet(
            "u1",
            &NewWallet {
                name: "Main".into(),
                kind: WalletKind::Bank,
                currency: "USD".into(),
                is_default: false,
            },
            None,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
        .unwrap()
        .id;
    for (day, amount) in [(2, 100), (3, 40)] {
        f.record_transaction(
            "u1",
            &NewTransaction {
                wallet_id: w,
                kind: TxKind::Income,
                amount: Decimal::from(amount),
                category: Category::Other,
                description: format!("income {}", day),
                date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
                source: None,
            },
        )
        .unwrap();
    }
}

#[test]
fn csv_export_writes_header_and_rows() {
    let mut conn = setup();
    let mut f = Facade::new(&mut conn);
    seed(&mut f);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("tx.csv");
    let matches = cli::build_cli().get_matches_from([
        "centavo",
        "export",
        "transactions",
        "--format",
        "csv",
        "--out",
        out.to_str().unwrap(),
    ]);
    let Some(("export", sub)) = matches.subcommand() else {
        panic!("no export subcommand");
    };
    commands::exporter::handle(&mut f, "u1", sub).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("id,date,wallet_id,type,amount"));
    // Most recent first, matching the listing order.
    assert!(lines[1].contains("2025-01-03"));
    assert!(lines[2].contains("2025-01-02"));
}

#[test]
fn json_export_is_an_array_of_objects() {
    let mut conn = setup();
    let mut f = Facade::new(&mut conn);
    seed(&mut f);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("tx.json");
    let matches = cli::build_cli().get_matches_from([
        "centavo",
        "export",
        "transactions",
        "--format",
        "json",
        "--out",
        out.to_str().unwrap(),
    ]);
    let Some(("export", sub)) = matches.subcommand() else {
        panic!("no export subcommand");
    };
    commands::exporter::handle(&mut f, "u1", sub).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    let val: serde_json::Value = serde_json::from_str(&text).unwrap();
    let arr = val.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["type"], "income");
    assert_eq!(arr[0]["date"], "2025-01-03");
}
