// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centavo::db;
use centavo::facade::Facade;
use centavo::models::{Frequency, IncomeSource, TxKind, WalletKind};
use centavo::store::incomes::NewIncome;
use centavo::store::transactions::TxFilter;
use centavo::store::wallets::NewWallet;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn wallet(f: &mut Facade, user: &str) -> i64 {
    f.create_wallet(
        user,
        &NewWallet {
            name: "Main".into(),
            kind: WalletKind::Bank,
            currency: "USD".into(),
            is_default: true,
        },
        None,
        date(2025, 1, 1),
    )
    .unwrap()
    .id
}

fn income(amount: i64, frequency: Frequency, first: NaiveDate) -> NewIncome {
    NewIncome {
        amount: Decimal::from(amount),
        source: IncomeSource::Salary,
        description: "Paycheck".into(),
        frequency,
        date: first,
    }
}

#[test]
fn monthly_income_posts_each_due_occurrence() {
    let mut conn = setup();
    let mut f = Facade::new(&mut conn);
    let w = wallet(&mut f, "u1");
    f.add_income("u1", &income(3000, Frequency::Monthly, date(2025, 1, 15))).unwrap();

    let posted = f.post_due_incomes("u1", w, date(2025, 3, 20)).unwrap();
    assert_eq!(posted.len(), 3);
    assert_eq!(
        posted.iter().map(|t| t.date).collect::<Vec<_>>(),
        vec![date(2025, 1, 15), date(2025, 2, 15), date(2025, 3, 15)]
    );
    assert!(posted.iter().all(|t| t.kind == TxKind::Income));
    assert!(posted.iter().all(|t| t.source == Some(IncomeSource::Salary)));
    assert_eq!(f.wallet("u1", w).unwrap().balance, Decimal::from(9000));
}

#[test]
fn posting_is_idempotent() {
    let mut conn = setup();
    let mut f = Facade::new(&mut conn);
    let w = wallet(&mut f, "u1");
    f.add_income("u1", &income(1000, Frequency::Weekly, date(2025, 1, 1))).unwrap();

    let first = f.post_due_incomes("u1", w, date(2025, 1, 21)).unwrap();
    assert_eq!(first.len(), 3);
    let again = f.post_due_incomes("u1", w, date(2025, 1, 21)).unwrap();
    assert!(again.is_empty());
    assert_eq!(f.wallet("u1", w).unwrap().balance, Decimal::from(3000));

    // Advancing the window only posts the new occurrences.
    let more = f.post_due_incomes("u1", w, date(2025, 1, 28)).unwrap();
    assert_eq!(more.len(), 1);
    assert_eq!(more[0].date, date(2025, 1, 22));
}

#[test]
fn one_time_income_posts_exactly_once() {
    let mut conn = setup();
    let mut f = Facade::new(&mut conn);
    let w = wallet(&mut f, "u1");
    f.add_income("u1", &income(500, Frequency::OneTime, date(2025, 2, 1))).unwrap();

    let posted = f.post_due_incomes("u1", w, date(2025, 6, 1)).unwrap();
    assert_eq!(posted.len(), 1);
    let again = f.post_due_incomes("u1", w, date(2026, 1, 1)).unwrap();
    assert!(again.is_empty());
    assert_eq!(f.wallet("u1", w).unwrap().balance, Decimal::from(500));
}

#[test]
fn future_income_posts_nothing_yet() {
    let mut conn = setup();
    let mut f = Facade::new(&mut conn);
    let w = wallet(&mut f, "u1");
    let inc = f
        .add_income("u1", &income(500, Frequency::Monthly, date(2025, 9, 1)))
        .unwrap();
    assert!(inc.posted_through.is_none());

    let posted = f.post_due_incomes("u1", w, date(2025, 8, 31)).unwrap();
    assert!(posted.is_empty());
    assert!(f.incomes("u1").unwrap()[0].posted_through.is_none());
}

#[test]
fn posted_transactions_stay_in_the_ledger_after_template_removal() {
    let mut conn = setup();
    let mut f = Facade::new(&mut conn);
    let w = wallet(&mut f, "u1");
    let inc = f
        .add_income("u1", &income(100, Frequency::Weekly, date(2025, 1, 1)))
        .unwrap();
    f.post_due_incomes("u1", w, date(2025, 1, 8)).unwrap();

    f.delete_income("u1", inc.id).unwrap();
    let rows = f.transactions("u1", &TxFilter::default()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(f.wallet("u1", w).unwrap().balance, Decimal::from(200));
    assert!(f.wallet_audit("u1").unwrap().iter().all(|a| a.consistent));
}
