// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centavo::db;
use centavo::facade::{ErrorKind, Facade};
use centavo::ledger::TxChanges;
use centavo::models::{Category, TxKind, WalletKind};
use centavo::store::transactions::{NewTransaction, TxFilter};
use centavo::store::wallets::NewWallet;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
}

fn wallet(f: &mut Facade, user: &str, name: &str, kind: WalletKind) -> i64 {
    f.create_wallet(
        user,
        &NewWallet {
            name: name.into(),
            kind,
            currency: "USD".into(),
            is_default: false,
        },
        None,
        day(1),
    )
    .unwrap()
    .id
}

fn tx(wallet_id: i64, kind: TxKind, amount: i64) -> NewTransaction {
    NewTransaction {
        wallet_id,
        kind,
        amount: Decimal::from(amount),
        category: Category::Food,
        description: "t".into(),
        date: day(2),
        source: None,
    }
}

#[test]
fn balance_tracks_signed_sum() {
    let mut conn = setup();
    let mut f = Facade::new(&mut conn);
    let w = wallet(&mut f, "u1", "Checking", WalletKind::Bank);

    f.record_transaction("u1", &tx(w, TxKind::Income, 1000)).unwrap();
    f.record_transaction("u1", &tx(w, TxKind::Expense, 300)).unwrap();

    assert_eq!(f.wallet("u1", w).unwrap().balance, Decimal::from(700));
    let audit = f.wallet_audit("u1").unwrap();
    assert!(audit.iter().all(|a| a.consistent));
}

#[test]
fn delete_reverses_exactly_and_is_not_idempotent() {
    let mut conn = setup();
    let mut f = Facade::new(&mut conn);
    let w = wallet(&mut f, "u1", "Checking", WalletKind::Bank);
    f.record_transaction("u1", &tx(w, TxKind::Income, 500)).unwrap();
    let t = f.record_transaction("u1", &tx(w, TxKind::Expense, 120)).unwrap();
    assert_eq!(f.wallet("u1", w).unwrap().balance, Decimal::from(380));

    let removed = f.delete_transaction("u1", t.id).unwrap();
    assert_eq!(removed.id, t.id);
    assert_eq!(f.wallet("u1", w).unwrap().balance, Decimal::from(500));

    // Second delete of the same id must fail and leave the balance alone.
    let err = f.delete_transaction("u1", t.id).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(f.wallet("u1", w).unwrap().balance, Decimal::from(500));
}

#[test]
fn update_reverses_old_effect_then_applies_new() {
    let mut conn = setup();
    let mut f = Facade::new(&mut conn);
    let w = wallet(&mut f, "u1", "Checking", WalletKind::Bank);
    f.record_transaction("u1", &tx(w, TxKind::Income, 1000)).unwrap();
    let t = f.record_transaction("u1", &tx(w, TxKind::Expense, 200)).unwrap();
    assert_eq!(f.wallet("u1", w).unwrap().balance, Decimal::from(800));

    // Flip the kind and change the amount in one step.
    let updated = f
        .update_transaction(
            "u1",
            t.id,
            &TxChanges {
                kind: Some(TxKind::Income),
                amount: Some(Decimal::from(50)),
                ..TxChanges::default()
            },
        )
        .unwrap();
    assert_eq!(updated.kind, TxKind::Income);
    assert_eq!(f.wallet("u1", w).unwrap().balance, Decimal::from(1050));
    assert!(f.wallet_audit("u1").unwrap().iter().all(|a| a.consistent));
}

#[test]
fn update_can_move_between_wallets() {
    let mut conn = setup();
    let mut f = Facade::new(&mut conn);
    let a = wallet(&mut f, "u1", "A", WalletKind::Bank);
    let b = wallet(&mut f, "u1", "B", WalletKind::Bank);
    f.record_transaction("u1", &tx(a, TxKind::Income, 300)).unwrap();
    let t = f.record_transaction("u1", &tx(a, TxKind::Expense, 100)).unwrap();

    f.update_transaction(
        "u1",
        t.id,
        &TxChanges {
            wallet_id: Some(b),
            kind: Some(TxKind::Income),
            ..TxChanges::default()
        },
    )
    .unwrap();

    assert_eq!(f.wallet("u1", a).unwrap().balance, Decimal::from(300));
    assert_eq!(f.wallet("u1", b).unwrap().balance, Decimal::from(100));
    assert!(f.wallet_audit("u1").unwrap().iter().all(|a| a.consistent));
}

#[test]
fn overdraft_rejected_for_bank_allowed_for_credit() {
    let mut conn = setup();
    let mut f = Facade::new(&mut conn);
    let bank = wallet(&mut f, "u1", "Bank", WalletKind::Bank);
    let credit = wallet(&mut f, "u1", "Card", WalletKind::Credit);

    let err = f
        .record_transaction("u1", &tx(bank, TxKind::Expense, 10))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    // The rejected transaction must not leave a row behind.
    assert!(f.transactions("u1", &TxFilter::default()).unwrap().is_empty());

    f.record_transaction("u1", &tx(credit, TxKind::Expense, 10)).unwrap();
    assert_eq!(f.wallet("u1", credit).unwrap().balance, Decimal::from(-10));
}

#[test]
fn failed_update_leaves_everything_untouched() {
    let mut conn = setup();
    let mut f = Facade::new(&mut conn);
    let w = wallet(&mut f, "u1", "Checking", WalletKind::Bank);
    f.record_transaction("u1", &tx(w, TxKind::Income, 100)).unwrap();
    let t = f.record_transaction("u1", &tx(w, TxKind::Expense, 40)).unwrap();

    // Raising the expense past the balance must fail atomically.
    let err = f
        .update_transaction(
            "u1",
            t.id,
            &TxChanges {
                amount: Some(Decimal::from(500)),
                ..TxChanges::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(f.wallet("u1", w).unwrap().balance, Decimal::from(60));
    let kept = f.delete_transaction("u1", t.id).unwrap();
    assert_eq!(kept.amount, Decimal::from(40));
}

#[test]
fn opening_balance_is_a_ledger_transaction() {
    let mut conn = setup();
    let mut f = Facade::new(&mut conn);
    let w = f
        .create_wallet(
            "u1",
            &NewWallet {
                name: "Savings".into(),
                kind: WalletKind::Bank,
                currency: "USD".into(),
                is_default: false,
            },
            Some(Decimal::from(250)),
            day(1),
        )
        .unwrap();
    assert_eq!(w.balance, Decimal::from(250));

    let rows = f.transactions("u1", &TxFilter::default()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind, TxKind::Income);
    assert_eq!(rows[0].description, "Opening balance");
    assert!(f.wallet_audit("u1").unwrap().iter().all(|a| a.consistent));
}

#[test]
fn negative_amount_and_blank_description_rejected() {
    let mut conn = setup();
    let mut f = Facade::new(&mut conn);
    let w = wallet(&mut f, "u1", "Checking", WalletKind::Bank);

    let mut bad = tx(w, TxKind::Income, 10);
    bad.amount = Decimal::from(-10);
    assert_eq!(
        f.record_transaction("u1", &bad).unwrap_err().kind,
        ErrorKind::Validation
    );

    let mut blank = tx(w, TxKind::Income, 10);
    blank.description = "  ".into();
    assert_eq!(
        f.record_transaction("u1", &blank).unwrap_err().kind,
        ErrorKind::Validation
    );
}

#[test]
fn writers_on_separate_connections_both_land() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.sqlite");

    let mut conn1 = Connection::open(&path).unwrap();
    conn1.busy_timeout(std::time::Duration::from_secs(5)).unwrap();
    db::init_schema(&mut conn1).unwrap();
    let mut conn2 = Connection::open(&path).unwrap();
    conn2.busy_timeout(std::time::Duration::from_secs(5)).unwrap();
    conn2.execute_batch("PRAGMA foreign_keys=ON;").unwrap();

    let w = {
        let mut f = Facade::new(&mut conn1);
        wallet(&mut f, "u1", "Shared", WalletKind::Bank)
    };
    Facade::new(&mut conn1)
        .record_transaction("u1", &tx(w, TxKind::Income, 100))
        .unwrap();
    Facade::new(&mut conn2)
        .record_transaction("u1", &tx(w, TxKind::Income, 40))
        .unwrap();

    let mut f = Facade::new(&mut conn1);
    assert_eq!(f.wallet("u1", w).unwrap().balance, Decimal::from(140));
    assert!(f.wallet_audit("u1").unwrap().iter().all(|a| a.consistent));
}

#[test]
fn concurrent_writers_to_one_wallet_lose_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.sqlite");

    let mut conn = Connection::open(&path).unwrap();
    conn.busy_timeout(std::time::Duration::from_secs(5)).unwrap();
    db::init_schema(&mut conn).unwrap();
    // Credit wallet, so interleaved expenses never trip the overdraft floor.
    let w = {
        let mut f = Facade::new(&mut conn);
        wallet(&mut f, "u1", "Shared", WalletKind::Credit)
    };

    let spawn_writer = |kind: TxKind, amount: i64| {
        let path = path.clone();
        std::thread::spawn(move || {
            let mut conn = Connection::open(&path).unwrap();
            conn.busy_timeout(std::time::Duration::from_secs(5)).unwrap();
            conn.execute_batch("PRAGMA foreign_keys=ON;").unwrap();
            let mut f = Facade::new(&mut conn);
            for _ in 0..20 {
                f.record_transaction("u1", &tx(w, kind, amount)).unwrap();
            }
        })
    };
    let incomes = spawn_writer(TxKind::Income, 100);
    let expenses = spawn_writer(TxKind::Expense, 40);
    incomes.join().unwrap();
    expenses.join().unwrap();

    // Every commit survived the interleaving: 20*100 - 20*40.
    let mut f = Facade::new(&mut conn);
    assert_eq!(f.wallet("u1", w).unwrap().balance, Decimal::from(1200));
    let rows = f.transactions("u1", &TxFilter::default()).unwrap();
    assert_eq!(rows.len(), 40);
    assert!(f.wallet_audit("u1").unwrap().iter().all(|a| a.consistent));
}

#[test]
fn deleting_wallet_cascades_its_ledger() {
    let mut conn = setup();
    let mut f = Facade::new(&mut conn);
    let w = wallet(&mut f, "u1", "Old", WalletKind::Bank);
    f.record_transaction("u1", &tx(w, TxKind::Income, 10)).unwrap();

    f.delete_wallet("u1", w).unwrap();
    assert!(f.transactions("u1", &TxFilter::default()).unwrap().is_empty());
    assert_eq!(f.wallet("u1", w).unwrap_err().kind, ErrorKind::NotFound);
}
