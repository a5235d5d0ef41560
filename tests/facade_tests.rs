// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use centavo::db;
use centavo::facade::{ErrorKind, Facade};
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

fn new_wallet(name: &str, is_default: bool) -> NewWallet {
    NewWallet {
        name: name.into(),
        kind: WalletKind::Bank,
        currency: "usd".into(),
        is_default,
    }
}

#[test]
fn empty_user_is_a_validation_error() {
    let mut conn = setup();
    let mut f = Facade::new(&mut conn);
    let err = f.wallets("  ").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[test]
fn users_cannot_see_each_other() {
    let mut conn = setup();
    let mut f = Facade::new(&mut conn);
    let w = f.create_wallet("alice", &new_wallet("Checking", false), None, day(1)).unwrap();
    let t = f
        .record_transaction(
            "alice",
            &NewTransaction {
                wallet_id: w.id,
                kind: TxKind::Income,
                amount: Decimal::from(10),
                category: Category::Other,
                description: "pay".into(),
                date: day(2),
                source: None,
            },
        )
        .unwrap();

    // Another user's ids are indistinguishable from missing ones.
    assert_eq!(f.wallet("bob", w.id).unwrap_err().kind, ErrorKind::NotFound);
    assert_eq!(
        f.delete_transaction("bob", t.id).unwrap_err().kind,
        ErrorKind::NotFound
    );
    assert!(f.wallets("bob").unwrap().is_empty());
    assert!(f.transactions("bob", &TxFilter::default()).unwrap().is_empty());
    // And alice's data is still intact.
    assert_eq!(f.wallet("alice", w.id).unwrap().balance, Decimal::from(10));
}

#[test]
fn duplicate_wallet_name_is_a_conflict() {
    let mut conn = setup();
    let mut f = Facade::new(&mut conn);
    f.create_wallet("u1", &new_wallet("Checking", false), None, day(1)).unwrap();
    let err = f
        .create_wallet("u1", &new_wallet("Checking", false), None, day(1))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    // Same name under a different user is fine.
    f.create_wallet("u2", &new_wallet("Checking", false), None, day(1)).unwrap();
}

#[test]
fn at_most_one_default_wallet() {
    let mut conn = setup();
    let mut f = Facade::new(&mut conn);
    let a = f.create_wallet("u1", &new_wallet("A", true), None, day(1)).unwrap();
    let err = f
        .create_wallet("u1", &new_wallet("B", true), None, day(1))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    // The swap moves the flag atomically instead of conflicting.
    let b = f.create_wallet("u1", &new_wallet("B", false), None, day(1)).unwrap();
    let b = f.set_default_wallet("u1", b.id).unwrap();
    assert!(b.is_default);
    assert!(!f.wallet("u1", a.id).unwrap().is_default);
    let defaults = f.wallets("u1").unwrap().iter().filter(|w| w.is_default).count();
    assert_eq!(defaults, 1);
}

#[test]
fn currency_is_normalized_and_validated() {
    let mut conn = setup();
    let mut f = Facade::new(&mut conn);
    let w = f.create_wallet("u1", &new_wallet("Checking", false), None, day(1)).unwrap();
    assert_eq!(w.currency, "USD");

    let mut bad = new_wallet("Other", false);
    bad.currency = "12$".into();
    assert_eq!(
        f.create_wallet("u1", &bad, None, day(1)).unwrap_err().kind,
        ErrorKind::Validation
    );
}

#[test]
fn one_budget_per_category_per_user() {
    let mut conn = setup();
    let mut f = Facade::new(&mut conn);
    f.create_budget("u1", Category::Food, Decimal::from(200)).unwrap();
    let err = f
        .create_budget("u1", Category::Food, Decimal::from(300))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    // Other users and other categories are unaffected.
    f.create_budget("u1", Category::Housing, Decimal::from(900)).unwrap();
    f.create_budget("u2", Category::Food, Decimal::from(100)).unwrap();

    let b = f.update_budget("u1", Category::Food, Decimal::from(250)).unwrap();
    assert_eq!(b.amount, Decimal::from(250));
    assert_eq!(
        f.update_budget("u1", Category::Debt, Decimal::from(1))
            .unwrap_err()
            .kind,
        ErrorKind::NotFound
    );
}

#[test]
fn goal_funding_cannot_go_negative_but_may_overfund() {
    let mut conn = setup();
    let mut f = Facade::new(&mut conn);
    let g = f
        .add_goal("u1", "Vacation", Decimal::from(1000), day(31))
        .unwrap();

    let g = f.fund_goal("u1", g.id, Decimal::from(1200)).unwrap();
    assert_eq!(g.current_amount, Decimal::from(1200));

    let err = f.fund_goal("u1", g.id, Decimal::from(-1300)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    // Withdrawals within the saved amount are fine.
    let g = f.fund_goal("u1", g.id, Decimal::from(-200)).unwrap();
    assert_eq!(g.current_amount, Decimal::from(1000));
}

#[test]
fn goal_update_keeps_unset_fields() {
    let mut conn = setup();
    let mut f = Facade::new(&mut conn);
    let early = f.add_goal("u1", "House", Decimal::from(5000), day(10)).unwrap();
    f.add_goal("u1", "Boat", Decimal::from(9000), day(20)).unwrap();

    let g = f
        .update_goal("u1", early.id, None, Some(Decimal::from(6000)), None)
        .unwrap();
    assert_eq!(g.name, "House");
    assert_eq!(g.target_amount, Decimal::from(6000));
    assert_eq!(g.target_date, day(10));

    // Listing is ordered by target date.
    let goals = f.goals("u1").unwrap();
    assert_eq!(goals.len(), 2);
    assert_eq!(goals[0].name, "House");
    assert_eq!(goals[1].name, "Boat");
}

#[test]
fn rename_wallet_round_trip() {
    let mut conn = setup();
    let mut f = Facade::new(&mut conn);
    let w = f.create_wallet("u1", &new_wallet("Old", false), None, day(1)).unwrap();
    f.rename_wallet("u1", w.id, "New").unwrap();
    assert_eq!(f.wallet_id("u1", "New").unwrap(), w.id);
    assert_eq!(f.wallet_id("u1", "Old").unwrap_err().kind, ErrorKind::NotFound);
}
