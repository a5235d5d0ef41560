// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The consistency engine. Every mutation that moves money runs inside one
//! IMMEDIATE store transaction: the transaction row and the wallet balance
//! either both commit or neither does, so the cached balance always equals
//! the signed sum of the wallet's ledger after a commit.

use chrono::NaiveDate;
use rusqlite::{Connection, TransactionBehavior};
use rust_decimal::Decimal;

use crate::error::{is_busy, LedgerError, LedgerResult};
use crate::models::{Category, Transaction, TxKind, Wallet};
use crate::store::transactions::NewTransaction;
use crate::store::wallets::NewWallet;
use crate::store::{incomes, transactions, wallets};

/// Attempts against a store that reports busy/locked before the mutation
/// is rejected as a consistency failure.
const BUSY_RETRIES: usize = 3;

fn with_retry<T>(mut op: impl FnMut() -> LedgerResult<T>) -> LedgerResult<T> {
    let mut last: Option<rusqlite::Error> = None;
    for _ in 0..BUSY_RETRIES {
        match op() {
            Err(LedgerError::Database(e)) if is_busy(&e) => last = Some(e),
            other => return other,
        }
    }
    Err(LedgerError::Consistency(format!(
        "store stayed locked after {} attempts: {}",
        BUSY_RETRIES,
        last.map(|e| e.to_string()).unwrap_or_default(),
    )))
}

/// Partial update for an existing transaction. Unset fields keep their
/// recorded value.
#[derive(Debug, Clone, Default)]
pub struct TxChanges {
    pub wallet_id: Option<i64>,
    pub kind: Option<TxKind>,
    pub amount: Option<Decimal>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Create a transaction and adjust the referenced wallet's balance as one
/// unit.
pub fn record_transaction(
    conn: &mut Connection,
    user: &str,
    new: &NewTransaction,
) -> LedgerResult<Transaction> {
    transactions::validate(new)?;
    with_retry(|| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let wallet = wallets::get(&tx, user, new.wallet_id)?;
        wallets::adjust_balance(&tx, user, &wallet, new.kind.signed(new.amount), true)?;
        let id = transactions::insert(&tx, user, new)?;
        let recorded = transactions::get(&tx, user, id)?;
        tx.commit()?;
        Ok(recorded)
    })
}

/// Reverse the balance effect and remove the row, atomically. A second
/// delete of the same id is `NotFound` and leaves the balance alone.
pub fn delete_transaction(conn: &mut Connection, user: &str, id: i64) -> LedgerResult<Transaction> {
    with_retry(|| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let recorded = transactions::get(&tx, user, id)?;
        let wallet = wallets::get(&tx, user, recorded.wallet_id)?;
        wallets::adjust_balance(&tx, user, &wallet, -recorded.signed_amount(), false)?;
        transactions::delete_row(&tx, user, id)?;
        tx.commit()?;
        Ok(recorded)
    })
}

/// Delete-then-recreate semantics: the old effect is reversed and the new
/// one applied inside the same store transaction, so no partial update can
/// ever be observed.
pub fn update_transaction(
    conn: &mut Connection,
    user: &str,
    id: i64,
    changes: &TxChanges,
) -> LedgerResult<Transaction> {
    with_retry(|| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let old = transactions::get(&tx, user, id)?;
        let merged = NewTransaction {
            wallet_id: changes.wallet_id.unwrap_or(old.wallet_id),
            kind: changes.kind.unwrap_or(old.kind),
            amount: changes.amount.unwrap_or(old.amount),
            category: changes.category.unwrap_or(old.category),
            description: changes
                .description
                .clone()
                .unwrap_or_else(|| old.description.clone()),
            date: changes.date.unwrap_or(old.date),
            source: old.source,
        };
        transactions::validate(&merged)?;

        let old_wallet = wallets::get(&tx, user, old.wallet_id)?;
        wallets::adjust_balance(&tx, user, &old_wallet, -old.signed_amount(), false)?;
        // Fresh read: the reversal just moved the balance, and the target
        // may be a different wallet entirely.
        let target = wallets::get(&tx, user, merged.wallet_id)?;
        wallets::adjust_balance(&tx, user, &target, merged.kind.signed(merged.amount), true)?;
        transactions::update_row(&tx, user, id, &merged)?;
        let updated = transactions::get(&tx, user, id)?;
        tx.commit()?;
        Ok(updated)
    })
}

/// Create a wallet, recording any nonzero opening balance as an income
/// transaction so the balance invariant holds from the first commit.
pub fn open_wallet(
    conn: &mut Connection,
    user: &str,
    new: &NewWallet,
    opening: Option<Decimal>,
    date: NaiveDate,
) -> LedgerResult<Wallet> {
    with_retry(|| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut wallet = wallets::create(&tx, user, new)?;
        if let Some(amount) = opening.filter(|a| !a.is_zero()) {
            let nt = NewTransaction {
                wallet_id: wallet.id,
                kind: TxKind::Income,
                amount,
                category: Category::Other,
                description: "Opening balance".to_string(),
                date,
                source: None,
            };
            transactions::validate(&nt)?;
            wallets::adjust_balance(&tx, user, &wallet, amount, true)?;
            transactions::insert(&tx, user, &nt)?;
            wallet = wallets::get(&tx, user, wallet.id)?;
        }
        tx.commit()?;
        Ok(wallet)
    })
}

/// Atomically move the default flag; at no committed point do zero-or-two
/// wallets carry it while one existed before.
pub fn set_default_wallet(conn: &mut Connection, user: &str, id: i64) -> LedgerResult<Wallet> {
    with_retry(|| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        wallets::get(&tx, user, id)?;
        wallets::clear_default(&tx, user)?;
        wallets::mark_default(&tx, user, id)?;
        let wallet = wallets::get(&tx, user, id)?;
        tx.commit()?;
        Ok(wallet)
    })
}

/// Materialize every income occurrence due on or before `through` into the
/// given wallet. The posted-through marker on each template makes this
/// idempotent: re-running posts nothing new.
pub fn post_due_incomes(
    conn: &mut Connection,
    user: &str,
    wallet_id: i64,
    through: NaiveDate,
) -> LedgerResult<Vec<Transaction>> {
    with_retry(|| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        wallets::get(&tx, user, wallet_id)?;

        let mut posted = Vec::new();
        for income in incomes::list(&tx, user)? {
            let mut next = match income.posted_through {
                // One-time incomes are done after their single occurrence.
                Some(done) => match income.frequency.step(done) {
                    Some(n) => n,
                    None => continue,
                },
                None => income.date,
            };
            let mut last = income.posted_through;
            while next <= through {
                let nt = NewTransaction {
                    wallet_id,
                    kind: TxKind::Income,
                    amount: income.amount,
                    category: Category::Other,
                    description: income.description.clone(),
                    date: next,
                    source: Some(income.source),
                };
                let wallet = wallets::get(&tx, user, wallet_id)?;
                wallets::adjust_balance(&tx, user, &wallet, income.amount, true)?;
                let id = transactions::insert(&tx, user, &nt)?;
                posted.push(transactions::get(&tx, user, id)?);
                last = Some(next);
                match income.frequency.step(next) {
                    Some(n) => next = n,
                    None => break,
                }
            }
            if let Some(through_date) = last {
                if Some(through_date) != income.posted_through {
                    incomes::set_posted_through(&tx, user, income.id, through_date)?;
                }
            }
        }
        tx.commit()?;
        Ok(posted)
    })
}
