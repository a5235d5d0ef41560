// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

use crate::error::{on_unique_conflict, LedgerError, LedgerResult};
use crate::models::{Wallet, WalletKind};
use crate::store::{normalize_currency, parsed, require_text};

#[derive(Debug, Clone)]
pub struct NewWallet {
    pub name: String,
    pub kind: WalletKind,
    pub currency: String,
    pub is_default: bool,
}

const SELECT: &str =
    "SELECT id, user_id, name, kind, balance, currency, is_default FROM wallets";

fn from_row(r: &Row<'_>) -> rusqlite::Result<Wallet> {
    Ok(Wallet {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        kind: parsed(r, 3)?,
        balance: parsed(r, 4)?,
        currency: r.get(5)?,
        is_default: r.get(6)?,
    })
}

/// Create a wallet with a zero balance. Opening balances go through the
/// ledger engine so the balance always equals the signed transaction sum.
pub fn create(conn: &Connection, user: &str, new: &NewWallet) -> LedgerResult<Wallet> {
    require_text(user, "user id")?;
    require_text(&new.name, "wallet name")?;
    let ccy = normalize_currency(&new.currency)?;

    if new.is_default && default(conn, user)?.is_some() {
        return Err(LedgerError::conflict(
            "user already has a default wallet; use set-default to switch",
        ));
    }
    conn.execute(
        "INSERT INTO wallets(user_id, name, kind, balance, currency, is_default)
         VALUES (?1, ?2, ?3, '0', ?4, ?5)",
        params![user, new.name.trim(), new.kind.as_str(), ccy, new.is_default],
    )
    .map_err(|e| on_unique_conflict(e, &format!("wallet '{}' already exists", new.name.trim())))?;
    get(conn, user, conn.last_insert_rowid())
}

pub fn get(conn: &Connection, user: &str, id: i64) -> LedgerResult<Wallet> {
    let sql = format!("{} WHERE user_id=?1 AND id=?2", SELECT);
    conn.query_row(&sql, params![user, id], from_row)
        .optional()?
        .ok_or_else(|| LedgerError::not_found(format!("wallet {}", id)))
}

pub fn id_by_name(conn: &Connection, user: &str, name: &str) -> LedgerResult<i64> {
    conn.query_row(
        "SELECT id FROM wallets WHERE user_id=?1 AND name=?2",
        params![user, name.trim()],
        |r| r.get(0),
    )
    .optional()?
    .ok_or_else(|| LedgerError::not_found(format!("wallet '{}'", name.trim())))
}

pub fn default(conn: &Connection, user: &str) -> LedgerResult<Option<Wallet>> {
    let sql = format!("{} WHERE user_id=?1 AND is_default=1", SELECT);
    Ok(conn.query_row(&sql, params![user], from_row).optional()?)
}

pub fn list(conn: &Connection, user: &str) -> LedgerResult<Vec<Wallet>> {
    let sql = format!("{} WHERE user_id=?1 ORDER BY name", SELECT);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user], from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub fn rename(conn: &Connection, user: &str, id: i64, name: &str) -> LedgerResult<()> {
    require_text(name, "wallet name")?;
    let n = conn
        .execute(
            "UPDATE wallets SET name=?1 WHERE user_id=?2 AND id=?3",
            params![name.trim(), user, id],
        )
        .map_err(|e| on_unique_conflict(e, &format!("wallet '{}' already exists", name.trim())))?;
    if n == 0 {
        return Err(LedgerError::not_found(format!("wallet {}", id)));
    }
    Ok(())
}

/// The two halves of a default-wallet swap. Callers run both inside one
/// store transaction so the at-most-one invariant never shows a gap.
pub fn clear_default(conn: &Connection, user: &str) -> LedgerResult<()> {
    conn.execute(
        "UPDATE wallets SET is_default=0 WHERE user_id=?1 AND is_default=1",
        params![user],
    )?;
    Ok(())
}

pub fn mark_default(conn: &Connection, user: &str, id: i64) -> LedgerResult<()> {
    let n = conn
        .execute(
            "UPDATE wallets SET is_default=1 WHERE user_id=?1 AND id=?2",
            params![user, id],
        )
        .map_err(|e| on_unique_conflict(e, "user already has a default wallet"))?;
    if n == 0 {
        return Err(LedgerError::not_found(format!("wallet {}", id)));
    }
    Ok(())
}

/// Deleting a wallet drops its transactions with it (FK cascade); the
/// cached balance disappears together with the rows that defined it.
pub fn delete(conn: &Connection, user: &str, id: i64) -> LedgerResult<()> {
    let n = conn.execute(
        "DELETE FROM wallets WHERE user_id=?1 AND id=?2",
        params![user, id],
    )?;
    if n == 0 {
        return Err(LedgerError::not_found(format!("wallet {}", id)));
    }
    Ok(())
}

/// Apply a signed delta to the cached balance. The UPDATE only matches if
/// the stored balance is still the one we read, so a lost update rolls the
/// surrounding transaction back as a consistency failure instead of
/// committing a wrong sum.
///
/// `enforce_floor` gates the overdraft rule for non-credit wallets. New
/// spending enforces it; reversals skip it, since undoing a recorded
/// transaction must always restore the defining sum.
pub fn adjust_balance(
    conn: &Connection,
    user: &str,
    wallet: &Wallet,
    delta: Decimal,
    enforce_floor: bool,
) -> LedgerResult<Decimal> {
    let new_balance = wallet.balance + delta;
    if enforce_floor
        && new_balance.is_sign_negative()
        && !new_balance.is_zero()
        && !wallet.kind.allows_negative()
    {
        return Err(LedgerError::Validation(format!(
            "insufficient funds in wallet '{}': balance {} cannot cover {}",
            wallet.name, wallet.balance, -delta
        )));
    }
    let n = conn.execute(
        "UPDATE wallets SET balance=?1 WHERE user_id=?2 AND id=?3 AND balance=?4",
        params![
            new_balance.to_string(),
            user,
            wallet.id,
            wallet.balance.to_string()
        ],
    )?;
    if n == 0 {
        return Err(LedgerError::Consistency(format!(
            "balance of wallet {} changed under us",
            wallet.id
        )));
    }
    Ok(new_balance)
}
