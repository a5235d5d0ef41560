// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row, ToSql};
use rust_decimal::Decimal;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, IncomeSource, Transaction, TxKind};
use crate::store::{parsed, parsed_opt, require_amount, require_text};

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub wallet_id: i64,
    pub kind: TxKind,
    pub amount: Decimal,
    pub category: Category,
    pub description: String,
    pub date: NaiveDate,
    pub source: Option<IncomeSource>,
}

#[derive(Debug, Clone, Default)]
pub struct TxFilter {
    pub wallet_id: Option<i64>,
    pub kind: Option<TxKind>,
    pub category: Option<Category>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<usize>,
}

const SELECT: &str = "SELECT id, user_id, wallet_id, kind, amount, category, description, date, \
                      source FROM transactions";

fn from_row(r: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: r.get(0)?,
        user_id: r.get(1)?,
        wallet_id: r.get(2)?,
        kind: parsed(r, 3)?,
        amount: parsed(r, 4)?,
        category: parsed(r, 5)?,
        description: r.get(6)?,
        date: r.get(7)?,
        source: parsed_opt(r, 8)?,
    })
}

pub fn validate(new: &NewTransaction) -> LedgerResult<()> {
    require_amount(new.amount, "transaction amount")?;
    require_text(&new.description, "description")?;
    Ok(())
}

/// Plain row insert. Balance effects are composed by the ledger engine,
/// never here.
pub fn insert(conn: &Connection, user: &str, new: &NewTransaction) -> LedgerResult<i64> {
    validate(new)?;
    conn.execute(
        "INSERT INTO transactions(user_id, wallet_id, kind, amount, category, description, date, source)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            user,
            new.wallet_id,
            new.kind.as_str(),
            new.amount.to_string(),
            new.category.as_str(),
            new.description.trim(),
            new.date,
            new.source.map(|s| s.as_str()),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get(conn: &Connection, user: &str, id: i64) -> LedgerResult<Transaction> {
    let sql = format!("{} WHERE user_id=?1 AND id=?2", SELECT);
    conn.query_row(&sql, params![user, id], from_row)
        .optional()?
        .ok_or_else(|| LedgerError::not_found(format!("transaction {}", id)))
}

pub fn delete_row(conn: &Connection, user: &str, id: i64) -> LedgerResult<()> {
    let n = conn.execute(
        "DELETE FROM transactions WHERE user_id=?1 AND id=?2",
        params![user, id],
    )?;
    if n == 0 {
        return Err(LedgerError::not_found(format!("transaction {}", id)));
    }
    Ok(())
}

pub fn update_row(conn: &Connection, user: &str, id: i64, new: &NewTransaction) -> LedgerResult<()> {
    validate(new)?;
    let n = conn.execute(
        "UPDATE transactions SET wallet_id=?1, kind=?2, amount=?3, category=?4, description=?5, \
         date=?6, source=?7 WHERE user_id=?8 AND id=?9",
        params![
            new.wallet_id,
            new.kind.as_str(),
            new.amount.to_string(),
            new.category.as_str(),
            new.description.trim(),
            new.date,
            new.source.map(|s| s.as_str()),
            user,
            id,
        ],
    )?;
    if n == 0 {
        return Err(LedgerError::not_found(format!("transaction {}", id)));
    }
    Ok(())
}

/// Filtered listing, most recent first (id breaks date ties).
pub fn list(conn: &Connection, user: &str, filter: &TxFilter) -> LedgerResult<Vec<Transaction>> {
    let mut sql = format!("{} WHERE user_id=?", SELECT);
    let mut args: Vec<Box<dyn ToSql>> = vec![Box::new(user.to_string())];

    if let Some(wallet_id) = filter.wallet_id {
        sql.push_str(" AND wallet_id=?");
        args.push(Box::new(wallet_id));
    }
    if let Some(kind) = filter.kind {
        sql.push_str(" AND kind=?");
        args.push(Box::new(kind.as_str()));
    }
    if let Some(category) = filter.category {
        sql.push_str(" AND category=?");
        args.push(Box::new(category.as_str()));
    }
    if let Some(from) = filter.from {
        sql.push_str(" AND date>=?");
        args.push(Box::new(from));
    }
    if let Some(to) = filter.to {
        sql.push_str(" AND date<=?");
        args.push(Box::new(to));
    }
    sql.push_str(" ORDER BY date DESC, id DESC");
    if let Some(limit) = filter.limit {
        sql.push_str(" LIMIT ?");
        args.push(Box::new(limit as i64));
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        rusqlite::params_from_iter(args.iter().map(|a| a.as_ref())),
        from_row,
    )?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Signed sum of all transactions referencing a wallet; the value the
/// cached balance is defined against.
pub fn sum_signed(conn: &Connection, user: &str, wallet_id: i64) -> LedgerResult<Decimal> {
    let mut stmt = conn.prepare(
        "SELECT kind, amount FROM transactions WHERE user_id=?1 AND wallet_id=?2",
    )?;
    let rows = stmt.query_map(params![user, wallet_id], |r| {
        Ok((parsed::<TxKind>(r, 0)?, parsed::<Decimal>(r, 1)?))
    })?;
    let mut total = Decimal::ZERO;
    for row in rows {
        let (kind, amount) = row?;
        total += kind.signed(amount);
    }
    Ok(total)
}
