// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Investment, InvestmentKind};
use crate::store::{normalize_currency, parsed, require_amount, require_text};

#[derive(Debug, Clone)]
pub struct NewInvestment {
    pub name: String,
    pub kind: InvestmentKind,
    pub amount: Decimal,
    pub current_value: Decimal,
    pub purchase_date: NaiveDate,
    pub currency: String,
    pub notes: Option<String>,
}

const SELECT: &str = "SELECT id, user_id, name, kind, amount, current_value, purchase_date, \
                      currency, notes FROM investments";

fn from_row(r: &Row<'_>) -> rusqlite::Result<Investment> {
    Ok(Investment {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        kind: parsed(r, 3)?,
        amount: parsed(r, 4)?,
        current_value: parsed(r, 5)?,
        purchase_date: r.get(6)?,
        currency: r.get(7)?,
        notes: r.get(8)?,
    })
}

pub fn create(conn: &Connection, user: &str, new: &NewInvestment) -> LedgerResult<Investment> {
    require_text(user, "user id")?;
    require_text(&new.name, "investment name")?;
    require_amount(new.amount, "cost basis")?;
    require_amount(new.current_value, "current value")?;
    let ccy = normalize_currency(&new.currency)?;
    conn.execute(
        "INSERT INTO investments(user_id, name, kind, amount, current_value, purchase_date, currency, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            user,
            new.name.trim(),
            new.kind.as_str(),
            new.amount.to_string(),
            new.current_value.to_string(),
            new.purchase_date,
            ccy,
            new.notes,
        ],
    )?;
    get(conn, user, conn.last_insert_rowid())
}

pub fn get(conn: &Connection, user: &str, id: i64) -> LedgerResult<Investment> {
    let sql = format!("{} WHERE user_id=?1 AND id=?2", SELECT);
    conn.query_row(&sql, params![user, id], from_row)
        .optional()?
        .ok_or_else(|| LedgerError::not_found(format!("investment {}", id)))
}

pub fn list(conn: &Connection, user: &str) -> LedgerResult<Vec<Investment>> {
    let sql = format!("{} WHERE user_id=?1 ORDER BY purchase_date DESC, id DESC", SELECT);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user], from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Record an external valuation. Investments are never derived from the
/// transaction ledger.
pub fn revalue(
    conn: &Connection,
    user: &str,
    id: i64,
    current_value: Decimal,
) -> LedgerResult<Investment> {
    require_amount(current_value, "current value")?;
    let n = conn.execute(
        "UPDATE investments SET current_value=?1 WHERE user_id=?2 AND id=?3",
        params![current_value.to_string(), user, id],
    )?;
    if n == 0 {
        return Err(LedgerError::not_found(format!("investment {}", id)));
    }
    get(conn, user, id)
}

pub fn delete(conn: &Connection, user: &str, id: i64) -> LedgerResult<()> {
    let n = conn.execute(
        "DELETE FROM investments WHERE user_id=?1 AND id=?2",
        params![user, id],
    )?;
    if n == 0 {
        return Err(LedgerError::not_found(format!("investment {}", id)));
    }
    Ok(())
}
