// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Frequency, Income, IncomeSource};
use crate::store::{parsed, require_amount, require_text};

#[derive(Debug, Clone)]
pub struct NewIncome {
    pub amount: Decimal,
    pub source: IncomeSource,
    pub description: String,
    pub frequency: Frequency,
    pub date: NaiveDate,
}

const SELECT: &str = "SELECT id, user_id, amount, source, description, frequency, date, \
                      posted_through FROM incomes";

fn from_row(r: &Row<'_>) -> rusqlite::Result<Income> {
    Ok(Income {
        id: r.get(0)?,
        user_id: r.get(1)?,
        amount: parsed(r, 2)?,
        source: parsed(r, 3)?,
        description: r.get(4)?,
        frequency: parsed(r, 5)?,
        date: r.get(6)?,
        posted_through: r.get(7)?,
    })
}

pub fn create(conn: &Connection, user: &str, new: &NewIncome) -> LedgerResult<Income> {
    require_text(user, "user id")?;
    require_amount(new.amount, "income amount")?;
    require_text(&new.description, "description")?;
    conn.execute(
        "INSERT INTO incomes(user_id, amount, source, description, frequency, date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user,
            new.amount.to_string(),
            new.source.as_str(),
            new.description.trim(),
            new.frequency.as_str(),
            new.date,
        ],
    )?;
    get(conn, user, conn.last_insert_rowid())
}

pub fn get(conn: &Connection, user: &str, id: i64) -> LedgerResult<Income> {
    let sql = format!("{} WHERE user_id=?1 AND id=?2", SELECT);
    conn.query_row(&sql, params![user, id], from_row)
        .optional()?
        .ok_or_else(|| LedgerError::not_found(format!("income {}", id)))
}

pub fn list(conn: &Connection, user: &str) -> LedgerResult<Vec<Income>> {
    let sql = format!("{} WHERE user_id=?1 ORDER BY date DESC, id DESC", SELECT);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user], from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub fn delete(conn: &Connection, user: &str, id: i64) -> LedgerResult<()> {
    let n = conn.execute(
        "DELETE FROM incomes WHERE user_id=?1 AND id=?2",
        params![user, id],
    )?;
    if n == 0 {
        return Err(LedgerError::not_found(format!("income {}", id)));
    }
    Ok(())
}

/// Advance the posted-through marker after occurrences were materialized.
pub fn set_posted_through(
    conn: &Connection,
    user: &str,
    id: i64,
    through: NaiveDate,
) -> LedgerResult<()> {
    let n = conn.execute(
        "UPDATE incomes SET posted_through=?1 WHERE user_id=?2 AND id=?3",
        params![through, user, id],
    )?;
    if n == 0 {
        return Err(LedgerError::not_found(format!("income {}", id)));
    }
    Ok(())
}
