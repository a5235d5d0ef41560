// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

use crate::error::{LedgerError, LedgerResult};
use crate::models::SavingsGoal;
use crate::store::{parsed, require_amount, require_text};

const SELECT: &str =
    "SELECT id, user_id, name, target_amount, current_amount, target_date FROM savings_goals";

fn from_row(r: &Row<'_>) -> rusqlite::Result<SavingsGoal> {
    Ok(SavingsGoal {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        target_amount: parsed(r, 3)?,
        current_amount: parsed(r, 4)?,
        target_date: r.get(5)?,
    })
}

pub fn create(
    conn: &Connection,
    user: &str,
    name: &str,
    target_amount: Decimal,
    target_date: NaiveDate,
) -> LedgerResult<SavingsGoal> {
    require_text(user, "user id")?;
    require_text(name, "goal name")?;
    require_amount(target_amount, "target amount")?;
    conn.execute(
        "INSERT INTO savings_goals(user_id, name, target_amount, target_date)
         VALUES (?1, ?2, ?3, ?4)",
        params![user, name.trim(), target_amount.to_string(), target_date],
    )?;
    get(conn, user, conn.last_insert_rowid())
}

pub fn get(conn: &Connection, user: &str, id: i64) -> LedgerResult<SavingsGoal> {
    let sql = format!("{} WHERE user_id=?1 AND id=?2", SELECT);
    conn.query_row(&sql, params![user, id], from_row)
        .optional()?
        .ok_or_else(|| LedgerError::not_found(format!("savings goal {}", id)))
}

pub fn list(conn: &Connection, user: &str) -> LedgerResult<Vec<SavingsGoal>> {
    let sql = format!("{} WHERE user_id=?1 ORDER BY target_date, id", SELECT);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user], from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Add (or with a negative delta, withdraw) funds. The running amount may
/// exceed the target -- over-funding stays visible -- but never goes
/// negative.
pub fn add_funds(conn: &Connection, user: &str, id: i64, delta: Decimal) -> LedgerResult<SavingsGoal> {
    let goal = get(conn, user, id)?;
    let new_amount = goal.current_amount + delta;
    if new_amount.is_sign_negative() && !new_amount.is_zero() {
        return Err(LedgerError::Validation(format!(
            "cannot withdraw {} from goal '{}' holding {}",
            -delta, goal.name, goal.current_amount
        )));
    }
    conn.execute(
        "UPDATE savings_goals SET current_amount=?1 WHERE user_id=?2 AND id=?3",
        params![new_amount.to_string(), user, id],
    )?;
    get(conn, user, id)
}

pub fn update(
    conn: &Connection,
    user: &str,
    id: i64,
    name: Option<&str>,
    target_amount: Option<Decimal>,
    target_date: Option<NaiveDate>,
) -> LedgerResult<SavingsGoal> {
    let goal = get(conn, user, id)?;
    let name = match name {
        Some(n) => {
            require_text(n, "goal name")?;
            n.trim().to_string()
        }
        None => goal.name,
    };
    let target = target_amount.unwrap_or(goal.target_amount);
    require_amount(target, "target amount")?;
    conn.execute(
        "UPDATE savings_goals SET name=?1, target_amount=?2, target_date=?3
         WHERE user_id=?4 AND id=?5",
        params![
            name,
            target.to_string(),
            target_date.unwrap_or(goal.target_date),
            user,
            id
        ],
    )?;
    get(conn, user, id)
}

pub fn delete(conn: &Connection, user: &str, id: i64) -> LedgerResult<()> {
    let n = conn.execute(
        "DELETE FROM savings_goals WHERE user_id=?1 AND id=?2",
        params![user, id],
    )?;
    if n == 0 {
        return Err(LedgerError::not_found(format!("savings goal {}", id)));
    }
    Ok(())
}
