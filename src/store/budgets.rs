// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

use crate::error::{on_unique_conflict, LedgerError, LedgerResult};
use crate::models::{Budget, Category};
use crate::store::{parsed, require_amount, require_text};

const SELECT: &str = "SELECT id, user_id, category, amount, updated_at FROM budgets";

fn from_row(r: &Row<'_>) -> rusqlite::Result<Budget> {
    Ok(Budget {
        id: r.get(0)?,
        user_id: r.get(1)?,
        category: parsed(r, 2)?,
        amount: parsed(r, 3)?,
        updated_at: r.get(4)?,
    })
}

/// One budget per (user, category); a second create for the same pair is a
/// conflict, never an upsert.
pub fn create(
    conn: &Connection,
    user: &str,
    category: Category,
    amount: Decimal,
) -> LedgerResult<Budget> {
    require_text(user, "user id")?;
    require_amount(amount, "budget amount")?;
    conn.execute(
        "INSERT INTO budgets(user_id, category, amount) VALUES (?1, ?2, ?3)",
        params![user, category.as_str(), amount.to_string()],
    )
    .map_err(|e| {
        on_unique_conflict(
            e,
            &format!("budget for category '{}' already exists", category),
        )
    })?;
    get(conn, user, category)
}

pub fn get(conn: &Connection, user: &str, category: Category) -> LedgerResult<Budget> {
    let sql = format!("{} WHERE user_id=?1 AND category=?2", SELECT);
    conn.query_row(&sql, params![user, category.as_str()], from_row)
        .optional()?
        .ok_or_else(|| LedgerError::not_found(format!("budget for category '{}'", category)))
}

pub fn list(conn: &Connection, user: &str) -> LedgerResult<Vec<Budget>> {
    let sql = format!("{} WHERE user_id=?1 ORDER BY category", SELECT);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user], from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub fn update_amount(
    conn: &Connection,
    user: &str,
    category: Category,
    amount: Decimal,
) -> LedgerResult<Budget> {
    require_amount(amount, "budget amount")?;
    let n = conn.execute(
        "UPDATE budgets SET amount=?1, updated_at=datetime('now') WHERE user_id=?2 AND category=?3",
        params![amount.to_string(), user, category.as_str()],
    )?;
    if n == 0 {
        return Err(LedgerError::not_found(format!(
            "budget for category '{}'",
            category
        )));
    }
    get(conn, user, category)
}

pub fn delete(conn: &Connection, user: &str, category: Category) -> LedgerResult<()> {
    let n = conn.execute(
        "DELETE FROM budgets WHERE user_id=?1 AND category=?2",
        params![user, category.as_str()],
    )?;
    if n == 0 {
        return Err(LedgerError::not_found(format!(
            "budget for category '{}'",
            category
        )));
    }
    Ok(())
}
