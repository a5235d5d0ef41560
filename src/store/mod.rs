// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Durable per-entity CRUD, always scoped by the owning user. Nothing in
//! here touches more than one table at a time; cross-entity consistency is
//! the ledger engine's job.

pub mod budgets;
pub mod goals;
pub mod incomes;
pub mod investments;
pub mod transactions;
pub mod wallets;

use rusqlite::Row;
use rust_decimal::Decimal;

use crate::error::{LedgerError, LedgerResult};

/// Read a TEXT column and parse it into a typed value (decimal amounts,
/// closed enums). A stored value that no longer parses is surfaced as a
/// column conversion failure rather than silently skipped.
pub(crate) fn parsed<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let s: String = row.get(idx)?;
    s.parse::<T>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Same as [`parsed`], for nullable columns.
pub(crate) fn parsed_opt<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let s: Option<String> = row.get(idx)?;
    match s {
        Some(s) => s
            .parse::<T>()
            .map(Some)
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    idx,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            }),
        None => Ok(None),
    }
}

pub(crate) fn require_amount(amount: Decimal, what: &str) -> LedgerResult<()> {
    if amount.is_sign_negative() {
        return Err(LedgerError::Validation(format!(
            "{} must not be negative (got {})",
            what, amount
        )));
    }
    Ok(())
}

pub(crate) fn require_text(s: &str, what: &str) -> LedgerResult<()> {
    if s.trim().is_empty() {
        return Err(LedgerError::Validation(format!("{} is required", what)));
    }
    Ok(())
}

pub(crate) fn normalize_currency(s: &str) -> LedgerResult<String> {
    let ccy = s.trim().to_uppercase();
    if ccy.is_empty() || !ccy.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(LedgerError::Validation(format!(
            "invalid currency code '{}'",
            s
        )));
    }
    Ok(ccy)
}
