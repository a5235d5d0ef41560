// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors raised by the ledger core. The façade normalizes these before
/// they reach any caller; nothing else crosses that boundary.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("consistency failure: {0}")]
    Consistency(String),
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

impl LedgerError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

/// Remap a unique-constraint violation into a `Conflict` carrying a
/// domain message; everything else passes through as a database error.
pub fn on_unique_conflict(e: rusqlite::Error, msg: &str) -> LedgerError {
    if let rusqlite::Error::SqliteFailure(f, _) = &e {
        if f.code == rusqlite::ErrorCode::ConstraintViolation {
            return LedgerError::Conflict(msg.to_string());
        }
    }
    LedgerError::Database(e)
}

/// True when the store is momentarily locked by another writer and the
/// operation is worth retrying.
pub fn is_busy(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(f, _)
            if f.code == rusqlite::ErrorCode::DatabaseBusy
                || f.code == rusqlite::ErrorCode::DatabaseLocked
    )
}
