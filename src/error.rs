// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

/// Errors raised by the record and attachment stores and the mutation
/// pipeline. Indicator-feed failures never appear here; they are handled at
/// the command boundary and degrade to placeholders.
#[derive(thiserror::Error, Debug)]
pub enum LedgerError {
    /// Input rejected before any I/O (empty name, non-positive amount,
    /// malformed date). Nothing was written.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The referenced id does not exist. Callers treat edit/delete on a
    /// missing id as a no-op with feedback, not a crash.
    #[error("record not found")]
    NotFound,

    /// Storage fault (quota, corruption, locked database). Propagated
    /// untouched; storage faults are not retried within a session.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

impl LedgerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        LedgerError::Validation(msg.into())
    }
}
