// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Record Store: keyed durable storage for transactions. Ids are assigned
//! here and only here. `list_all` makes no ordering promise; the ledger
//! mirror sorts. Secondary indices on date and kind are created in db.rs as
//! a forward-compatibility contract; today's read path is full scan.

use crate::error::{LedgerError, Result};
use crate::models::{AttachmentRef, NewTransaction, Transaction, TransactionPatch, TxKind};
use rusqlite::{params, Connection, OptionalExtension, Row};

pub fn insert(conn: &Connection, tx: &NewTransaction) -> Result<i64> {
    let refs = refs_to_json(&tx.attachments)?;
    conn.execute(
        "INSERT INTO transactions(kind, name, amount, date, attachments)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            tx.kind.as_str(),
            tx.name,
            tx.amount,
            tx.date.to_string(),
            refs
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Transaction>> {
    let row = conn
        .query_row(
            "SELECT id, kind, name, amount, date, attachments, created
             FROM transactions WHERE id=?1",
            params![id],
            map_transaction,
        )
        .optional()?;
    Ok(row)
}

pub fn list_all(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, kind, name, amount, date, attachments, created FROM transactions",
    )?;
    let rows = stmt.query_map([], map_transaction)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Full overwrite of the mutable fields of an existing record.
pub fn replace(
    conn: &Connection,
    id: i64,
    patch: &TransactionPatch,
    refs: &[AttachmentRef],
) -> Result<()> {
    let refs_json = refs_to_json(refs)?;
    let changed = conn.execute(
        "UPDATE transactions SET kind=?1, name=?2, amount=?3, date=?4, attachments=?5 WHERE id=?6",
        params![
            patch.kind.as_str(),
            patch.name,
            patch.amount,
            patch.date.to_string(),
            refs_json,
            id
        ],
    )?;
    if changed == 0 {
        return Err(LedgerError::NotFound);
    }
    Ok(())
}

pub fn delete(conn: &Connection, id: i64) -> Result<()> {
    let changed = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    if changed == 0 {
        return Err(LedgerError::NotFound);
    }
    Ok(())
}

fn map_transaction(r: &Row) -> rusqlite::Result<Transaction> {
    let kind: Option<String> = r.get(1)?;
    let refs_json: String = r.get(5)?;
    let attachments: Vec<AttachmentRef> = serde_json::from_str(&refs_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Transaction {
        id: r.get(0)?,
        kind: TxKind::from_column(kind.as_deref()),
        name: r.get(2)?,
        amount: r.get(3)?,
        date: r.get(4)?,
        attachments,
        created: r.get(6)?,
    })
}

fn refs_to_json(refs: &[AttachmentRef]) -> Result<String> {
    serde_json::to_string(refs)
        .map_err(|e| LedgerError::Validation(format!("unserializable attachment refs: {}", e)))
}
