// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Mutation Pipeline: makes "add a transaction with N receipts" and "edit a
//! transaction, optionally replacing its receipts" look atomic to the caller
//! even though they span two independent stores. Attachments are written
//! first so a ref never points at a missing blob; a record-insert failure
//! after that leaves orphaned blobs, which is the accepted window.

use crate::error::{LedgerError, Result};
use crate::models::{
    AttachmentRef, NewTransaction, ReceiptFile, RefKind, Snapshot, Transaction, TransactionPatch,
    TxKind,
};
use crate::{attachments, records, stats};
use chrono::NaiveDate;
use rusqlite::Connection;

/// Owned in-memory mirror of the record store, kept sorted by
/// `(date desc, id desc)` after every mutation. This is the single input to
/// both list rendering and aggregation.
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn load(conn: &Connection) -> Result<Ledger> {
        let mut ledger = Ledger {
            transactions: Vec::new(),
        };
        ledger.refresh(conn)?;
        Ok(ledger)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Validate, persist receipts, persist the record, refresh the mirror.
    /// Returns the store-assigned id.
    pub fn add(
        &mut self,
        conn: &Connection,
        kind: TxKind,
        name: &str,
        amount: i64,
        date: NaiveDate,
        files: &[ReceiptFile],
    ) -> Result<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::validation("name must not be empty"));
        }
        if amount <= 0 {
            return Err(LedgerError::validation("amount must be positive"));
        }
        let refs = persist_receipts(conn, files)?;
        let id = records::insert(
            conn,
            &NewTransaction {
                kind,
                name: name.to_string(),
                amount,
                date,
                attachments: refs,
            },
        )?;
        self.refresh(conn)?;
        Ok(id)
    }

    /// Full overwrite of the mutable fields. New receipt files, when given,
    /// replace the ref list entirely; the old blobs stay behind as orphans,
    /// consistent with the delete policy. Missing id is `NotFound`.
    pub fn update(
        &mut self,
        conn: &Connection,
        id: i64,
        patch: TransactionPatch,
        files: &[ReceiptFile],
    ) -> Result<()> {
        let name = patch.name.trim().to_string();
        if name.is_empty() {
            return Err(LedgerError::validation("name must not be empty"));
        }
        if patch.amount <= 0 {
            return Err(LedgerError::validation("amount must be positive"));
        }
        let existing = records::get(conn, id)?.ok_or(LedgerError::NotFound)?;
        let refs = if files.is_empty() {
            match &patch.attachments {
                Some(refs) => refs.clone(),
                None => existing.attachments,
            }
        } else {
            persist_receipts(conn, files)?
        };
        let patch = TransactionPatch { name, ..patch };
        records::replace(conn, id, &patch, &refs)?;
        self.refresh(conn)?;
        Ok(())
    }

    /// Delete the record only. Referenced attachments stay retrievable by
    /// their store ids.
    pub fn remove(&mut self, conn: &Connection, id: i64) -> Result<()> {
        records::delete(conn, id)?;
        self.refresh(conn)?;
        Ok(())
    }

    /// Full recompute of every derived view from the mirror.
    pub fn snapshot(&self, today: NaiveDate) -> Snapshot {
        stats::snapshot(&self.transactions, today)
    }

    fn refresh(&mut self, conn: &Connection) -> Result<()> {
        let mut txs = records::list_all(conn)?;
        txs.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        self.transactions = txs;
        Ok(())
    }
}

/// Write each receipt to the attachment store, in input order, and build the
/// refs to embed. A ref is only ever created from a successful insert.
fn persist_receipts(conn: &Connection, files: &[ReceiptFile]) -> Result<Vec<AttachmentRef>> {
    let mut refs = Vec::with_capacity(files.len());
    for f in files {
        let store_id = attachments::insert(conn, &f.bytes, &f.name, &f.mime_type)?;
        refs.push(AttachmentRef {
            store_id,
            kind: RefKind::from_mime(&f.mime_type),
            name: f.name.clone(),
            mime_type: f.mime_type.clone(),
        });
    }
    Ok(refs)
}
