// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Attachment Store: write-once binary blobs in a collection independent of
//! the transaction records that reference them. There is no update
//! operation, and deleting a transaction never reaches in here.

use crate::error::{LedgerError, Result};
use crate::models::{Attachment, AttachmentMeta, AttachmentRef};
use rusqlite::blob::Blob;
use rusqlite::{params, Connection, DatabaseName, OptionalExtension};

pub fn insert(conn: &Connection, bytes: &[u8], name: &str, mime_type: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO attachments(blob, name, mime_type) VALUES (?1, ?2, ?3)",
        params![bytes, name, mime_type],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Metadata only; the blob column is measured with length(), never read.
pub fn meta(conn: &Connection, id: i64) -> Result<Option<AttachmentMeta>> {
    let row = conn
        .query_row(
            "SELECT id, name, mime_type, length(blob), created FROM attachments WHERE id=?1",
            params![id],
            |r| {
                Ok(AttachmentMeta {
                    id: r.get(0)?,
                    name: r.get(1)?,
                    mime_type: r.get(2)?,
                    size: r.get(3)?,
                    created: r.get(4)?,
                })
            },
        )
        .optional()?;
    Ok(row)
}

pub fn list_meta(conn: &Connection) -> Result<Vec<AttachmentMeta>> {
    let mut stmt = conn
        .prepare("SELECT id, name, mime_type, length(blob), created FROM attachments ORDER BY id")?;
    let rows = stmt.query_map([], |r| {
        Ok(AttachmentMeta {
            id: r.get(0)?,
            name: r.get(1)?,
            mime_type: r.get(2)?,
            size: r.get(3)?,
            created: r.get(4)?,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Scoped read handle over the raw blob, released when dropped. Lets large
/// receipts stream out (std::io::Read) without a full in-memory copy.
pub fn open(conn: &Connection, id: i64) -> Result<Blob<'_>> {
    if meta(conn, id)?.is_none() {
        return Err(LedgerError::NotFound);
    }
    let blob = conn.blob_open(DatabaseName::Main, "attachments", "blob", id, true)?;
    Ok(blob)
}

/// Resolve a transaction's ref to the stored bytes. The returned bytes are
/// exactly what was inserted.
pub fn resolve(conn: &Connection, aref: &AttachmentRef) -> Result<Attachment> {
    get(conn, aref.store_id)?.ok_or(LedgerError::NotFound)
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Attachment>> {
    let row = conn
        .query_row(
            "SELECT id, blob, name, mime_type, created FROM attachments WHERE id=?1",
            params![id],
            |r| {
                Ok(Attachment {
                    id: r.get(0)?,
                    bytes: r.get(1)?,
                    name: r.get(2)?,
                    mime_type: r.get(3)?,
                    created: r.get(4)?,
                })
            },
        )
        .optional()?;
    Ok(row)
}

/// Present for completeness; no normal flow invokes it. Attachments persist
/// once written, including after their transaction is deleted.
pub fn delete(conn: &Connection, id: i64) -> Result<()> {
    let changed = conn.execute("DELETE FROM attachments WHERE id=?1", params![id])?;
    if changed == 0 {
        return Err(LedgerError::NotFound);
    }
    Ok(())
}
