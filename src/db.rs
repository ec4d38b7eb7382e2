// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension};
use std::fs;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Pocketledger", "pocketledger"));

/// Unified transaction schema. Version 1 was the legacy split layout
/// (an `expenses` table plus an income scalar in `meta`).
pub const SCHEMA_VERSION: i32 = 2;

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("pocketledger.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    migrate(&mut conn)?;
    Ok(conn)
}

/// Bring the database to `SCHEMA_VERSION`. Idempotent: a database already at
/// the target version is left untouched, and every CREATE is IF NOT EXISTS.
///
/// Upgrade path is one-way: the legacy layout (separate `expenses` table plus
/// a declared-income scalar in `meta`) becomes the unified `transactions`
/// table with a kind column. Every expense row is preserved as
/// kind='expense'; the income scalar is dropped without conversion and the
/// user re-enters income as income-kind transactions. Attachments are shared
/// by both generations and are never touched here.
pub fn migrate(conn: &mut Connection) -> Result<()> {
    let version: i32 = conn.pragma_query_value(None, "user_version", |r| r.get(0))?;
    if version >= SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;

    tx.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        kind TEXT NOT NULL CHECK(kind IN ('expense','income')),
        name TEXT NOT NULL,
        amount INTEGER NOT NULL CHECK(amount >= 0),
        date TEXT NOT NULL,
        attachments TEXT NOT NULL DEFAULT '[]',
        created TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    CREATE INDEX IF NOT EXISTS idx_transactions_kind ON transactions(kind);

    CREATE TABLE IF NOT EXISTS attachments(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        blob BLOB NOT NULL,
        name TEXT NOT NULL,
        mime_type TEXT NOT NULL,
        created TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;

    if table_exists(&tx, "expenses")? {
        tx.execute(
            "INSERT INTO transactions(kind, name, amount, date, attachments, created)
             SELECT 'expense', name, amount, date, IFNULL(attachments, '[]'), created
             FROM expenses ORDER BY id",
            [],
        )?;
        tx.execute_batch("DROP TABLE expenses;")?;
    }
    if table_exists(&tx, "meta")? {
        // Declared-income scalar: superseded by income-kind transactions,
        // deliberately not auto-converted.
        tx.execute_batch("DROP TABLE meta;")?;
    }

    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let found: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
            [name],
            |r| r.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}
