// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use crate::{attachments, records};
use anyhow::Result;
use rusqlite::Connection;
use std::collections::HashSet;

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = report(conn)?;
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Integrity findings across both stores, as (issue, detail) rows. Orphaned
/// blobs are tolerated by design and only counted; a ref pointing at a
/// missing blob is a real invariant breach.
pub fn report(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    let txs = records::list_all(conn)?;
    let mut referenced: HashSet<i64> = HashSet::new();
    for t in &txs {
        for aref in &t.attachments {
            referenced.insert(aref.store_id);
            if attachments::meta(conn, aref.store_id)?.is_none() {
                rows.push(vec![
                    "dangling_ref".into(),
                    format!("tx {} -> attachment {}", t.id, aref.store_id),
                ]);
            }
        }
    }

    let orphans = attachments::list_meta(conn)?
        .into_iter()
        .filter(|a| !referenced.contains(&a.id))
        .count();
    if orphans > 0 {
        rows.push(vec![
            "orphaned_blobs".into(),
            format!("{} (kept by design)", orphans),
        ]);
    }

    let negatives: i64 = conn.query_row(
        "SELECT COUNT(*) FROM transactions WHERE amount < 0",
        [],
        |r| r.get(0),
    )?;
    if negatives > 0 {
        rows.push(vec!["negative_amounts".into(), negatives.to_string()]);
    }

    Ok(rows)
}
