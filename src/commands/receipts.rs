// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerError;
use crate::utils::pretty_table;
use crate::{attachments, records};
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::fs::File;
use std::io;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(conn, sub)?,
        Some(("info", sub)) => info(conn, sub)?,
        Some(("save", sub)) => save(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let metas = match sub.get_one::<i64>("tx") {
        Some(&tx_id) => {
            let tx = records::get(conn, tx_id)?
                .with_context(|| format!("No transaction with id {}", tx_id))?;
            let mut out = Vec::new();
            for aref in &tx.attachments {
                if let Some(meta) = attachments::meta(conn, aref.store_id)? {
                    out.push(meta);
                }
            }
            out
        }
        None => attachments::list_meta(conn)?,
    };
    let rows: Vec<Vec<String>> = metas
        .iter()
        .map(|a| {
            vec![
                a.id.to_string(),
                a.name.clone(),
                a.mime_type.clone(),
                a.size.to_string(),
                a.created.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Name", "Mime", "Bytes", "Created"], rows)
    );
    Ok(())
}

fn info(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    match attachments::meta(conn, id)? {
        Some(a) => println!(
            "{} {} ({}, {} bytes, stored {})",
            a.id, a.name, a.mime_type, a.size, a.created
        ),
        None => println!("No receipt with id {}", id),
    }
    Ok(())
}

/// Stream the blob straight into the output file through a scoped read
/// handle; the handle is released when it goes out of scope.
fn save(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let out = sub.get_one::<String>("out").unwrap();
    let mut blob = match attachments::open(conn, id) {
        Ok(b) => b,
        Err(LedgerError::NotFound) => {
            println!("No receipt with id {}", id);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    let mut file = File::create(out).with_context(|| format!("Create '{}'", out))?;
    let written = io::copy(&mut blob, &mut file)?;
    println!("Wrote {} bytes to {}", written, out);
    Ok(())
}
