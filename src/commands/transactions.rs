// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::models::{ReceiptFile, Transaction, TransactionPatch, TxKind};
use crate::utils::{guess_mime, maybe_print_json, parse_amount, parse_date, pretty_table};
use crate::records;
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;
use std::path::Path;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("delete", sub)) => delete(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => chrono::Local::now().date_naive(),
    };
    let kind = if sub.get_flag("income") {
        TxKind::Income
    } else {
        TxKind::Expense
    };
    let files = read_receipt_files(sub)?;

    let mut ledger = Ledger::load(conn)?;
    match ledger.add(conn, kind, name, amount, date, &files) {
        Ok(id) => {
            println!(
                "Recorded {} {} '{}' on {} (id: {}, receipts: {})",
                kind.as_str(),
                amount,
                name.trim(),
                date,
                id,
                files.len()
            );
        }
        Err(LedgerError::Validation(msg)) => println!("Rejected: {}", msg),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let existing = match records::get(conn, id)? {
        Some(t) => t,
        None => {
            println!("No transaction with id {}; nothing changed.", id);
            return Ok(());
        }
    };

    let kind = match sub.get_one::<String>("kind") {
        Some(k) => TxKind::parse(k)
            .with_context(|| format!("Invalid kind '{}', expected expense|income", k))?,
        None => existing.kind,
    };
    let name = sub
        .get_one::<String>("name")
        .cloned()
        .unwrap_or(existing.name);
    let amount = match sub.get_one::<String>("amount") {
        Some(a) => parse_amount(a)?,
        None => existing.amount,
    };
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => existing.date,
    };
    let files = read_receipt_files(sub)?;

    let patch = TransactionPatch {
        kind,
        name,
        amount,
        date,
        attachments: None,
    };
    let mut ledger = Ledger::load(conn)?;
    match ledger.update(conn, id, patch, &files) {
        Ok(()) => println!("Updated transaction {}", id),
        Err(LedgerError::Validation(msg)) => println!("Rejected: {}", msg),
        Err(LedgerError::NotFound) => {
            println!("No transaction with id {}; nothing changed.", id)
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn delete(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let mut ledger = Ledger::load(conn)?;
    match ledger.remove(conn, id) {
        Ok(()) => println!("Deleted transaction {} (receipts kept)", id),
        Err(LedgerError::NotFound) => {
            println!("No transaction with id {}; nothing changed.", id)
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub kind: String,
    pub name: String,
    pub amount: i64,
    pub receipts: usize,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.name.clone(),
                    r.amount.to_string(),
                    r.receipts.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Kind", "Name", "Amount", "Receipts"], rows)
        );
    }
    Ok(())
}

/// Rows come from the sorted mirror, so output is always newest first.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let kind_filter = match sub.get_one::<String>("kind") {
        Some(k) => Some(
            TxKind::parse(k)
                .with_context(|| format!("Invalid kind '{}', expected expense|income", k))?,
        ),
        None => None,
    };
    let month_filter = sub.get_one::<String>("month").cloned();
    let limit = sub.get_one::<usize>("limit").copied();

    let ledger = Ledger::load(conn)?;
    let iter = ledger
        .transactions()
        .iter()
        .filter(|t| kind_filter.map_or(true, |k| t.kind == k))
        .filter(|t| {
            month_filter
                .as_deref()
                .map_or(true, |m| t.date.to_string().starts_with(m))
        });
    let rows: Vec<TransactionRow> = match limit {
        Some(n) => iter.take(n).map(to_row).collect(),
        None => iter.map(to_row).collect(),
    };
    Ok(rows)
}

fn to_row(t: &Transaction) -> TransactionRow {
    TransactionRow {
        id: t.id,
        date: t.date.to_string(),
        kind: t.kind.as_str().to_string(),
        name: t.name.clone(),
        amount: t.amount,
        receipts: t.attachments.len(),
    }
}

fn read_receipt_files(sub: &clap::ArgMatches) -> Result<Vec<ReceiptFile>> {
    let mut files = Vec::new();
    if let Some(paths) = sub.get_many::<String>("receipt") {
        for p in paths {
            let path = Path::new(p);
            let bytes =
                std::fs::read(path).with_context(|| format!("Read receipt file '{}'", p))?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.clone());
            let mime_type = guess_mime(&name).to_string();
            files.push(ReceiptFile {
                name,
                mime_type,
                bytes,
            });
        }
    }
    Ok(files)
}
