// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketledger::error::LedgerError;
use pocketledger::ledger::Ledger;
use pocketledger::models::{ReceiptFile, TransactionPatch, TxKind};
use pocketledger::{attachments, db, records, utils};
use rusqlite::Connection;
use std::io::Read;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::migrate(&mut conn).unwrap();
    conn
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn receipt(name: &str, bytes: &[u8]) -> ReceiptFile {
    ReceiptFile {
        name: name.to_string(),
        mime_type: utils::guess_mime(name).to_string(),
        bytes: bytes.to_vec(),
    }
}

#[test]
fn inserted_ids_are_distinct_and_store_assigned() {
    let conn = setup();
    let mut ledger = Ledger::load(&conn).unwrap();
    let mut ids = Vec::new();
    for i in 1..=10 {
        let id = ledger
            .add(&conn, TxKind::Expense, &format!("tx{}", i), 100, d("2024-01-05"), &[])
            .unwrap();
        ids.push(id);
    }
    let mut deduped = ids.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), 10);
    assert_eq!(records::list_all(&conn).unwrap().len(), 10);
}

#[test]
fn zero_amount_rejected_before_any_write() {
    let conn = setup();
    let mut ledger = Ledger::load(&conn).unwrap();
    let err = ledger
        .add(&conn, TxKind::Expense, "coffee", 0, d("2024-01-05"), &[receipt("r.png", b"img")])
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
    assert!(records::list_all(&conn).unwrap().is_empty());
    // validation fires before attachment persistence
    assert!(attachments::list_meta(&conn).unwrap().is_empty());
}

#[test]
fn empty_name_rejected() {
    let conn = setup();
    let mut ledger = Ledger::load(&conn).unwrap();
    let err = ledger
        .add(&conn, TxKind::Expense, "   ", 100, d("2024-01-05"), &[])
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(_)));
}

#[test]
fn negative_amount_clamped_by_parser() {
    assert_eq!(utils::parse_amount("-5").unwrap(), 0);
    assert_eq!(utils::parse_amount("12.4").unwrap(), 12);
    assert_eq!(utils::parse_amount("12.5").unwrap(), 13);
    assert!(utils::parse_amount("twelve").is_err());
}

#[test]
fn attachment_round_trip_is_byte_identical() {
    let conn = setup();
    let mut ledger = Ledger::load(&conn).unwrap();
    let first = vec![0u8, 1, 2, 255, 254, 0, 42];
    let second = b"second receipt".to_vec();
    let id = ledger
        .add(
            &conn,
            TxKind::Expense,
            "groceries",
            4500,
            d("2024-02-01"),
            &[receipt("a.png", &first), receipt("b.pdf", &second)],
        )
        .unwrap();

    let tx = records::get(&conn, id).unwrap().unwrap();
    assert_eq!(tx.attachments.len(), 2);
    // refs come back in input order
    assert_eq!(tx.attachments[0].name, "a.png");
    assert_eq!(tx.attachments[1].name, "b.pdf");

    let a = attachments::resolve(&conn, &tx.attachments[0]).unwrap();
    let b = attachments::resolve(&conn, &tx.attachments[1]).unwrap();
    assert_eq!(a.bytes, first);
    assert_eq!(b.bytes, second);
    assert_eq!(a.mime_type, "image/png");
    assert_eq!(b.mime_type, "application/pdf");
}

#[test]
fn blob_handle_streams_identical_bytes() {
    let conn = setup();
    let mut ledger = Ledger::load(&conn).unwrap();
    let payload: Vec<u8> = (0..10_000).map(|i| (i % 251) as u8).collect();
    let id = ledger
        .add(&conn, TxKind::Expense, "big receipt", 100, d("2024-02-01"), &[receipt("big.jpg", &payload)])
        .unwrap();
    let tx = records::get(&conn, id).unwrap().unwrap();

    let mut blob = attachments::open(&conn, tx.attachments[0].store_id).unwrap();
    let mut streamed = Vec::new();
    blob.read_to_end(&mut streamed).unwrap();
    assert_eq!(streamed, payload);

    let meta = attachments::meta(&conn, tx.attachments[0].store_id)
        .unwrap()
        .unwrap();
    assert_eq!(meta.size as usize, payload.len());
}

#[test]
fn delete_keeps_attachments_retrievable() {
    let conn = setup();
    let mut ledger = Ledger::load(&conn).unwrap();
    let id = ledger
        .add(
            &conn,
            TxKind::Expense,
            "dinner",
            20000,
            d("2024-02-01"),
            &[receipt("r1.png", b"one"), receipt("r2.pdf", b"two")],
        )
        .unwrap();
    let refs = records::get(&conn, id).unwrap().unwrap().attachments;

    ledger.remove(&conn, id).unwrap();
    assert!(records::get(&conn, id).unwrap().is_none());
    assert!(ledger.transactions().iter().all(|t| t.id != id));

    for aref in &refs {
        let blob = attachments::get(&conn, aref.store_id).unwrap();
        assert!(blob.is_some(), "attachment {} should survive", aref.store_id);
    }
}

#[test]
fn mirror_sorted_by_date_then_id_descending() {
    let conn = setup();
    let mut ledger = Ledger::load(&conn).unwrap();
    ledger.add(&conn, TxKind::Expense, "a", 100, d("2024-01-02"), &[]).unwrap();
    ledger.add(&conn, TxKind::Expense, "b", 100, d("2024-01-01"), &[]).unwrap();
    ledger.add(&conn, TxKind::Expense, "c", 100, d("2024-01-02"), &[]).unwrap();

    let order: Vec<&str> = ledger
        .transactions()
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    // same date: newer id first
    assert_eq!(order, vec!["c", "a", "b"]);
}

#[test]
fn update_overwrites_mutable_fields() {
    let conn = setup();
    let mut ledger = Ledger::load(&conn).unwrap();
    let id = ledger
        .add(&conn, TxKind::Expense, "salry", 90000, d("2024-02-01"), &[])
        .unwrap();
    ledger
        .update(
            &conn,
            id,
            TransactionPatch {
                kind: TxKind::Income,
                name: "salary".to_string(),
                amount: 95000,
                date: d("2024-02-02"),
                attachments: None,
            },
            &[],
        )
        .unwrap();
    let tx = records::get(&conn, id).unwrap().unwrap();
    assert_eq!(tx.kind, TxKind::Income);
    assert_eq!(tx.name, "salary");
    assert_eq!(tx.amount, 95000);
    assert_eq!(tx.date, d("2024-02-02"));
}

#[test]
fn update_with_new_receipts_replaces_refs_and_orphans_old_blobs() {
    let conn = setup();
    let mut ledger = Ledger::load(&conn).unwrap();
    let id = ledger
        .add(&conn, TxKind::Expense, "taxi", 3000, d("2024-02-01"), &[receipt("old.png", b"old")])
        .unwrap();
    let old_ref = records::get(&conn, id).unwrap().unwrap().attachments[0].clone();

    ledger
        .update(
            &conn,
            id,
            TransactionPatch {
                kind: TxKind::Expense,
                name: "taxi".to_string(),
                amount: 3000,
                date: d("2024-02-01"),
                attachments: None,
            },
            &[receipt("new.pdf", b"new")],
        )
        .unwrap();

    let tx = records::get(&conn, id).unwrap().unwrap();
    assert_eq!(tx.attachments.len(), 1);
    assert_eq!(tx.attachments[0].name, "new.pdf");
    // the replaced blob stays behind as a tolerated orphan
    assert!(attachments::get(&conn, old_ref.store_id).unwrap().is_some());
}

#[test]
fn update_and_delete_on_missing_id_report_not_found() {
    let conn = setup();
    let mut ledger = Ledger::load(&conn).unwrap();
    let patch = TransactionPatch {
        kind: TxKind::Expense,
        name: "ghost".to_string(),
        amount: 100,
        date: d("2024-02-01"),
        attachments: None,
    };
    assert!(matches!(
        ledger.update(&conn, 999, patch, &[]),
        Err(LedgerError::NotFound)
    ));
    assert!(matches!(
        ledger.remove(&conn, 999),
        Err(LedgerError::NotFound)
    ));
}

#[test]
fn snapshot_recomputes_after_each_mutation() {
    let conn = setup();
    let today = d("2024-03-10");
    let mut ledger = Ledger::load(&conn).unwrap();
    ledger.add(&conn, TxKind::Income, "pay", 500_000, today, &[]).unwrap();
    let id = ledger
        .add(&conn, TxKind::Expense, "rent", 120_000, today, &[])
        .unwrap();
    let snap = ledger.snapshot(today);
    assert_eq!(snap.balance.available, 380_000);
    assert_eq!(snap.balance.ratio, 24);

    ledger.remove(&conn, id).unwrap();
    let snap = ledger.snapshot(today);
    assert_eq!(snap.balance.available, 500_000);
    assert_eq!(snap.balance.ratio, 0);
}
