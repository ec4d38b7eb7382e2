// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Transaction discriminant. Legacy databases stored expenses only and had no
/// kind column; `from_column` is the single place that rule lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Expense,
    Income,
}

impl TxKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TxKind::Expense => "expense",
            TxKind::Income => "income",
        }
    }

    /// Parse a kind column value. NULL or anything unrecognized maps to
    /// `Expense`, the only kind the legacy schema could hold.
    pub fn from_column(value: Option<&str>) -> TxKind {
        match value {
            Some("income") => TxKind::Income,
            _ => TxKind::Expense,
        }
    }

    pub fn parse(s: &str) -> Option<TxKind> {
        match s {
            "expense" => Some(TxKind::Expense),
            "income" => Some(TxKind::Income),
            _ => None,
        }
    }
}

/// What a stored receipt is, derived from its MIME type at ref-creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefKind {
    Photo,
    Document,
}

impl RefKind {
    pub fn from_mime(mime: &str) -> RefKind {
        if mime.starts_with("image/") {
            RefKind::Photo
        } else {
            RefKind::Document
        }
    }
}

/// Non-owning pointer from a transaction to a blob in the attachment store.
/// Deleting the transaction leaves the blob in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub store_id: i64,
    pub kind: RefKind,
    pub name: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub kind: TxKind,
    pub name: String,
    /// Whole currency units, never negative.
    pub amount: i64,
    pub date: NaiveDate,
    pub attachments: Vec<AttachmentRef>,
    pub created: String,
}

/// Fields for a not-yet-inserted transaction; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: TxKind,
    pub name: String,
    pub amount: i64,
    pub date: NaiveDate,
    pub attachments: Vec<AttachmentRef>,
}

/// Full overwrite of a transaction's mutable fields. `attachments: None`
/// keeps the existing ref list; `Some` replaces it entirely.
#[derive(Debug, Clone)]
pub struct TransactionPatch {
    pub kind: TxKind,
    pub name: String,
    pub amount: i64,
    pub date: NaiveDate,
    pub attachments: Option<Vec<AttachmentRef>>,
}

/// A fully resolved attachment, bytes included.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub id: i64,
    pub bytes: Vec<u8>,
    pub name: String,
    pub mime_type: String,
    pub created: String,
}

/// Attachment metadata projection; reading one never loads the blob.
#[derive(Debug, Clone, Serialize)]
pub struct AttachmentMeta {
    pub id: i64,
    pub name: String,
    pub mime_type: String,
    pub size: i64,
    pub created: String,
}

/// A receipt file as handed in at the CLI boundary, before it has a store id.
#[derive(Debug, Clone)]
pub struct ReceiptFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Balance {
    pub income: i64,
    pub expense: i64,
    /// income - expense; may be negative and is displayed as-is.
    pub available: i64,
    /// round(expense / income * 100), clamped to 0..=100, 0 when income is 0.
    pub ratio: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodTotals {
    pub today: i64,
    pub week: i64,
    pub fortnight: i64,
    pub month: i64,
    pub all_time: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramPoint {
    pub date: NaiveDate,
    pub amount: i64,
}

/// Read-only snapshot handed to the rendering layer after every recompute.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub balance: Balance,
    pub periods: PeriodTotals,
    pub histogram: Vec<HistogramPoint>,
    pub transactions: Vec<Transaction>,
}
