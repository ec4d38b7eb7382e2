// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregation Engine: pure functions from `(transactions, today)` to the
//! derived views. No I/O, no failure path; malformed input is stopped at the
//! mutation-pipeline boundary and never gets here. Every call recomputes
//! from the full set, so the derived numbers cannot drift.

use crate::models::{Balance, HistogramPoint, PeriodTotals, Snapshot, Transaction, TxKind};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

/// Most recent daily buckets kept for the chart.
pub const HISTOGRAM_POINTS: usize = 14;
/// Minimum bar height in percent so near-zero days stay visible.
pub const MIN_BAR_PCT: u8 = 4;

pub fn balance(transactions: &[Transaction]) -> Balance {
    let income: i64 = sum_kind(transactions, TxKind::Income);
    let expense: i64 = sum_kind(transactions, TxKind::Expense);
    let ratio = if income == 0 {
        0
    } else {
        let pct = (expense as f64 / income as f64 * 100.0).round();
        pct.clamp(0.0, 100.0) as u8
    };
    Balance {
        income,
        expense,
        available: income - expense,
        ratio,
    }
}

fn sum_kind(transactions: &[Transaction], kind: TxKind) -> i64 {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

/// Calendar fortnight containing `today`: days 1-15, or 16 to month end.
pub fn fortnight_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let y = today.year();
    let m = today.month();
    if today.day() <= 15 {
        (
            NaiveDate::from_ymd_opt(y, m, 1).unwrap(),
            NaiveDate::from_ymd_opt(y, m, 15).unwrap(),
        )
    } else {
        (NaiveDate::from_ymd_opt(y, m, 16).unwrap(), month_end(today))
    }
}

pub fn month_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap(),
        month_end(today),
    )
}

/// Trailing 7-day window ending today, inclusive on both ends.
pub fn week_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(6), today)
}

fn month_end(today: NaiveDate) -> NaiveDate {
    let (y, m) = if today.month() == 12 {
        (today.year() + 1, 1)
    } else {
        (today.year(), today.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1).unwrap() - Duration::days(1)
}

fn expense_sum_in(transactions: &[Transaction], start: NaiveDate, end: NaiveDate) -> i64 {
    transactions
        .iter()
        .filter(|t| t.kind == TxKind::Expense && t.date >= start && t.date <= end)
        .map(|t| t.amount)
        .sum()
}

pub fn period_totals(transactions: &[Transaction], today: NaiveDate) -> PeriodTotals {
    let (wk_start, wk_end) = week_window(today);
    let (fn_start, fn_end) = fortnight_window(today);
    let (mo_start, mo_end) = month_window(today);
    PeriodTotals {
        today: expense_sum_in(transactions, today, today),
        week: expense_sum_in(transactions, wk_start, wk_end),
        fortnight: expense_sum_in(transactions, fn_start, fn_end),
        month: expense_sum_in(transactions, mo_start, mo_end),
        all_time: sum_kind(transactions, TxKind::Expense),
    }
}

/// Expense transactions grouped by date, ascending, truncated to the most
/// recent `HISTOGRAM_POINTS` buckets. Older buckets are dropped, not merged.
pub fn histogram(transactions: &[Transaction]) -> Vec<HistogramPoint> {
    let mut by_date: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for t in transactions.iter().filter(|t| t.kind == TxKind::Expense) {
        *by_date.entry(t.date).or_insert(0) += t.amount;
    }
    let points: Vec<HistogramPoint> = by_date
        .into_iter()
        .map(|(date, amount)| HistogramPoint { date, amount })
        .collect();
    let skip = points.len().saturating_sub(HISTOGRAM_POINTS);
    points.into_iter().skip(skip).collect()
}

/// Bar heights as percent of the tallest visible bucket, floored at
/// `MIN_BAR_PCT` for non-zero buckets.
pub fn bar_heights(points: &[HistogramPoint]) -> Vec<u8> {
    let max = points.iter().map(|p| p.amount).max().unwrap_or(0);
    if max == 0 {
        return vec![0; points.len()];
    }
    points
        .iter()
        .map(|p| {
            let pct = (p.amount as f64 / max as f64 * 100.0).round() as u8;
            if p.amount > 0 { pct.max(MIN_BAR_PCT) } else { 0 }
        })
        .collect()
}

/// The full read-only snapshot handed to the rendering layer.
pub fn snapshot(transactions: &[Transaction], today: NaiveDate) -> Snapshot {
    Snapshot {
        balance: balance(transactions),
        periods: period_totals(transactions, today),
        histogram: histogram(transactions),
        transactions: transactions.to_vec(),
    }
}
