// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::stats;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

const BAR_WIDTH: usize = 20;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");

    let ledger = Ledger::load(conn)?;
    let today = chrono::Local::now().date_naive();
    let snap = ledger.snapshot(today);

    if maybe_print_json(json_flag, jsonl_flag, &snap)? {
        return Ok(());
    }

    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Available", "Spent %"],
            vec![vec![
                snap.balance.income.to_string(),
                snap.balance.expense.to_string(),
                snap.balance.available.to_string(),
                format!("{}%", snap.balance.ratio),
            ]],
        )
    );

    println!(
        "{}",
        pretty_table(
            &["Today", "Week", "Fortnight", "Month", "All time"],
            vec![vec![
                snap.periods.today.to_string(),
                snap.periods.week.to_string(),
                snap.periods.fortnight.to_string(),
                snap.periods.month.to_string(),
                snap.periods.all_time.to_string(),
            ]],
        )
    );

    if !snap.histogram.is_empty() {
        let heights = stats::bar_heights(&snap.histogram);
        let rows: Vec<Vec<String>> = snap
            .histogram
            .iter()
            .zip(heights)
            .map(|(p, h)| {
                let filled = (h as usize * BAR_WIDTH).div_ceil(100);
                vec![
                    p.date.to_string(),
                    p.amount.to_string(),
                    "\u{2588}".repeat(filled),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Date", "Spent", "Chart"], rows));
    }
    Ok(())
}
