// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::indicators;
use crate::utils::pretty_table;
use anyhow::Result;

const PLACEHOLDER: &str = "\u{2014}";

/// Each feed is fetched independently and a failure only blanks its own
/// rows. Ledger data is never involved here.
pub fn handle() -> Result<()> {
    let mut rows = Vec::new();

    match indicators::fetch_national() {
        Ok(n) => {
            rows.push(vec![
                "Dollar".to_string(),
                format!("{:.2}", n.dollar),
                n.as_of.clone(),
            ]);
            rows.push(vec!["UF".to_string(), format!("{:.2}", n.uf), n.as_of]);
        }
        Err(e) => {
            eprintln!("National indicators unavailable: {}", e);
            rows.push(vec![
                "Dollar".to_string(),
                PLACEHOLDER.to_string(),
                "stale".to_string(),
            ]);
            rows.push(vec![
                "UF".to_string(),
                PLACEHOLDER.to_string(),
                "stale".to_string(),
            ]);
        }
    }

    match indicators::fetch_bitcoin_usd() {
        Ok(price) => rows.push(vec![
            "BTC/USD".to_string(),
            format!("{:.2}", price),
            "now".to_string(),
        ]),
        Err(e) => {
            eprintln!("Crypto feed unavailable: {}", e);
            rows.push(vec![
                "BTC/USD".to_string(),
                PLACEHOLDER.to_string(),
                "stale".to_string(),
            ]);
        }
    }

    println!("{}", pretty_table(&["Indicator", "Value", "As of"], rows));
    Ok(())
}
