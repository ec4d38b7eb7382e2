// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Best-effort market indicator feeds for the dashboard footer: the national
//! economic-indicators API (mindicador.cl) and a crypto spot price
//! (CoinGecko). Both run outside the mutation path; a failed fetch degrades
//! to a placeholder at the command layer and never touches ledger state.

use crate::utils::http_client;
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct IndicatorValue {
    valor: f64,
    fecha: String,
}

#[derive(Debug, Deserialize)]
struct MindicadorFeed {
    dolar: IndicatorValue,
    uf: IndicatorValue,
}

#[derive(Debug, Clone)]
pub struct NationalIndicators {
    pub dollar: Decimal,
    pub uf: Decimal,
    pub as_of: String,
}

pub fn fetch_national() -> Result<NationalIndicators> {
    let client = http_client()?;
    let resp = client
        .get("https://mindicador.cl/api")
        .send()?
        .error_for_status()?;
    let feed: MindicadorFeed = resp.json()?;
    Ok(NationalIndicators {
        dollar: Decimal::try_from(feed.dolar.valor)?,
        uf: Decimal::try_from(feed.uf.valor)?,
        as_of: feed.dolar.fecha,
    })
}

#[derive(Debug, Deserialize)]
struct CoinGeckoPrice {
    usd: f64,
}

#[derive(Debug, Deserialize)]
struct CoinGeckoFeed {
    bitcoin: CoinGeckoPrice,
}

pub fn fetch_bitcoin_usd() -> Result<Decimal> {
    let client = http_client()?;
    let resp = client
        .get("https://api.coingecko.com/api/v3/simple/price?ids=bitcoin&vs_currencies=usd")
        .send()?
        .error_for_status()?;
    let feed: CoinGeckoFeed = resp.json()?;
    Ok(Decimal::try_from(feed.bitcoin.usd)?)
}
