// tests/common/mod.rs
//
// Page fixtures shaped like the live listing: the listing sits inside a
// JSON string inside the `__NEXT_DATA__` script, so it is encoded twice.
#![allow(dead_code)]

use serde_json::{Value, json};

pub const HEADER: [&str; 11] = [
    "id",
    "name",
    "symbol",
    "slug",
    "cmcRank",
    "quote.USD.price",
    "quote.USD.volume24h",
    "quote.USD.marketCap",
    "quote.USD.percentChange1h",
    "quote.USD.percentChange24h",
    "quote.USD.percentChange7d",
];

/// (id, symbol, price, volume, market cap, 1h, 24h, 7d)
pub type Coin = (u64, &'static str, f64, f64, f64, f64, f64, f64);

pub const COINS: [Coin; 4] = [
    (1, "BTC", 50000.5, 3.1e10, 9.4e11, 0.12, -1.5, 4.25),
    (1027, "ETH", 3000.25, 1.2e10, 3.6e11, -0.3, 2.0, -7.75),
    (825, "USDT", 1.0, 5.0e10, 8.3e10, 0.0, 0.01, -0.02),
    (5426, "SOL", 150.0, 2.0e9, 6.5e10, 1.1, 6.0, 12.5),
];

pub fn row(c: &Coin) -> Value {
    let (id, sym, price, vol, cap, h1, h24, d7) = *c;
    json!([id, sym.to_lowercase(), sym, sym.to_lowercase(), id, price, vol, cap, h1, h24, d7])
}

pub fn listing(coins: &[Coin]) -> Value {
    let mut data = vec![json!({ "keysArr": HEADER, "excludeProps": [] })];
    data.extend(coins.iter().map(row));
    Value::Array(data)
}

/// Wrap an inner state the way the page does.
pub fn page_with_state(inner: &Value) -> String {
    let outer = json!({
        "props": { "initialState": inner.to_string(), "pageProps": {} },
        "page": "/",
        "buildId": "fixture",
    });
    format!(
        r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>Cryptocurrency Prices</title></head>
<body><div id="__next"></div>
<script id="__NEXT_DATA__" type="application/json">{outer}</script>
</body></html>"#
    )
}

pub fn page(coins: &[Coin]) -> String {
    page_with_state(&json!({
        "cryptocurrency": { "listingLatest": { "data": listing(coins), "page": 1 } }
    }))
}
