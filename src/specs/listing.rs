//! Scraping rules for the coin listing.
//!
//! Purpose:
//! - Walk the decoded inner state to `cryptocurrency.listingLatest.data`.
//! - Element 0 carries the header (`{"keysArr": [...]}`); elements 1.. are rows,
//!   each index-aligned to that header.
//! - Transpose rows into one column per header name, rename the eight columns we
//!   keep via [`RENAME_TABLE`], drop the rest, hand the typed columns to
//!   [`data::build`](crate::data::build).
//!
//! Strictness:
//! - A row with more or fewer values than the header is fatal (no truncation).
//! - A required schema field absent from the header is fatal.
//! - Every kept cell must be usable (`null` is not), since each record carries
//!   all eight fields.
//! - An empty listing (or header with no rows) is an empty table, not an error.

use serde_json::Value;
use tracing::debug;

use crate::config::consts::{HEADER_KEY, LISTING_PATH};
use crate::core::html::{EmbeddedPayload, kind};
use crate::data::{self, Column, ColumnData, CoinTable, MappedColumns};
use crate::error::MappingError;

/// Source header → output column. Consulted once per column.
pub const RENAME_TABLE: [(&str, Column); 8] = [
    ("id", Column::CoinName),
    ("symbol", Column::CoinSymbol),
    ("quote.USD.marketCap", Column::MarketCap),
    ("quote.USD.percentChange1h", Column::PercentChange1h),
    ("quote.USD.percentChange24h", Column::PercentChange24h),
    ("quote.USD.percentChange7d", Column::PercentChange7d),
    ("quote.USD.price", Column::Price),
    ("quote.USD.volume24h", Column::Volume24h),
];

fn target_for(source: &str) -> Option<Column> {
    RENAME_TABLE.iter().find(|(k, _)| *k == source).map(|(_, c)| *c)
}

pub fn map(payload: &EmbeddedPayload) -> Result<CoinTable, MappingError> {
    let listing = listing_node(payload.value())?;

    let Some((head, body)) = listing.split_first() else {
        debug!("Map: listing is empty");
        return Ok(CoinTable::default());
    };

    let header = read_header(head)?;
    let rows = read_rows(body, header.len())?;
    let columns = transpose(&header, &rows);
    let mapped = rename(columns)?;

    debug!(rows = rows.len(), source_cols = header.len(), kept = ?mapped.names(), "Map: listing mapped");
    data::build(mapped)
}

fn listing_node(root: &Value) -> Result<&Vec<Value>, MappingError> {
    let mut node = root;
    for (depth, key) in LISTING_PATH.iter().enumerate() {
        node = node.get(*key).ok_or_else(|| MappingError::PathNotFound {
            path: LISTING_PATH[..=depth].join("."),
        })?;
    }
    node.as_array().ok_or_else(|| MappingError::PathNotFound {
        path: format!("{} (found {}, expected an array)", LISTING_PATH.join("."), kind(node)),
    })
}

/// Header is `{"keysArr": [..]}` on the live page; a bare string array is
/// accepted too.
fn read_header(head: &Value) -> Result<Vec<&str>, MappingError> {
    let keys = match head {
        Value::Object(obj) => obj.get(HEADER_KEY),
        Value::Array(_) => Some(head),
        _ => None,
    };
    let header_path = || format!("{}[0].{HEADER_KEY}", LISTING_PATH.join("."));

    let keys = keys
        .and_then(Value::as_array)
        .ok_or_else(|| MappingError::PathNotFound { path: header_path() })?;

    keys.iter()
        .map(|k| k.as_str().ok_or_else(|| MappingError::PathNotFound { path: header_path() }))
        .collect()
}

fn read_rows(body: &[Value], width: usize) -> Result<Vec<&Vec<Value>>, MappingError> {
    body.iter()
        .enumerate()
        .map(|(row, v)| {
            let values = v.as_array().ok_or_else(|| MappingError::InvalidValue {
                field: "row",
                row,
                found: kind(v).to_string(),
            })?;
            if values.len() != width {
                return Err(MappingError::LengthMismatch { row, expected: width, found: values.len() });
            }
            Ok(values)
        })
        .collect()
}

/// One column per header name: column j = [row[j] for row in rows].
fn transpose<'a>(header: &[&'a str], rows: &[&'a Vec<Value>]) -> Vec<(&'a str, Vec<&'a Value>)> {
    header
        .iter()
        .enumerate()
        .map(|(j, name)| (*name, rows.iter().map(|&r| &r[j]).collect()))
        .collect()
}

fn rename(columns: Vec<(&str, Vec<&Value>)>) -> Result<MappedColumns, MappingError> {
    let mut found: Vec<(Column, Vec<&Value>)> = Vec::with_capacity(RENAME_TABLE.len());
    for (name, cells) in columns {
        match target_for(name) {
            Some(col) if !found.iter().any(|(c, _)| *c == col) => found.push((col, cells)),
            Some(_) => debug!(name, "Map: duplicate source header ignored"),
            None => {}
        }
    }

    let mut mapped = MappedColumns::new();
    for col in Column::ALL {
        let pos = found
            .iter()
            .position(|(c, _)| *c == col)
            .ok_or(MappingError::MissingField { source_key: col.source_key(), field: col.name() })?;
        let (_, cells) = found.swap_remove(pos);
        mapped.push(col, typed(col, &cells)?);
    }
    Ok(mapped)
}

fn typed(col: Column, cells: &[&Value]) -> Result<ColumnData, MappingError> {
    let invalid = |row: usize, v: &Value| MappingError::InvalidValue {
        field: col.name(),
        row,
        found: v.to_string(),
    };

    match col {
        Column::CoinName => cells
            .iter()
            .enumerate()
            .map(|(row, v)| match v {
                Value::String(s) => Ok(s.clone()),
                Value::Number(n) => Ok(n.to_string()),
                other => Err(invalid(row, *other)),
            })
            .collect::<Result<_, _>>()
            .map(ColumnData::Text),
        Column::CoinSymbol => cells
            .iter()
            .enumerate()
            .map(|(row, v)| v.as_str().map(str::to_string).ok_or_else(|| invalid(row, *v)))
            .collect::<Result<_, _>>()
            .map(ColumnData::Text),
        _ => cells
            .iter()
            .enumerate()
            .map(|(row, v)| number(v).ok_or_else(|| invalid(row, *v)))
            .collect::<Result<_, _>>()
            .map(ColumnData::Number),
    }
}

fn number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const FULL_HEADER: [&str; 10] = [
        "id",
        "name",
        "symbol",
        "cmcRank",
        "quote.USD.price",
        "quote.USD.volume24h",
        "quote.USD.marketCap",
        "quote.USD.percentChange1h",
        "quote.USD.percentChange24h",
        "quote.USD.percentChange7d",
    ];

    fn payload(listing: Value) -> EmbeddedPayload {
        EmbeddedPayload::new(json!({ "cryptocurrency": { "listingLatest": { "data": listing } } }))
    }

    fn listing(rows: Vec<Value>) -> Value {
        let mut data = vec![json!({ "keysArr": FULL_HEADER, "excludeProps": [] })];
        data.extend(rows);
        Value::Array(data)
    }

    #[test]
    fn maps_to_fixed_schema_and_order() {
        let p = payload(listing(vec![
            json!([1, "Bitcoin", "BTC", 1, 50000.5, 3.1e10, 9.4e11, 0.12, -1.5, 4.25]),
            json!([1027, "Ethereum", "ETH", 2, 3000.25, 1.2e10, 3.6e11, -0.3, 2.0, -7.75]),
        ]));
        let table = map(&p).unwrap();

        assert_eq!(
            Column::ALL.map(Column::name),
            [
                "coin_name",
                "coin_symbol",
                "market_cap",
                "percent_change_1h",
                "percent_change_24h",
                "percent_change_7d",
                "price",
                "volume_24h",
            ]
        );
        assert_eq!(table.row_count(), 2);

        let btc = table.get(0).unwrap();
        assert_eq!(btc.coin_name, "1");
        assert_eq!(btc.coin_symbol, "BTC");
        assert_eq!(btc.market_cap, 9.4e11);
        assert_eq!(btc.percent_change_7d, 4.25);
        assert_eq!(btc.price, 50000.5);
        assert_eq!(btc.volume_24h, 3.1e10);

        // source order preserved
        assert_eq!(table.get(1).unwrap().coin_symbol, "ETH");
    }

    #[test]
    fn short_row_is_a_length_mismatch() {
        let header: Vec<&str> = RENAME_TABLE.iter().map(|(k, _)| *k).collect();
        let p = payload(json!([
            { "keysArr": header },
            ["bitcoin", "BTC", 1.0, 0.1, 0.2, 0.3, 50000.5, 2.0],
            ["ethereum", "ETH", 1.0, 0.1, 0.2, 0.3, 3000.0]
        ]));
        assert_eq!(map(&p), Err(MappingError::LengthMismatch { row: 1, expected: 8, found: 7 }));
    }

    #[test]
    fn empty_listing_is_an_empty_table() {
        assert!(map(&payload(json!([]))).unwrap().is_empty());
        assert!(map(&payload(listing(vec![]))).unwrap().is_empty());
    }

    #[test]
    fn partial_header_is_missing_field() {
        let p = payload(json!([
            { "keysArr": ["id", "symbol", "quote.USD.price"] },
            ["bitcoin", "BTC", 50000.5]
        ]));
        assert_eq!(
            map(&p),
            Err(MappingError::MissingField { source_key: "quote.USD.marketCap", field: "market_cap" })
        );
    }

    #[test]
    fn absent_path_segment_is_reported() {
        let p = EmbeddedPayload::new(json!({ "cryptocurrency": { "spotlight": {} } }));
        assert_eq!(
            map(&p),
            Err(MappingError::PathNotFound { path: "cryptocurrency.listingLatest".into() })
        );
    }

    #[test]
    fn null_cell_is_invalid() {
        let p = payload(listing(vec![json!([1, "Bitcoin", "BTC", 1, null, 1.0, 1.0, 0.0, 0.0, 0.0])]));
        assert_matches!(map(&p), Err(MappingError::InvalidValue { field: "price", row: 0, .. }));
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let p = payload(listing(vec![json!(["bitcoin", "Bitcoin", "BTC", 1, "50000.5", 1, 2, 0, 0, 0])]));
        let table = map(&p).unwrap();
        assert_eq!(table.get(0).unwrap().price, 50000.5);
        assert_eq!(table.get(0).unwrap().coin_name, "bitcoin");
    }

    #[test]
    fn bare_array_header_is_accepted() {
        let header: Vec<&str> = RENAME_TABLE.iter().map(|(k, _)| *k).collect();
        let p = payload(json!([header, ["bitcoin", "BTC", 1, 2, 3, 4, 5, 6]]));
        assert_eq!(map(&p).unwrap().get(0).unwrap().volume_24h, 6.0);
    }

    #[test]
    fn rename_table_matches_column_source_keys() {
        for (key, col) in RENAME_TABLE {
            assert_eq!(col.source_key(), key);
        }
        for col in Column::ALL {
            assert_eq!(target_for(col.source_key()), Some(col));
        }
    }
}
