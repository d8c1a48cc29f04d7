// tests/export.rs
//
// View → CSV/TSV → file, then read it back. No UI.
mod common;

use std::fs;

use pretty_assertions::assert_eq;

use coin_scrape::config::options::{ExportFormat, ExportOptions, SymbolFilter, ViewOptions};
use coin_scrape::core::{self, RawDocument};
use coin_scrape::data::CoinTable;
use coin_scrape::view::CoinView;
use coin_scrape::{csv, file, specs};

use common::COINS;

fn table() -> CoinTable {
    let payload = core::extract(&RawDocument::new(common::page(&COINS))).unwrap();
    specs::listing::map(&payload).unwrap()
}

#[test]
fn csv_export_of_filtered_view_round_trips() {
    let t = table();
    let mut view_opts = ViewOptions::default();
    view_opts.symbols = SymbolFilter::from_list("sol,btc");
    let view = CoinView::new(&t, &view_opts);

    let tmp = tempfile::tempdir().unwrap();
    let mut export = ExportOptions::default();
    export.set_path(&tmp.path().join("out").join("picked").to_string_lossy());

    let path = file::write_export(&export, view.records()).unwrap();
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("csv"));

    let text = fs::read_to_string(&path).unwrap();
    let back = csv::parse_records(&text, b',', true).unwrap();
    let expected: Vec<_> = view.records().cloned().collect();
    assert_eq!(back, expected);
    assert_eq!(back.iter().map(|r| r.coin_symbol.as_str()).collect::<Vec<_>>(), ["BTC", "SOL"]);
}

#[test]
fn tsv_export_uses_tabs_and_optional_header() {
    let t = table();
    let mut view_opts = ViewOptions::default();
    view_opts.set_top_n(2);
    let view = CoinView::new(&t, &view_opts);

    let mut export = ExportOptions::default();
    export.format = ExportFormat::Tsv;
    let with_header = csv::to_export_string(&export, view.records()).unwrap();
    assert!(with_header.starts_with("coin_name\tcoin_symbol\tmarket_cap\t"));
    assert_eq!(with_header.lines().count(), 3);

    export.include_headers = false;
    let bare = csv::to_export_string(&export, view.records()).unwrap();
    assert_eq!(bare.lines().count(), 2);
    assert!(bare.starts_with("1\tBTC\t"));
}

#[test]
fn default_export_path_matches_the_download_name() {
    let export = ExportOptions::default();
    assert!(export.is_default_path());
    assert!(export.out_path().ends_with("crypto_price_app.csv"));
}
