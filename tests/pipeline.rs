// tests/pipeline.rs
//
// End-to-end against a local HTTP server: fetch → extract → map → build.
// The blocking client runs (and is dropped) inside `spawn_blocking`.
mod common;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use coin_scrape::config::consts::USER_AGENT;
use coin_scrape::config::options::SourceOptions;
use coin_scrape::data::CoinTable;
use coin_scrape::error::{ExtractionError, FetchError, LoadError, MappingError};
use coin_scrape::progress::NullProgress;
use coin_scrape::scrape::Pipeline;

use common::COINS;

async fn serve(status: u16, body: String) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;
    server
}

async fn load_once(url: String) -> Result<CoinTable, LoadError> {
    tokio::task::spawn_blocking(move || -> Result<CoinTable, LoadError> {
        let pipeline = Pipeline::from_options(&SourceOptions { url, ..Default::default() })?;
        let entry = pipeline.load(&mut NullProgress)?;
        Ok(entry.table.clone())
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn live_shaped_page_becomes_a_table() {
    let server = serve(200, common::page(&COINS)).await;
    let table = load_once(format!("{}/", server.uri())).await.unwrap();

    assert_eq!(table.row_count(), 4);
    assert_eq!(table.column_count(), 8);
    let symbols: Vec<&str> = table.records().iter().map(|r| r.coin_symbol.as_str()).collect();
    assert_eq!(symbols, ["BTC", "ETH", "USDT", "SOL"]);

    let eth = table.get(1).unwrap();
    assert_eq!(eth.coin_name, "1027");
    assert_eq!(eth.price, 3000.25);
    assert_eq!(eth.market_cap, 3.6e11);
    assert_eq!(eth.percent_change_7d, -7.75);
}

#[tokio::test(flavor = "multi_thread")]
async fn cache_serves_repeat_loads_until_refresh() {
    let server = serve(200, common::page(&COINS)).await;
    let url = format!("{}/", server.uri());

    let same = tokio::task::spawn_blocking(move || {
        let pipeline = Pipeline::from_options(&SourceOptions { url, ..Default::default() }).unwrap();
        let a = pipeline.load(&mut NullProgress).unwrap();
        let b = pipeline.load(&mut NullProgress).unwrap();
        let c = pipeline.refresh(&mut NullProgress).unwrap();
        (std::sync::Arc::ptr_eq(&a, &b), std::sync::Arc::ptr_eq(&b, &c))
    })
    .await
    .unwrap();

    assert_eq!(same, (true, false));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn http_error_status_is_a_fetch_error() {
    let server = serve(404, "not here".into()).await;
    assert_matches!(
        load_once(format!("{}/", server.uri())).await,
        Err(LoadError::Fetch(FetchError::Status { status: 404, .. }))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn page_without_embedded_data_is_an_extraction_error() {
    let server = serve(200, "<html><body><h1>Maintenance</h1></body></html>".into()).await;
    assert_matches!(
        load_once(format!("{}/", server.uri())).await,
        Err(LoadError::Extraction(ExtractionError::NotFound { .. }))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn reshaped_state_is_a_mapping_error() {
    let inner = serde_json::json!({ "cryptocurrency": { "listingLatest": {} } });
    let server = serve(200, common::page_with_state(&inner)).await;
    assert_matches!(
        load_once(format!("{}/", server.uri())).await,
        Err(LoadError::Mapping(MappingError::PathNotFound { path })) if path == "cryptocurrency.listingLatest.data"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_url_never_reaches_the_network() {
    assert_matches!(
        load_once("not a url".into()).await,
        Err(LoadError::Fetch(FetchError::InvalidUrl { .. }))
    );
}
