// src/config/consts.rs

// Net config
pub const SOURCE_URL: &str = "https://coinmarketcap.com/";
pub const USER_AGENT: &str = concat!("coin_scrape/", env!("CARGO_PKG_VERSION"));

// Embedded payload
pub const EMBED_SCRIPT_ID: &str = "__NEXT_DATA__";
pub const EMBED_CONTENT_TYPE: &str = "application/json";
pub const INITIAL_STATE_PATH: &[&str] = &["props", "initialState"];
pub const LISTING_PATH: &[&str] = &["cryptocurrency", "listingLatest", "data"];
pub const HEADER_KEY: &str = "keysArr";

// Logs
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

// View
pub const TOP_N_MIN: usize = 1;
pub const TOP_N_MAX: usize = 100;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "crypto_price_app";

// Window
pub const WINDOW_W: f32 = 1400.0;
pub const WINDOW_H: f32 = 860.0;
