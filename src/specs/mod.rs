//! # Scraping “specs” module
//!
//! Page-specific knowledge of *where the ground truth lives* in the decoded
//! payload and *how to reshape it* into the canonical table.
//!
//! ## What lives here
//! - The listing path inside the inner state, the header/row layout, and the
//!   declared rename table from source keys to output columns.
//!
//! ## What does **not** live here
//! - Networking (`core::net`) and HTML/JSON decoding (`core::html`).
//! - Caching (`store`), filtering and export (`view`, `csv`, `file`), GUI.
//!
//! ## Typical call chain
//! ```text
//! scrape::Pipeline::load → core::net::HttpFetcher (Fetch) → core::html::extract
//!                        → specs::listing::map → data::build → store::TableCache
//! ```
//!
//! The upstream page is unversioned. A failed path lookup here is the only
//! signal that its structure changed.
pub mod listing;
