// src/core/mod.rs

pub mod html;
pub mod net;

pub use html::{EmbeddedPayload, extract};
pub use net::{Fetch, HttpFetcher, RawDocument};
