// src/error.rs
//
// Error taxonomy for the load pipeline (fetch → extract → map → build) and
// for the export path. Every pipeline error is terminal for the current
// refresh; callers keep whatever table they had before.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Network or HTTP-level failure while retrieving the source page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid source url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// The embedded data block could not be located or decoded.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no <script id=\"{id}\" type=\"{content_type}\"> element in document")]
    NotFound { id: &'static str, content_type: &'static str },

    #[error("embedded payload is malformed ({layer}): {reason}")]
    MalformedPayload { layer: PayloadLayer, reason: String },
}

/// Which of the two JSON layers failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadLayer {
    Outer,
    Inner,
}

impl std::fmt::Display for PayloadLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadLayer::Outer => f.write_str("outer document"),
            PayloadLayer::Inner => f.write_str("inner state"),
        }
    }
}

/// The payload decoded fine but does not have the listing shape we need.
#[derive(Debug, Error, PartialEq)]
pub enum MappingError {
    #[error("listing path not found: '{path}'")]
    PathNotFound { path: String },

    #[error("required source field '{source_key}' (→ {field}) missing from listing header")]
    MissingField { source_key: &'static str, field: &'static str },

    #[error("row {row}: expected {expected} values, found {found}")]
    LengthMismatch { row: usize, expected: usize, found: usize },

    #[error("row {row}: field '{field}' has unusable value {found}")]
    InvalidValue { field: &'static str, row: usize, found: String },
}

/// Single failure signal for one refresh.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("mapping failed: {0}")]
    Mapping(#[from] MappingError),
}

/// Copy/Export failures.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}
