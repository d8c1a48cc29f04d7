// src/core/html.rs
//
// Extractor: pull the Next.js data blob out of the page and decode it.
//
// The page carries `<script id="__NEXT_DATA__" type="application/json">`.
// Its JSON holds a *string* at `props.initialState` which is itself JSON, so
// decoding takes exactly two passes. No deeper nesting is assumed.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

use super::net::RawDocument;
use crate::config::consts::{EMBED_CONTENT_TYPE, EMBED_SCRIPT_ID, INITIAL_STATE_PATH};
use crate::error::{ExtractionError, PayloadLayer};

static EMBED_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    let css = format!(r#"script[id="{EMBED_SCRIPT_ID}"][type="{EMBED_CONTENT_TYPE}"]"#);
    Selector::parse(&css).expect("embedded payload selector")
});

/// Decoded inner state. Transient: consumed by the schema mapper.
#[derive(Clone, Debug, PartialEq)]
pub struct EmbeddedPayload(Value);

impl EmbeddedPayload {
    pub fn new(value: Value) -> Self { Self(value) }
    pub fn value(&self) -> &Value { &self.0 }
}

pub fn extract(doc: &RawDocument) -> Result<EmbeddedPayload, ExtractionError> {
    let text = embedded_text(doc.as_str())?;

    let outer: Value = serde_json::from_str(&text)
        .map_err(|e| malformed(PayloadLayer::Outer, e.to_string()))?;

    let state = json_path(&outer, INITIAL_STATE_PATH).ok_or_else(|| {
        malformed(PayloadLayer::Outer, format!("missing '{}'", INITIAL_STATE_PATH.join(".")))
    })?;
    let state = state.as_str().ok_or_else(|| {
        malformed(
            PayloadLayer::Outer,
            format!("'{}' is {}, expected a JSON-encoded string", INITIAL_STATE_PATH.join("."), kind(state)),
        )
    })?;

    let inner: Value = serde_json::from_str(state)
        .map_err(|e| malformed(PayloadLayer::Inner, e.to_string()))?;

    debug!(outer_bytes = text.len(), inner_bytes = state.len(), "Extract: payload decoded");
    Ok(EmbeddedPayload(inner))
}

/// Text content of the first matching script element.
fn embedded_text(html: &str) -> Result<String, ExtractionError> {
    let document = Html::parse_document(html);
    let mut matches = document.select(&EMBED_SELECTOR);

    let Some(script) = matches.next() else {
        return Err(ExtractionError::NotFound { id: EMBED_SCRIPT_ID, content_type: EMBED_CONTENT_TYPE });
    };
    if matches.next().is_some() {
        debug!("Extract: more than one embedded block; using the first");
    }
    Ok(script.text().collect())
}

/// Walk object keys; `None` as soon as a segment is absent.
pub fn json_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(root, |node, key| node.get(*key))
}

pub fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn malformed(layer: PayloadLayer, reason: String) -> ExtractionError {
    ExtractionError::MalformedPayload { layer, reason }
}
