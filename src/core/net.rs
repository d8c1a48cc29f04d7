// src/core/net.rs
//
// Blocking HTTP GET of the source page. One request per refresh; no retries,
// client-default timeout. Anything but 2xx is a `FetchError`.

use reqwest::blocking::Client;
use reqwest::Url;
use tracing::debug;

use crate::error::FetchError;

/// Raw HTML body, consumed once by the extractor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawDocument(String);

impl RawDocument {
    pub fn new(body: impl Into<String>) -> Self { Self(body.into()) }
    pub fn as_str(&self) -> &str { &self.0 }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

/// Source of raw documents. `HttpFetcher` is the real one; tests plug in
/// closures or fixtures.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<RawDocument, FetchError>;
}

impl<F> Fetch for F
where
    F: Fn(&str) -> Result<RawDocument, FetchError>,
{
    fn fetch(&self, url: &str) -> Result<RawDocument, FetchError> {
        self(url)
    }
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<RawDocument, FetchError> {
        let parsed = parse_source_url(url)?;
        debug!(%parsed, "GET");

        let transport = |source| FetchError::Transport { url: url.to_string(), source };

        let resp = self.client.get(parsed).send().map_err(transport)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: url.to_string(), status: status.as_u16() });
        }

        let body = resp.text().map_err(transport)?;
        debug!(bytes = body.len(), status = status.as_u16(), "GET done");
        Ok(RawDocument(body))
    }
}

/// Absolute http(s) URL with a host, or `InvalidUrl`.
pub fn parse_source_url(url: &str) -> Result<Url, FetchError> {
    let invalid = |reason: String| FetchError::InvalidUrl { url: url.to_string(), reason };

    let parsed = Url::parse(url.trim()).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme '{other}'"))),
    }
    if parsed.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(parsed)
}
