// src/scrape.rs
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::{
    config::options::SourceOptions,
    core::{self, Fetch, HttpFetcher},
    data::CoinTable,
    error::{FetchError, LoadError},
    progress::{Progress, Stage},
    specs,
    store::{CachedTable, TableCache},
};

/// One full pass: fetch → extract → map → build. No caching.
pub fn load_table(
    fetcher: &dyn Fetch,
    url: &str,
    progress: &mut dyn Progress,
) -> Result<CoinTable, LoadError> {
    progress.begin(url);
    let result = run_stages(fetcher, url, progress);

    match &result {
        Ok(table) => {
            info!(url, rows = table.row_count(), cols = table.column_count(), "Load: table built");
            progress.finish(Some(table.row_count()));
        }
        Err(e) => {
            warn!(url, error = %e, "Load: failed");
            progress.finish(None);
        }
    }
    result
}

fn run_stages(
    fetcher: &dyn Fetch,
    url: &str,
    progress: &mut dyn Progress,
) -> Result<CoinTable, LoadError> {
    progress.stage(Stage::Fetch);
    let doc = fetcher.fetch(url)?;
    progress.log(&format!("Received {} bytes", doc.len()));

    progress.stage(Stage::Extract);
    let payload = core::extract(&doc)?;

    progress.stage(Stage::Map);
    Ok(specs::listing::map(&payload)?)
}

/// Session-scoped loader: owns the fetcher, the source URL and the cache.
pub struct Pipeline<F: Fetch = HttpFetcher> {
    fetcher: F,
    url: String,
    cache: TableCache,
}

impl Pipeline<HttpFetcher> {
    pub fn from_options(opts: &SourceOptions) -> Result<Self, FetchError> {
        let fetcher = HttpFetcher::new(&opts.user_agent)?;
        Ok(Self::new(fetcher, &opts.url, opts.cache_bucket))
    }
}

impl<F: Fetch> Pipeline<F> {
    pub fn new(fetcher: F, url: &str, cache_bucket: Option<std::time::Duration>) -> Self {
        Self { fetcher, url: url.to_string(), cache: TableCache::new(cache_bucket) }
    }

    pub fn url(&self) -> &str { &self.url }

    /// Last successfully built table, if any.
    pub fn current(&self) -> Option<Arc<CachedTable>> {
        self.cache.current()
    }

    /// Cached table when the key still matches, otherwise a fresh load.
    pub fn load(&self, progress: &mut dyn Progress) -> Result<Arc<CachedTable>, LoadError> {
        self.load_at(Utc::now(), progress)
    }

    pub fn load_at(
        &self,
        now: DateTime<Utc>,
        progress: &mut dyn Progress,
    ) -> Result<Arc<CachedTable>, LoadError> {
        let (entry, hit) = self.cache.get_or_load(&self.url, now, || {
            load_table(&self.fetcher, &self.url, &mut *progress)
        })?;
        if hit {
            progress.log("Using cached table");
        }
        Ok(entry)
    }

    /// Explicit refresh: always refetches. The previous table stays in place
    /// if the new load fails.
    pub fn refresh(&self, progress: &mut dyn Progress) -> Result<Arc<CachedTable>, LoadError> {
        self.refresh_at(Utc::now(), progress)
    }

    pub fn refresh_at(
        &self,
        now: DateTime<Utc>,
        progress: &mut dyn Progress,
    ) -> Result<Arc<CachedTable>, LoadError> {
        let table = load_table(&self.fetcher, &self.url, progress)?;
        let key = self.cache.key_for(&self.url, now);
        Ok(self.cache.replace(CachedTable { key, table, fetched_at: now }))
    }
}
