// src/store.rs
//
// Single-entry, in-memory table cache. Owned by the session's `Pipeline`.
//
// Keyed by source URL + fetch time bucket. Replacement is one `Arc` swap
// under a short write lock, so readers see either the old table or the new
// one, never a half-built one. Nothing is written to disk.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::data::CoinTable;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheKey {
    pub url: String,
    pub bucket: u64,
}

impl CacheKey {
    /// With no bucket width (or a zero one) every fetch time falls in bucket 0.
    /// Widths are honored to the millisecond.
    pub fn new(url: &str, at: DateTime<Utc>, width: Option<Duration>) -> Self {
        let bucket = match width.map(|w| w.as_millis()) {
            Some(ms) if ms > 0 => (at.timestamp_millis().max(0) as u128 / ms) as u64,
            _ => 0,
        };
        Self { url: url.to_string(), bucket }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CachedTable {
    pub key: CacheKey,
    pub table: CoinTable,
    pub fetched_at: DateTime<Utc>,
}

impl CachedTable {
    pub fn row_count(&self) -> usize { self.table.row_count() }
    pub fn column_count(&self) -> usize { self.table.column_count() }
}

pub struct TableCache {
    slot: RwLock<Option<Arc<CachedTable>>>,
    bucket: Option<Duration>,
}

impl TableCache {
    pub fn new(bucket: Option<Duration>) -> Self {
        Self { slot: RwLock::new(None), bucket }
    }

    pub fn key_for(&self, url: &str, at: DateTime<Utc>) -> CacheKey {
        CacheKey::new(url, at, self.bucket)
    }

    /// Whatever table is cached, regardless of key.
    pub fn current(&self) -> Option<Arc<CachedTable>> {
        self.slot.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Cached table only if it matches `key`.
    pub fn lookup(&self, key: &CacheKey) -> Option<Arc<CachedTable>> {
        self.current().filter(|entry| &entry.key == key)
    }

    /// Swap in a fully built table; returns the shared handle.
    pub fn replace(&self, entry: CachedTable) -> Arc<CachedTable> {
        let entry = Arc::new(entry);
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&entry));
        entry
    }

    /// Hit → cached table. Miss → run `load` (no lock held), then swap it in.
    /// A failed load leaves the previous entry in place.
    pub fn get_or_load<E>(
        &self,
        url: &str,
        now: DateTime<Utc>,
        load: impl FnOnce() -> Result<CoinTable, E>,
    ) -> Result<(Arc<CachedTable>, bool), E> {
        let key = self.key_for(url, now);
        if let Some(hit) = self.lookup(&key) {
            return Ok((hit, true));
        }
        let table = load()?;
        Ok((self.replace(CachedTable { key, table, fetched_at: now }), false))
    }
}
