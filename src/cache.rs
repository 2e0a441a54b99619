//! Per-identifier resolution cache with time-based expiry.
//!
//! Two maps: a positive map of resolved items and a negative map of
//! identifiers confirmed absent from every endpoint. Both honor the same
//! TTL; an expired entry behaves exactly like a missing one. The cache is
//! owned by the client instance that populates it, so independent clients
//! (and tests) never share state.

use crate::catalog::CatalogItem;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// How long a positive or negative entry stays servable.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Answer from a cache lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// A positive entry is present and unexpired.
    Found(CatalogItem),
    /// A negative entry is present and unexpired; the id is confirmed
    /// absent and no fetch is needed.
    Absent,
    /// No servable entry; the caller must fetch.
    Unknown,
}

struct Entry {
    item: CatalogItem,
    expires_at: Instant,
}

#[derive(Default)]
struct State {
    found: HashMap<String, Entry>,
    missing: HashMap<String, Instant>,
}

#[derive(Clone)]
pub struct ResolutionCache {
    inner: Arc<Mutex<State>>,
    ttl: Duration,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(State::default())),
            ttl,
        }
    }

    pub async fn get(&self, id: &str) -> Lookup {
        let cache = self.inner.lock().await;
        let now = Instant::now();

        if let Some(entry) = cache.found.get(id) {
            if now < entry.expires_at {
                debug!("Cache HIT for id: {id}");
                return Lookup::Found(entry.item.clone());
            }
            debug!("Cache entry expired for id: {id}");
        }
        if let Some(expires_at) = cache.missing.get(id) {
            if now < *expires_at {
                debug!("Negative cache HIT for id: {id}");
                return Lookup::Absent;
            }
            debug!("Negative cache entry expired for id: {id}");
        }
        debug!("Cache MISS for id: {id}");
        Lookup::Unknown
    }

    /// Records a successful lookup. Clears any negative entry for the id.
    pub async fn put_found(&self, id: &str, item: CatalogItem) {
        let mut cache = self.inner.lock().await;
        debug!("Cache PUT for id: {id}");
        cache.missing.remove(id);
        cache.found.insert(
            id.to_string(),
            Entry {
                item,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Records a confirmed miss. Clears any positive entry for the id.
    pub async fn put_not_found(&self, id: &str) {
        let mut cache = self.inner.lock().await;
        debug!("Negative cache PUT for id: {id}");
        cache.found.remove(id);
        cache
            .missing
            .insert(id.to_string(), Instant::now() + self.ttl);
    }

    /// Evicts the entries for one id, or every entry when `id` is `None`.
    pub async fn invalidate(&self, id: Option<&str>) {
        let mut cache = self.inner.lock().await;
        match id {
            Some(id) => {
                debug!("Cache REMOVE for id: {id}");
                cache.found.remove(id);
                cache.missing.remove(id);
            }
            None => {
                debug!("Cache CLEAR");
                cache.found.clear();
                cache.missing.clear();
            }
        }
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new()
    }
}
