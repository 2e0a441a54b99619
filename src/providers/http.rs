//! HTTP catalog client: per-id resolution across the product and accessory
//! endpoints, plus the cache-bypassing bulk fetchers.

use crate::cache::{Lookup, ResolutionCache};
use crate::catalog::{self, CatalogItem, Category, Normalized};
use crate::provider::{CatalogProvider, ResolveError};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Per-attempt deadline for single-item lookups. Bulk listings carry no
/// timeout; they degrade to an empty result set instead.
const RESOLVE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy)]
enum Endpoint {
    Products,
    Accessories,
}

impl Endpoint {
    fn path(self) -> &'static str {
        match self {
            Endpoint::Products => "products",
            Endpoint::Accessories => "accessoires",
        }
    }
}

/// The identifier space is ambiguous between products and accessories, so
/// resolution tries the product endpoint first (most ids are products) and
/// falls back to accessories. The two are never queried concurrently.
const RESOLVE_ORDER: [Endpoint; 2] = [Endpoint::Products, Endpoint::Accessories];

pub struct HttpCatalogClient {
    base_url: String,
    client: reqwest::Client,
    cache: ResolutionCache,
    request_timeout: Duration,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().user_agent("souk/0.2").build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            cache: ResolutionCache::new(),
            request_timeout: RESOLVE_TIMEOUT,
        })
    }

    /// Overrides the cache TTL. The resolver keeps its own cache, so two
    /// clients never observe each other's entries.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = ResolutionCache::with_ttl(ttl);
        self
    }

    /// Overrides the per-attempt deadline for single-item lookups.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// One attempt against one endpoint. `Ok(None)` means "not present at
    /// this endpoint" (404 or invalid payload); errors stop the chain.
    async fn try_endpoint(
        &self,
        endpoint: Endpoint,
        id: &str,
    ) -> Result<Option<CatalogItem>, ResolveError> {
        let url = format!("{}/api/{}/{}", self.base_url, endpoint.path(), id);
        debug!("Requesting catalog item from {url}");

        // The timeout covers the whole attempt including the body read;
        // reqwest aborts the in-flight request when it fires.
        let response = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("{url} has no item for id: {id}");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ResolveError::Server { status });
        }

        let body = response.bytes().await.map_err(classify_transport)?;
        let raw: Value = match serde_json::from_slice(&body) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("Unparseable body from {url}: {e}");
                return Ok(None);
            }
        };
        match catalog::normalize_item(&raw) {
            Normalized::Valid(item) => Ok(Some(item)),
            Normalized::Invalid(reason) => {
                debug!("Rejected payload from {url}: {reason}");
                Ok(None)
            }
        }
    }

    async fn fetch_collection(&self, path: &str) -> Option<Value> {
        let url = format!("{}/api/{}", self.base_url, path);
        debug!("Requesting collection from {url}");

        let response = match self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Collection request failed for {url}: {e}");
                return None;
            }
        };
        if !response.status().is_success() {
            warn!("Collection request for {url} returned {}", response.status());
            return None;
        }
        match response.json::<Value>().await {
            Ok(raw) => Some(raw),
            Err(e) => {
                warn!("Failed to read collection from {url}: {e}");
                None
            }
        }
    }
}

fn classify_transport(error: reqwest::Error) -> ResolveError {
    if error.is_timeout() {
        ResolveError::Timeout
    } else {
        ResolveError::Network(error)
    }
}

#[async_trait]
impl CatalogProvider for HttpCatalogClient {
    #[instrument(name = "CatalogResolve", skip(self), fields(id = %id))]
    async fn resolve(&self, id: &str) -> Result<Option<CatalogItem>, ResolveError> {
        match self.cache.get(id).await {
            Lookup::Found(item) => return Ok(Some(item)),
            Lookup::Absent => return Ok(None),
            Lookup::Unknown => {}
        }

        for endpoint in RESOLVE_ORDER {
            if let Some(item) = self.try_endpoint(endpoint, id).await? {
                self.cache.put_found(id, item.clone()).await;
                return Ok(Some(item));
            }
        }

        self.cache.put_not_found(id).await;
        Ok(None)
    }

    async fn fetch_products(&self) -> Vec<CatalogItem> {
        match self.fetch_collection("products").await {
            Some(raw) => catalog::normalize_collection(&raw),
            None => Vec::new(),
        }
    }

    async fn fetch_accessories(&self) -> Vec<CatalogItem> {
        match self.fetch_collection("accessoires").await {
            Some(raw) => catalog::normalize_collection(&raw),
            None => Vec::new(),
        }
    }

    async fn fetch_categories(&self) -> Vec<Category> {
        match self.fetch_collection("categories").await {
            Some(raw) => catalog::normalize_categories(&raw),
            None => Vec::new(),
        }
    }

    async fn clear_cache(&self, id: Option<&str>) {
        self.cache.invalidate(id).await;
    }
}
