//! Catalog provider abstraction and the resolution error taxonomy.

use crate::catalog::{CatalogItem, Category};
use async_trait::async_trait;
use thiserror::Error;

/// Failure kinds for single-item resolution. A confirmed miss is not an
/// error: `resolve` returns `Ok(None)` so callers can render empty states.
/// None of these outcomes are cached, so an immediate retry is possible.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("request timed out, please retry")]
    Timeout,
    #[error("connection failed, check your network")]
    Network(#[source] reqwest::Error),
    #[error("catalog endpoint returned {status}")]
    Server { status: reqwest::StatusCode },
}

#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Resolves an identifier against every catalog endpoint, products
    /// first. `Ok(None)` means the id is confirmed absent everywhere.
    async fn resolve(&self, id: &str) -> Result<Option<CatalogItem>, ResolveError>;

    /// Full product listing. Degrades to empty on any failure.
    async fn fetch_products(&self) -> Vec<CatalogItem>;

    /// Full accessory listing. Degrades to empty on any failure.
    async fn fetch_accessories(&self) -> Vec<CatalogItem>;

    /// Category listing. Degrades to empty on any failure.
    async fn fetch_categories(&self) -> Vec<Category>;

    /// Administrative eviction: one id, or the whole cache when `None`.
    /// Forces the next `resolve` to hit the network.
    async fn clear_cache(&self, id: Option<&str>);
}
