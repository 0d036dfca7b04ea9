use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tienda_catalog::Product;
use tienda_core::ProductId;

use super::query::Pagination;

/// A product row ready to be inserted (no id yet; the store assigns one).
///
/// The slug is expected to already be in normal form — normalization is the
/// service's responsibility, the store persists what it is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRowInput {
    pub title: String,
    pub price: f64,
    pub description: Option<String>,
    pub slug: String,
    pub stock: i64,
    pub sizes: String,
    pub gender: String,
    pub tags: String,
}

/// Storage-level error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A unique constraint (title or slug) was violated. The payload is the
    /// backend's constraint detail message.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// The row targeted by an update/delete no longer exists.
    #[error("row not found")]
    RowNotFound,

    /// Any other backend failure (connection loss, malformed row, ...).
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Contract the catalog service requires of its persistence layer.
///
/// Implementations must enforce uniqueness on `title` and `slug` and signal a
/// violation as `StoreError::UniqueViolation`. Scans return rows in the
/// store's natural order; no stronger ordering is guaranteed.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Persist a new row and return it with its generated id.
    async fn insert(&self, row: ProductRowInput) -> Result<Product, StoreError>;

    /// Return at most `limit` rows, skipping the first `offset`.
    async fn fetch_page(&self, page: Pagination) -> Result<Vec<Product>, StoreError>;

    /// Exact id lookup.
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Single disjunctive lookup: case-folded title match OR exact slug match.
    ///
    /// `title_upper` is compared against the uppercased title column,
    /// `slug_lower` against the slug column as stored.
    async fn find_by_title_or_slug(
        &self,
        title_upper: &str,
        slug_lower: &str,
    ) -> Result<Option<Product>, StoreError>;

    /// Full-row write keyed by `product.id`.
    async fn update(&self, product: &Product) -> Result<Product, StoreError>;

    /// Delete the row with the given id.
    async fn delete(&self, id: ProductId) -> Result<(), StoreError>;
}
