use std::sync::RwLock;

use async_trait::async_trait;

use tienda_catalog::Product;
use tienda_core::ProductId;

use super::query::Pagination;
use super::r#trait::{ProductRowInput, ProductStore, StoreError};

/// In-memory product store.
///
/// Intended for tests/dev. Enforces the same uniqueness constraints as the
/// Postgres backend and reports violations with Postgres-shaped detail
/// strings, so service-level conflict handling is exercised identically.
/// Natural order is insertion order.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<Product>,
    next_id: i64,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_unique(
        rows: &[Product],
        title: &str,
        slug: &str,
        exclude: Option<ProductId>,
    ) -> Result<(), StoreError> {
        for row in rows {
            if Some(row.id) == exclude {
                continue;
            }
            if row.title == title {
                return Err(StoreError::UniqueViolation(format!(
                    "Key (title)=({title}) already exists."
                )));
            }
            if row.slug == slug {
                return Err(StoreError::UniqueViolation(format!(
                    "Key (slug)=({slug}) already exists."
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, row: ProductRowInput) -> Result<Product, StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        Self::check_unique(&inner.rows, &row.title, &row.slug, None)?;

        inner.next_id += 1;
        let product = Product {
            id: ProductId::new(inner.next_id),
            title: row.title,
            price: row.price,
            description: row.description,
            slug: row.slug,
            stock: row.stock,
            sizes: row.sizes,
            gender: row.gender,
            tags: row.tags,
        };
        inner.rows.push(product.clone());
        Ok(product)
    }

    async fn fetch_page(&self, page: Pagination) -> Result<Vec<Product>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        let offset = page.effective_offset().max(0) as usize;
        let limit = page.effective_limit().max(0) as usize;
        Ok(inner.rows.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        Ok(inner.rows.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_title_or_slug(
        &self,
        title_upper: &str,
        slug_lower: &str,
    ) -> Result<Option<Product>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        Ok(inner
            .rows
            .iter()
            .find(|p| p.title.to_uppercase() == title_upper || p.slug == slug_lower)
            .cloned())
    }

    async fn update(&self, product: &Product) -> Result<Product, StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        Self::check_unique(&inner.rows, &product.title, &product.slug, Some(product.id))?;

        let slot = inner
            .rows
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or(StoreError::RowNotFound)?;
        *slot = product.clone();
        Ok(product.clone())
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        let before = inner.rows.len();
        inner.rows.retain(|p| p.id != id);
        if inner.rows.len() == before {
            return Err(StoreError::RowNotFound);
        }
        Ok(())
    }
}
