//! Product entity, creation input, and partial-update patch.

use serde::{Deserialize, Serialize};

use tienda_core::{CatalogError, CatalogResult, ProductId};

use crate::slug::normalize_slug;

/// A catalog product as persisted in the store.
///
/// `sizes` and `tags` are stored as opaque encoded-list strings; the service
/// does not interpret their contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub description: Option<String>,
    pub slug: String,
    pub stock: i64,
    pub sizes: String,
    pub gender: String,
    pub tags: String,
}

/// Input for creating a product. Only `title` is required; everything else
/// falls back to the defaults of the data model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProduct {
    pub title: String,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub stock: Option<i64>,
    pub sizes: String,
    pub gender: String,
    pub tags: String,
}

impl CreateProduct {
    /// Reject input that must never reach storage.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.title.trim().is_empty() {
            return Err(CatalogError::validation("title must not be empty"));
        }
        Ok(())
    }

    /// The slug the new row will carry: the explicit slug when one was given,
    /// otherwise the title, normalized either way.
    pub fn initial_slug(&self) -> String {
        let candidate = match &self.slug {
            Some(s) if !s.is_empty() => s,
            _ => &self.title,
        };
        normalize_slug(candidate)
    }
}

/// Partial update: every mutable field is optional, absent fields leave the
/// row unchanged. The id is not part of the patch — it is immutable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub stock: Option<i64>,
    pub sizes: Option<String>,
    pub gender: Option<String>,
    pub tags: Option<String>,
}

impl ProductPatch {
    /// Merge the patch onto an existing row.
    ///
    /// Slug normalization runs unconditionally on the merged slug, even when
    /// the patch did not touch it (a no-op for already-normalized rows).
    pub fn apply(&self, existing: &Product) -> Product {
        let merged_slug = self.slug.clone().unwrap_or_else(|| existing.slug.clone());
        Product {
            id: existing.id,
            title: self.title.clone().unwrap_or_else(|| existing.title.clone()),
            price: self.price.unwrap_or(existing.price),
            description: self
                .description
                .clone()
                .or_else(|| existing.description.clone()),
            slug: normalize_slug(&merged_slug),
            stock: self.stock.unwrap_or(existing.stock),
            sizes: self.sizes.clone().unwrap_or_else(|| existing.sizes.clone()),
            gender: self
                .gender
                .clone()
                .unwrap_or_else(|| existing.gender.clone()),
            tags: self.tags.clone().unwrap_or_else(|| existing.tags.clone()),
        }
    }
}
