//! Catalog service: orchestration between callers and the product store.
//!
//! The service owns the two pieces of non-trivial behavior in this system:
//!
//! - **Term resolution** (`find_by_term`): a term that parses as an integer
//!   resolves by exact id; anything else resolves through a single
//!   disjunctive lookup (case-folded title OR exact slug).
//! - **Slug normalization**: applied before every insert and re-applied on
//!   every update, whether or not the slug was part of the patch.
//!
//! Storage errors are classified exactly once, here: unique-constraint
//! violations become client-visible conflicts carrying the backend's detail;
//! everything else is logged with full detail and collapsed into a generic
//! internal error. No retries anywhere.

use std::sync::Arc;

use tienda_catalog::{CreateProduct, Product, ProductPatch};
use tienda_core::{CatalogError, CatalogResult, ProductId};

use crate::product_store::{Pagination, ProductRowInput, ProductStore, StoreError};

pub struct CatalogService {
    store: Arc<dyn ProductStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// Persist a new product. The stored slug is the normalized explicit slug
    /// when one was supplied, otherwise the normalized title.
    pub async fn create(&self, input: CreateProduct) -> CatalogResult<Product> {
        input.validate()?;

        let row = ProductRowInput {
            slug: input.initial_slug(),
            title: input.title,
            price: input.price.unwrap_or(0.0),
            description: input.description,
            stock: input.stock.unwrap_or(0),
            sizes: input.sizes,
            gender: input.gender,
            tags: input.tags,
        };

        self.store.insert(row).await.map_err(classify)
    }

    /// At most `limit` rows, skipping `offset`, in the store's natural order.
    /// Pagination values have already been validated at the boundary.
    pub async fn list(&self, page: Pagination) -> CatalogResult<Vec<Product>> {
        self.store.fetch_page(page).await.map_err(classify)
    }

    /// Resolve a lookup term to exactly one product.
    ///
    /// A term that parses as an integer is treated as an id — which makes a
    /// purely numeric slug unreachable by slug lookup. That ambiguity is
    /// inherited behavior, kept as-is.
    pub async fn find_by_term(&self, term: &str) -> CatalogResult<Product> {
        let found = match term.parse::<ProductId>() {
            Ok(id) => self.store.find_by_id(id).await,
            Err(_) => {
                self.store
                    .find_by_title_or_slug(&term.to_uppercase(), &term.to_lowercase())
                    .await
            }
        }
        .map_err(classify)?;

        found.ok_or_else(|| CatalogError::not_found(term))
    }

    /// Merge a partial update onto the row identified by `id` and persist it.
    /// Fields absent from the patch are unchanged; slug normalization runs
    /// unconditionally on the merged row.
    pub async fn update(&self, id: ProductId, patch: ProductPatch) -> CatalogResult<Product> {
        let existing = self
            .store
            .find_by_id(id)
            .await
            .map_err(classify)?
            .ok_or_else(|| CatalogError::not_found(format!("id {id}")))?;

        let merged = patch.apply(&existing);

        match self.store.update(&merged).await {
            Ok(product) => Ok(product),
            Err(StoreError::RowNotFound) => Err(CatalogError::not_found(format!("id {id}"))),
            Err(other) => Err(classify(other)),
        }
    }

    /// Delete the row with the given id. Resolution runs through the same
    /// term lookup as `find_by_term`; a miss never mutates the store.
    pub async fn remove(&self, id: ProductId) -> CatalogResult<()> {
        let existing = self.find_by_term(&id.to_string()).await?;

        match self.store.delete(existing.id).await {
            Ok(()) => Ok(()),
            Err(StoreError::RowNotFound) => Err(CatalogError::not_found(id.to_string())),
            Err(other) => Err(classify(other)),
        }
    }
}

/// Map a storage failure to the domain taxonomy. Unique violations are the
/// only storage condition a caller is allowed to see the detail of.
fn classify(err: StoreError) -> CatalogError {
    match err {
        StoreError::UniqueViolation(detail) => CatalogError::conflict(detail),
        other => {
            tracing::error!(error = %other, "storage failure");
            CatalogError::Internal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product_store::InMemoryProductStore;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(InMemoryProductStore::new()))
    }

    fn input(title: &str) -> CreateProduct {
        CreateProduct {
            title: title.to_string(),
            price: None,
            description: None,
            slug: None,
            stock: None,
            sizes: "S,M,L".to_string(),
            gender: "unisex".to_string(),
            tags: "test".to_string(),
        }
    }

    #[tokio::test]
    async fn create_derives_normalized_slug_from_title() {
        let svc = service();
        let product = svc.create(input("Men's Red Shoes")).await.unwrap();
        assert_eq!(product.slug, "mens_red_shoes");
        assert_eq!(product.price, 0.0);
        assert_eq!(product.stock, 0);
    }

    #[tokio::test]
    async fn create_normalizes_explicit_slug() {
        let svc = service();
        let mut req = input("Plain Shirt");
        req.slug = Some("Plain SHIRT's".to_string());
        let product = svc.create(req).await.unwrap();
        assert_eq!(product.slug, "plain_shirts");
    }

    #[tokio::test]
    async fn duplicate_title_is_a_conflict() {
        let svc = service();
        svc.create(input("Red Shoes")).await.unwrap();

        let mut second = input("Red Shoes");
        // Distinct slug so only the title collides.
        second.slug = Some("other_slug".to_string());
        match svc.create(second).await.unwrap_err() {
            CatalogError::Conflict(detail) => assert!(detail.contains("title")),
            other => panic!("expected Conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn duplicate_slug_is_a_conflict() {
        let svc = service();
        svc.create(input("Red Shoes")).await.unwrap();

        // Different title, same derived slug.
        let mut second = input("Other Title");
        second.slug = Some("Red Shoes".to_string());
        match svc.create(second).await.unwrap_err() {
            CatalogError::Conflict(detail) => assert!(detail.contains("slug")),
            other => panic!("expected Conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn blank_title_is_rejected_before_storage() {
        let svc = service();
        match svc.create(input("  ")).await.unwrap_err() {
            CatalogError::Validation(_) => {}
            other => panic!("expected Validation, got {other:?}"),
        }
        assert!(svc.list(Pagination::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn numeric_term_resolves_by_id() {
        let svc = service();
        let first = svc.create(input("First")).await.unwrap();
        svc.create(input("Second")).await.unwrap();

        let found = svc.find_by_term(&first.id.to_string()).await.unwrap();
        assert_eq!(found.id, first.id);
        assert_eq!(found.title, "First");
    }

    #[tokio::test]
    async fn numeric_term_ignores_digit_slugs() {
        let svc = service();
        let first = svc.create(input("First")).await.unwrap();

        // A row whose slug is the digit text of another row's id must not
        // shadow id lookup: numeric terms always resolve by id.
        let mut decoy = input("Decoy");
        decoy.slug = Some(first.id.to_string());
        let decoy = svc.create(decoy).await.unwrap();
        assert_eq!(decoy.slug, first.id.to_string());

        let found = svc.find_by_term(&first.id.to_string()).await.unwrap();
        assert_eq!(found.id, first.id);
        assert_eq!(found.title, "First");
    }

    #[tokio::test]
    async fn digit_only_slug_is_unreachable_when_id_is_absent() {
        let svc = service();
        let mut req = input("Decoy");
        req.slug = Some("7777".to_string());
        svc.create(req).await.unwrap();

        // The term parses as an id, id 7777 does not exist, and no slug
        // fallback is attempted.
        match svc.find_by_term("7777").await.unwrap_err() {
            CatalogError::NotFound { term } => assert_eq!(term, "7777"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn term_matches_title_case_insensitively() {
        let svc = service();
        svc.create(input("Red Shoes")).await.unwrap();

        let found = svc.find_by_term("red shoes").await.unwrap();
        assert_eq!(found.title, "Red Shoes");
    }

    #[tokio::test]
    async fn term_matches_slug_after_lowercasing() {
        let svc = service();
        svc.create(input("Red Shoes")).await.unwrap();

        let found = svc.find_by_term("RED_SHOES").await.unwrap();
        assert_eq!(found.slug, "red_shoes");
    }

    #[tokio::test]
    async fn unknown_term_carries_the_term_in_the_error() {
        let svc = service();
        match svc.find_by_term("no-such-thing").await.unwrap_err() {
            CatalogError::NotFound { term } => assert_eq!(term, "no-such-thing"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn list_respects_limit_and_offset_in_creation_order() {
        let svc = service();
        for i in 1..=5 {
            svc.create(input(&format!("Product {i}"))).await.unwrap();
        }

        let page = svc
            .list(Pagination {
                limit: Some(2),
                offset: Some(1),
            })
            .await
            .unwrap();
        let titles: Vec<_> = page.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Product 2", "Product 3"]);
    }

    #[tokio::test]
    async fn list_defaults_to_ten_from_zero() {
        let svc = service();
        for i in 1..=12 {
            svc.create(input(&format!("Product {i}"))).await.unwrap();
        }

        let page = svc.list(Pagination::default()).await.unwrap();
        assert_eq!(page.len(), 10);
        assert_eq!(page[0].title, "Product 1");
    }

    #[tokio::test]
    async fn update_merges_only_supplied_fields() {
        let svc = service();
        let created = svc.create(input("Red Shoes")).await.unwrap();

        let patch = ProductPatch {
            stock: Some(99),
            ..Default::default()
        };
        let updated = svc.update(created.id, patch).await.unwrap();
        assert_eq!(updated.stock, 99);
        assert_eq!(updated.title, "Red Shoes");
        assert_eq!(updated.slug, "red_shoes");
    }

    #[tokio::test]
    async fn update_renormalizes_patched_slug() {
        let svc = service();
        let created = svc.create(input("Red Shoes")).await.unwrap();

        let patch = ProductPatch {
            slug: Some("Brand New Slug".to_string()),
            ..Default::default()
        };
        let updated = svc.update(created.id, patch).await.unwrap();
        assert_eq!(updated.slug, "brand_new_slug");
    }

    #[tokio::test]
    async fn update_of_missing_id_is_not_found() {
        let svc = service();
        let err = svc
            .update(ProductId::new(404), ProductPatch::default())
            .await
            .unwrap_err();
        match err {
            CatalogError::NotFound { term } => assert!(term.contains("404")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_into_taken_title_is_a_conflict() {
        let svc = service();
        svc.create(input("First")).await.unwrap();
        let second = svc.create(input("Second")).await.unwrap();

        let patch = ProductPatch {
            title: Some("First".to_string()),
            slug: Some("unrelated".to_string()),
            ..Default::default()
        };
        match svc.update(second.id, patch).await.unwrap_err() {
            CatalogError::Conflict(_) => {}
            other => panic!("expected Conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn remove_deletes_the_row() {
        let svc = service();
        let created = svc.create(input("Short Lived")).await.unwrap();

        svc.remove(created.id).await.unwrap();
        match svc.find_by_term(&created.id.to_string()).await.unwrap_err() {
            CatalogError::NotFound { .. } => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn remove_of_missing_id_does_not_mutate_the_store() {
        let svc = service();
        svc.create(input("Survivor")).await.unwrap();

        match svc.remove(ProductId::new(999)).await.unwrap_err() {
            CatalogError::NotFound { term } => assert_eq!(term, "999"),
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert_eq!(svc.list(Pagination::default()).await.unwrap().len(), 1);
    }
}
