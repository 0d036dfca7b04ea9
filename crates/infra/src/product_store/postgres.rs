//! Postgres-backed product store.
//!
//! ## Error mapping
//!
//! SQLx errors are mapped to `StoreError` as follows:
//!
//! | SQLx error | PostgreSQL code | StoreError | Scenario |
//! |---|---|---|---|
//! | Database (unique violation) | `23505` | `UniqueViolation` | Duplicate title or slug |
//! | Database (other) | any other | `Backend` | Other database errors |
//! | RowNotFound / PoolClosed / ... | n/a | `Backend` | Connection failures etc. |
//!
//! The uniqueness constraints on `title` and `slug` live in the schema, so
//! concurrent writes of the same value are arbitrated by the database: the
//! loser's INSERT/UPDATE fails with `23505`.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::instrument;

use tienda_catalog::Product;
use tienda_core::ProductId;

use super::query::Pagination;
use super::r#trait::{ProductRowInput, ProductStore, StoreError};

/// Postgres-backed product store.
///
/// Clones share the underlying connection pool; every operation is a single
/// statement, so the database's per-statement transaction is the unit of
/// atomicity.
#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: Arc<PgPool>,
}

#[derive(Debug)]
struct ProductRow {
    id: i64,
    title: String,
    price: f64,
    description: Option<String>,
    slug: String,
    stock: i64,
    sizes: String,
    gender: String,
    tags: String,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for ProductRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(ProductRow {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            price: row.try_get("price")?,
            description: row.try_get("description")?,
            slug: row.try_get("slug")?,
            stock: row.try_get("stock")?,
            sizes: row.try_get("sizes")?,
            gender: row.try_get("gender")?,
            tags: row.try_get("tags")?,
        })
    }
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: ProductId::new(row.id),
            title: row.title,
            price: row.price,
            description: row.description,
            slug: row.slug,
            stock: row.stock,
            sizes: row.sizes,
            gender: row.gender,
            tags: row.tags,
        }
    }
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Ensure the products table exists.
    ///
    /// Schema migration tooling is deliberately out of scope; this is the
    /// minimal bootstrap the service needs to come up against an empty
    /// database.
    #[instrument(skip(self), err)]
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id          BIGSERIAL PRIMARY KEY,
                title       TEXT NOT NULL UNIQUE,
                price       DOUBLE PRECISION NOT NULL DEFAULT 0,
                description TEXT,
                slug        TEXT NOT NULL UNIQUE,
                stock       BIGINT NOT NULL DEFAULT 0,
                sizes       TEXT NOT NULL,
                gender      TEXT NOT NULL,
                tags        TEXT NOT NULL
            )
            "#,
        )
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("migrate", e))?;
        Ok(())
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    #[instrument(skip(self, row), fields(title = %row.title, slug = %row.slug), err)]
    async fn insert(&self, row: ProductRowInput) -> Result<Product, StoreError> {
        let created: ProductRow = sqlx::query_as(
            r#"
            INSERT INTO products (title, price, description, slug, stock, sizes, gender, tags)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, title, price, description, slug, stock, sizes, gender, tags
            "#,
        )
        .bind(&row.title)
        .bind(row.price)
        .bind(&row.description)
        .bind(&row.slug)
        .bind(row.stock)
        .bind(&row.sizes)
        .bind(&row.gender)
        .bind(&row.tags)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        Ok(created.into())
    }

    #[instrument(skip(self), fields(limit = page.effective_limit(), offset = page.effective_offset()), err)]
    async fn fetch_page(&self, page: Pagination) -> Result<Vec<Product>, StoreError> {
        // Natural (storage) order; no explicit ORDER BY is part of the contract.
        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, title, price, description, slug, stock, sizes, gender, tags
            FROM products
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(page.effective_limit())
        .bind(page.effective_offset())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("fetch_page", e))?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    #[instrument(skip(self), fields(id = %id), err)]
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let row: Option<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, title, price, description, slug, stock, sizes, gender, tags
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_id", e))?;

        Ok(row.map(Product::from))
    }

    #[instrument(skip(self), err)]
    async fn find_by_title_or_slug(
        &self,
        title_upper: &str,
        slug_lower: &str,
    ) -> Result<Option<Product>, StoreError> {
        let row: Option<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, title, price, description, slug, stock, sizes, gender, tags
            FROM products
            WHERE UPPER(title) = $1 OR slug = $2
            LIMIT 1
            "#,
        )
        .bind(title_upper)
        .bind(slug_lower)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_title_or_slug", e))?;

        Ok(row.map(Product::from))
    }

    #[instrument(skip(self, product), fields(id = %product.id), err)]
    async fn update(&self, product: &Product) -> Result<Product, StoreError> {
        let row: Option<ProductRow> = sqlx::query_as(
            r#"
            UPDATE products
            SET title = $2, price = $3, description = $4, slug = $5,
                stock = $6, sizes = $7, gender = $8, tags = $9
            WHERE id = $1
            RETURNING id, title, price, description, slug, stock, sizes, gender, tags
            "#,
        )
        .bind(product.id.as_i64())
        .bind(&product.title)
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.slug)
        .bind(product.stock)
        .bind(&product.sizes)
        .bind(&product.gender)
        .bind(&product.tags)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        row.map(Product::from).ok_or(StoreError::RowNotFound)
    }

    #[instrument(skip(self), fields(id = %id), err)]
    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_i64())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::RowNotFound);
        }
        Ok(())
    }
}

fn map_sqlx_error(operation: &str, error: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &error {
        if db_err.code().as_deref() == Some("23505") {
            return StoreError::UniqueViolation(db_err.message().to_string());
        }
    }
    StoreError::Backend(format!("{operation}: {error}"))
}
