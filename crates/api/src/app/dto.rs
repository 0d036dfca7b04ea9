use axum::http::StatusCode;
use serde::Deserialize;

use tienda_catalog::{CreateProduct, Product, ProductPatch};
use tienda_infra::Pagination;

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub title: String,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub stock: Option<i64>,
    pub sizes: String,
    pub gender: String,
    pub tags: String,
}

impl From<CreateProductRequest> for CreateProduct {
    fn from(req: CreateProductRequest) -> Self {
        CreateProduct {
            title: req.title,
            price: req.price,
            description: req.description,
            slug: req.slug,
            stock: req.stock,
            sizes: req.sizes,
            gender: req.gender,
            tags: req.tags,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub stock: Option<i64>,
    pub sizes: Option<String>,
    pub gender: Option<String>,
    pub tags: Option<String>,
}

impl From<UpdateProductRequest> for ProductPatch {
    fn from(req: UpdateProductRequest) -> Self {
        ProductPatch {
            title: req.title,
            price: req.price,
            description: req.description,
            slug: req.slug,
            stock: req.stock,
            sizes: req.sizes,
            gender: req.gender,
            tags: req.tags,
        }
    }
}

/// Query-string pagination. Values arrive as strings and are coerced to
/// integers by the query deserializer; range validation happens here, before
/// anything reaches the service.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationQuery {
    pub fn validate(self) -> Result<Pagination, axum::response::Response> {
        if let Some(limit) = self.limit {
            if limit < 1 {
                return Err(errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    "limit must be a positive number",
                ));
            }
        }
        if let Some(offset) = self.offset {
            if offset < 0 {
                return Err(errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    "offset must not be negative",
                ));
            }
        }
        Ok(Pagination {
            limit: self.limit,
            offset: self.offset,
        })
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn product_to_json(product: Product) -> serde_json::Value {
    serde_json::json!({
        "id": product.id,
        "title": product.title,
        "price": product.price,
        "description": product.description,
        "slug": product.slug,
        "stock": product.stock,
        "sizes": product.sizes,
        "gender": product.gender,
        "tags": product.tags,
    })
}
