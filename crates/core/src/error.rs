//! Domain error model.

use thiserror::Error;

/// Result type used across the catalog domain.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Domain-level error.
///
/// Classification happens once, at the service boundary: storage failures are
/// either recognized as client-visible conflicts or collapsed into `Internal`
/// after being logged with full detail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Malformed input (bad pagination values, missing required field).
    /// Rejected before touching storage.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A unique constraint (title or slug) was violated. The message carries
    /// the constraint detail and is safe to show to the caller.
    #[error("conflict: {0}")]
    Conflict(String),

    /// No product matched the given lookup term.
    #[error("product with {term} not found")]
    NotFound { term: String },

    /// Any other storage failure. The underlying cause is logged server-side;
    /// callers only ever see this generic message.
    #[error("unexpected error, check server logs")]
    Internal,
}

impl CatalogError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::Conflict(detail.into())
    }

    pub fn not_found(term: impl Into<String>) -> Self {
        Self::NotFound { term: term.into() }
    }
}
