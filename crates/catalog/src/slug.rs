//! Slug normalization.
//!
//! A slug is the URL-safe alternate lookup key of a product. The same
//! normalization runs on every insert and every update, so a slug stored by
//! this service is always in normal form.

/// Normalize a slug candidate: lowercase, spaces become underscores,
/// apostrophes are removed.
///
/// Idempotent: normalizing an already-normalized string is a no-op.
pub fn normalize_slug(value: &str) -> String {
    value
        .to_lowercase()
        .replace(' ', "_")
        .replace('\'', "")
}
