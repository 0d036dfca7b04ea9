//! Paged scan parameters.

use serde::{Deserialize, Serialize};

/// Limit/offset pair bounding a list query's result window.
///
/// Boundary validation (limit >= 1, offset >= 0) happens before a `Pagination`
/// reaches the store; absent values fall back to the defaults here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Pagination {
    pub const DEFAULT_LIMIT: i64 = 10;

    pub fn effective_limit(&self) -> i64 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }

    pub fn effective_offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }
}
