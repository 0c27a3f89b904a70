//! Pagination extractor
//!
//! Extracts a page size limit from the query string.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::response::ApiError;

/// Default page size
const DEFAULT_LIMIT: i64 = 20;
/// Maximum page size
const MAX_LIMIT: i64 = 100;

/// Raw pagination query parameters
#[derive(Debug, Deserialize)]
struct PaginationParams {
    #[serde(default)]
    limit: Option<i64>,
}

/// Validated page size limit
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    /// Maximum number of items to return (clamped to 1-100)
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Create pagination with a clamped limit
    pub fn with_limit(limit: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.to_string()))?;

        Ok(Self::with_limit(params.limit.unwrap_or(DEFAULT_LIMIT)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pagination() {
        assert_eq!(Pagination::default().limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_limit_clamping() {
        assert_eq!(Pagination::with_limit(200).limit, MAX_LIMIT);
        assert_eq!(Pagination::with_limit(0).limit, 1);
        assert_eq!(Pagination::with_limit(25).limit, 25);
    }
}
