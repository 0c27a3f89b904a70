//! Request extractors
//!
//! Custom Axum extractors for authentication, pagination, path parameters,
//! and validated JSON bodies.

pub mod auth;
pub mod pagination;
pub mod path;
pub mod validated;

pub use auth::{AuthUser, OptionalAuthUser};
pub use pagination::Pagination;
pub use path::parse_id;
pub use validated::ValidatedJson;
