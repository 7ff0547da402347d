//! # Domain Layer
//!
//! The response schema, effect catalog, and the pure pipeline stages
//! (pre-filter, sanitizer, fallback ladder).
//! This layer is independent of external frameworks and infrastructure.

pub mod error;
pub mod fallback;
pub mod models;
pub mod prefilter;
pub mod sanitize;

pub use error::DomainError;
pub use models::*;
pub use sanitize::sanitize;
