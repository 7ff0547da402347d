use async_trait::async_trait;
use serde_json::Value;

use crate::domain::DomainError;

/// Structured-generation service that turns a drink request into a
/// schema-constrained JSON object.
///
/// Implementors return the provider's raw response envelope, not the drink
/// object itself: the envelope shape is not contractually stable across
/// provider versions, so locating the payload inside it is the extractor's
/// job, and repairing the payload is the sanitizer's.
#[async_trait]
pub trait DrinkGenerator: Send + Sync {
    /// Generate a candidate drink for the sanitized query. Any failure
    /// (timeout, transport, non-success status) surfaces as an error; the
    /// caller degrades to a fallback tier instead of propagating it.
    async fn generate(&self, query: &str) -> Result<Value, DomainError>;
}
