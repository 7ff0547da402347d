use async_trait::async_trait;

use crate::domain::DomainError;

/// External content-safety classifier consulted before spending a
/// generation call.
///
/// The gate is advisory: implementors report transport failures and
/// timeouts as errors, and the pipeline treats those as a pass rather than
/// denying service. Only an explicit `true` verdict blocks generation.
#[async_trait]
pub trait ModerationGate: Send + Sync {
    /// Returns `true` when the classifier flags the text as unsafe.
    async fn flagged(&self, text: &str) -> Result<bool, DomainError>;
}
