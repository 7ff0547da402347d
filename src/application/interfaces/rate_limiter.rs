/// Per-source admission gate consulted before the pipeline runs.
///
/// Callers identify a source (typically the client IP) and receive a
/// consume/reject decision. On reject the request is answered with a
/// fallback without invoking any downstream stage.
pub trait RateLimiter: Send + Sync {
    /// Consume one slot for `key`. Returns `false` when the source has
    /// exhausted its budget for the current window.
    fn try_acquire(&self, key: &str) -> bool;
}
