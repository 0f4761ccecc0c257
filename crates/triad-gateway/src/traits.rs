use async_trait::async_trait;

use triad_types::Content;

/// Resolves a content identifier to its published content.
///
/// Implementations must satisfy these invariants:
/// - A fetch never fails loudly: exhausting every source yields `None`,
///   which callers treat as a first-class, expected outcome.
/// - Resolution is read-only; the store is never mutated.
/// - Concurrent fetches are safe (`Send + Sync`).
#[async_trait]
pub trait ContentGateway: Send + Sync {
    /// Resolve `cid` to content, or `None` if it is unavailable everywhere.
    async fn fetch(&self, cid: &str) -> Option<Content>;
}
