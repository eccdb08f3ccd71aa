//! Existence lookups against the owning stores.

use async_trait::async_trait;

use crate::error::StoreResult;

/// A reference to an entity owned by another store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef<'a> {
    User(&'a str),
    Event(i64),
}

/// Answers whether referenced entities exist right now.
///
/// A missing entity is `Ok(false)` / `Ok(None)`. An `Err` means the owning
/// store could not give an answer, which is never the same as "missing".
/// Implementations issue one lookup per call and keep no cache.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn exists(&self, entity: EntityRef<'_>) -> StoreResult<bool>;

    /// `Some(is_public)` for an existing event, `None` if it does not exist.
    async fn event_visibility(&self, event_id: i64) -> StoreResult<Option<bool>>;
}
